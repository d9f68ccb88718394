use crate::config::schema::{ChecksConfig, SiteConfig};
use crate::error::{Error, Result};
use crate::state::{FetchStatus, Page, Post, Product, SiteState, SourceReport};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Meta key Elementor writes on pages it has edited.
const ELEMENTOR_META_KEY: &str = "_elementor_data";

struct WooCommerceApi {
    base: Url,
    consumer_key: String,
    consumer_secret: String,
}

/// Client for the WordPress and WooCommerce REST APIs. Holds its own
/// configuration; nothing ambient.
pub struct WordPressConnector {
    client: Client,
    wp_base: Url,
    username: String,
    password: String,
    woocommerce: Option<WooCommerceApi>,
    checks: ChecksConfig,
}

impl WordPressConnector {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("sitecheck/0.1")
            .build()?;

        let woocommerce = match &config.woocommerce {
            Some(wc) if wc.is_configured() => Some(WooCommerceApi {
                base: parse_base(&wc.api_url)?,
                consumer_key: wc.consumer_key.clone(),
                consumer_secret: wc.consumer_secret.clone(),
            }),
            _ => {
                log::warn!("WooCommerce API not configured (optional)");
                None
            }
        };

        Ok(Self {
            client,
            wp_base: parse_base(&config.wordpress.api_url)?,
            username: config.wordpress.application_password.username.clone(),
            password: config.wordpress.application_password.password.clone(),
            woocommerce,
            checks: config.checks.clone(),
        })
    }

    pub fn woocommerce_configured(&self) -> bool {
        self.woocommerce.is_some()
    }

    pub async fn fetch_pages(&self) -> Result<Vec<Page>> {
        let url = self.wp_base.join("pages")?;
        self.fetch_collection(url, &self.username, &self.password).await
    }

    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let url = self.wp_base.join("posts")?;
        self.fetch_collection(url, &self.username, &self.password).await
    }

    /// Returns an empty sequence, without issuing any request, when
    /// WooCommerce credentials are not configured.
    pub async fn fetch_products(&self) -> Result<Vec<Product>> {
        let Some(wc) = &self.woocommerce else {
            return Ok(Vec::new());
        };

        let url = wc.base.join("products")?;
        self.fetch_collection(url, &wc.consumer_key, &wc.consumer_secret)
            .await
    }

    /// Whether the given page carries the Elementor meta key. Any failure
    /// degrades to None.
    pub async fn fetch_elementor_data(&self, page_id: u64) -> Option<bool> {
        match self.probe_page(page_id).await {
            Ok(has_elementor) => Some(has_elementor),
            Err(e) => {
                log::debug!("Elementor probe failed for page {}: {}", page_id, e);
                None
            }
        }
    }

    /// Fetches all collections and assembles the snapshot. Fetch failures are
    /// logged and degraded to empty sequences; only the source report records
    /// that anything went wrong.
    pub async fn get_site_state(&self, multi: Option<&MultiProgress>) -> SiteState {
        log::info!("Fetching site state...");

        let (pages, pages_status) = match self.fetch_pages().await {
            Ok(pages) => (pages, FetchStatus::Ok),
            Err(e) => {
                log::error!("Error fetching pages: {}", e);
                (Vec::new(), FetchStatus::Failed { reason: e.to_string() })
            }
        };

        let (posts, posts_status) = match self.fetch_posts().await {
            Ok(posts) => (posts, FetchStatus::Ok),
            Err(e) => {
                log::error!("Error fetching posts: {}", e);
                (Vec::new(), FetchStatus::Failed { reason: e.to_string() })
            }
        };

        let (products, products_status) = if self.woocommerce.is_some() {
            match self.fetch_products().await {
                Ok(products) => (products, FetchStatus::Ok),
                Err(e) => {
                    log::error!("Error fetching products: {}", e);
                    (Vec::new(), FetchStatus::Failed { reason: e.to_string() })
                }
            }
        } else {
            (Vec::new(), FetchStatus::Skipped)
        };

        let elementor_pages = self.probe_elementor_pages(&pages, multi).await;

        SiteState::new(
            pages,
            posts,
            products,
            elementor_pages,
            SourceReport {
                pages: pages_status,
                posts: posts_status,
                products: products_status,
            },
        )
    }

    /// Probes the first `elementor_probe_limit` pages for page-builder usage
    /// and collects their rendered titles.
    async fn probe_elementor_pages(
        &self,
        pages: &[Page],
        multi: Option<&MultiProgress>,
    ) -> Vec<String> {
        let limit = self.checks.elementor_probe_limit;
        let to_probe = &pages[..pages.len().min(limit)];

        let pb = multi.map(|m| {
            let pb = m.add(ProgressBar::new(to_probe.len() as u64));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} Probing Elementor usage [{bar:30.cyan/blue}] {pos}/{len}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        });

        let mut elementor_pages = Vec::new();
        for page in to_probe {
            if self.fetch_elementor_data(page.id).await == Some(true) {
                let title = if page.title.rendered.is_empty() {
                    "Untitled".to_string()
                } else {
                    page.title.rendered.clone()
                };
                elementor_pages.push(title);
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        elementor_pages
    }

    async fn probe_page(&self, page_id: u64) -> Result<bool> {
        let url = self.wp_base.join(&format!("pages/{}", page_id))?;
        let res = self
            .client
            .get(url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let page: Page = res.json().await?;
        Ok(page.meta.get(ELEMENTOR_META_KEY).is_some())
    }

    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        url: Url,
        username: &str,
        password: &str,
    ) -> Result<Vec<T>> {
        log::info!("Fetching {}", url);

        let res = self
            .client
            .get(url.clone())
            .basic_auth(username, Some(password))
            .query(&[("per_page", self.checks.per_page)])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(res.json().await?)
    }
}

/// Normalizes a configured base URL so `Url::join` appends instead of
/// replacing the last path segment.
fn parse_base(raw: &str) -> Result<Url> {
    let mut base = raw.trim_end_matches('/').to_string();
    base.push('/');
    Ok(Url::parse(&base)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_join_appends_segments() {
        let base = parse_base("https://example.com/wp-json/wp/v2").unwrap();
        let url = base.join("pages").unwrap();
        assert_eq!(url.as_str(), "https://example.com/wp-json/wp/v2/pages");

        let url = base.join("pages/42").unwrap();
        assert_eq!(url.as_str(), "https://example.com/wp-json/wp/v2/pages/42");
    }
}

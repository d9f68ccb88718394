use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SiteConfig {
    #[validate]
    pub wordpress: WordPressConfig,

    /// Optional; products are skipped entirely when absent.
    #[serde(default)]
    pub woocommerce: Option<WooCommerceConfig>,

    #[serde(default)]
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WordPressConfig {
    #[validate]
    pub application_password: Credentials,

    #[validate(length(min = 1))]
    pub api_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WooCommerceConfig {
    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default)]
    pub api_url: String,
}

impl WooCommerceConfig {
    /// A blank key, secret or URL counts as "not configured".
    pub fn is_configured(&self) -> bool {
        !self.consumer_key.is_empty() && !self.consumer_secret.is_empty() && !self.api_url.is_empty()
    }
}

/// Tunable checklist heuristics. The defaults reproduce the historical
/// behavior: 100 records per collection, at most 10 Elementor probes per run,
/// substring-based page-type detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Hard cap on the number of per-page metadata requests issued per run.
    /// elementor_pages is an undercount whenever more pages exist.
    #[serde(default = "default_probe_limit")]
    pub elementor_probe_limit: usize,

    #[serde(default = "default_min_products")]
    pub min_products: usize,

    #[serde(default = "default_homepage_keyword")]
    pub homepage_keyword: String,

    #[serde(default = "default_gallery_keyword")]
    pub gallery_keyword: String,

    #[serde(default = "default_customise_slugs")]
    pub customise_slugs: Vec<String>,

    /// Matched as a title substring, so unrelated words containing it also
    /// count. Known over-broad.
    #[serde(default = "default_customise_title_keyword")]
    pub customise_title_keyword: String,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            elementor_probe_limit: default_probe_limit(),
            min_products: default_min_products(),
            homepage_keyword: default_homepage_keyword(),
            gallery_keyword: default_gallery_keyword(),
            customise_slugs: default_customise_slugs(),
            customise_title_keyword: default_customise_title_keyword(),
        }
    }
}

fn default_per_page() -> u32 {
    100
}

fn default_probe_limit() -> usize {
    10
}

fn default_min_products() -> usize {
    3
}

fn default_homepage_keyword() -> String {
    "home".to_string()
}

fn default_gallery_keyword() -> String {
    "gallery".to_string()
}

fn default_customise_slugs() -> Vec<String> {
    vec!["customise".to_string(), "customize".to_string()]
}

fn default_customise_title_keyword() -> String {
    "custom".to_string()
}

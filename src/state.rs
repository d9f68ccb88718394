use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rendered-text wrapper used by the WordPress REST API for titles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// A WordPress page. Only the inspected fields are typed; everything else the
/// API returned is carried through `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub title: Rendered,

    #[serde(default)]
    pub meta: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub title: Rendered,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A WooCommerce product. `price` is a string on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub images: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Derived counts; purely a projection of the surrounding SiteState.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_pages: usize,
    pub published_pages: usize,
    pub total_posts: usize,
    pub total_products: usize,
    pub elementor_pages_count: usize,
}

/// Outcome of one collection fetch, so an empty sequence caused by a failed
/// request can be told apart from a legitimately empty site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FetchStatus {
    Ok,
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub pages: FetchStatus,
    pub posts: FetchStatus,
    pub products: FetchStatus,
}

/// Aggregated snapshot of remote site content. Built fresh on every fetch and
/// never mutated afterwards; the durable record written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteState {
    pub pages: Vec<Page>,
    pub posts: Vec<Post>,
    pub products: Vec<Product>,
    /// Rendered titles of pages detected as Elementor-built.
    pub elementor_pages: Vec<String>,
    pub stats: Stats,
    pub sources: SourceReport,
}

impl SiteState {
    pub fn new(
        pages: Vec<Page>,
        posts: Vec<Post>,
        products: Vec<Product>,
        elementor_pages: Vec<String>,
        sources: SourceReport,
    ) -> Self {
        let stats = Stats {
            total_pages: pages.len(),
            published_pages: pages.iter().filter(|p| p.status == "publish").count(),
            total_posts: posts.len(),
            total_products: products.len(),
            elementor_pages_count: elementor_pages.len(),
        };

        Self {
            pages,
            posts,
            products,
            elementor_pages,
            stats,
            sources,
        }
    }
}

impl Default for SourceReport {
    fn default() -> Self {
        Self {
            pages: FetchStatus::Ok,
            posts: FetchStatus::Ok,
            products: FetchStatus::Ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(slug: &str, title: &str, status: &str) -> Page {
        Page {
            slug: slug.to_string(),
            status: status.to_string(),
            title: Rendered {
                rendered: title.to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn stats_are_a_projection_of_the_state() {
        let state = SiteState::new(
            vec![
                page("home", "Home", "publish"),
                page("draft-page", "Draft", "draft"),
            ],
            vec![Post::default()],
            vec![Product::default()],
            vec!["Home".to_string()],
            SourceReport::default(),
        );

        assert_eq!(state.stats.total_pages, 2);
        assert_eq!(state.stats.published_pages, 1);
        assert_eq!(state.stats.total_posts, 1);
        assert_eq!(state.stats.total_products, 1);
        assert_eq!(state.stats.elementor_pages_count, state.elementor_pages.len());
    }

    #[test]
    fn unknown_api_fields_round_trip_through_extra() {
        let raw = json!({
            "id": 7,
            "slug": "home",
            "status": "publish",
            "title": {"rendered": "Home"},
            "link": "https://example.com/home",
            "menu_order": 2
        });

        let page: Page = serde_json::from_value(raw).unwrap();
        assert_eq!(page.extra.get("menu_order"), Some(&json!(2)));

        let back = serde_json::to_value(&page).unwrap();
        assert_eq!(back.get("link"), Some(&json!("https://example.com/home")));
    }

    #[test]
    fn product_price_and_images_deserialize() {
        let raw = json!({
            "id": 3,
            "name": "Red Sash",
            "status": "publish",
            "price": "120",
            "images": [{"src": "https://example.com/sash.jpg"}]
        });

        let product: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(product.price, "120");
        assert_eq!(product.images.len(), 1);
    }
}

use crate::config::schema::ChecksConfig;
use crate::state::SiteState;
use serde::{Deserialize, Serialize};

/// Phase 1: Foundation & Setup. Structural proxies: presence of any record of
/// a kind is treated as "feature active".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase1 {
    pub wordpress_installed: bool,
    pub woocommerce_active: bool,
    pub elementor_active: bool,
}

/// Phase 2: Product Catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase2 {
    pub products_created: usize,
    pub products_published: usize,
    pub products_with_images: usize,
}

/// Phase 4: Entry Paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase4 {
    pub homepage_exists: bool,
    pub gallery_page_exists: bool,
    pub customise_page_exists: bool,
}

/// Checklist evaluation over one SiteState. A pure function of its input;
/// recomputed on every check, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub phase_1: Phase1,
    pub phase_2: Phase2,
    pub phase_4: Phase4,
}

pub fn check_phase_1(state: &SiteState) -> Phase1 {
    Phase1 {
        wordpress_installed: !state.pages.is_empty(),
        woocommerce_active: !state.products.is_empty(),
        elementor_active: !state.elementor_pages.is_empty(),
    }
}

pub fn check_phase_2(state: &SiteState) -> Phase2 {
    Phase2 {
        products_created: state.products.len(),
        products_published: state
            .products
            .iter()
            .filter(|p| p.status == "publish")
            .count(),
        products_with_images: state
            .products
            .iter()
            .filter(|p| !p.images.is_empty())
            .count(),
    }
}

/// Slugs are matched exactly, titles by substring, both case-insensitively.
/// The title substring match is over-broad on purpose: "Customer FAQ" counts
/// as a customise page.
pub fn check_phase_4(state: &SiteState, checks: &ChecksConfig) -> Phase4 {
    let slugs: Vec<String> = state.pages.iter().map(|p| p.slug.to_lowercase()).collect();
    let titles: Vec<String> = state
        .pages
        .iter()
        .map(|p| p.title.rendered.to_lowercase())
        .collect();

    let slug_or_title = |keyword: &str| {
        slugs.iter().any(|s| s == keyword) || titles.iter().any(|t| t.contains(keyword))
    };

    let customise = checks
        .customise_slugs
        .iter()
        .any(|wanted| slugs.iter().any(|s| s == &wanted.to_lowercase()))
        || titles
            .iter()
            .any(|t| t.contains(&checks.customise_title_keyword.to_lowercase()));

    Phase4 {
        homepage_exists: slug_or_title(&checks.homepage_keyword.to_lowercase()),
        gallery_page_exists: slug_or_title(&checks.gallery_keyword.to_lowercase()),
        customise_page_exists: customise,
    }
}

pub fn check_all_phases(state: &SiteState, checks: &ChecksConfig) -> ProgressReport {
    ProgressReport {
        phase_1: check_phase_1(state),
        phase_2: check_phase_2(state),
        phase_4: check_phase_4(state, checks),
    }
}

/// Fixed priority chain, evaluated top-down; exactly one suggestion per
/// report.
pub fn next_step(progress: &ProgressReport, checks: &ChecksConfig) -> String {
    if !progress.phase_1.wordpress_installed {
        "Set up WordPress and install required plugins".to_string()
    } else if !progress.phase_1.woocommerce_active {
        "Install and activate WooCommerce".to_string()
    } else if progress.phase_2.products_created == 0 {
        "Create your first product".to_string()
    } else if progress.phase_2.products_created < checks.min_products {
        format!(
            "Create {} more test products",
            checks.min_products - progress.phase_2.products_created
        )
    } else if !progress.phase_4.homepage_exists {
        "Build the homepage in Elementor".to_string()
    } else if !progress.phase_4.gallery_page_exists {
        "Create the gallery page".to_string()
    } else {
        "Continue with Phase 3: Customization System".to_string()
    }
}

use crate::checker::{next_step, ProgressReport};
use crate::config::schema::ChecksConfig;
use crate::state::{FetchStatus, SiteState};

fn check_mark(ok: bool) -> &'static str {
    if ok { "✅" } else { "❌" }
}

fn title_or_untitled(rendered: &str) -> &str {
    if rendered.is_empty() { "Untitled" } else { rendered }
}

pub fn print_site_state(state: &SiteState) {
    let stats = &state.stats;

    println!("\n{}", "=".repeat(60));
    println!("📊 SITE STATE");
    println!("{}", "=".repeat(60));

    println!(
        "\n📄 Pages: {} total, {} published",
        stats.total_pages, stats.published_pages
    );
    if !state.pages.is_empty() {
        println!("\n   Published Pages:");
        for page in state.pages.iter().take(10) {
            if page.status == "publish" {
                println!(
                    "   • {} ({})",
                    title_or_untitled(&page.title.rendered),
                    page.slug
                );
            }
        }
    }

    println!("\n📝 Posts: {} total", stats.total_posts);

    println!("\n🛍️  Products: {} total", stats.total_products);
    if !state.products.is_empty() {
        println!("\n   Products:");
        for product in state.products.iter().take(10) {
            println!(
                "   • {} - {} ({})",
                product.name, product.price, product.status
            );
        }
    }

    println!(
        "\n🎨 Elementor Pages: {} pages built with Elementor",
        stats.elementor_pages_count
    );
    if !state.elementor_pages.is_empty() {
        println!("\n   Elementor-built Pages:");
        for title in &state.elementor_pages {
            println!("   • {}", title);
        }
    }

    print_source_warnings(state);

    println!("\n{}", "=".repeat(60));
    println!("\n✅ Site state fetched successfully!");
}

pub fn print_progress_report(progress: &ProgressReport, state: &SiteState, checks: &ChecksConfig) {
    println!("\n{}", "=".repeat(60));
    println!("📊 PROGRESS REPORT");
    println!("{}", "=".repeat(60));

    let p1 = &progress.phase_1;
    println!("\n🔧 Phase 1: Foundation & Setup");
    println!("   WordPress Installed: {}", check_mark(p1.wordpress_installed));
    println!("   WooCommerce Active: {}", check_mark(p1.woocommerce_active));
    println!("   Elementor Active: {}", check_mark(p1.elementor_active));

    let p2 = &progress.phase_2;
    println!("\n🛍️  Phase 2: Product Catalog");
    println!("   Products Created: {}", p2.products_created);
    println!("   Products Published: {}", p2.products_published);
    println!("   Products with Images: {}", p2.products_with_images);

    let p4 = &progress.phase_4;
    println!("\n🚪 Phase 4: Entry Paths");
    println!("   Homepage: {}", check_mark(p4.homepage_exists));
    println!("   Gallery Page: {}", check_mark(p4.gallery_page_exists));
    println!("   Customise Page: {}", check_mark(p4.customise_page_exists));

    let stats = &state.stats;
    println!("\n📈 Overall Stats");
    println!("   Total Pages: {}", stats.total_pages);
    println!("   Published Pages: {}", stats.published_pages);
    println!("   Total Products: {}", stats.total_products);
    println!("   Elementor Pages: {}", stats.elementor_pages_count);

    print_source_warnings(state);

    println!("\n{}", "=".repeat(60));
    println!("\n💡 Next Step:");
    println!("   → {}", next_step(progress, checks));
    println!();
}

/// Empty collections caused by failed fetches would otherwise be
/// indistinguishable from an empty site.
fn print_source_warnings(state: &SiteState) {
    for (name, status) in [
        ("pages", &state.sources.pages),
        ("posts", &state.sources.posts),
        ("products", &state.sources.products),
    ] {
        match status {
            FetchStatus::Failed { reason } => {
                println!("\n⚠️  Fetching {} failed: {}", name, reason)
            }
            FetchStatus::Skipped => {
                println!("\n⚠️  Skipped {} (WooCommerce not configured)", name)
            }
            FetchStatus::Ok => {}
        }
    }
}

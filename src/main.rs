use clap::{Parser, Subcommand};
use indicatif::MultiProgress;
use sitecheck::checker::check_all_phases;
use sitecheck::config::ConfigLoader;
use sitecheck::connector::WordPressConnector;
use sitecheck::output::{console, json};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "sitecheck")]
#[command(version = "0.1.0")]
#[command(about = "WordPress/WooCommerce site-state fetcher and progress checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current site state and save it as JSON
    Fetch {
        /// Path to the configuration file (JSON/YAML/TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Where to write the snapshot
        #[arg(short, long, default_value = "site_state.json")]
        output: PathBuf,

        /// Show progress bars (stderr)
        #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
        progress: bool,
    },
    /// Fetch the site state and score it against the checklist
    Check {
        /// Path to the configuration file (JSON/YAML/TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Where to write the combined report
        #[arg(short, long, default_value = "progress_report.json")]
        output: PathBuf,

        /// Show progress bars (stderr)
        #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
        progress: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info"); }
    }
    let cli = Cli::parse();
    let logger = env_logger::Builder::from_default_env().build();
    let multi = Arc::new(MultiProgress::new());

    let progress_enabled = match &cli.command {
        Commands::Fetch { progress, .. } | Commands::Check { progress, .. } => *progress,
        Commands::Validate { .. } => false,
    };
    if progress_enabled {
        indicatif_log_bridge::LogWrapper::new((*multi).clone(), logger)
            .try_init()
            .unwrap();
    } else {
        log::set_boxed_logger(Box::new(logger)).unwrap();
        log::set_max_level(log::LevelFilter::Info);
    }

    tokio::select! {
        result = run(cli.command, multi) => result,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted by user");
            std::process::exit(1);
        }
    }
}

async fn run(command: Commands, multi: Arc<MultiProgress>) -> anyhow::Result<()> {
    match command {
        Commands::Fetch { config, output, progress } => {
            log::info!("Loading config from {:?}", config);
            let config_data = ConfigLoader::load(&config)?;

            let connector = WordPressConnector::new(&config_data)?;
            let state = connector
                .get_site_state(progress.then_some(multi.as_ref()))
                .await;

            console::print_site_state(&state);
            json::save_site_state(&output, &state)?;
            println!("\n💾 Full state saved to: {}", output.display());
        }
        Commands::Check { config, output, progress } => {
            log::info!("Loading config from {:?}", config);
            let config_data = ConfigLoader::load(&config)?;

            let connector = WordPressConnector::new(&config_data)?;
            let state = connector
                .get_site_state(progress.then_some(multi.as_ref()))
                .await;

            let report = check_all_phases(&state, &config_data.checks);
            console::print_progress_report(&report, &state, &config_data.checks);
            json::save_progress_report(&output, &report, &state)?;
            println!("💾 Progress report saved to: {}", output.display());
        }
        Commands::Validate { config } => {
            match ConfigLoader::load(&config) {
                Ok(cfg) => {
                    println!("✅ Config is valid:");
                    println!("   WordPress API: {}", cfg.wordpress.api_url);
                    println!(
                        "   WooCommerce: {}",
                        match &cfg.woocommerce {
                            Some(wc) if wc.is_configured() => "configured",
                            _ => "not configured",
                        }
                    );
                    println!("   Elementor probe limit: {}", cfg.checks.elementor_probe_limit);
                }
                Err(e) => {
                    eprintln!("❌ Config error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_flag_accepts_explicit_false() {
        let cli = Cli::try_parse_from([
            "sitecheck", "fetch", "--config", "config.json", "--progress", "false",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch { progress, .. } => assert!(!progress),
            _ => panic!("expected the fetch subcommand"),
        }
    }

    #[test]
    fn progress_defaults_to_enabled() {
        let cli = Cli::try_parse_from(["sitecheck", "check", "--config", "config.json"]).unwrap();
        match cli.command {
            Commands::Check { progress, .. } => assert!(progress),
            _ => panic!("expected the check subcommand"),
        }
    }
}

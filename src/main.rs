//! Feed Weights entry point
//!
//! Native CLI over the file-backed store. The web build is driven through
//! the `web` bindings in the library instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    use feed_weights::engine::boost_json;
    use feed_weights::platform::FileStore;
    use feed_weights::{BoostOutcome, BoostReport, Category, FeedTuner, FeedWeights, TunerConfig};

    /// Width of a 100% bar in columns
    const BAR_WIDTH: u32 = 40;

    #[derive(Parser, Debug)]
    #[command(name = "feed-weights", version, about = "Tune feed category weights")]
    pub struct Cli {
        /// Directory holding the stored weights
        #[arg(long, env = "FEED_WEIGHTS_DIR")]
        data_dir: Option<PathBuf>,

        /// Storage key (one record per user/installation)
        #[arg(long, env = "FEED_WEIGHTS_KEY", default_value = feed_weights::persistence::STORAGE_KEY)]
        key: String,

        /// Verbose logging (-v info, -vv debug)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,

        #[command(subcommand)]
        command: Option<Command>,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Show the current distribution
        Show,
        /// Shift emphasis toward a category
        Boost {
            /// family, communities, trending or chronological
            category: Category,
        },
        /// Restore the default distribution
        Reset,
        /// Print the boost report for a given distribution without touching storage
        Preview {
            /// family, communities, trending or chronological
            category: Category,
            /// Distribution as JSON, e.g. '{"family":40,"communities":30,"trending":20,"chronological":10}'
            weights: String,
        },
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();

        let level = match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        };
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();

        if let Some(Command::Preview { category, weights }) = &cli.command {
            println!("{}", preview(weights, *category)?);
            return Ok(());
        }

        let data_dir = cli
            .data_dir
            .or_else(|| dirs::data_dir().map(|d| d.join("feed-weights")))
            .ok_or("no data directory available; pass --data-dir")?;
        log::info!("Using data directory {}", data_dir.display());

        let config = TunerConfig::with_storage_key(cli.key);
        let mut tuner = FeedTuner::open(FileStore::new(data_dir), &config);

        match cli.command.unwrap_or(Command::Show) {
            Command::Show => {}
            Command::Boost { category } => {
                let before = *tuner.weights();
                match tuner.boost(category)? {
                    BoostOutcome::Applied(after) if after == before => println!(
                        "{} unchanged: nothing left to shift after rounding",
                        category.label()
                    ),
                    BoostOutcome::Applied(_) => println!("Boosted {}", category.label()),
                    BoostOutcome::LimitReached(_) => println!(
                        "{} is already at the {}% limit",
                        category.label(),
                        tuner.policy().ceiling
                    ),
                }
            }
            Command::Reset => {
                tuner.reset();
                println!("Restored default weights");
            }
            Command::Preview { .. } => {}
        }

        print!("{}", render_bars(tuner.weights()));
        Ok(())
    }

    /// Boost report for a JSON distribution, as JSON
    pub fn preview(weights: &str, category: Category) -> Result<String, Box<dyn std::error::Error>> {
        let value: serde_json::Value = serde_json::from_str(weights)?;
        let result = boost_json(&value, category, &TunerConfig::default().policy);
        Ok(serde_json::to_string(&BoostReport::from(&result))?)
    }

    /// One labelled bar per category
    pub fn render_bars(weights: &FeedWeights) -> String {
        let dominant = weights.dominant();
        let mut out = String::new();
        for (category, value) in weights.iter() {
            let filled = (value * BAR_WIDTH / FeedWeights::TOTAL) as usize;
            let marker = if category == dominant { "*" } else { " " };
            out.push_str(&format!(
                "{}{:<14}{:<width$} {:>3}%\n",
                marker,
                category.label(),
                "█".repeat(filled),
                value,
                width = BAR_WIDTH as usize
            ));
        }
        out
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;

        #[test]
        fn test_cli_definition() {
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parses_boost_category() {
            let cli = Cli::try_parse_from(["feed-weights", "boost", "Trending"]).unwrap();
            assert!(matches!(
                cli.command,
                Some(Command::Boost {
                    category: Category::Trending
                })
            ));
            assert!(Cli::try_parse_from(["feed-weights", "boost", "memes"]).is_err());
        }

        #[test]
        fn test_preview_reports() {
            let ok = preview(
                r#"{"family":40,"communities":30,"trending":20,"chronological":10}"#,
                Category::Family,
            )
            .unwrap();
            let report: BoostReport = serde_json::from_str(&ok).unwrap();
            assert_eq!(report.weights, Some(FeedWeights::new(50, 25, 17, 8)));

            let missing = preview(r#"{"family":40,"communities":60}"#, Category::Family).unwrap();
            assert_eq!(missing, r#"{"ok":false,"reason":"invalid-input"}"#);

            let limit = preview(
                r#"{"family":70,"communities":10,"trending":10,"chronological":10}"#,
                Category::Family,
            )
            .unwrap();
            assert_eq!(limit, r#"{"ok":false,"reason":"limit-reached"}"#);

            assert!(preview("not json", Category::Family).is_err());
        }

        #[test]
        fn test_render_bars() {
            let out = render_bars(&FeedWeights::default());
            let lines: Vec<&str> = out.lines().collect();
            assert_eq!(lines.len(), 4);
            assert!(lines[0].starts_with("*Family"));
            assert!(lines[0].ends_with(" 40%"));
            assert_eq!(lines[0].matches('█').count(), 16);
            assert!(lines[3].starts_with(" Chronological"));
            assert_eq!(lines[3].matches('█').count(), 4);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}

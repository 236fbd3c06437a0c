use crate::domain::model::IndustryKind;
use crate::domain::model::WeightVector;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

pub const DEFAULT_CONFIG_PATH: &str = "site-score.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "site-score")]
#[command(about = "Scores a location for business suitability across five pillars")]
pub struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[arg(long, global = true, env = "SITE_SCORE_TOKEN", default_value = "")]
    pub token: String,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a new analysis and store it
    Analyze(AnalyzeArgs),
    /// List stored analyses, newest first
    History {
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print one stored analysis
    Show { id: Uuid },
}

#[derive(Debug, Clone, clap::Args)]
pub struct AnalyzeArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    #[arg(long, help = "F&B, Retail or Service")]
    pub industry: IndustryKind,

    #[arg(long)]
    pub sub_type: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long, help = "Search radius in meters [100, 5000]")]
    pub radius: Option<u32>,

    #[arg(long, help = "Five comma-separated pillar weights a,b,c,d,e")]
    pub weights: Option<WeightVector>,
}

impl Cli {
    /// The default config path may be missing; an explicit one may not.
    pub fn config_is_default(&self) -> bool {
        self.config.as_os_str() == DEFAULT_CONFIG_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "site-score",
            "--token",
            "secret",
            "analyze",
            "--lat",
            "-33.86",
            "--lng",
            "151.2",
            "--industry",
            "f&b",
            "--weights",
            "0.2,0.2,0.2,0.2,0.2",
        ])
        .unwrap();

        assert_eq!(cli.token, "secret");
        assert!(cli.config_is_default());
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.lat, -33.86);
                assert_eq!(args.industry, IndustryKind::FoodAndBeverage);
                assert_eq!(args.weights.map(|w| w.e), Some(0.2));
                assert!(args.radius.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_and_show() {
        let cli = Cli::try_parse_from([
            "site-score",
            "history",
            "--page",
            "2",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(!cli.config_is_default());
        assert!(matches!(
            cli.command,
            Command::History {
                page: Some(2),
                limit: None
            }
        ));

        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from(["site-score", "show", &id.to_string()]).unwrap();
        assert!(matches!(cli.command, Command::Show { id: parsed } if parsed == id));
    }

    #[test]
    fn test_rejects_unknown_industry() {
        assert!(Cli::try_parse_from([
            "site-score",
            "analyze",
            "--lat",
            "1",
            "--lng",
            "2",
            "--industry",
            "mining",
        ])
        .is_err());
    }
}

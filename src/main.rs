use clap::Parser;
use site_score::config::cli::{AnalyzeArgs, Command};
use site_score::utils::error::ErrorCategory;
use site_score::utils::{logger, validation::Validate};
use site_score::{
    AnalyzeRequest, Cli, ConfiguredService, EngineConfig, Industry, Location, ScoringError,
};

fn load_config(cli: &Cli) -> site_score::Result<EngineConfig> {
    if cli.config_is_default() && !cli.config.exists() {
        tracing::debug!("No {} found, using built-in defaults", cli.config.display());
        return Ok(EngineConfig::default());
    }
    tracing::debug!("Loading configuration from {}", cli.config.display());
    EngineConfig::from_file(&cli.config)
}

fn exit_code(e: &ScoringError) -> i32 {
    match e.category() {
        ErrorCategory::Validation | ErrorCategory::Configuration => 1,
        ErrorCategory::Authorization => 2,
        ErrorCategory::Upstream | ErrorCategory::Storage => 3,
    }
}

fn analyze_request(args: AnalyzeArgs, config: &EngineConfig) -> AnalyzeRequest {
    let mut location = Location::new(args.lat, args.lng);
    if let Some(address) = args.address {
        location = location.with_address(address);
    }

    let mut industry = Industry::new(args.industry);
    if let Some(sub_type) = args.sub_type {
        industry = industry.with_sub_type(sub_type);
    }

    AnalyzeRequest {
        location,
        industry,
        radius_m: args.radius.unwrap_or(config.engine.default_radius_m),
        weights: args.weights,
    }
}

async fn run(cli: Cli, config: EngineConfig) -> anyhow::Result<()> {
    let service = ConfiguredService::from_config(&config)?;

    let output = match cli.command {
        Command::Analyze(args) => {
            let result = service
                .analyze(&cli.token, analyze_request(args, &config))
                .await?;
            if let Some(alert) = &result.risk_alert {
                tracing::warn!("⚠️ {}", alert.message);
            }
            tracing::info!(
                "✅ Analysis {} completed: total score {}/10",
                result.id,
                result.total_score
            );
            serde_json::to_string_pretty(&result)?
        }
        Command::History { page, limit } => {
            let page = service.history(&cli.token, page, limit).await?;
            serde_json::to_string_pretty(&page)?
        }
        Command::Show { id } => {
            let result = service.get(&cli.token, id).await?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting site-score CLI");

    let config = match load_config(&cli).and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    if let Err(err) = run(cli, config).await {
        match err.downcast_ref::<ScoringError>() {
            Some(e) => {
                tracing::error!(
                    "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(exit_code(e));
            }
            None => {
                tracing::error!("❌ Command failed: {:#}", err);
                eprintln!("❌ {:#}", err);
                std::process::exit(3);
            }
        }
    }
}

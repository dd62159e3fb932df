use clap::Parser;
use hotel_join::core::ConfigProvider;
use hotel_join::utils::{logger, validation::Validate};
use hotel_join::{CliConfig, EtlEngine, JoinError, JoinPipeline, LocalStorage, TomlConfig};

fn main() {
    let cli = CliConfig::parse();

    let outcome = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                // --verbose 優先於設定檔的日誌等級
                let level = if cli.verbose { "debug" } else { config.log_level() };
                logger::init_config_logger(level, config.json_logs());
                tracing::info!("📁 Loaded configuration from: {}", path);
                run(config)
            }
            Err(e) => {
                logger::init_cli_logger(cli.verbose);
                Err(e)
            }
        },
        None => {
            logger::init_cli_logger(cli.verbose);
            run(cli)
        }
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Join failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn run<C: ConfigProvider + Validate + std::fmt::Debug>(config: C) -> Result<String, JoinError> {
    tracing::debug!("Config: {:?}", config);
    config.validate()?;

    let storage = LocalStorage::new(config.base_dir().to_string());
    let engine = EtlEngine::new(JoinPipeline::new(storage, config));
    engine.run()
}

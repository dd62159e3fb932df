pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use self::core::{etl::EtlEngine, joiner::combine, pipeline::JoinPipeline};
pub use domain::model::{CombinedRecord, DetailRecord, PriceRecord};
pub use utils::error::{JoinError, Result};

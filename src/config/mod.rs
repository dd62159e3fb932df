pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hotel-join")]
#[command(about = "Join hotel prices with hotel details into one flat record set")]
pub struct CliConfig {
    #[arg(
        long,
        default_value = ".",
        conflicts_with = "config",
        help = "Directory the input and output files live in"
    )]
    pub base_dir: String,

    #[arg(long, default_value = "jsonA.json", conflicts_with = "config")]
    pub price_file: String,

    #[arg(long, default_value = "jsonB.json", conflicts_with = "config")]
    pub detail_file: String,

    #[arg(long, default_value = "combined_data.json", conflicts_with = "config")]
    pub output_file: String,

    #[arg(
        long,
        conflicts_with = "config",
        help = "Do not print the combined records to stdout"
    )]
    pub no_echo: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    // 設定檔與檔案旗標互斥；只有 --verbose 可以同時使用
    #[arg(short, long, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<String>,
}

impl ConfigProvider for CliConfig {
    fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn price_file(&self) -> &str {
        &self.price_file
    }

    fn detail_file(&self) -> &str {
        &self.detail_file
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn echo_stdout(&self) -> bool {
        !self.no_echo
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_files(self)
    }
}

/// Checks shared by every config source.
pub(crate) fn validate_files(config: &impl ConfigProvider) -> Result<()> {
    validation::validate_path("base_dir", config.base_dir())?;
    validation::validate_path("price_file", config.price_file())?;
    validation::validate_path("detail_file", config.detail_file())?;
    validation::validate_path("output_file", config.output_file())?;
    validation::validate_distinct_output(
        "output_file",
        config.output_file(),
        &[config.price_file(), config.detail_file()],
    )
}

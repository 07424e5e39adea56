use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the sitemeta binary.
#[derive(Debug, Parser)]
#[command(name = "sitemeta", version, about = "Site metadata store and projection")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "SITEMETA_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the projected site metadata as JSON.
    Show(ShowArgs),
    /// Validate the configuration store.
    Check,
    /// Print the affiliate offer matching an article's tags.
    Affiliate(AffiliateArgs),
    /// Print the metadata query sent to the data layer.
    Query,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ShowArgs {
    /// Pretty-print the JSON output.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub pretty: bool,
}

#[derive(Debug, Args, Clone)]
pub struct AffiliateArgs {
    /// Article tags, in any order.
    #[arg(value_name = "TAG", required = true)]
    pub tags: Vec<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Load the configuration store from a TOML definition instead of the built-in one.
    #[arg(
        long = "store-file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub store_file: Option<PathBuf>,

    /// Directory holding source image assets.
    #[arg(
        long = "assets-dir",
        value_name = "PATH",
        value_hint = ValueHint::DirPath,
        global = true
    )]
    pub assets_dir: Option<PathBuf>,

    /// Deployment designation (`production`/`prod` enable production mode).
    #[arg(long = "environment", value_name = "NAME", global = true)]
    pub environment: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

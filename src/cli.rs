use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sublist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract and compare subscriber data from HLR LST dumps")]
#[command(
    long_about = "SubList reads a dump of %%LST SUB / %%LST OPTGPRS command output and either \
                  exports the context and option template fields of every subscriber to CSV, \
                  or writes a field-by-field comparison of two IMSIs."
)]
#[command(after_help = "EXAMPLES:\n  \
    sublist export\n  \
    sublist --input dumps/hlr01.txt export --output-dir runs\n  \
    sublist compare 001010000000001 001010000000002\n  \
    sublist compare            (prompts for both IMSIs)\n  \
    sublist init-config sublist.toml")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// LST dump to read (defaults to sub-list.txt)
    #[arg(short, long, global = true, env = "SUBLIST_INPUT")]
    pub input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Base directory for the export and comparison directories
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export every subscriber in the dump to two CSV files
    Export,

    /// Compare the fields of two IMSIs and write a text report
    Compare {
        /// First IMSI (prompted for when omitted)
        #[arg(value_parser = validate_imsi)]
        first: Option<String>,

        /// Second IMSI (prompted for when omitted)
        #[arg(value_parser = validate_imsi)]
        second: Option<String>,
    },

    /// Write a sample configuration file
    InitConfig {
        /// Destination (defaults to sublist.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input(self.input.clone())
            .with_output_dir(self.output_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Trims an IMSI and checks it can appear inside a quoted `IMSI="..."`
/// header. The value is only ever compared literally.
pub fn validate_imsi(s: &str) -> std::result::Result<String, String> {
    let imsi = s.trim();

    if imsi.is_empty() {
        return Err("IMSI must not be empty".to_string());
    }

    if imsi.contains('"') {
        return Err("IMSI must not contain double quotes".to_string());
    }

    if imsi.chars().any(char::is_control) {
        return Err("IMSI must not contain control characters".to_string());
    }

    Ok(imsi.to_string())
}

//! Command-line arguments for the price watcher.
use clap::Parser;
use price_common::config::DEFAULT_CONFIG_PATH;
use price_common::source::SourceKind;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file.
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Price source to poll, overriding the configuration file.
    #[clap(long, value_enum)]
    pub source: Option<SourceKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["price_watcher"]);
        assert_eq!(args.config, PathBuf::from("config.yaml"));
        assert_eq!(args.source, None);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "price_watcher",
            "--config",
            "/etc/watcher.yaml",
            "--source",
            "simulated",
        ]);
        assert_eq!(args.config, PathBuf::from("/etc/watcher.yaml"));
        assert_eq!(args.source, Some(SourceKind::Simulated));
    }
}

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Maximum cardinality matching with Edmonds' blossom algorithm
#[derive(Parser, Debug)]
#[command(name = "edmonds")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the graph document (JSON with "edges" and optional "nodes")
    pub graph: PathBuf,

    /// Checks applied to the matching before it is reported
    #[arg(long, value_enum, default_value = "basic")]
    pub verification: VerificationArg,

    /// Record and print the structural event trace
    #[arg(long, default_value_t = false)]
    pub trace: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Default log level; `RUST_LOG` still overrides it
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Command-line wrapper for the matcher's verification parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VerificationArg {
    /// Skip result checks
    #[value(name = "none")]
    None,
    /// Pairs are edges and the mate relation is symmetric
    #[value(name = "basic")]
    Basic,
    /// Basic plus no edge between two free vertices
    #[value(name = "full")]
    Full,
}

impl VerificationArg {
    /// Value accepted by the matcher's `verification` parameter
    pub fn as_parameter(self) -> &'static str {
        match self {
            VerificationArg::None => "none",
            VerificationArg::Basic => "basic",
            VerificationArg::Full => "full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["edmonds", "graph.json"]).unwrap();
        assert_eq!(args.graph, PathBuf::from("graph.json"));
        assert_eq!(args.verification, VerificationArg::Basic);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.trace);
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "edmonds",
            "g.json",
            "--verification",
            "full",
            "--trace",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.verification.as_parameter(), "full");
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.trace);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Args::try_parse_from(["edmonds", "g.json", "--verification", "strict"]).is_err());
    }
}

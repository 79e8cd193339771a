//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logdump",
    about = "Decode binary trace logs written by an in-process lightweight logger",
    after_help = "\
EXAMPLES:
    logdump --log-file /tmp/app.log --binary ./app
    logdump --log-file /tmp/app.log --binary ./app --loc-binary ./app_loc
    logdump --log-file /tmp/app.log --binary ./app --verbose"
)]
pub struct Args {
    /// Binary log file produced by the instrumented program
    #[arg(long, value_name = "FILE")]
    pub log_file: PathBuf,

    /// The instrumented binary itself (source of the string table)
    #[arg(long, value_name = "BINARY")]
    pub binary: PathBuf,

    /// Location-decoder executable (default: <binary>_loc)
    #[arg(long, value_name = "BINARY")]
    pub loc_binary: Option<PathBuf>,

    /// Show session setup detail (tool paths, table size, base addresses)
    #[arg(short, long)]
    pub verbose: bool,

    /// Show per-record decode tracing
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_args_parse() {
        let args =
            Args::try_parse_from(["logdump", "--log-file", "/tmp/a.log", "--binary", "./app"])
                .unwrap();
        assert_eq!(args.log_file, PathBuf::from("/tmp/a.log"));
        assert_eq!(args.binary, PathBuf::from("./app"));
        assert!(args.loc_binary.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_missing_required_args_rejected() {
        assert!(Args::try_parse_from(["logdump", "--binary", "./app"]).is_err());
        assert!(Args::try_parse_from(["logdump", "--log-file", "/tmp/a.log"]).is_err());
    }

    #[test]
    fn test_loc_binary_override() {
        let args = Args::try_parse_from([
            "logdump",
            "--log-file",
            "a.log",
            "--binary",
            "app",
            "--loc-binary",
            "custom_loc",
        ])
        .unwrap();
        assert_eq!(args.loc_binary, Some(PathBuf::from("custom_loc")));
    }
}

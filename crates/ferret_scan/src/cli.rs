//! CLI contract (spec §6). Flag parsing itself is out of scope for the
//! in-scope pipeline, but this struct gives the excluded front-end a
//! concrete shape to target — every field below mirrors a clause of §6's
//! "CLI invocation (contract only)" paragraph.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ferret_scan", about = "Sensitive-data detection and redaction engine")]
pub struct Args {
    /// Input path(s) — files or directories.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories.
    #[arg(short, long)]
    pub recursive: bool,

    /// Drop findings below this confidence (0-100).
    #[arg(long, value_name = "MIN")]
    pub confidence: Option<f64>,

    /// Comma-separated set of enabled check categories from the closed
    /// vocabulary (creditcard, email, phone, ssn, passport, secrets,
    /// ip_address, person_name, intellectual_property, social_media,
    /// metadata). Unset runs every body validator.
    #[arg(long, value_delimiter = ',')]
    pub checks: Vec<String>,

    /// Configuration file (YAML). Loading it is out of scope; accepted
    /// here only so the flag exists for the excluded front-end to wire up.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Named profile from the configuration file.
    #[arg(long)]
    pub profile: Option<String>,

    /// Output format: text, json, csv, yaml, junit, sarif, gitlab-sast.
    /// Only text/json/yaml have a reference implementation in this crate.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Write output here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Dump ProcessedContent (the preprocessor output envelope) and exit
    /// without running any validator.
    #[arg(long)]
    pub preprocess_only: bool,

    /// Suppression rules file (YAML).
    #[arg(long, value_name = "FILE")]
    pub suppression_file: Option<PathBuf>,

    /// Generate suppression rules (disabled by default) from this run's
    /// findings instead of emitting them, and write the rules here.
    #[arg(long, value_name = "FILE")]
    pub generate_suppressions: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation_parses_with_defaults() {
        let args = Args::parse_from(["ferret_scan", "src/"]);
        assert_eq!(args.paths, vec![PathBuf::from("src/")]);
        assert!(!args.recursive);
        assert_eq!(args.format, "text");
        assert!(args.checks.is_empty());
    }

    #[test]
    fn checks_flag_splits_on_commas() {
        let args = Args::parse_from(["ferret_scan", "f.txt", "--checks", "ssn,email,phone"]);
        assert_eq!(args.checks, vec!["ssn", "email", "phone"]);
    }

    #[test]
    fn multiple_paths_are_accepted() {
        let args = Args::parse_from(["ferret_scan", "a.txt", "b.txt"]);
        assert_eq!(args.paths.len(), 2);
    }
}

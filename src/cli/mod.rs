// CLI module for promconf
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;

/// promconf - Settings store for a Prometheus metrics endpoint
#[derive(Parser, Debug)]
#[command(name = "promconf", version, about, long_about = None)]
pub struct Args {
    /// Print the effective settings and where they came from, then exit
    #[arg(long)]
    pub show: bool,

    /// Check a candidate endpoint path, then exit
    #[arg(long, value_name = "PATH")]
    pub check_path: Option<String>,

    /// Settings file to use instead of the configured one
    #[arg(long, value_name = "FILE", env = "PROMCONF_SETTINGS")]
    pub settings: Option<String>,
}

pub mod diff;

use clap::ValueEnum;

/// How the run summary is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

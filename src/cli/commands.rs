//! CLI commands and argument parsing

use crate::types::AreaType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fetch paginated UK coronavirus statistics
#[derive(Parser, Debug)]
#[command(name = "coronaviz-data")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset endpoint (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format for JSON datasets
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every page of a dataset
    Fetch {
        /// Filter predicate, e.g. `areaType=nation` (repeatable, order kept)
        #[arg(short = 'F', long = "filter")]
        filters: Vec<String>,

        /// Shorthand for `--filter areaType=<TYPE>`, added first
        #[arg(long)]
        area_type: Option<AreaType>,

        /// Structure as an inline JSON object
        #[arg(long, conflicts_with = "structure_file")]
        structure_json: Option<String>,

        /// Structure read from a JSON file
        #[arg(long)]
        structure_file: Option<PathBuf>,

        /// Request CSV instead of JSON
        #[arg(long)]
        csv: bool,

        /// Write the dataset to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Log request and page counts when done
        #[arg(long)]
        stats: bool,
    },

    /// Fetch the default structure for regions (or the given filters)
    Latest {
        /// Filter predicate (repeatable)
        #[arg(short = 'F', long = "filter")]
        filters: Vec<String>,

        /// Write the dataset to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the default structure as compact JSON
    Structure,

    /// List area types
    AreaTypes,

    /// Load boundary GeoJSON, downloading it on first use
    Boundaries {
        /// Source name: `nhs-regions` or `regions`
        source: String,

        /// Cache directory (overrides the config file)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

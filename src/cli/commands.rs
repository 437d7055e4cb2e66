//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "devlog")]
#[command(about = "Developer journal ingestion and browsing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./devlog.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read notes from a local checkout instead of the remote API
    #[arg(long, global = true, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List journal entries
    List {
        /// Only entries of this application type ("all" for every type)
        #[arg(long)]
        app_type: Option<String>,

        /// Only entries using this technology
        #[arg(long)]
        technology: Option<String>,

        /// Sort order (title-asc, title-desc, date-asc, date-desc)
        #[arg(long, default_value = "date-desc")]
        sort: String,

        /// Title of the entry to mark as selected
        #[arg(long)]
        select: Option<String>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one journal entry
    Show {
        /// Entry title (file name without .md)
        title: String,

        /// Render the body as HTML
        #[arg(long)]
        html: bool,
    },

    /// List application types and technologies in use
    Facets,

    /// Parse and validate a local journal file
    Parse {
        /// Markdown file to check
        file: PathBuf,
    },

    /// Populate the journal and sync images into the image directory
    Sync {
        /// Image directory (default: images_dir from config)
        #[arg(long)]
        dest: Option<PathBuf>,
    },
}

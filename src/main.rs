use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod generate;
mod google;
mod media;
mod parse;
mod site;
mod types;
mod utils;

use config::{BuildOptions, Config, Escaping, GalleryOrder, INFO_RANGE, PROJECTS_RANGE};

#[derive(Parser)]
#[command(name = "portfolio-site")]
#[command(about = "Static portfolio site generator backed by Google Sheets and Drive")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Log debug output (per-row parser decisions)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Spreadsheet holding the Projects and Info sheets
    #[arg(long, env = "GOOGLE_SHEET_ID", default_value = "", hide_env_values = true)]
    sheet_id: String,
    /// API key for Sheets and Drive
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,
    #[arg(long, default_value = PROJECTS_RANGE)]
    projects_range: String,
    #[arg(long, default_value = INFO_RANGE)]
    info_range: String,
}

impl From<SourceArgs> for Config {
    fn from(args: SourceArgs) -> Self {
        Self {
            projects_range: args.projects_range,
            info_range: args.info_range,
            ..Config::new(args.sheet_id, args.api_key)
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate index.html, archive.html and info.html
    Build {
        /// Directory the pages are written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// HTML-escape sheet text instead of inserting it verbatim
        #[arg(long)]
        escape_html: bool,
        /// Gallery page ordering
        #[arg(long, value_enum, default_value_t = GalleryOrder::Date)]
        gallery_order: GalleryOrder,
    },
    /// Print the parsed and resolved projects as JSON
    Projects,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from(cli.source);

    match cli.command {
        Commands::Build {
            output_dir,
            escape_html,
            gallery_order,
        } => {
            let options = BuildOptions {
                output_dir,
                escape: if escape_html { Escaping::Html } else { Escaping::Raw },
                gallery_order,
            };
            site::run_build(&config, &options)
        }
        Commands::Projects => site::run_projects(&config),
    }
}

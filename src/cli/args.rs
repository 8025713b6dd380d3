use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oco2-peak")]
#[command(about = "CO2 peak emission estimation for OCO-2 satellite soundings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        default_value = "config.json",
        help = "Object store configuration file"
    )]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the emission rate of one detected peak
    Estimate {
        #[arg(short, long, help = "Sounding identifier of the peak")]
        sounding_id: String,

        #[arg(long, help = "Local peak detail dataset (skips the store fetch)")]
        detail_file: Option<PathBuf>,

        #[arg(long, help = "Peak catalog URL or object key")]
        catalog: Option<String>,

        #[arg(long, help = "Local peak catalog file")]
        catalog_file: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Figure output path [default: output/emission-{sounding_id}-{YYMMDD}.json]"
        )]
        output: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Skip writing the figure document")]
        no_figure: bool,
    },

    /// List object URLs under a key prefix
    List {
        #[arg(short, long, help = "Key prefix, mandatory to bound the listing")]
        prefix: String,

        #[arg(long, default_value = "", help = "Keep only names containing this pattern")]
        pattern: String,
    },

    /// Upload a directory of files to the object store
    Upload {
        #[arg(short, long, help = "Local directory of files to upload")]
        input_dir: PathBuf,

        #[arg(long, default_value = "csv", help = "File extension to upload")]
        extension: String,

        #[arg(long, default_value = "/Trash/", help = "Destination key prefix")]
        prefix: String,

        #[arg(long, default_value = "text/csv")]
        content_type: String,
    },

    /// Delete objects by prefix and pattern (dry run unless --force)
    Delete {
        #[arg(short, long, default_value = "/Trash/")]
        prefix: String,

        #[arg(long, default_value = "")]
        pattern: String,

        #[arg(long, default_value = "false", help = "Actually delete the matching objects")]
        force: bool,
    },
}

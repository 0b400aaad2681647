use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare-processor")]
#[command(about = "Aggregate and reconcile daily and hourly bike rental datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: ./bikeshare.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Args, Clone, Default)]
pub struct InputArgs {
    #[arg(long, help = "Daily dataset CSV [default: data/day.csv]")]
    pub day: Option<PathBuf>,

    #[arg(long, help = "Hourly dataset CSV [default: data/hour.csv]")]
    pub hour: Option<PathBuf>,

    #[arg(long, help = "Reject rows outside their documented value ranges")]
    pub strict: bool,

    #[arg(long, help = "Read input files through a memory map")]
    pub mmap: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline and print the results
    Run {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, help = "Print the full result set as JSON on stdout")]
        json: bool,
    },

    /// Load both datasets and report integrity problems
    Validate {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            long,
            default_value = "0",
            help = "Tolerated difference between daily and summed hourly counts"
        )]
        tolerance: u64,
    },
}

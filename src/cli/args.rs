use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trip-analyzer")]
#[command(about = "Exploratory analysis for logistics shipment trip data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean and aggregate raw segment data into per-trip records
    Process {
        #[arg(short, long, help = "Input segment CSV file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            default_value = "results",
            help = "Directory for output files"
        )]
        output_dir: PathBuf,
    },

    /// Run outlier, correlation and hypothesis-test analyses
    Analyze {
        #[arg(short, long, help = "Input segment CSV file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            default_value = "results",
            help = "Directory for output files"
        )]
        output_dir: PathBuf,

        #[arg(
            long,
            default_value = "10",
            help = "Number of top corridors to display"
        )]
        top_corridors: usize,
    },

    /// Summarize a segment CSV without writing any output
    Info {
        #[arg(short, long, help = "Input segment CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = "5", help = "Number of sample trips to display")]
        sample: usize,
    },
}

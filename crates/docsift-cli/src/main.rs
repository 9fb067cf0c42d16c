mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "docsift",
    version,
    about = "Persona-driven section extraction and ranking for PDF collections"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: extract, rank, and refine sections
    Analyze {
        /// JSON config with persona, job to be done, and document list
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// PDF folder or pre-extracted JSON document dump
        #[arg(long = "pdf-folder", value_name = "PATH")]
        pdf_folder: Option<PathBuf>,

        /// Persona role (overrides the config value)
        #[arg(short, long, value_name = "ROLE")]
        persona: Option<String>,

        /// Job to be done (overrides the config value)
        #[arg(short, long, value_name = "TASK")]
        task: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the analysis to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Extract and report per-document sections (without ranking)
    Sections {
        /// PDF folder or pre-extracted JSON document dump
        input: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the section report to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            config,
            pdf_folder,
            persona,
            task,
            output,
            out,
        } => commands::analyze::run(config, pdf_folder, persona, task, &output, out),
        Commands::Sections { input, output, out } => commands::sections::run(input, &output, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

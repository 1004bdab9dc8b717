//! repodocs - render project documentation manuals to PDF
//!
//! `render` lays out a manual JSON file and writes a PDF file;
//! `export` runs the full export pipeline into a local artifact directory.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "repodocs")]
#[command(version)]
#[command(about = "Render project documentation manuals to PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a manual JSON file to a PDF file
    Render {
        /// Manual JSON (object with projectName/sections, or an array of sections)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Export settings JSON
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write uncompressed content streams
        #[arg(long)]
        no_compress: bool,

        /// Document title metadata (defaults to "<project> Documentation")
        #[arg(long)]
        title: Option<String>,
    },

    /// Export a manual through the artifact pipeline into a local directory
    Export {
        /// Manual JSON (object with projectName/sections, or an array of sections)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Artifact store root directory
        #[arg(long, value_name = "DIR")]
        root: PathBuf,

        /// Export settings JSON
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Owner of the exported project
        #[arg(long, default_value = "local")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            no_compress,
            title,
        } => {
            let summary = commands::render(&input, &output, config.as_deref(), no_compress, title)?;
            println!(
                "Wrote {} page(s), {} bytes to {}",
                summary.page_count,
                summary.size,
                output.display()
            );
        }
        Commands::Export {
            input,
            root,
            config,
            user,
        } => {
            let response = commands::export(&input, &root, config.as_deref(), &user).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }
    Ok(())
}

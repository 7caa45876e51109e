//! CLI for jitterpool: whitened timing-jitter bits on demand.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jitterpool")]
#[command(about = "jitterpool: timing jitter, whitened with SHA-256, served from a bit pool")]
#[command(version = jitterpool_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw bits from a fresh entropy pool
    Bits {
        /// Number of bits to draw
        #[arg(long, default_value = "256")]
        count: usize,

        /// Output format: bits ('0'/'1' characters) or hex (packed MSB-first)
        #[arg(long, default_value = "bits", value_parser = ["bits", "hex"])]
        format: String,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// SHA-256 of TEXT, a file, or stdin
    Digest {
        /// Text to hash (UTF-8 bytes, no trailing newline)
        text: Option<String>,

        /// Hash the contents of this file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<String>,

        /// Print 256 binary digits instead of 64 hex characters
        #[arg(long)]
        binary: bool,
    },

    /// Draw bits, split them in half, XOR with a key, and reconstruct
    Split {
        /// Number of bits to draw (must be a positive multiple of 4)
        #[arg(long, default_value = "256")]
        count: usize,
    },

    /// Draw bits and report pool counters and bit statistics
    Report {
        /// Number of bits to draw before reporting
        #[arg(long, default_value = "4096")]
        count: usize,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bits {
            count,
            format,
            output,
        } => commands::bits::run(count, &format, output.as_deref()),
        Commands::Digest { text, file, binary } => {
            commands::digest::run(text.as_deref(), file.as_deref(), binary)
        }
        Commands::Split { count } => commands::split::run(count),
        Commands::Report { count, json } => commands::report::run(count, json),
    }
}

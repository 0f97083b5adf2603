use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use highscore_types::Topic;

#[derive(Parser)]
#[command(
    name = "highscore",
    about = "Checksummed leaderboards and packs over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Data directory (default: "data", or the config file's data_root)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Checksum secret shared with clients (must be odd)
    #[arg(long, global = true)]
    pub secret: Option<u64>,

    /// Talk to a running server (e.g. http://127.0.0.1:10000) instead of
    /// the local data directory
    #[arg(long, global = true, conflicts_with = "root")]
    pub server: Option<String>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print a topic's document
    Show(ShowArgs),
    /// Verify and merge one encoded entry into a topic
    Add(AddArgs),
    /// List topics that have a document
    List(ListArgs),
    /// Print the encoded, checksummed line for an entry
    Sign(SignArgs),
    /// Check every line of a document file
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<String>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// `name`, `highscore/name` or `pack/name`
    pub topic: Topic,
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct AddArgs {
    pub topic: Topic,
    /// Encoded entry line, as produced by `highscore sign`
    pub line: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// List pack topics instead of leaderboards
    #[arg(long)]
    pub packs: bool,
}

#[derive(Args)]
pub struct SignArgs {
    #[arg(long, requires = "score", conflicts_with = "text")]
    pub name: Option<String>,
    #[arg(long, requires = "name", allow_negative_numbers = true)]
    pub score: Option<i32>,
    /// Pack entry text
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub file: PathBuf,
    /// Treat the file as a pack document
    #[arg(long)]
    pub pack: bool,
}

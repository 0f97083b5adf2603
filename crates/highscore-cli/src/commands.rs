use std::future::Future;
use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;

use highscore_client::{HttpTransport, LocalTransport, TopicTransport};
use highscore_codec::{inspect_document, Checksummer, EntryCodec, RejectedLine};
use highscore_server::{HighscoreServer, ServerConfig};
use highscore_store::{Document, FsBackend, TopicStore};
use highscore_types::{LeaderboardEntry, PackEntry, TopicKind};

use crate::cli::*;

const DEFAULT_ROOT: &str = "data";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let checksummer = match cli.secret {
        Some(secret) => Checksummer::new(secret).context("invalid --secret")?,
        None => Checksummer::DEFAULT,
    };
    let root = cli.root.clone();
    let server = cli.server.clone();
    let format = cli.format.clone();
    match cli.command {
        Command::Serve(args) => cmd_serve(args, root, cli.secret),
        Command::Show(args) => {
            let transport = transport(server, root, checksummer)?;
            block_on(cmd_show(args, transport, format))
        }
        Command::Add(args) => {
            let transport = transport(server, root, checksummer)?;
            block_on(cmd_add(args, transport, format))
        }
        Command::List(args) => {
            let transport = transport(server, root, checksummer)?;
            block_on(cmd_list(args, transport, format))
        }
        Command::Sign(args) => cmd_sign(args, &checksummer),
        Command::Verify(args) => cmd_verify(args, &checksummer, format),
    }
}

/// Remote transport when `--server` is given, else the local data directory.
fn transport(
    server: Option<String>,
    root: Option<PathBuf>,
    checksummer: Checksummer,
) -> anyhow::Result<Box<dyn TopicTransport>> {
    if let Some(url) = server {
        let remote = HttpTransport::new(&url, checksummer)?;
        return Ok(Box::new(remote));
    }
    let root = root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
    let store = TopicStore::with_checksummer(FsBackend::new(root), checksummer);
    Ok(Box::new(LocalTransport::new(store)))
}

fn block_on<F: Future<Output = anyhow::Result<()>>>(fut: F) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(fut)
}

fn cmd_serve(args: ServeArgs, root: Option<PathBuf>, secret: Option<u64>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind.parse().with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if let Some(root) = root {
        config.data_root = root;
    }
    if let Some(secret) = secret {
        config.secret = secret;
    }

    let server = HighscoreServer::new(config)?;
    println!(
        "highscore server on {} (root: {})",
        server.config().bind_addr.to_string().bold(),
        server.config().data_root.display()
    );
    block_on(async move { Ok(server.serve().await?) })
}

async fn cmd_show(
    args: ShowArgs,
    transport: Box<dyn TopicTransport>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let doc = transport
        .fetch(&args.topic)
        .await
        .with_context(|| format!("reading {}", args.topic))?;
    let limit = args.limit.unwrap_or(usize::MAX);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
        OutputFormat::Text => print_document(&doc, limit),
    }
    Ok(())
}

async fn cmd_add(
    args: AddArgs,
    transport: Box<dyn TopicTransport>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let doc = transport
        .submit(&args.topic, &args.line)
        .await
        .with_context(|| format!("appending to {}", args.topic))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
        OutputFormat::Text => {
            println!("{} Accepted into {}", "✓".green().bold(), args.topic.to_string().yellow());
            print_document(&doc, 10);
        }
    }
    Ok(())
}

async fn cmd_list(
    args: ListArgs,
    transport: Box<dyn TopicTransport>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let kind = if args.packs { TopicKind::Pack } else { TopicKind::Leaderboard };
    let topics = transport.list(kind).await.context("listing topics")?;
    match format {
        OutputFormat::Json => {
            let names: Vec<String> = topics.iter().map(|t| t.to_string()).collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Text => {
            if topics.is_empty() {
                println!("No {} topics.", kind.prefix());
            }
            for topic in &topics {
                println!("  {}", topic.to_string().yellow());
            }
        }
    }
    Ok(())
}

fn cmd_sign(args: SignArgs, checksummer: &Checksummer) -> anyhow::Result<()> {
    let line = match (args.name, args.score, args.text) {
        (Some(name), Some(score), None) => LeaderboardEntry::new(name, score)?.encode(checksummer),
        (None, None, Some(text)) => PackEntry::new(text)?.encode(checksummer),
        _ => bail!("pass either --name and --score, or --text"),
    };
    println!("{line}");
    Ok(())
}

fn cmd_verify(args: VerifyArgs, checksummer: &Checksummer, format: OutputFormat) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let (accepted, rejected) = if args.pack {
        let report = inspect_document::<PackEntry>(&text, checksummer);
        (report.entries.len(), report.rejected)
    } else {
        let report = inspect_document::<LeaderboardEntry>(&text, checksummer);
        (report.entries.len(), report.rejected)
    };

    match format {
        OutputFormat::Json => {
            let lines: Vec<_> = rejected
                .iter()
                .map(|r| serde_json::json!({"line": r.line_no, "error": r.error.to_string()}))
                .collect();
            println!(
                "{}",
                serde_json::json!({"accepted": accepted, "rejected": lines})
            );
        }
        OutputFormat::Text => print_verify(accepted, &rejected),
    }

    if !rejected.is_empty() {
        bail!("{} of {} lines failed verification", rejected.len(), accepted + rejected.len());
    }
    Ok(())
}

fn print_document(doc: &Document, limit: usize) {
    match doc {
        Document::Leaderboard(board) => {
            if board.is_empty() {
                println!("No scores yet.");
            }
            for (rank, entry) in board.iter().take(limit).enumerate() {
                println!(
                    "{:>4}. {:<16} {}",
                    (rank + 1).to_string().dimmed(),
                    entry.name().bold(),
                    entry.score().to_string().yellow()
                );
            }
        }
        Document::Pack(pack) => {
            if pack.is_empty() {
                println!("No entries yet.");
            }
            for entry in pack.iter().take(limit) {
                println!("  {} {}", "•".cyan(), entry.text());
            }
        }
    }
}

fn print_verify(accepted: usize, rejected: &[RejectedLine]) {
    if rejected.is_empty() {
        println!("{} {} lines verified", "✓".green().bold(), accepted.to_string().bold());
        return;
    }
    println!(
        "{} valid, {} invalid",
        accepted.to_string().green(),
        rejected.len().to_string().red()
    );
    for r in rejected {
        println!("  line {}: {} ({})", r.line_no.to_string().yellow(), r.content, r.error.to_string().red());
    }
}

use anyhow::Result;
use clap::Parser;
use dataflow_shell::config::{self, Config, StorageBackend};
use dataflow_shell::handlers;
use dataflow_shell::pages;
use dataflow_shell::shell::{self, Shell};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(author, version, about = "Interactive DataFlow Pro dashboard shell")]
struct Args {
    /// Path to YAML config file; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite URL for the session entries (falls back to DATABASE_URL, then the config)
    #[arg(long)]
    database_url: Option<String>,

    /// Keep the session in memory only
    #[arg(long, default_value_t = false)]
    ephemeral: bool,

    /// Print the example config and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();
    if args.print_config {
        print!("{}", config::example());
        return Ok(());
    }

    let mut cfg = match &args.config {
        Some(path) => config::load(Some(path))?,
        None => Config::default(),
    };
    if let Some(url) = args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
    {
        cfg.app.database_url = Some(url);
    }
    if args.ephemeral {
        cfg.app.storage = StorageBackend::Memory;
    }
    config::validate(&cfg)?;
    cfg.ensure_dirs()?;

    let storage = shell::open_storage(&cfg).await?;
    let mut shell = Shell::with_storage(&cfg, storage);
    shell.start().await?;

    let mut stdout = tokio::io::stdout();
    write_lines(&mut stdout, &pages::render(&shell)).await?;

    info!("reading commands from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match handlers::handle_line(&mut shell, &line).await {
            Ok(reply) => write_lines(&mut stdout, &reply.render()).await?,
            Err(err) => error!(?err, "failed to handle command"),
        }
    }

    Ok(())
}

async fn write_lines(out: &mut tokio::io::Stdout, lines: &[String]) -> Result<()> {
    for line in lines {
        out.write_all(line.as_bytes()).await?;
        out.write_all(b"\n").await?;
    }
    out.flush().await?;
    Ok(())
}

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rekap_core::config::Config;
use rekap_core::pipeline::process_files;
use rekap_core::{export, Vendor};

const DEBUG_LOG: &str = "/tmp/rekap-debug.log";

#[derive(Parser)]
#[command(name = "rekap", about = "Marketplace order-export normaliser")]
struct Cli {
    /// Write debug logs to /tmp/rekap-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/rekap/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalise order exports and print (or write) the assembled rows.
    Convert {
        /// shopee, lazada or tiktok.
        #[arg(long)]
        marketplace: String,

        /// Store account stamped on every row.
        #[arg(long, default_value = "")]
        account: String,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Write here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Run the HTTP upload service.
    Serve {
        /// Overrides `server.bind` from config.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };

    match cli.command {
        Command::Convert {
            marketplace,
            account,
            format,
            output,
            files,
        } => convert(&config, &marketplace, &account, format, output.as_deref(), &files),
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = rekap_web::AppState::new(config)?;
            tokio::runtime::Runtime::new()?.block_on(rekap_web::serve(state, &bind))
        }
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("rekap debug log started, tail -f {DEBUG_LOG}");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}

fn convert(
    config: &Config,
    marketplace: &str,
    account: &str,
    format: Format,
    output: Option<&Path>,
    files: &[PathBuf],
) -> anyhow::Result<()> {
    let vendor: Vendor = marketplace.parse()?;
    let rows = process_files(vendor, account, files, config.normalize_options())?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    match format {
        Format::Json => writeln!(out, "{}", export::to_json(&rows)?)?,
        Format::Csv => export::write_csv(&rows, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

//! # Hex2Text CLI - Hex and Text Transcoder
//!
//! Command-line front end for converting between hex dumps and text
//! encodings, measuring buffers, and preparing AI translation prompts.

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "cli")]
use hex2text::prompt::{SYSTEM_INSTRUCTION, build_prompt};
#[cfg(feature = "cli")]
use hex2text::{EncodingType, Substitution, Transcoder, TranslatorSettings, count};

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features disabled. Enable with --features cli");
    std::process::exit(1);
}

/// Hex2Text: convert between hex dumps and text encodings
#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "hex2text")]
#[command(version, about, long_about = None)]
#[command(author = "Hex2Text Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert input from one encoding to another
    Convert(ConvertArgs),

    /// Show character and byte counters for a buffer
    Count(CountArgs),

    /// List all supported encodings
    List,

    /// Print the AI translation prompt for a piece of text
    Prompt(PromptArgs),
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct InputArgs {
    /// Text to process (read from --input or stdin when omitted)
    text: Option<String>,

    /// Input file
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ConvertArgs {
    /// Source encoding
    #[arg(short = 'f', long = "from")]
    from: EncodingType,

    /// Target encoding
    #[arg(short = 't', long = "to")]
    to: EncodingType,

    /// Fail instead of substituting undecodable units
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    input: InputArgs,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct CountArgs {
    /// Encoding the buffer is declared in
    #[arg(short, long)]
    encoding: EncodingType,

    /// Encoding on the other side of the conversion
    #[arg(short, long, default_value = "ASCII")]
    peer: EncodingType,

    #[command(flatten)]
    input: InputArgs,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct PromptArgs {
    /// Translator settings file (JSON)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Source format
    #[arg(short = 'f', long = "from")]
    from: EncodingType,

    /// Target format
    #[arg(short = 't', long = "to")]
    to: EncodingType,

    #[command(flatten)]
    input: InputArgs,
}

#[cfg(feature = "cli")]
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct EncodingEntry {
    index: usize,
    name: &'static str,
    textual: bool,
    multibyte: bool,
    unit_width: Option<usize>,
    bom: Option<String>,
}

/// Route `log` records to stderr, honouring `RUST_LOG` unless `--verbose` is set
#[cfg(feature = "cli")]
fn install_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    install_logging(cli.verbose)?;

    match cli.command {
        Commands::Convert(ref args) => convert_command(args, &cli)?,
        Commands::Count(ref args) => count_command(args, &cli)?,
        Commands::List => list_command(&cli)?,
        Commands::Prompt(ref args) => prompt_command(args, &cli)?,
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn read_input(args: &InputArgs) -> Result<Vec<u8>> {
    if let Some(ref text) = args.text {
        return Ok(text.clone().into_bytes());
    }

    if let Some(ref input_path) = args.input {
        log::debug!("Reading from: {}", input_path.display());
        return fs::read(input_path)
            .with_context(|| format!("Failed to read input file: {}", input_path.display()));
    }

    log::debug!("Reading from stdin");
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

#[cfg(feature = "cli")]
fn convert_command(args: &ConvertArgs, cli: &Cli) -> Result<()> {
    let input = read_input(&args.input)?;
    let policy = if args.strict {
        Substitution::Reject
    } else {
        Substitution::Placeholder
    };

    log::debug!("Converting from {} to {}", args.from, args.to);

    let conversion = Transcoder::new()
        .with_substitution(policy)
        .convert(&input, args.from, args.to);

    if let Some(err) = conversion.status.error() {
        log::warn!("{}", err);
    }

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&conversion)?),
        OutputFormat::Text => println!("{}", conversion.output),
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn count_command(args: &CountArgs, cli: &Cli) -> Result<()> {
    let input = read_input(&args.input)?;
    let metrics = count(&input, args.encoding, args.peer);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&metrics)?),
        OutputFormat::Text => println!("{}", metrics),
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn list_command(cli: &Cli) -> Result<()> {
    let entries: Vec<_> = EncodingType::ALL
        .iter()
        .map(|encoding| EncodingEntry {
            index: encoding.index(),
            name: encoding.name(),
            textual: encoding.is_textual(),
            multibyte: encoding.is_multibyte(),
            unit_width: encoding.unit_width(),
            bom: encoding.bom().map(|bom| format!("{:02X?}", bom)),
        })
        .collect();

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            println!("Supported Encodings ({} total):", entries.len());
            println!();
            for entry in &entries {
                println!(
                    "{:>2}  {:12} {}",
                    entry.index,
                    entry.name,
                    if entry.multibyte { "[multibyte]" } else { "" }
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn prompt_command(args: &PromptArgs, cli: &Cli) -> Result<()> {
    let settings = match args.settings {
        Some(ref path) => TranslatorSettings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => TranslatorSettings::default(),
    };

    let input = read_input(&args.input)?;
    let text = String::from_utf8_lossy(&input);
    let prompt = build_prompt(&text, args.from.name(), args.to.name(), &settings)?;

    match cli.format {
        OutputFormat::Json => {
            let request = serde_json::json!({
                "provider": settings.provider,
                "model": settings.model(),
                "system": SYSTEM_INSTRUCTION,
                "prompt": prompt,
            });
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        OutputFormat::Text => println!("{}", prompt),
    }

    Ok(())
}

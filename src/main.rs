use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use textblocks::{Block, Config, Error, Result};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "textblocks")]
#[command(about = "Render freeform text as structured blocks")]
struct Cli {
    /// Input text file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output file (defaults to input name with the format's extension, or stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    /// Renderer config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the input as a JSON payload rather than raw text
    #[arg(long)]
    json_input: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Typst,
    Json,
    Pdf,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Typst => "typ",
            Format::Json => "json",
            Format::Pdf => "pdf",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli
        .input
        .as_deref()
        .filter(|path| *path != Path::new("-"));

    let raw = read_input(input)?;
    let blocks = if cli.json_input {
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        textblocks::parse_value(&value)
    } else {
        textblocks::parse(&raw)
    };
    debug!(blocks = blocks.len(), "parsed input");

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let bytes = render(&blocks, cli.format, &config)?;

    // Determine output path
    let output = match (&cli.output, input) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(input)) => Some(derived_output(input, cli.format)?),
        (None, None) => None,
    };

    match output {
        Some(path) => {
            fs::write(&path, bytes).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "wrote output");
            println!("Created {}", path.display());
        }
        None => io::stdout()
            .write_all(&bytes)
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?,
    }

    Ok(())
}

/// Input name with the format's extension. Never the input itself.
fn derived_output(input: &Path, format: Format) -> Result<PathBuf> {
    let path = input.with_extension(format.extension());
    if path == input {
        return Err(Error::OutputIsInput(path));
    }
    Ok(path)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| Error::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(raw)
        }
    }
}

fn render(blocks: &[Block], format: Format, config: &Config) -> Result<Vec<u8>> {
    match format {
        Format::Typst => Ok(textblocks::blocks_to_typst(blocks, config).into_bytes()),
        Format::Json => Ok(textblocks::blocks_to_json(blocks)?.into_bytes()),
        Format::Pdf => textblocks::blocks_to_pdf(blocks, config),
    }
}

/// Log to stderr so piped output stays clean. `RUST_LOG` overrides `--verbose`.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init();
}

//! dokutree CLI - wiki markup to HTML or a tree outline

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dokutree::{Document, Error, Options};

/// Parse a DokuWiki page and print it as HTML or as its document tree.
#[derive(Parser)]
#[command(name = "dokutree", version, about)]
struct Cli {
    /// Input file, `-` for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Document title (defaults to the input file name).
    #[arg(long)]
    title: Option<String>,

    /// Leave bare URLs as plain text.
    #[arg(long)]
    no_autolink: bool,

    /// Render headings without `id` attributes.
    #[arg(long)]
    no_heading_ids: bool,

    /// Log at debug level (otherwise RUST_LOG, default warn).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Tree,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let options = Options {
        fixup_links: !cli.no_autolink,
        heading_ids: !cli.no_heading_ids,
    };

    let doc = read_document(cli, &options)?;
    let rendered = match cli.format {
        Format::Html => dokutree::to_html_with_options(&doc, &options),
        Format::Tree => doc.dump(),
    };

    match &cli.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }
    Ok(())
}

fn read_document(cli: &Cli, options: &Options) -> Result<Document, Error> {
    if cli.input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        let title = cli.title.as_deref().unwrap_or("stdin");
        return Ok(dokutree::parse_with_options(&buf, title, options)?);
    }

    let path = Path::new(&cli.input);
    match &cli.title {
        Some(title) => {
            let content = std::fs::read(path)?;
            Ok(dokutree::parse_with_options(&content, title, options)?)
        }
        None => dokutree::parse_file_with_options(path, options),
    }
}

//! jsdoc-tags: pull `@tag` metadata out of `/** ... */` comments.
//!
//! Two modes, same as any filter-style doc tool:
//!
//! - **stdin mode**: `jsdoc-tags < file.js` prints to stdout
//! - **file mode**: `jsdoc-tags -o out/ -f markdown src/**/*.js` writes one file per input

mod document;
mod render;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use document::{Document, ParseOptions};
use render::Renderer;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "jsdoc-tags",
    about = "Extract, filter and re-serialize @tag metadata from /** ... */ documentation comments"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), markdown, comment
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Keep each comment line's original indentation
    #[arg(long)]
    keep_indent: bool,

    /// Only report these tags ('@' optional). Can be specified multiple times.
    #[arg(short = 't', long = "tag")]
    tags: Vec<String>,

    /// Extra unregistered tags to report. Can be specified multiple times.
    #[arg(short = 'c', long = "custom-tag")]
    custom_tags: Vec<String>,

    /// Remove these tags from every comment before parsing.
    #[arg(short = 'r', long)]
    remove: Vec<String>,

    /// Leading spaces for re-serialized comments (comment format)
    #[arg(long, default_value_t = 0)]
    indent: usize,

    /// Log parsing details to stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            keep_indent: self.keep_indent,
            only: self.tags.clone(),
            custom: self.custom_tags.clone(),
            remove: self.remove.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Warnings only by default; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// stdin mode: read one source from stdin, write the rendering to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let renderer = render::create_renderer(&cli.format, cli.indent)?;
    let doc = Document::parse("<stdin>", &input, &cli.parse_options(), renderer.links());
    print!("{}", renderer.render(&doc));
    Ok(())
}

/// file mode: process every input file, write one output per file.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let renderer = render::create_renderer(&cli.format, cli.indent)?;
    let opts = cli.parse_options();
    let input_files = expand_globs(&cli.files)?;

    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let source = path.to_string_lossy().to_string();
        let doc = Document::parse(&source, &content, &opts, renderer.links());

        // Files without documentation comments produce no output
        if doc.comments.is_empty() {
            tracing::debug!("no documentation comments in {}", source);
            continue;
        }

        write_output(renderer.as_ref(), &doc, output_dir)?;
    }

    Ok(())
}

fn write_output(renderer: &dyn Renderer, doc: &Document, output_dir: &Path) -> Result<()> {
    let name = derive_output_name(&doc.source);
    let out_path = output_dir.join(format!("{}.{}", name, renderer.file_extension()));
    if out_path.exists() {
        tracing::warn!("overwriting {} with output for {}", out_path.display(), doc.source);
    }
    fs::write(&out_path, renderer.render(doc))
        .with_context(|| format!("failed to write {}", out_path.display()))
}

/// File extensions recognized as source files, longest first per family.
const SUPPORTED_EXTENSIONS: &[&str] = &["mjs", "cjs", "jsx", "js", "mts", "cts", "tsx", "ts"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Derive the output file name (without extension) from a source path.
/// "src/util/add.js" → "add", "types.d.ts" → "types.d"
fn derive_output_name(source: &str) -> String {
    let filename = source.rsplit(['/', '\\']).next().unwrap_or(source);
    SUPPORTED_EXTENSIONS
        .iter()
        .find_map(|ext| filename.strip_suffix(ext)?.strip_suffix('.'))
        .unwrap_or(filename)
        .to_string()
}

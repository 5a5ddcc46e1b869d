//! notedown - workspace pages to Markdown files

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use notedown::{FrontmatterValue, SnapshotWorkspace, convert_page, decode, detect_page_id};

#[derive(Parser)]
#[command(name = "notedown")]
#[command(version, about = "Convert saved workspace page chunks to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    notedown page.json                      Convert a saved page chunk to ./<page-id>.md
    notedown -c content -u /static *.json   Convert a batch into content/
    notedown -a layout=post page.json       Add frontmatter to every page")]
struct Cli {
    /// Saved page-chunk JSON files (one page per file)
    #[arg(value_name = "CHUNK", required = true)]
    chunks: Vec<PathBuf>,

    /// Page id to convert (defaults to the page detected in each chunk)
    #[arg(long, value_name = "ID")]
    page: Option<String>,

    /// Output directory for markdown files
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    content_dir: PathBuf,

    /// URL prefix recorded for referenced files
    #[arg(short = 'u', long, default_value = "/static", value_name = "URL")]
    static_url: String,

    /// Additional frontmatter added to every page (e.g. -a layout=post)
    #[arg(short = 'a', long = "add-frontmatter", value_name = "KEY=VALUE")]
    add_frontmatter: Vec<String>,

    /// Suppress warning output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let extra = match parse_extra_frontmatter(&cli.add_frontmatter) {
        Ok(extra) => extra,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fs::create_dir_all(&cli.content_dir) {
        eprintln!("error: cannot create {}: {e}", cli.content_dir.display());
        return ExitCode::FAILURE;
    }

    // One page failing must not sink the batch.
    let mut failures = 0usize;
    for chunk_path in &cli.chunks {
        if let Err(e) = convert_chunk(&cli, &extra, chunk_path) {
            tracing::error!("{}: {e}", chunk_path.display());
            failures += 1;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn convert_chunk(
    cli: &Cli,
    extra: &[(String, String)],
    chunk_path: &PathBuf,
) -> notedown::Result<()> {
    let raw = fs::read(chunk_path)?;
    let record_map: serde_json::Value = serde_json::from_slice(&raw)?;

    let page_id = match &cli.page {
        Some(id) => id.clone(),
        None => detect_page_id(&record_map).ok_or_else(|| {
            notedown::Error::InvalidRecordMap(format!(
                "no page record in {}",
                chunk_path.display()
            ))
        })?,
    };
    let schema = decode::collection_schema(&record_map).unwrap_or_default();

    let mut workspace = SnapshotWorkspace::new().with_static_url(&cli.static_url);
    workspace.insert_chunk(page_id.clone(), record_map);

    let mut document = convert_page(&mut workspace, &page_id, &schema)?;
    for (key, value) in extra {
        document
            .frontmatter
            .insert(key.clone(), FrontmatterValue::String(value.clone()));
    }

    let output_path = cli.content_dir.join(format!("{page_id}.md"));
    let frontmatter_line = serde_json::to_string(&document.frontmatter)?;
    fs::write(&output_path, format!("{frontmatter_line}\n{}", document.body))?;

    tracing::info!(
        "converted page {page_id} -> {} ({} diagnostics)",
        output_path.display(),
        document.diagnostics.len()
    );
    Ok(())
}

fn parse_extra_frontmatter(raw: &[String]) -> Result<Vec<(String, String)>, String> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| format!("invalid frontmatter entry '{entry}' (expected KEY=VALUE)"))
        })
        .collect()
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

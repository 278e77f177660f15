//! resume-export
//!
//! Renders a résumé to PDF and/or HTML files, either from a JSON record on
//! disk or from a persisted résumé in the database.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use resume_desk::db::create_pool;
use resume_desk::models::resume::ResumeRecord;
use resume_desk::render::export::{render_document, save_document, DocumentFormat};
use resume_desk::render::html::HtmlRenderer;
use resume_desk::review::{adapter::resume_record, repository::fetch_resume};

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Pdf,
    Html,
    Both,
}

impl FormatArg {
    fn formats(self) -> &'static [DocumentFormat] {
        match self {
            FormatArg::Pdf => &[DocumentFormat::Pdf],
            FormatArg::Html => &[DocumentFormat::Html],
            FormatArg::Both => &[DocumentFormat::Pdf, DocumentFormat::Html],
        }
    }
}

#[derive(Parser)]
#[command(name = "resume-export")]
#[command(about = "Export a résumé as PDF or HTML", long_about = None)]
struct Cli {
    /// Résumé record as JSON
    #[arg(short, long, conflicts_with = "resume_id")]
    input: Option<PathBuf>,

    /// Persisted résumé to export (needs DATABASE_URL)
    #[arg(long)]
    resume_id: Option<Uuid>,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[arg(short, long, value_enum, default_value = "pdf")]
    format: FormatArg,

    /// Directory the files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

async fn load_record(cli: &Cli) -> Result<ResumeRecord> {
    if let Some(path) = &cli.input {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a résumé record", path.display()));
    }

    let Some(id) = cli.resume_id else {
        bail!("Pass either --input <file> or --resume-id <uuid>");
    };
    let url = cli
        .database_url
        .as_deref()
        .context("--resume-id needs DATABASE_URL")?;
    let pool = create_pool(url).await?;
    let row = fetch_resume(&pool, id)
        .await?
        .with_context(|| format!("Resume {id} not found"))?;
    Ok(resume_record(&row))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("resume_desk=info,resume_export=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let record = load_record(&cli).await?;
    let html = HtmlRenderer::new()?;

    for format in cli.format.formats() {
        let document = render_document(&record, *format, &html)?;
        let path = save_document(&document, &cli.out_dir)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

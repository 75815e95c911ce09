use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;

use pdf_rag::config::AppConfig;
use pdf_rag::ingest::ingest_pdf;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-rag-ingest",
    about = "Ingest a PDF into the pgvector collection"
)]
struct Args {
    /// Clear the collection before ingesting, instead of appending
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::from_env();

    let written = ingest_pdf(&config, args.reset).await?;
    println!(
        "Ingestão concluída: {} chunks gravados em '{}'.",
        written, config.collection
    );
    Ok(())
}

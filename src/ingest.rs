use anyhow::Result;

use crate::config::AppConfig;
use crate::database::{ChunkRecord, PgVectorStore};
use crate::document::{load_pdf_pages, ChunkMetadata, TextSplitter};
use crate::providers;

/// Loads the configured PDF, splits it into overlapping chunks, embeds each
/// chunk, and persists everything into the configured collection. Returns the
/// number of chunks written. Re-running appends duplicates unless `reset` is
/// set, which clears the collection first.
pub async fn ingest_pdf(config: &AppConfig, reset: bool) -> Result<usize> {
    let pages = load_pdf_pages(&config.pdf_path)?;
    let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap)?;

    let mut chunks = Vec::new();
    for page in &pages {
        for chunk in splitter.split(&page.text) {
            chunks.push((
                chunk.text,
                ChunkMetadata {
                    source: config.pdf_path.clone(),
                    page: page.page,
                    start_index: chunk.start_index as i64,
                },
            ));
        }
    }
    log::info!("Split {} pages into {} chunks", pages.len(), chunks.len());

    let store = PgVectorStore::connect(config).await?;
    if reset {
        store.clear_collection().await?;
    }

    if chunks.is_empty() {
        log::warn!("No text extracted from {}; nothing to ingest", config.pdf_path);
        return Ok(0);
    }

    let embedder = providers::embeddings_provider(config)?;
    log::info!("Embedding chunks with {}", embedder.model());

    let mut records = Vec::with_capacity(chunks.len());
    for (index, (text, metadata)) in chunks.into_iter().enumerate() {
        let embedding = embedder.embed(&text).await?;
        records.push(ChunkRecord {
            text,
            metadata,
            embedding,
        });
        if (index + 1) % 25 == 0 {
            log::info!("Embedded {} chunks", index + 1);
        }
    }

    let dims = records[0].embedding.len();
    store.ensure_collection(dims).await?;
    let written = store.add_chunks(&records).await?;

    Ok(written)
}

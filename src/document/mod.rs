mod loader;
mod splitter;

pub use loader::{load_pdf_pages, PageText};
pub use splitter::{TextChunk, TextSplitter};

use serde::{Deserialize, Serialize};

/// Provenance stored alongside every chunk in the vector store. Retrieval
/// carries it back so answers can cite source pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub start_index: i64,
}

pub mod pgvector;

pub use pgvector::{ChunkRecord, CollectionName, PgVectorStore, ScoredChunk, StoreError};

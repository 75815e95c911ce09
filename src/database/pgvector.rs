use std::fmt;

use pgvector::Vector;
use thiserror::Error;
use tokio_postgres::types::Json;
use tokio_postgres::NoTls;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::document::ChunkMetadata;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
    #[error("Operation failed: {0}")]
    Operation(#[from] tokio_postgres::Error),
}

/// A chunk ready for persistence: its text, provenance, and embedding.
#[derive(Debug, Clone)]
pub struct ChunkRecord {
    pub text: String,
    pub metadata: ChunkMetadata,
    pub embedding: Vec<f32>,
}

/// One similarity-search hit. `distance` is cosine distance: lower is more
/// similar.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub text: String,
    pub metadata: ChunkMetadata,
    pub distance: f64,
}

/// Collection names become table names, so they are validated before being
/// interpolated into SQL.
#[derive(Debug, Clone)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: &str) -> Result<Self, StoreError> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(StoreError::InvalidCollection(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// pgvector-backed chunk store. A fresh connection is opened per construction
/// and driven by a background task; there is no pooling.
pub struct PgVectorStore {
    client: tokio_postgres::Client,
    collection: CollectionName,
}

impl PgVectorStore {
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let collection = CollectionName::new(&config.collection)?;

        let mut pg = tokio_postgres::Config::new();
        pg.host(&config.pg_host)
            .port(config.pg_port)
            .dbname(&config.pg_database)
            .user(&config.pg_user)
            .password(&config.pg_password);

        let (client, connection) = pg
            .connect(NoTls)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("postgres connection error: {e}");
            }
        });

        Ok(Self { client, collection })
    }

    /// Creates the vector extension and the collection table if missing.
    /// `dims` fixes the embedding column width and is taken from the first
    /// embedding at ingestion time.
    pub async fn ensure_collection(&self, dims: usize) -> Result<(), StoreError> {
        self.client
            .execute("CREATE EXTENSION IF NOT EXISTS vector", &[])
            .await?;

        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                document TEXT NOT NULL,
                cmetadata JSONB NOT NULL,
                embedding VECTOR({dims}) NOT NULL
            )",
            self.collection
        );
        self.client.execute(&ddl, &[]).await?;
        Ok(())
    }

    /// Removes every chunk from the collection. A no-op when the table does
    /// not exist yet.
    pub async fn clear_collection(&self) -> Result<(), StoreError> {
        let row = self
            .client
            .query_one("SELECT to_regclass($1) IS NOT NULL", &[&self.collection.as_str()])
            .await?;
        let exists: bool = row.get(0);
        if exists {
            self.client
                .execute(&format!("TRUNCATE TABLE {}", self.collection), &[])
                .await?;
            log::info!("Cleared collection '{}'", self.collection);
        }
        Ok(())
    }

    pub async fn add_chunks(&self, records: &[ChunkRecord]) -> Result<usize, StoreError> {
        let insert = format!(
            "INSERT INTO {} (id, document, cmetadata, embedding) VALUES ($1, $2, $3, $4)",
            self.collection
        );
        let statement = self.client.prepare(&insert).await?;

        for record in records {
            let id = Uuid::new_v4();
            let embedding = Vector::from(record.embedding.clone());
            self.client
                .execute(
                    &statement,
                    &[&id, &record.text, &Json(&record.metadata), &embedding],
                )
                .await?;
        }
        Ok(records.len())
    }

    /// Top-K nearest chunks by cosine distance, closest first.
    pub async fn similarity_search(
        &self,
        query_embedding: &[f32],
        k: i64,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        let select = format!(
            "SELECT document, cmetadata, embedding <=> $1 AS distance \
             FROM {} ORDER BY embedding <=> $1 ASC LIMIT $2",
            self.collection
        );
        let query = Vector::from(query_embedding.to_vec());
        let rows = self.client.query(&select, &[&query, &k]).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let Json(metadata): Json<ChunkMetadata> = row.get("cmetadata");
                ScoredChunk {
                    text: row.get("document"),
                    metadata,
                    distance: row.get("distance"),
                }
            })
            .collect())
    }
}

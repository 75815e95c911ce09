pub mod chat;
pub mod config;
pub mod database;
pub mod document;
pub mod ingest;
pub mod providers;
pub mod search;

// Re-export commonly used items
pub use config::AppConfig;
pub use database::PgVectorStore;
pub use search::search_prompt;

use std::env;

/// Which hosted API backs embeddings or chat completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Unknown values fall back to OpenAI, same as the two-branch selector
    /// this replaces.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "gemini" => ProviderKind::Gemini,
            _ => ProviderKind::OpenAi,
        }
    }
}

/// Everything the pipeline reads from the environment, resolved once at
/// startup and passed into the routines explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pdf_path: String,

    // Database
    pub pg_host: String,
    pub pg_port: u16,
    pub pg_database: String,
    pub pg_user: String,
    pub pg_password: String,
    pub collection: String,

    // Chunking
    pub chunk_size: usize,
    pub chunk_overlap: usize,

    // Providers
    pub embeddings_provider: ProviderKind,
    pub llm_provider: ProviderKind,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_chat_model: String,
    pub openai_embedding_model: String,
    pub gemini_chat_model: String,
    pub gemini_embedding_model: String,

    // Retrieval
    pub top_k: i64,
    pub verbose: bool,
    pub apply_threshold: bool,
    // Read whether or not apply_threshold is set; the huge default means the
    // filter passes everything unless SCORE_THRESHOLD is overridden.
    pub score_threshold: f64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            pdf_path: env_or("PDF_PATH", "./document.pdf"),
            pg_host: env_or("PGHOST", "localhost"),
            pg_port: env_parse_or("PGPORT", 5432),
            pg_database: env_or("PGDATABASE", "vector_db"),
            pg_user: env_or("PGUSER", "postgres"),
            pg_password: env_or("PGPASSWORD", "postgres"),
            collection: env_or("PGVECTOR_COLLECTION", "documents"),
            chunk_size: env_parse_or("CHUNK_SIZE", 1000),
            chunk_overlap: env_parse_or("CHUNK_OVERLAP", 150),
            embeddings_provider: ProviderKind::parse(&env_or("EMBEDDINGS_PROVIDER", "openai")),
            llm_provider: ProviderKind::parse(&env_or("LLM_PROVIDER", "openai")),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            openai_chat_model: env_or("OPENAI_CHAT_MODEL", "gpt-5-nano"),
            openai_embedding_model: env_or("OPENAI_EMBEDDING_MODEL", "text-embedding-3-small"),
            gemini_chat_model: env_or("GEMINI_CHAT_MODEL", "gemini-2.5-flash-lite"),
            gemini_embedding_model: env_or("GEMINI_EMBEDDING_MODEL", "models/embedding-001"),
            top_k: env_parse_or("TOP_K", 10),
            verbose: parse_bool(&env_or("VERBOSE", "false")),
            apply_threshold: parse_bool(&env_or("APLICAR_THRESHOLD", "false")),
            score_threshold: env_parse_or("SCORE_THRESHOLD", 1e9),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool(" true "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("1"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(ProviderKind::parse("gemini"), ProviderKind::Gemini);
        assert_eq!(ProviderKind::parse("GEMINI"), ProviderKind::Gemini);
        assert_eq!(ProviderKind::parse("openai"), ProviderKind::OpenAi);
        // Anything unrecognized defaults to OpenAI
        assert_eq!(ProviderKind::parse("mistral"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::parse(""), ProviderKind::OpenAi);
    }
}

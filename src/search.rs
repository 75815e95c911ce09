use anyhow::Result;

use crate::config::AppConfig;
use crate::database::{PgVectorStore, ScoredChunk};
use crate::providers;

/// Returned verbatim whenever retrieval leaves nothing to answer from.
pub const REFUSAL: &str = "Não tenho informações necessárias para responder sua pergunta.";

const SNIPPET_SEPARATOR: &str = "\n\n---\n\n";

const PROMPT_TEMPLATE: &str = "\
CONTEXTO:
{contexto}

REGRAS (OBRIGATÓRIAS):
- Responda SOMENTE com base no CONTEXTO.
- Se a informação não estiver explícita no CONTEXTO, responda exatamente:
  \"Não tenho informações necessárias para responder sua pergunta.\"
- NÃO inclua anos, datas, números ou unidades que não estejam escritos no CONTEXTO.
- NÃO reescreva valores monetários: repita-os exatamente como aparecem (símbolo, pontuação e casas decimais).
- NÃO opine, NÃO interprete, NÃO resuma além do necessário.
- Responda de forma curta e direta (1 a 2 linhas no máximo).

EXEMPLOS FORA DO CONTEXTO:
Pergunta: \"Qual é a capital da França?\"
Resposta: \"Não tenho informações necessárias para responder sua pergunta.\"

Pergunta: \"Quantos clientes temos em 2024?\"
Resposta: \"Não tenho informações necessárias para responder sua pergunta.\"

Pergunta: \"Você acha isso bom ou ruim?\"
Resposta: \"Não tenho informações necessárias para responder sua pergunta.\"

PERGUNTA DO USUÁRIO:
{pergunta}

AGORA RESPONDA A \"PERGUNTA DO USUÁRIO\"
";

/// The context block handed to the LLM plus the bookkeeping around it.
#[derive(Debug, Clone, Default)]
pub struct ContextAssembly {
    pub context: String,
    pub pages: Vec<i64>,
    pub debug_lines: Vec<String>,
}

impl ContextAssembly {
    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }
}

/// Filters search hits and concatenates the survivors into a context block.
/// When `apply_threshold` is set, hits with distance strictly greater than
/// `threshold` are dropped. Pages are the sorted distinct page numbers of the
/// survivors.
pub fn assemble_context(
    results: &[ScoredChunk],
    apply_threshold: bool,
    threshold: f64,
) -> ContextAssembly {
    let mut snippets = Vec::new();
    let mut pages = Vec::new();
    let mut debug_lines = Vec::new();

    for hit in results {
        if apply_threshold && hit.distance > threshold {
            continue;
        }
        let page = hit.metadata.page;
        pages.push(page);
        snippets.push(format!("[p{page}] {}", hit.text));
        debug_lines.push(format!(
            "- p{page} | score={:.4} | {}",
            hit.distance, hit.metadata.source
        ));
    }

    pages.sort_unstable();
    pages.dedup();

    ContextAssembly {
        context: snippets.join(SNIPPET_SEPARATOR),
        pages,
        debug_lines,
    }
}

pub fn fill_prompt(context: &str, question: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{contexto}", context)
        .replace("{pergunta}", question)
}

/// The retrieval-and-answer routine: embed the question, pull the top-K
/// nearest chunks, assemble the context, and forward it to the LLM. Returns
/// the answer text and the pages it drew from. Short-circuits with a canned
/// refusal when retrieval comes back empty, without calling the LLM.
pub async fn search_prompt(config: &AppConfig, question: &str) -> Result<(String, Vec<i64>)> {
    let embedder = providers::embeddings_provider(config)?;
    let llm = providers::completion_provider(config)?;
    let store = PgVectorStore::connect(config).await?;

    let query_embedding = embedder.embed(question).await?;
    let results = store
        .similarity_search(&query_embedding, config.top_k)
        .await?;
    log::debug!("Retrieved {} chunks for question", results.len());

    let assembly = assemble_context(&results, config.apply_threshold, config.score_threshold);
    if assembly.is_empty() {
        return Ok((REFUSAL.to_string(), Vec::new()));
    }

    if config.verbose {
        println!("\n[DEBUG] Contexto usado:");
        for line in &assembly.debug_lines {
            println!("{line}");
        }
        println!();
    }

    let prompt = fill_prompt(&assembly.context, question);
    let answer = llm.complete(&prompt).await?;

    Ok((answer, assembly.pages))
}

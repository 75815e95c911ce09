use anyhow::{Context, Result};

/// Text of a single PDF page. Pages are numbered from zero, matching the
/// page indices cited back to the user.
#[derive(Debug, Clone)]
pub struct PageText {
    pub page: i64,
    pub text: String,
}

pub fn load_pdf_pages(path: &str) -> Result<Vec<PageText>> {
    let pages = pdf_extract::extract_text_by_pages(path)
        .with_context(|| format!("failed to extract text from PDF at {path}"))?;

    log::info!("Loaded {} pages from {}", pages.len(), path);

    Ok(pages
        .into_iter()
        .enumerate()
        .map(|(index, text)| PageText {
            page: index as i64,
            text,
        })
        .collect())
}

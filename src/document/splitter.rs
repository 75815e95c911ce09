use anyhow::{ensure, Result};

/// A bounded span of page text. `start_index` is the character offset of the
/// chunk within the page it was cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub text: String,
    pub start_index: usize,
}

/// Splits text into overlapping chunks, preferring to cut at paragraph,
/// line, or word boundaries in that order.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        ensure!(chunk_size > 0, "chunk size must be positive");
        ensure!(
            chunk_overlap < chunk_size,
            "chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
        );
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Every chunk is at most `chunk_size` characters and consecutive chunks
    /// share at least `chunk_overlap` characters.
    pub fn split(&self, text: &str) -> Vec<TextChunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if total == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        loop {
            let mut end = (start + self.chunk_size).min(total);
            if end < total {
                end = self.cut_point(&chars, start, end);
            }
            chunks.push(TextChunk {
                text: chars[start..end].iter().collect(),
                start_index: start,
            });
            if end >= total {
                break;
            }
            // The next chunk re-reads the last chunk_overlap characters.
            start = end - self.chunk_overlap;
        }
        chunks
    }

    /// Walks back from `end` looking for the best break: a paragraph break,
    /// then a line break, then a space. Never retreats past the overlap
    /// region, so the loop always makes progress.
    fn cut_point(&self, chars: &[char], start: usize, end: usize) -> usize {
        let min_end = start + self.chunk_overlap + 1;

        for i in (min_end..=end).rev() {
            if chars[i - 1] == '\n' && i >= 2 && chars[i - 2] == '\n' {
                return i;
            }
        }
        for i in (min_end..=end).rev() {
            if chars[i - 1] == '\n' {
                return i;
            }
        }
        for i in (min_end..=end).rev() {
            if chars[i - 1] == ' ' {
                return i;
            }
        }
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text(words: usize) -> String {
        (0..words)
            .map(|i| format!("palavra{i}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(TextSplitter::new(0, 0).is_err());
        assert!(TextSplitter::new(100, 100).is_err());
        assert!(TextSplitter::new(100, 150).is_err());
        assert!(TextSplitter::new(1000, 150).is_ok());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let splitter = TextSplitter::new(1000, 150).unwrap();
        let chunks = splitter.split("um texto curto");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "um texto curto");
        assert_eq!(chunks[0].start_index, 0);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let splitter = TextSplitter::new(1000, 150).unwrap();
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn test_chunk_size_and_overlap_bounds() {
        let splitter = TextSplitter::new(1000, 150).unwrap();
        let text = sample_text(2000);
        let chunks = splitter.split(&text);
        assert!(chunks.len() > 1);

        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 1000);
        }
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let next: Vec<char> = pair[1].text.chars().collect();
            let tail: String = prev[prev.len() - 150..].iter().collect();
            let head: String = next[..150].iter().collect();
            assert_eq!(tail, head, "consecutive chunks must share 150 characters");
        }
    }

    #[test]
    fn test_start_index_matches_source_text() {
        let splitter = TextSplitter::new(200, 40).unwrap();
        let text = sample_text(100);
        let chars: Vec<char> = text.chars().collect();
        for chunk in splitter.split(&text) {
            let span: String = chars[chunk.start_index..]
                .iter()
                .take(chunk.text.chars().count())
                .collect();
            assert_eq!(span, chunk.text);
        }
    }

    #[test]
    fn test_prefers_word_boundaries() {
        let splitter = TextSplitter::new(100, 20).unwrap();
        let text = sample_text(200);
        let chunks = splitter.split(&text);
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.text.ends_with(' '),
                "non-final chunk should end at a word boundary: {:?}",
                chunk.text
            );
        }
    }

    #[test]
    fn test_prefers_paragraph_breaks() {
        let splitter = TextSplitter::new(100, 20).unwrap();
        let paragraph = "x".repeat(70);
        let text = format!("{paragraph}\n\n{paragraph}\n\n{paragraph}");
        let chunks = splitter.split(&text);
        assert!(chunks[0].text.ends_with("\n\n"));
    }

    #[test]
    fn test_unbreakable_text_is_cut_hard() {
        let splitter = TextSplitter::new(100, 20).unwrap();
        let text = "x".repeat(250);
        let chunks = splitter.split(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
    }
}

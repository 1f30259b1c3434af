//! Fixed-size transcript segmentation.
//!
//! Splits transcript text into contiguous character-count chunks, the unit
//! of summarization.

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// A fixed-size slice of the transcript text.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Position of this slice in the original split, starting at 0.
    pub index: usize,
    /// Text content of this chunk.
    pub text: String,
    /// Number of whitespace-separated words in the chunk.
    pub word_count: usize,
}

/// Split text into contiguous chunks of `chunk_size` characters.
///
/// The slice count is fixed up front at `len / chunk_size + 1`, so a text
/// whose length is an exact multiple of `chunk_size` produces one extra
/// empty trailing slice. Whitespace-only slices are dropped rather than
/// emitted; indices keep their original split positions and are not
/// renumbered afterwards.
pub fn segment(text: &str, chunk_size: usize) -> Vec<Chunk> {
    if text.is_empty() || chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let slice_count = chars.len() / chunk_size + 1;

    let mut chunks = Vec::new();
    for index in 0..slice_count {
        let start = (index * chunk_size).min(chars.len());
        let end = ((index + 1) * chunk_size).min(chars.len());
        let slice: String = chars[start..end].iter().collect();

        if slice.trim().is_empty() {
            continue;
        }

        let word_count = slice.split_whitespace().count();
        chunks.push(Chunk {
            index,
            text: slice,
            word_count,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_zero_chunks() {
        assert!(segment("", 1000).is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = segment("hello world", 1000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[0].text, "hello world");
        assert_eq!(chunks[0].word_count, 2);
    }

    #[test]
    fn test_splits_on_character_boundaries() {
        let text = "a".repeat(10) + &"b".repeat(4);
        let chunks = segment(&text, 10);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a".repeat(10));
        assert_eq!(chunks[1].text, "b".repeat(4));
    }

    #[test]
    fn drops_trailing_slice_on_exact_multiple() {
        // An exact multiple produces len/size + 1 slices; the final empty
        // slice must be skipped, not summarized.
        let text = "x".repeat(2000);
        let chunks = segment(&text, 1000);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_whitespace_chunk_dropped_but_indices_preserved() {
        let text = format!("{}{}{}", "a".repeat(5), " ".repeat(5), "b".repeat(5));
        let chunks = segment(&text, 5);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].index, 0);
        // Index 1 was whitespace-only; index 2 keeps its original position
        assert_eq!(chunks[1].index, 2);
        assert_eq!(chunks[1].text, "b".repeat(5));
    }

    #[test]
    fn test_slices_cover_text_exactly() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let chunk_size = 128;

        // Reconstruct from all slices, including the dropped ones, by
        // replaying the same split positions.
        let chars: Vec<char> = text.chars().collect();
        let slice_count = chars.len() / chunk_size + 1;
        let mut rebuilt = String::new();
        for i in 0..slice_count {
            let start = (i * chunk_size).min(chars.len());
            let end = ((i + 1) * chunk_size).min(chars.len());
            rebuilt.extend(&chars[start..end]);
        }
        assert_eq!(rebuilt, text);

        // Emitted chunks must be a subsequence of those slices
        let chunks = segment(&text, chunk_size);
        for chunk in &chunks {
            let start = chunk.index * chunk_size;
            let end = ((chunk.index + 1) * chunk_size).min(chars.len());
            let expected: String = chars[start..end].iter().collect();
            assert_eq!(chunk.text, expected);
        }
    }

    #[test]
    fn test_multibyte_text() {
        let text = "æøå".repeat(10);
        let chunks = segment(&text, 6);
        assert_eq!(chunks.len(), 5);
        assert!(chunks.iter().all(|c| c.text.chars().count() == 6));
    }
}

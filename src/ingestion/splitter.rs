//! Bounded, overlapping text splitting for embedding-sized chunks.
//!
//! Splitting is separator-aware: paragraphs first, then lines, then
//! sentences, with a hard character cut only as a last resort. Consecutive
//! chunks share an overlap so retrieval does not lose context at boundaries.

const SEPARATORS: [&str; 3] = ["\n\n", "\n", ". "];

/// Splits text into chunks of at most `chunk_size` characters with
/// `chunk_overlap` characters carried over between consecutive chunks.
#[derive(Clone, Debug)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    /// The pipeline default: 800-character chunks with 100-character overlap.
    fn default() -> Self {
        Self::new(800, 100)
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk_size must be positive");
        assert!(
            chunk_overlap < chunk_size,
            "overlap must be smaller than chunk size"
        );
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Splits `text` into bounded chunks.
    ///
    /// Whitespace-only input yields no chunks; input already within the size
    /// limit passes through as a single chunk.
    pub fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut fragments = Vec::new();
        self.fragment(text, &SEPARATORS, &mut fragments);
        self.assemble(fragments)
    }

    /// Recursively breaks `text` into fragments no longer than `chunk_size`,
    /// trying coarser separators before finer ones.
    fn fragment(&self, text: &str, separators: &[&str], out: &mut Vec<String>) {
        if char_len(text) <= self.chunk_size {
            if !text.trim().is_empty() {
                out.push(text.to_string());
            }
            return;
        }

        if let Some((sep, finer)) = separators.split_first() {
            let pieces: Vec<&str> = text.split_inclusive(*sep).collect();
            if pieces.len() > 1 {
                for piece in pieces {
                    self.fragment(piece, finer, out);
                }
            } else {
                self.fragment(text, finer, out);
            }
            return;
        }

        // No separator worked; hard cut on character boundaries. The cut is
        // sized to leave room for the overlap seed during assembly.
        let stride = self.chunk_size - self.chunk_overlap;
        let chars: Vec<char> = text.chars().collect();
        for window in chars.chunks(stride) {
            let piece: String = window.iter().collect();
            if !piece.trim().is_empty() {
                out.push(piece);
            }
        }
    }

    /// Packs fragments greedily into chunks, seeding each new chunk with the
    /// overlap tail of its predecessor.
    fn assemble(&self, fragments: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for fragment in fragments {
            let fragment_len = char_len(&fragment);
            if current_len > 0 && current_len + fragment_len > self.chunk_size {
                chunks.push(current.trim().to_string());
                current = tail_chars(&current, self.chunk_overlap);
                current_len = char_len(&current);
                if current_len + fragment_len > self.chunk_size {
                    current.clear();
                    current_len = 0;
                }
            }
            current.push_str(&fragment);
            current_len += fragment_len;
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
        chunks
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last `n` characters of `s`, respecting char boundaries.
fn tail_chars(s: &str, n: usize) -> String {
    let len = char_len(s);
    if len <= n {
        return s.to_string();
    }
    s.chars().skip(len - n).collect()
}

//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`ReportChunker`], a
//! heading-aware recursive splitter: markdown-structured documents are first
//! split into heading-scoped sections (the heading trail travels with each
//! chunk as metadata), and each section is then cut at the rightmost
//! separator that keeps a piece within the size budget, trying coarser
//! separators before finer ones (paragraph break, line break, sentence end,
//! word break, character break). Consecutive chunks share a configurable
//! character overlap that never crosses a section boundary.
//!
//! All sizes are counted in characters, not bytes; the source reports are
//! Portuguese text with multi-byte codepoints.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no
/// embeddings; embeddings are attached later by the ingestion pipeline.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. Sequence
    /// indices increase strictly in document order; the ingestion pipeline
    /// renumbers them globally across a run.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// The heading-aware recursive splitter used for the Petrobras reports.
///
/// Splitting is deterministic: re-chunking the same document with the same
/// configuration produces identical boundaries.
#[derive(Debug, Clone)]
pub struct ReportChunker {
    max_size: usize,
    overlap: usize,
}

impl ReportChunker {
    /// Create a new `ReportChunker`.
    ///
    /// # Arguments
    ///
    /// * `max_size` — maximum number of characters per chunk
    /// * `overlap` — characters carried back from the previous chunk's end
    pub fn new(max_size: usize, overlap: usize) -> Self {
        Self { max_size, overlap }
    }
}

impl Chunker for ReportChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut seq = 0;

        for section in parse_sections(&document.text) {
            for text in split_text(&section.text, self.max_size, self.overlap) {
                chunks.push(Chunk {
                    id: format!("{}_{seq}", document.source.id_stem()),
                    text,
                    embedding: Vec::new(),
                    source: document.source.clone(),
                    heading_trail: section.trail.clone(),
                    seq,
                });
                seq += 1;
            }
        }

        chunks
    }
}

/// A heading-scoped slice of the document. The heading line itself stays in
/// `text` so that concatenating all sections reconstructs the document.
struct Section {
    trail: Vec<String>,
    text: String,
}

/// Split raw text into heading-scoped sections.
///
/// A document without markdown headings becomes a single section with an
/// empty trail. The trail is maintained as a stack: a level-N heading
/// truncates the stack to N-1 entries before pushing itself.
fn parse_sections(text: &str) -> Vec<Section> {
    // Locate every heading line by byte offset.
    let mut headings: Vec<(usize, usize, String)> = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            let level = trimmed.chars().take_while(|c| *c == '#').count();
            let title = trimmed[level..].trim().to_string();
            headings.push((offset, level, title));
        }
        offset += line.len();
    }

    if headings.is_empty() {
        return vec![Section { trail: Vec::new(), text: text.to_string() }];
    }

    let mut sections = Vec::new();

    // Preamble before the first heading carries no trail.
    if headings[0].0 > 0 {
        sections.push(Section { trail: Vec::new(), text: text[..headings[0].0].to_string() });
    }

    let mut trail: Vec<String> = Vec::new();
    for (i, (start, level, title)) in headings.iter().enumerate() {
        let end = headings.get(i + 1).map_or(text.len(), |h| h.0);
        trail.truncate(level.saturating_sub(1));
        trail.push(title.clone());
        sections.push(Section { trail: trail.clone(), text: text[*start..end].to_string() });
    }

    sections
}

/// Separator levels tried coarsest-first when choosing a cut point.
const SEPARATOR_LEVELS: &[&[&str]] = &[&["\n\n"], &["\n"], &[". ", "! ", "? "], &[" "]];

/// Split one section's text into overlapping pieces of at most `max_size`
/// characters.
///
/// Each boundary is the rightmost separator occurrence within the size
/// window; if no separator at any level fits, the text is cut at the window
/// edge. The next piece starts `overlap` characters before the previous
/// boundary, clamped so the walk always advances.
fn split_text(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    if n == 0 {
        return Vec::new();
    }
    // A zero budget cannot hold even one character; let the whole unit
    // through oversized rather than loop forever.
    if max_size == 0 {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    loop {
        if n - start <= max_size {
            pieces.push(chars[start..].iter().collect());
            break;
        }
        let cut = choose_cut(&chars, start, start + max_size);
        pieces.push(chars[start..cut].iter().collect());
        start = cut.saturating_sub(overlap).max(start + 1);
    }
    pieces
}

/// Pick the boundary for the next piece: the rightmost separator occurrence
/// (coarsest level first) fully inside `chars[start..window_end]`, with the
/// separator kept on the preceding piece. Falls back to a character cut at
/// the window edge.
fn choose_cut(chars: &[char], start: usize, window_end: usize) -> usize {
    for level in SEPARATOR_LEVELS {
        let mut best: Option<usize> = None;
        for sep in *level {
            let sep_chars: Vec<char> = sep.chars().collect();
            if let Some(pos) = rfind_separator(chars, start, window_end, &sep_chars) {
                let cut = pos + sep_chars.len();
                if cut > start {
                    best = Some(best.map_or(cut, |b| b.max(cut)));
                }
            }
        }
        if let Some(cut) = best {
            return cut;
        }
    }
    window_end
}

/// Rightmost occurrence of `sep` fully contained in `chars[start..window_end]`,
/// returning the index where the separator begins.
fn rfind_separator(chars: &[char], start: usize, window_end: usize, sep: &[char]) -> Option<usize> {
    if sep.is_empty() || sep.len() > window_end - start {
        return None;
    }
    let mut pos = window_end - sep.len();
    loop {
        if chars[pos..pos + sep.len()] == *sep {
            return Some(pos);
        }
        if pos == start {
            return None;
        }
        pos -= 1;
    }
}

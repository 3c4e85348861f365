//! Documentation search index.
//!
//! A small in-process keyword index over [`Document`] values using Okapi
//! BM25 scoring. The index is built once at startup from the extracted
//! documentation set and is immutable afterwards, so concurrent searches
//! need no locking.

pub mod docs;

use std::collections::HashMap;

/// BM25 tuning parameters.
const K1: f32 = 1.2;
const B: f32 = 0.75;

/// One indexed document: a cleaned archive path plus its full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub content: String,
}

/// A scored search result borrowing from the index.
#[derive(Debug)]
pub struct SearchHit<'a> {
    pub score: f32,
    pub doc: &'a Document,
}

/// Inverted index with BM25 ranking.
///
/// # Example
///
/// ```rust
/// use toolserve::index::{Document, SearchIndex};
///
/// let index = SearchIndex::fit(vec![
///     Document { filename: "a.md".into(), content: "configure the server".into() },
///     Document { filename: "b.md".into(), content: "unrelated prose".into() },
/// ]);
/// let hits = index.search("server configuration", 5);
/// assert_eq!(hits[0].doc.filename, "a.md");
/// ```
pub struct SearchIndex {
    docs: Vec<Document>,
    /// term -> { doc index -> term frequency }
    term_docs: HashMap<String, HashMap<usize, u32>>,
    /// doc index -> total token count
    doc_lengths: Vec<u32>,
}

impl SearchIndex {
    /// Build the index from a document set.
    pub fn fit(docs: Vec<Document>) -> Self {
        let mut term_docs: HashMap<String, HashMap<usize, u32>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(docs.len());

        for (doc_id, doc) in docs.iter().enumerate() {
            let tokens = tokenize(&doc.content);
            doc_lengths.push(tokens.len() as u32);
            for token in tokens {
                *term_docs
                    .entry(token)
                    .or_default()
                    .entry(doc_id)
                    .or_insert(0) += 1;
            }
        }

        Self {
            docs,
            term_docs,
            doc_lengths,
        }
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Return the top-`k` documents for `query` by BM25 score.
    ///
    /// Documents with a zero score are omitted. Ties break by filename so
    /// results are deterministic across runs.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit<'_>> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() || self.docs.is_empty() || k == 0 {
            return Vec::new();
        }

        let n = self.docs.len() as f32;
        let avg_dl = self.avg_doc_length();
        let mut scores: HashMap<usize, f32> = HashMap::new();

        for term in &query_terms {
            let Some(postings) = self.term_docs.get(term) else {
                continue;
            };

            // IDF: log((N - df + 0.5) / (df + 0.5) + 1)
            let df = postings.len() as f32;
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();

            for (&doc_id, &tf) in postings {
                let tf = tf as f32;
                let doc_len = self.doc_lengths[doc_id] as f32;
                let tf_norm = (tf * (K1 + 1.0)) / (tf + K1 * (1.0 - B + B * doc_len / avg_dl));
                *scores.entry(doc_id).or_insert(0.0) += idf * tf_norm;
            }
        }

        let mut hits: Vec<SearchHit<'_>> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(doc_id, score)| SearchHit {
                score,
                doc: &self.docs[doc_id],
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.doc.filename.cmp(&b.doc.filename))
        });
        hits.truncate(k);
        hits
    }

    fn avg_doc_length(&self) -> f32 {
        if self.docs.is_empty() {
            return 1.0;
        }
        let total: u32 = self.doc_lengths.iter().sum();
        (total as f32 / self.docs.len() as f32).max(1.0)
    }
}

/// Tokenize text into lowercase alphanumeric terms, dropping one-character
/// fragments.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(|t| t.to_string())
        .collect()
}

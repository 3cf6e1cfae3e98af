//! TF-IDF vector space over a small in-memory corpus.
//!
//! Tokenization keeps maximal runs of word characters (alphanumeric or `_`)
//! of at least two characters, lowercased, minus English stop words.
//! Weights are raw term counts times smoothed IDF
//! (`ln((1 + n) / (1 + df)) + 1`), and every document vector is
//! L2-normalized, so cosine similarity reduces to a sparse dot product.
//!
//! The space is rebuilt per call; nothing is persisted between searches.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::stop_words::ENGLISH_STOP_WORDS;

fn stop_words() -> &'static HashSet<&'static str> {
    static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Splits text into lowercase terms, dropping single characters and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let stop = stop_words();
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2 && !stop.contains(t))
        .map(str::to_string)
        .collect()
}

/// Sparse L2-normalized vector, sorted by term index.
type SparseVec = Vec<(usize, f64)>;

/// Fitted TF-IDF space. Document `i` of the fitting corpus keeps index `i`.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vectors: Vec<SparseVec>,
}

impl TfidfSpace {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<HashMap<usize, f64>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut tf: HashMap<usize, f64> = HashMap::new();
            for term in tokenize(doc.as_ref()) {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                *tf.entry(idx).or_insert(0.0) += 1.0;
            }
            counts.push(tf);
        }

        let mut df = vec![0usize; vocabulary.len()];
        for tf in &counts {
            for idx in tf.keys() {
                df[*idx] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|tf| {
                let mut weighted: SparseVec =
                    tf.into_iter().map(|(idx, c)| (idx, c * idf[idx])).collect();
                let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in weighted.iter_mut() {
                        *w /= norm;
                    }
                }
                weighted.sort_by_key(|(idx, _)| *idx);
                weighted
            })
            .collect();

        Self { vectors }
    }

    /// Cosine similarity between documents `a` and `b`.
    ///
    /// Out-of-range indices and empty documents score `0.0`.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        match (self.vectors.get(a), self.vectors.get(b)) {
            (Some(va), Some(vb)) => sparse_dot(va, vb).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Cosine similarity of document `query` against every other document, in order.
    pub fn similarities_to(&self, query: usize) -> Vec<f64> {
        (0..self.vectors.len())
            .filter(|&i| i != query)
            .map(|i| self.cosine(query, i))
            .collect()
    }
}

fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

//! LexRank extractive summarization
//!
//! Sentences become tf-idf vectors, pairs whose idf-modified cosine exceeds a
//! threshold are linked, and sentence importance is the stationary score of a
//! damped random walk over that graph.

use std::collections::HashMap;

use crate::text::{split_sentences, tokenize};

/// LexRank configuration
#[derive(Debug, Clone)]
pub struct LexRank {
    /// Minimum cosine similarity for two sentences to be linked
    pub threshold: f64,
    /// Damping factor for the random walk
    pub damping: f64,
    /// Maximum number of power iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 delta between iterations
    pub tolerance: f64,
}

impl Default for LexRank {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// A sentence with its LexRank score
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSentence {
    pub index: usize,
    pub text: String,
    pub score: f64,
}

impl LexRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Summarize `text` into at most `num_sentences` sentences, in document order.
    pub fn summarize(&self, text: &str, num_sentences: usize) -> String {
        self.select(text, num_sentences)
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pick the top `num_sentences` sentences, returned in document order.
    ///
    /// Ties on score go to the earlier sentence.
    pub fn select(&self, text: &str, num_sentences: usize) -> Vec<RankedSentence> {
        let mut ranked = self.rank(&split_sentences(text));
        if ranked.len() > num_sentences {
            ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
            ranked.truncate(num_sentences);
            ranked.sort_by_key(|s| s.index);
        }
        ranked
    }

    /// Score every sentence. Scores sum to 1 for non-empty input.
    pub fn rank(&self, sentences: &[String]) -> Vec<RankedSentence> {
        let n = sentences.len();
        if n == 0 {
            return Vec::new();
        }

        let term_frequencies: Vec<HashMap<String, f64>> =
            sentences.iter().map(|s| term_frequencies(s)).collect();
        let idf = inverse_document_frequencies(&term_frequencies);
        let norms: Vec<f64> = term_frequencies
            .iter()
            .map(|tf| {
                tf.iter()
                    .map(|(term, f)| (f * idf[term]).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect();

        // Row-normalised adjacency; a sentence always links to itself
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let sim = cosine(&term_frequencies[i], &term_frequencies[j], norms[i], norms[j], &idf);
                if sim > self.threshold {
                    matrix[i][j] = 1.0;
                    matrix[j][i] = 1.0;
                }
            }
        }
        for row in &mut matrix {
            let degree: f64 = row.iter().sum();
            if degree > 0.0 {
                row.iter_mut().for_each(|w| *w /= degree);
            }
        }

        let scores = self.power_iteration(&matrix);
        sentences
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(index, (text, score))| RankedSentence {
                index,
                text: text.clone(),
                score,
            })
            .collect()
    }

    fn power_iteration(&self, matrix: &[Vec<f64>]) -> Vec<f64> {
        let n = matrix.len();
        let teleport = (1.0 - self.damping) / n as f64;
        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.tolerance {
            iterations += 1;

            // Rows with no links spread their mass uniformly
            let dangling_mass: f64 = matrix
                .iter()
                .zip(&scores)
                .filter(|(row, _)| row.iter().all(|&w| w == 0.0))
                .map(|(_, &s)| s)
                .sum();
            new_scores.fill(teleport + self.damping * dangling_mass / n as f64);

            for (row, &score) in matrix.iter().zip(&scores) {
                for (target, &weight) in row.iter().enumerate() {
                    if weight > 0.0 {
                        new_scores[target] += self.damping * score * weight;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(&new_scores)
                .map(|(old, new)| (old - new).abs())
                .sum();
            std::mem::swap(&mut scores, &mut new_scores);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            scores.iter_mut().for_each(|s| *s /= sum);
        }
        tracing::trace!(iterations, delta, "lexrank converged");
        scores
    }
}

/// Term frequency normalised by the most frequent term of the sentence.
fn term_frequencies(sentence: &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for word in tokenize(sentence) {
        *counts.entry(word).or_insert(0.0) += 1.0;
    }
    let max = counts.values().cloned().fold(0.0, f64::max);
    if max > 0.0 {
        counts.values_mut().for_each(|c| *c /= max);
    }
    counts
}

/// `ln(N / (1 + df))`. Terms in most sentences get zero or negative weight;
/// only the square enters the cosine.
fn inverse_document_frequencies(sentences: &[HashMap<String, f64>]) -> HashMap<String, f64> {
    let mut df: HashMap<&str, usize> = HashMap::new();
    for tf in sentences {
        for term in tf.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    let n = sentences.len() as f64;
    df.into_iter()
        .map(|(term, count)| (term.to_string(), (n / (1.0 + count as f64)).ln()))
        .collect()
}

fn cosine(
    a: &HashMap<String, f64>,
    b: &HashMap<String, f64>,
    norm_a: f64,
    norm_b: f64,
    idf: &HashMap<String, f64>,
) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, fa)| large.get(term).map(|fb| fa * fb * idf[term].powi(2)))
        .sum();
    dot / (norm_a * norm_b)
}

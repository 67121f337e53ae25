//! ROUGE-1, ROUGE-2 and ROUGE-L between a candidate and a reference summary.

use std::collections::HashMap;
use serde::Serialize;

use crate::text::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Score {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Score {
    fn from_counts(overlap: usize, candidate_total: usize, reference_total: usize) -> Self {
        if overlap == 0 || candidate_total == 0 || reference_total == 0 {
            return Score::default();
        }
        let precision = overlap as f64 / candidate_total as f64;
        let recall = overlap as f64 / reference_total as f64;
        Score {
            precision,
            recall,
            f1: 2.0 * precision * recall / (precision + recall),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RougeScores {
    pub rouge1: Score,
    pub rouge2: Score,
    #[serde(rename = "rougeL")]
    pub rouge_l: Score,
}

impl RougeScores {
    /// Named scores in display order.
    pub fn entries(&self) -> [(&'static str, Score); 3] {
        [("rouge1", self.rouge1), ("rouge2", self.rouge2), ("rougeL", self.rouge_l)]
    }
}

pub fn score(reference: &str, candidate: &str) -> RougeScores {
    let reference = tokenize(reference);
    let candidate = tokenize(candidate);

    RougeScores {
        rouge1: rouge_n(&reference, &candidate, 1),
        rouge2: rouge_n(&reference, &candidate, 2),
        rouge_l: rouge_l(&reference, &candidate),
    }
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_insert(0) += 1;
        }
    }
    counts
}

fn rouge_n(reference: &[String], candidate: &[String], n: usize) -> Score {
    let reference_counts = ngram_counts(reference, n);
    let candidate_counts = ngram_counts(candidate, n);

    let overlap: usize = candidate_counts
        .iter()
        .map(|(gram, &count)| count.min(reference_counts.get(gram).copied().unwrap_or(0)))
        .sum();

    Score::from_counts(
        overlap,
        candidate_counts.values().sum(),
        reference_counts.values().sum(),
    )
}

fn rouge_l(reference: &[String], candidate: &[String]) -> Score {
    Score::from_counts(lcs_length(reference, candidate), candidate.len(), reference.len())
}

fn lcs_length(a: &[String], b: &[String]) -> usize {
    // Two rolling rows of the DP table
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_texts() {
        let scores = score("The cat sat on the mat.", "the cat sat on the mat");
        for (_, s) in scores.entries() {
            assert!(close(s.f1, 1.0));
            assert!(close(s.precision, 1.0));
            assert!(close(s.recall, 1.0));
        }
    }

    #[test]
    fn test_partial_overlap() {
        // reference: the cat was found under the bed (7 tokens)
        // candidate: the cat was under the bed (6 tokens)
        let scores = score("the cat was found under the bed", "the cat was under the bed");

        assert!(close(scores.rouge1.precision, 1.0));
        assert!(close(scores.rouge1.recall, 6.0 / 7.0));

        // bigrams overlapping: "the cat", "cat was", "under the", "the bed"
        assert!(close(scores.rouge2.precision, 4.0 / 5.0));
        assert!(close(scores.rouge2.recall, 4.0 / 6.0));

        assert!(close(scores.rouge_l.precision, 1.0));
        assert!(close(scores.rouge_l.recall, 6.0 / 7.0));
    }

    #[test]
    fn test_clipped_counts() {
        let scores = score("the cat", "the the the");
        assert!(close(scores.rouge1.precision, 1.0 / 3.0));
        assert!(close(scores.rouge1.recall, 0.5));
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(score("", "something"), RougeScores::default());
        assert_eq!(score("something", ""), RougeScores::default());
        assert_eq!(score("one", "two").rouge2, Score::default());
    }

    #[test]
    fn test_lcs() {
        let a: Vec<String> = "a b c d e".split(' ').map(String::from).collect();
        let b: Vec<String> = "a c e b".split(' ').map(String::from).collect();
        assert_eq!(lcs_length(&a, &b), 3);
    }
}

//! Text helpers shared by the engines: whitespace cleanup, sentence
//! splitting and word tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t\r]*\n").expect("Failed to compile paragraph regex")
});

static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+").expect("Failed to compile word regex")
});

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "no", "fig", "approx", "dept", "est", "jan", "feb", "mar", "apr", "jun", "jul",
    "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k",
];

const CLOSERS: &[char] = &['"', '\'', '\u{201d}', '\u{2019}', ')', ']'];
const OPENERS: &[char] = &['"', '\'', '\u{201c}', '\u{2018}', '(', '['];

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

/// Split text into sentences. Blank lines always end a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(normalize_whitespace)
        .filter(|p| !p.is_empty())
        .flat_map(|p| split_paragraph(&p))
        .collect()
}

fn split_paragraph(paragraph: &str) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < chars.len() && (matches!(chars[end], '.' | '!' | '?') || CLOSERS.contains(&chars[end])) {
            end += 1;
        }

        let boundary = end < chars.len()
            && chars[end].is_whitespace()
            && chars
                .get(end + 1)
                .is_some_and(|&next| next.is_uppercase() || next.is_ascii_digit() || OPENERS.contains(&next))
            && !(c == '.' && is_abbreviation(&chars[start..i]));

        if boundary {
            let sentence: String = chars[start..end].iter().collect();
            sentences.push(sentence.trim().to_string());
            start = end + 1;
        }
        i = end;
    }

    if start < chars.len() {
        let tail: String = chars[start..].iter().collect();
        let tail = tail.trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
    }

    sentences
}

/// Whether the word right before a period is a known abbreviation or an initial.
fn is_abbreviation(before: &[char]) -> bool {
    let word_start = before
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(0, |p| p + 1);
    let word: String = before[word_start..]
        .iter()
        .skip_while(|c| OPENERS.contains(*c))
        .collect::<String>()
        .to_lowercase();

    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return true;
    }
    ABBREVIATIONS.contains(&word.as_str())
}

/// Lowercased alphanumeric words.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text).map(|m| m.as_str().to_lowercase()).collect()
}

/// Count whitespace-separated tokens.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Keep at most `max_tokens` whitespace-separated tokens.
pub fn truncate_tokens(text: &str, max_tokens: usize) -> String {
    text.split_whitespace().take(max_tokens).collect::<Vec<_>>().join(" ")
}

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::domain::ClassifiedInsight;

pub const MAX_KEYWORDS: usize = 50;
const MIN_TOKEN_LEN: usize = 4;

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid token regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // english
        "about", "after", "also", "been", "before", "being", "could", "does", "from", "have",
        "into", "just", "like", "more", "most", "much", "only", "other", "over", "some", "such",
        "than", "that", "their", "them", "then", "there", "these", "they", "this", "very",
        "were", "what", "when", "where", "which", "while", "will", "with", "would", "your",
        // indonesian
        "akan", "atau", "bagi", "bahwa", "banyak", "belum", "bisa", "dalam", "dari", "dengan",
        "hanya", "harus", "jika", "juga", "kalau", "karena", "kami", "kita", "lagi", "lebih",
        "masih", "mereka", "oleh", "pada", "saat", "saja", "sangat", "saya", "sejak", "sudah",
        "sekali", "tapi", "telah", "tersebut", "untuk", "yang",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Tag-cloud input: the [`MAX_KEYWORDS`] most frequent terms across titles
/// and summaries. Equal counts keep first-seen order.
pub fn extract_keywords(records: &[ClassifiedInsight]) -> Vec<KeywordCount> {
    let mut counts: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        for token in tokenize(&record.insight.content()) {
            match index.get(&token) {
                Some(&position) => counts[position].count += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push(KeywordCount {
                        word: token,
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(MAX_KEYWORDS);
    counts
}

fn tokenize(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();
    lowered
        .split_whitespace()
        .map(|raw| NON_ALNUM.replace_all(raw, "").into_owned())
        .filter(|token| token.len() >= MIN_TOKEN_LEN && !STOP_WORDS.contains(token.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::Insight, pipeline::classify::classify};

    fn records(texts: &[(&str, &str)]) -> Vec<ClassifiedInsight> {
        texts
            .iter()
            .map(|(title, summary)| {
                classify(&Insight {
                    title: title.to_string(),
                    summary: summary.to_string(),
                    ..Default::default()
                })
            })
            .collect()
    }

    #[test]
    fn strips_punctuation_and_short_or_stop_words() {
        let out = extract_keywords(&records(&[(
            "Login BRImo gagal!!",
            "Saya tidak bisa login, app crash yang parah.",
        )]));
        let words: Vec<&str> = out.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, vec!["login", "brimo", "gagal", "tidak", "crash", "parah"]);
        assert_eq!(out[0].count, 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let out = extract_keywords(&records(&[
            ("alpha bravo", "charlie"),
            ("charlie bravo", ""),
        ]));
        let words: Vec<(&str, usize)> = out.iter().map(|k| (k.word.as_str(), k.count)).collect();
        assert_eq!(words, vec![("bravo", 2), ("charlie", 2), ("alpha", 1)]);
    }

    #[test]
    fn caps_at_fifty_entries() {
        let summary: Vec<String> = (0..120).map(|i| format!("word{i:03}")).collect();
        let out = extract_keywords(&records(&[("", &summary.join(" "))]));
        assert_eq!(out.len(), MAX_KEYWORDS);
        assert_eq!(out[0].word, "word000");
        assert!(out
            .iter()
            .all(|k| k.word.len() > 3 && !STOP_WORDS.contains(k.word.as_str())));
    }
}

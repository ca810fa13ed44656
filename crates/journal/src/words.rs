use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Default number of rows in the word-frequency table.
pub const DEFAULT_TOP_WORDS: usize = 10;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("static word pattern compiles"))
}

/// Lower-cased word tokens of `text`, in order of appearance.
///
/// A token is a maximal run of Unicode word characters; punctuation and
/// whitespace only delimit.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    word_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The `n` most frequent words of `text`, most frequent first.
///
/// Words with equal counts keep the order in which they first appeared.
pub fn top_words(text: &str, n: usize) -> Vec<(String, usize)> {
    // word -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in tokenize(text).into_iter().enumerate() {
        counts.entry(token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(n);
    ranked
        .into_iter()
        .map(|(word, count, _)| (word, count))
        .collect()
}

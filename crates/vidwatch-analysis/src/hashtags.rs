//! Hashtag extraction and frequency ranking.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::HashtagEntry;

/// Number of top hashtags retained in the ranking.
const TOP_N: usize = 10;

fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#(\w+)").expect("hashtag regex is valid"))
}

/// Count `#word` tokens across descriptions and rank the ten most
/// frequent, descending, ties broken by first appearance across the
/// input sequence.
///
/// Tag case is preserved from the source text (and counted
/// case-sensitively). Texts with no hashtags contribute nothing; empty
/// input yields an empty ranking, not an error.
pub fn extract_hashtags<I, S>(texts: I) -> Vec<HashtagEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for text in texts {
        for capture in hashtag_re().captures_iter(text.as_ref()) {
            let tag = capture[1].to_string();
            let count = counts.entry(tag.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(tag);
            }
            *count += 1;
        }
    }

    let mut ranked: Vec<HashtagEntry> = first_seen
        .into_iter()
        .map(|tag| {
            let count = counts[&tag];
            HashtagEntry { tag, count }
        })
        .collect();

    // Stable sort over the first-seen ordering: ties keep their order of
    // first appearance.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_N);
    ranked
}

//! Stopword filter and tokenizer.
//!
//! The stopword set is a process-wide constant shared by every aggregation
//! run; membership lookups never require synchronization.

/// Common words excluded from frequency and top-word analysis.
/// All entries are lowercase; lookups must case-fold first.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "but", "by", "can", "could", "did", "do", "does", "for", "from",
    "get", "got", "had", "has", "have", "he", "her", "hers", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "like", "me", "mm", "more", "most", "my", "no", "not",
    "now", "of", "oh", "okay", "on", "or", "our", "out", "over", "she", "so", "some", "than",
    "that", "the", "their", "them", "then", "they", "this", "to", "uh", "um", "under", "up", "us",
    "very", "was", "we", "were", "what", "when", "which", "who", "why", "will", "with", "would",
    "yeah", "yes", "you", "your",
];

/// Test whether a (lowercase) token is a stopword
///
/// **Public** - used by the aggregator and the cell summarizer
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Split free-form text into lowercase word tokens
///
/// **Public** - fallback tokenization when no explicit word list exists
///
/// Word boundaries are any character outside `[a-z0-9_]` after case
/// folding, matching `\w+` extraction. Stopwords are NOT removed here;
/// filtering is the caller's concern.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

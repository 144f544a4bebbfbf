//! Lexical normalizer shared by every matcher in the pipeline.
//!
//! Lower-cases the raw message once and tokenizes it. All downstream
//! matchers work off this view so no matcher re-implements case folding
//! or word splitting.

/// Normalized view of one raw message.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// The full lower-cased text, used for phrase/substring matching.
    pub text: String,
    /// Word tokens, used for exact single-word matching. `@mentions`
    /// survive as single tokens; intra-word apostrophes are kept
    /// ("what's" stays one token and never matches "what").
    pub tokens: Vec<String>,
}

impl Normalized {
    /// Normalize a raw message.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// Whether any token equals `word`.
    #[must_use]
    pub fn has_token(&self, word: &str) -> bool {
        self.tokens.iter().any(|t| t == word)
    }

    /// Match a table entry using the shared discipline: entries containing
    /// a space or `*` match as substrings, plain words match whole tokens.
    #[must_use]
    pub fn matches(&self, entry: &str) -> bool {
        if entry.contains(' ') || entry.contains('*') {
            self.text.contains(entry)
        } else {
            self.has_token(entry)
        }
    }
}

/// Split lower-cased text into word tokens.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        let keep = ch.is_alphanumeric() || ch == '\'' || (ch == '@' && current.is_empty());
        if keep {
            current.push(ch);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    // Trim stray apostrophes so "'hello'" tokenizes to "hello".
    tokens
        .into_iter()
        .map(|t| t.trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

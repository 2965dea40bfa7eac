//! Sentence tokenization and small text helpers shared by the analyzers.

/// Splits text into sentences. Injected so a better tokenizer can replace the default.
pub trait SentenceTokenizer: Send + Sync {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Punctuation-driven splitter: a sentence ends after a run of `.`, `!` or `?` (plus any
/// closing quotes/brackets) that is followed by whitespace or the end of the text.
/// Decimals like `3.2` and tokens like `U.S.A` therefore stay intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctSentenceTokenizer;

impl SentenceTokenizer for PunctSentenceTokenizer {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut start = 0usize;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if !is_terminator(c) {
                continue;
            }
            let mut end = i + c.len_utf8();
            while let Some(&(j, n)) = chars.peek() {
                if is_terminator(n) || is_closer(n) {
                    end = j + n.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let boundary = match chars.peek() {
                None => true,
                Some(&(_, n)) => n.is_whitespace(),
            };
            if boundary {
                push_trimmed(&mut out, &text[start..end]);
                start = end;
            }
        }
        push_trimmed(&mut out, &text[start..]);
        out
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let t = s.trim();
    if !t.is_empty() {
        out.push(t);
    }
}

/// Sentence count with the documented fallback when no tokenizer is available.
pub fn sentence_count(text: &str, tokenizer: Option<&dyn SentenceTokenizer>) -> usize {
    match tokenizer {
        Some(t) => t.sentences(text).len(),
        None => text.matches('.').count() + 1,
    }
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

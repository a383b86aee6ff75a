// src/punctuation.rs
//
// Whitespace tokenization with prefix/suffix punctuation stripping.
// Every token keeps the whitespace that preceded it, so joining the pieces
// back reproduces the input byte for byte.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading run of non-word characters (underscore counts as punctuation here).
static PREFIX_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\W_]+").expect("valid regex"));
/// Trailing run of non-word characters.
static SUFFIX_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\W_]+$").expect("valid regex"));
/// A maximal whitespace-delimited span.
static CHUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid regex"));

/// One whitespace-delimited span split into `leading + core + trailing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub leading: &'a str,
    pub core: &'a str,
    pub trailing: &'a str,
}

impl<'a> Token<'a> {
    /// Strip surrounding punctuation from a raw chunk.
    ///
    /// A chunk made only of punctuation ends up entirely in `leading`.
    pub fn split(raw: &'a str) -> Self {
        let prefix_end = PREFIX_PUNCT.find(raw).map_or(0, |m| m.end());
        let rest = &raw[prefix_end..];
        let suffix_start = SUFFIX_PUNCT.find(rest).map_or(rest.len(), |m| m.start());

        Token {
            leading: &raw[..prefix_end],
            core: &rest[..suffix_start],
            trailing: &rest[suffix_start..],
        }
    }

    /// The chunk exactly as it appeared in the input.
    pub fn raw(&self) -> String {
        format!("{}{}{}", self.leading, self.core, self.trailing)
    }

    /// Wrap a replacement in this token's punctuation.
    pub fn rewrap(&self, replacement: &str) -> String {
        format!("{}{}{}", self.leading, replacement, self.trailing)
    }
}

/// A token together with the whitespace that came before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spaced<'a> {
    pub space_before: &'a str,
    pub token: Token<'a>,
}

/// Tokenized text: the tokens plus any whitespace after the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream<'a> {
    pub tokens: Vec<Spaced<'a>>,
    pub tail: &'a str,
}

impl<'a> TokenStream<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Stripped core of the token at `index`.
    pub fn core(&self, index: usize) -> &'a str {
        self.tokens[index].token.core
    }

    /// Reassemble the original text.
    pub fn rejoin(&self) -> String {
        let mut out = String::new();
        for spaced in &self.tokens {
            out.push_str(spaced.space_before);
            out.push_str(spaced.token.leading);
            out.push_str(spaced.token.core);
            out.push_str(spaced.token.trailing);
        }
        out.push_str(self.tail);
        out
    }
}

/// Split `text` on whitespace, keeping every gap so the split is lossless.
pub fn tokenize(text: &str) -> TokenStream<'_> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for chunk in CHUNK.find_iter(text) {
        tokens.push(Spaced {
            space_before: &text[last_end..chunk.start()],
            token: Token::split(chunk.as_str()),
        });
        last_end = chunk.end();
    }

    TokenStream {
        tokens,
        tail: &text[last_end..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_word() {
        let token = Token::split("hello");
        assert_eq!(token.leading, "");
        assert_eq!(token.core, "hello");
        assert_eq!(token.trailing, "");
    }

    #[test]
    fn test_split_surrounding_punctuation() {
        let token = Token::split("(«سبي».)");
        assert_eq!(token.leading, "(«");
        assert_eq!(token.core, "سبي");
        assert_eq!(token.trailing, "».)");
    }

    #[test]
    fn test_split_keeps_inner_punctuation() {
        let token = Token::split("\"l'équipe,\"");
        assert_eq!(token.leading, "\"");
        assert_eq!(token.core, "l'équipe");
        assert_eq!(token.trailing, ",\"");
    }

    #[test]
    fn test_split_underscore_is_punctuation() {
        let token = Token::split("__init__");
        assert_eq!(token.leading, "__");
        assert_eq!(token.core, "init");
        assert_eq!(token.trailing, "__");
    }

    #[test]
    fn test_split_only_punctuation() {
        let token = Token::split("...");
        assert_eq!(token.leading, "...");
        assert_eq!(token.core, "");
        assert_eq!(token.trailing, "");
        assert_eq!(token.raw(), "...");
    }

    #[test]
    fn test_rewrap() {
        let token = Token::split("«سبي»,");
        assert_eq!(token.rewrap("SP"), "«SP»,");
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let texts = [
            "",
            "   ",
            "one",
            "  leading and trailing  ",
            "tabs\tand\nnewlines\r\n here",
            "دي دي، سبي. réunion  (SP)   ok",
        ];
        for text in texts {
            assert_eq!(tokenize(text).rejoin(), text, "round trip failed for {text:?}");
        }
    }

    #[test]
    fn test_tokenize_gaps() {
        let stream = tokenize("  a\t b ");
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.tokens[0].space_before, "  ");
        assert_eq!(stream.tokens[1].space_before, "\t ");
        assert_eq!(stream.tail, " ");
        assert_eq!(stream.core(1), "b");
    }

    #[test]
    fn test_tokenize_empty() {
        let stream = tokenize("");
        assert!(stream.is_empty());
        assert_eq!(stream.tail, "");
    }
}

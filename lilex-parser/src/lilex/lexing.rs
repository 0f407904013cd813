//! Lexer
//!
//!     Body text of an entry is tokenized with a logos lexer before any extraction rule runs.
//!     The token set is deliberately small: whitespace, newlines, bracket characters and words.
//!     Everything the extraction rules care about (reference groups, the leading attribute
//!     group, whitespace normalization) is expressed in terms of these tokens, which keeps the
//!     rules independent of the concrete delimiters configured in
//!     [FormatRules](crate::lilex::rules::FormatRules).
//!
//!     Tokens carry the byte range of their source text, so rules can slice the original text
//!     back out of a token run (e.g. the inside of a `{...}` group) without re-joining tokens.

use logos::Logos;
use std::ops::Range;

use crate::lilex::rules::BracketPair;

/// Characters that may be used as reference or attribute delimiters.
pub const BRACKET_CHARS: &str = "()[]{}<>";

/// Core tokens of lexicon body text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Whitespace run, excluding newlines
    #[regex(r"[^\S\n]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    /// A single bracket character; the configured delimiters are a subset of these
    #[regex(r"[\[\]{}()<>]", |lex| lex.slice().chars().next())]
    Bracket(char),

    /// Anything else up to the next whitespace or bracket
    #[regex(r"[^\s\[\]{}()<>]+")]
    Word,
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Newline)
    }
}

/// A token paired with its byte range in the tokenized text.
pub type Spanned = (Token, Range<usize>);

/// Tokenize text with location information.
///
/// Input the lexer cannot classify is kept as a `Word` so no text is ever dropped.
pub fn tokenize(source: &str) -> Vec<Spanned> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let token = result.unwrap_or(Token::Word);
        tokens.push((token, lexer.span()));
    }

    tokens
}

/// Index of the token closing the bracket group opened at `open_idx`.
///
/// Nested groups of the same pair are skipped over. Returns `None` when the token at
/// `open_idx` is not the pair's opening bracket or the group is never closed.
pub fn matching_close(tokens: &[Spanned], open_idx: usize, pair: BracketPair) -> Option<usize> {
    if !matches!(tokens.get(open_idx), Some((Token::Bracket(c), _)) if *c == pair.open) {
        return None;
    }
    let mut depth = 0usize;
    for (idx, (token, _)) in tokens.iter().enumerate().skip(open_idx) {
        match token {
            Token::Bracket(c) if *c == pair.open => depth += 1,
            Token::Bracket(c) if *c == pair.close => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRACES: BracketPair = BracketPair {
        open: '{',
        close: '}',
    };

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_tokenizes_words_and_whitespace() {
        assert_eq!(
            kinds("a  glider\n"),
            vec![Token::Word, Token::Whitespace, Token::Word, Token::Newline]
        );
    }

    #[test]
    fn test_brackets_are_single_tokens() {
        let tokens = tokenize("{block};");
        assert_eq!(tokens[0], (Token::Bracket('{'), 0..1));
        assert_eq!(tokens[1], (Token::Word, 1..6));
        assert_eq!(tokens[2], (Token::Bracket('}'), 6..7));
        assert_eq!(tokens[3], (Token::Word, 7..8));
    }

    #[test]
    fn test_tab_and_nbsp_are_whitespace() {
        assert_eq!(
            kinds("\tp4\u{a0}x"),
            vec![Token::Whitespace, Token::Word, Token::Whitespace, Token::Word]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_matching_close_skips_nested_groups() {
        let tokens = tokenize("{a {b} c} d");
        let close = matching_close(&tokens, 0, BRACES).expect("group closes");
        assert_eq!(tokens[close].1, 8..9);
    }

    #[test]
    fn test_matching_close_unclosed() {
        let tokens = tokenize("{never closed");
        assert_eq!(matching_close(&tokens, 0, BRACES), None);
        assert_eq!(matching_close(&tokens, 1, BRACES), None);
    }
}

//! Lexer for the stream definition DSL.
//!
//! Tokenization never fails: malformed input (a stray character, an
//! unterminated quoted literal) becomes a [`TokenKind::Error`] token and the
//! parser decides what to do with it.

use std::fmt;

use logos::{Lexer, Logos};
use smol_str::SmolStr;

use crate::base::{TextRange, TextSize, range_of};

/// What went wrong when a character sequence could not be tokenized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LexError {
    /// A character that cannot start any token.
    #[default]
    UnexpectedCharacter,
    /// A quoted literal that reaches the end of input without its closing quote.
    UnterminatedLiteral,
}

/// The kind of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Pipe,
    DoubleDash,
    Equals,
    /// Quoted or bare literal value.
    Literal,
    /// Named channel, `:name`.
    Destination,
    /// Module label, `name:`.
    Label,
    /// `>`, binds destinations to the stream.
    Gt,
    Error(LexError),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Pipe => "'|'",
            TokenKind::DoubleDash => "'--'",
            TokenKind::Equals => "'='",
            TokenKind::Literal => "literal",
            TokenKind::Destination => "destination",
            TokenKind::Label => "label",
            TokenKind::Gt => "'>'",
            TokenKind::Error(LexError::UnexpectedCharacter) => "unexpected character",
            TokenKind::Error(LexError::UnterminatedLiteral) => "unterminated quoted literal",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// A token with its byte range in the source text.
///
/// `text` holds the meaningful part of the token: the unescaped contents of
/// a quoted literal, the bare name of a label or destination, or the
/// offending substring of an error token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: SmolStr,
    pub range: TextRange,
}

impl Token {
    #[inline]
    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

#[derive(Logos, Clone, Debug, PartialEq, Eq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[token("|")]
    Pipe,

    #[token("--")]
    DoubleDash,

    #[token("=")]
    Equals,

    #[token(">")]
    Gt,

    #[token("'", |lex| quoted(lex, '\''))]
    #[token("\"", |lex| quoted(lex, '"'))]
    Quoted(String),

    #[regex(r"[A-Za-z][A-Za-z0-9_.]*", priority = 4)]
    Identifier,

    #[regex(r"[A-Za-z][A-Za-z0-9_.]*:", priority = 5)]
    Label,

    #[regex(r":[A-Za-z][A-Za-z0-9_.]*")]
    Destination,

    // Numbers, globs, URLs and other unquoted values.
    #[regex(r#"[^\s|'"=>:\-][^\s|'"=>]*"#, priority = 1)]
    Bare,
}

/// Consume a quoted literal after its opening quote.
///
/// The quote is escaped by doubling it or with a backslash; a backslash also
/// escapes `|` and itself. Any other backslash is kept verbatim.
fn quoted(lex: &mut Lexer<RawToken>, quote: char) -> Result<String, LexError> {
    let rest = lex.remainder();
    let mut value = String::new();
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&(_, next)) if next == quote || next == '|' || next == '\\' => {
                    value.push(next);
                    chars.next();
                }
                _ => value.push(c),
            }
        } else if c == quote {
            if matches!(chars.peek(), Some(&(_, next)) if next == quote) {
                value.push(quote);
                chars.next();
                continue;
            }
            lex.bump(i + c.len_utf8());
            return Ok(value);
        } else {
            value.push(c);
        }
    }

    // Anchor the error at the opening quote and swallow the rest of the input.
    lex.bump(rest.len());
    Err(LexError::UnterminatedLiteral)
}

/// Split DSL text into tokens. The result always ends with an [`TokenKind::Eof`] token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let (kind, text) = match result {
            Ok(RawToken::Pipe) => (TokenKind::Pipe, SmolStr::new(slice)),
            Ok(RawToken::DoubleDash) => (TokenKind::DoubleDash, SmolStr::new(slice)),
            Ok(RawToken::Equals) => (TokenKind::Equals, SmolStr::new(slice)),
            Ok(RawToken::Gt) => (TokenKind::Gt, SmolStr::new(slice)),
            Ok(RawToken::Quoted(value)) => (TokenKind::Literal, SmolStr::from(value)),
            Ok(RawToken::Identifier) => (TokenKind::Identifier, SmolStr::new(slice)),
            Ok(RawToken::Label) => (TokenKind::Label, SmolStr::new(&slice[..slice.len() - 1])),
            Ok(RawToken::Destination) => (TokenKind::Destination, SmolStr::new(&slice[1..])),
            Ok(RawToken::Bare) => (TokenKind::Literal, SmolStr::new(slice)),
            Err(error) => (TokenKind::Error(error), SmolStr::new(slice)),
        };
        tokens.push(Token {
            kind,
            text,
            range: range_of(lexer.span()),
        });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: SmolStr::default(),
        range: range_of(input.len()..input.len()),
    });

    tracing::trace!(count = tokens.len(), "tokenized stream definition");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_stream() {
        assert_eq!(
            kinds("time | log"),
            vec![TokenKind::Identifier, TokenKind::Pipe, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn test_parameters() {
        let tokens = tokenize("file --mode=lines");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::DoubleDash,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(u32::from(tokens[1].start()), 5);
        assert_eq!(u32::from(tokens[2].start()), 7);
    }

    #[test]
    fn test_offsets_skip_whitespace() {
        let tokens = tokenize("  time\n|  log ");
        assert_eq!(u32::from(tokens[0].start()), 2);
        assert_eq!(u32::from(tokens[1].start()), 7);
        assert_eq!(u32::from(tokens[2].start()), 10);
        assert_eq!(u32::from(tokens[3].start()), 14);
    }

    #[test]
    fn test_label_and_destinations() {
        let tokens = tokenize(":in > lbl: filter > :out");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Destination,
                TokenKind::Gt,
                TokenKind::Label,
                TokenKind::Identifier,
                TokenKind::Gt,
                TokenKind::Destination,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[0].text, "in");
        assert_eq!(tokens[2].text, "lbl");
        assert_eq!(tokens[5].text, "out");
    }

    #[test]
    fn test_bare_literals() {
        let tokens = tokenize("--size=1000 --glob=*.txt --url=http://host:80/x");
        let literals: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Literal)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(literals, vec!["1000", "*.txt", "http://host:80/x"]);
    }

    #[test]
    fn test_quoted_literal_escapes() {
        let tokens = tokenize(r#"'it''s' 'a\|b' "say \"hi\"" 'x | y'"#);
        let literals: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Literal)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(literals, vec!["it's", "a|b", "say \"hi\"", "x | y"]);
    }

    #[test]
    fn test_unterminated_literal() {
        let tokens = tokenize("file --mode='abc");
        let error = &tokens[tokens.len() - 2];
        assert_eq!(error.kind, TokenKind::Error(LexError::UnterminatedLiteral));
        assert_eq!(u32::from(error.start()), 12);
        assert_eq!(error.text, "'abc");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_unexpected_character() {
        let tokens = tokenize("time - log");
        assert_eq!(tokens[1].kind, TokenKind::Error(LexError::UnexpectedCharacter));
        assert_eq!(tokens[1].text, "-");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   "), vec![TokenKind::Eof]);
    }
}

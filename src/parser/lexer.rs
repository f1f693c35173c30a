//! Lexer (tokenizer) for source text
//!
//! Converts raw source text into [`Token`]s on demand. The lexer has no error
//! state: anything it does not recognise becomes a [`TokenKind::Illegal`]
//! token and it is up to the parser to report it.
//!
//! Once the end of input is reached, [`Lexer::next_token`] keeps returning an
//! `EOF` token. As an [`Iterator`], the lexer yields that first `EOF` and then
//! stops.

use super::token::{SourceLocation, Token, TokenKind};
use std::iter::FusedIterator;

/// Characters that may begin a two-character operator (`==`, `!=`).
const PAIR_STARTS: [char; 2] = ['=', '!'];

/// Lexer over a single source string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

/// Starts a lazy token stream over `source`.
///
/// The stream is not restartable; tokenizing the same text again needs a new
/// call.
pub fn tokenize(source: &str) -> Lexer {
    Lexer::new(source)
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let loc = self.current_location();
        let Some(ch) = self.peek() else {
            return Token::eof(loc);
        };

        if PAIR_STARTS.contains(&ch) {
            if let Some(token) = self.two_char_operator(ch, loc) {
                return token;
            }
        }

        if let Some(kind) = single_char_kind(ch) {
            self.advance();
            return Token::new(kind, ch.to_string(), loc);
        }

        if is_letter(ch) {
            let ident = self.read_while(is_letter);
            let kind = TokenKind::lookup_identifier(&ident);
            return Token::new(kind, ident, loc);
        }

        if ch.is_ascii_digit() {
            let digits = self.read_while(|c| c.is_ascii_digit());
            return Token::new(TokenKind::Int, digits, loc);
        }

        self.advance();
        Token::new(TokenKind::Illegal, ch.to_string(), loc)
    }

    /// Combine `==` and `!=`; anything else falls through to single-character
    /// matching.
    fn two_char_operator(&mut self, first: char, loc: SourceLocation) -> Option<Token> {
        let kind = match (first, self.peek_ahead(1)?) {
            ('=', '=') => TokenKind::Eq,
            ('!', '=') => TokenKind::NotEq,
            _ => return None,
        };
        self.advance();
        self.advance();
        Some(Token::new(kind, kind.to_string(), loc))
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

impl FusedIterator for Lexer {}

fn single_char_kind(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '=' => TokenKind::Assign,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Asterisk,
        '/' => TokenKind::Slash,
        '!' => TokenKind::Bang,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        _ => return None,
    };
    Some(kind)
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens: Vec<Token> = tokenize("=+(){},;").collect();
        let expected = [
            (TokenKind::Assign, "="),
            (TokenKind::Plus, "+"),
            (TokenKind::LParen, "("),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Comma, ","),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (tok, (kind, literal)) in tokens.iter().zip(expected) {
            assert_eq!(tok.kind, kind);
            assert_eq!(tok.literal, literal);
        }
    }

    #[test]
    fn test_program_tokens() {
        let source = "let five = 5;\nlet add = fn(x, y) {\n  x + y;\n};\nlet result = add(five, ten);";
        let tokens: Vec<Token> = tokenize(source).collect();

        assert!(matches!(tokens[0].kind, TokenKind::Let));
        assert!(tokens[1].is(TokenKind::Identifier) && tokens[1].literal == "five");
        assert!(tokens[3].is(TokenKind::Int) && tokens[3].literal == "5");
        assert!(matches!(tokens[8].kind, TokenKind::Function));
        assert_eq!(tokens[8].literal, "fn");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(
            tokens.iter().filter(|t| t.is(TokenKind::Let)).count(),
            3
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("!-/*5; 5 < 10 > 5; 10 == 10; 10 != 9;"),
            vec![
                TokenKind::Bang,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Asterisk,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Lt,
                TokenKind::Int,
                TokenKind::Gt,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Eq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::NotEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_pair_literals() {
        let tokens: Vec<Token> = tokenize("a==b!=c").collect();
        assert_eq!(tokens[1].literal, "==");
        assert_eq!(tokens[3].literal, "!=");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("if else true false return"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Return,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_stops_at_digit() {
        let tokens: Vec<Token> = tokenize("foo_bar9").collect();
        assert_eq!(tokens[0].literal, "foo_bar");
        assert!(tokens[1].is(TokenKind::Int));
        assert_eq!(tokens[1].literal, "9");
    }

    #[test]
    fn test_illegal_characters() {
        let tokens: Vec<Token> = tokenize("x @ #").collect();
        assert!(tokens[1].is(TokenKind::Illegal));
        assert_eq!(tokens[1].literal, "@");
        assert!(tokens[2].is(TokenKind::Illegal));
        assert!(tokens[3].is(TokenKind::Eof));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next_token().is(TokenKind::Identifier));
        for _ in 0..3 {
            assert!(lexer.next_token().is(TokenKind::Eof));
        }
    }

    #[test]
    fn test_iterator_ends_after_eof() {
        let mut lexer = tokenize("");
        assert!(lexer.next().is_some_and(|t| t.is(TokenKind::Eof)));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_locations() {
        let tokens: Vec<Token> = tokenize("let x\n  = 5;").collect();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 5));
    }
}

//! Lexer for JavaScript source.
//!
//! The lexer converts source text into a stream of tokens. Comments are
//! produced as trivia tokens; line breaks are recorded on the following token
//! so the parser can apply automatic semicolon insertion.

use crate::span::Span;
use crate::token::{Keyword, PUNCTUATORS, Token, TokenKind};

/// Lexer for JavaScript source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Whether a line break was crossed since the last token.
    saw_newline: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            saw_newline: false,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;
        let newline_before = std::mem::take(&mut self.saw_newline);

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
                newline_before,
            );
        };

        let kind = match c {
            '/' if self.peek_char_n(1) == Some('/') => self.scan_line_comment(),
            '/' if self.peek_char_n(1) == Some('*') => self.scan_block_comment(),
            '"' | '\'' => self.scan_string(c),
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_word(),
            c => self.scan_punct(c),
        };

        // Comments are transparent: a line break before or inside one belongs
        // to the next real token.
        if matches!(kind, TokenKind::Comment(_)) && (newline_before || self.line > start_line) {
            self.saw_newline = true;
        }

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
            newline_before,
        )
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments are included in the output.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks `n` characters ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips whitespace, noting line breaks.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                self.saw_newline = true;
            }
            self.advance();
        }
    }

    /// Scans a `//` comment up to the end of the line.
    fn scan_line_comment(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        TokenKind::Comment(self.source[start..self.position].to_string())
    }

    /// Scans a `/* */` comment.
    fn scan_block_comment(&mut self) -> TokenKind {
        let start = self.position;
        self.advance();
        self.advance();
        loop {
            if self.rest.starts_with("*/") {
                self.advance();
                self.advance();
                return TokenKind::Comment(self.source[start..self.position].to_string());
            }
            if self.rest.is_empty() {
                return TokenKind::Error("unterminated block comment".into());
            }
            self.advance();
        }
    }

    /// Scans a string literal delimited by `quote`.
    fn scan_string(&mut self, quote: char) -> TokenKind {
        self.advance(); // consume opening quote
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape() {
                        Ok(Some(c)) => text.push(c),
                        Ok(None) => {}
                        Err(message) => return TokenKind::Error(message),
                    }
                }
                Some('\n') | None => {
                    return TokenKind::Error("unterminated string literal".into());
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
        TokenKind::String(text)
    }

    /// Scans the character after a backslash. Line continuations yield `None`.
    fn scan_escape(&mut self) -> Result<Option<char>, String> {
        let Some(c) = self.peek_char() else {
            return Err("unexpected end of input in string escape".into());
        };
        self.advance();
        let decoded = match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            '\n' => return Ok(None),
            'x' => self.scan_hex_escape(2)?,
            'u' => self.scan_hex_escape(4)?,
            other => other,
        };
        Ok(Some(decoded))
    }

    /// Reads exactly `digits` hex digits and decodes them as a code point.
    fn scan_hex_escape(&mut self, digits: usize) -> Result<char, String> {
        let start = self.position;
        for _ in 0..digits {
            match self.peek_char() {
                Some(c) if c.is_ascii_hexdigit() => self.advance(),
                _ => return Err("invalid hexadecimal escape sequence".into()),
            }
        }
        let hex = &self.source[start..self.position];
        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| format!("invalid escape code point: {hex}"))
    }

    /// Scans a decimal or hexadecimal number.
    #[allow(clippy::cast_precision_loss)]
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;

        if self.peek_char() == Some('0') && matches!(self.peek_char_n(1), Some('x' | 'X')) {
            self.advance();
            self.advance();
            let digits_start = self.position;
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            let digits = &self.source[digits_start..self.position];
            return match u64::from_str_radix(digits, 16) {
                Ok(n) => TokenKind::Number(n as f64),
                Err(e) => TokenKind::Error(format!("invalid hexadecimal literal: {e}")),
            };
        }

        self.skip_digits();
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let sign = matches!(self.peek_char_n(1), Some('+' | '-'));
            let digit_at = if sign { 2 } else { 1 };
            if self.peek_char_n(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.skip_digits();
            }
        }
        if self.peek_char().is_some_and(is_identifier_start) {
            return TokenKind::Error("identifier starts immediately after numeric literal".into());
        }

        let text = &self.source[start..self.position];
        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(e) => TokenKind::Error(format!("invalid number: {e}")),
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(is_identifier_char) {
            self.advance();
        }
        let word = &self.source[start..self.position];
        match Keyword::from_word(word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(word.to_string()),
        }
    }

    /// Scans the longest punctuator at the current position.
    fn scan_punct(&mut self, c: char) -> TokenKind {
        if let Some(punct) = PUNCTUATORS.iter().find(|p| self.rest.starts_with(**p)) {
            for _ in 0..punct.len() {
                self.advance();
            }
            TokenKind::Punct(punct)
        } else {
            self.advance();
            TokenKind::Error(format!("unexpected character: {c}"))
        }
    }
}

/// Returns true if `c` can start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

//! Module `scanner` implements a one-pass lexer for the Rill language.
//!
//! It transforms the source text into a `Vec<Token>` terminated by exactly
//! one `EOF` token, even on empty input.  Scanning **never fails**: every
//! lexical problem (unterminated string or block comment, unrecognized
//! character) is pushed into the shared [`Reporter`] and the scan resumes
//! past the offending point, so one run surfaces as many independent
//! problems as possible.
//!
//! # Lexical rules
//!
//! - Single-character punctuators and operators, with one byte of
//!   lookahead for the compound forms `!=`, `==`, `<=`, `>=`, `+=`, `-=`,
//!   `*=`, `/=`.
//! - `//` line comments (bulk-skipped with `memchr`) and `/* */` block
//!   comments.  Block comments do not nest: the first `*/` closes.
//! - String literals delimited by `"` **or** `'`, stored without their
//!   delimiters; newlines inside a string are legal.
//! - Numeric literals: digits with an optional single `.` fraction, parsed
//!   as `f64`.
//! - Identifiers: alpha/underscore start, alphanumeric/underscore
//!   continue; the `KEYWORDS` perfect-hash map promotes reserved
//!   spellings to keyword tokens.
//!
//! # Position tracking
//!
//! The newline counter and the offset of the last newline are updated
//! whenever a newline is *peeked* as part of advancing, so a token's
//! column is always relative to the start of its own line.

use log::info;
use memchr::memchr;
use phf::phf_map;

use crate::diagnostics::{Diagnostic, Reporter};
use crate::token::{Position, Token, TokenType};

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile-time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"      => TokenType::AND,
    b"break"    => TokenType::BREAK,
    b"class"    => TokenType::CLASS,
    b"continue" => TokenType::CONTINUE,
    b"else"     => TokenType::ELSE,
    b"false"    => TokenType::FALSE,
    b"fn"       => TokenType::FN,
    b"for"      => TokenType::FOR,
    b"if"       => TokenType::IF,
    b"let"      => TokenType::LET,
    b"mut"      => TokenType::MUT,
    b"nil"      => TokenType::NIL,
    b"or"       => TokenType::OR,
    b"return"   => TokenType::RETURN,
    b"self"     => TokenType::SELF,
    b"static"   => TokenType::STATIC,
    b"super"    => TokenType::SUPER,
    b"true"     => TokenType::TRUE,
    b"while"    => TokenType::WHILE,
};

/// A single-pass **scanner / lexer** that converts source text into an
/// owned sequence of [`Token`]s.
pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    start: usize,        // index of the *first* byte of the current lexeme
    curr: usize,         // index *one past* the last byte examined
    newline_cnt: u32,    // newlines seen so far
    newline_offset: u32, // byte offset just past the most recent newline
    tokens: Vec<Token>,
    reporter: Reporter,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str, reporter: Reporter) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            start: 0,
            curr: 0,
            newline_cnt: 0,
            newline_offset: 0,
            tokens: Vec::new(),
            reporter,
        }
    }

    /// Scan the whole input.  Always returns a token list terminated by
    /// `EOF`; problems go to the reporter.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.curr;
            self.scan_token();
        }

        self.start = self.curr;
        self.add_token(TokenType::EOF);

        info!("Scanned {} token(s)", self.tokens.len());

        self.tokens
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.bytes.len()
    }

    /// Peek at the current byte without consuming it.  Returns `0` past
    /// EOF to avoid branching at call-site.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes[self.curr]
        }
    }

    /// Peek one byte beyond [`peek`].  Safe at EOF.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        if self.curr + 1 >= self.bytes.len() {
            0
        } else {
            self.bytes[self.curr + 1]
        }
    }

    /// Bump the newline counters if the byte about to be consumed is a
    /// newline.  Called from every consuming helper so column arithmetic
    /// stays valid no matter which path eats the `\n`.
    #[inline(always)]
    fn inc_if_newline(&mut self) {
        if self.peek() == b'\n' {
            self.newline_cnt += 1;
            self.newline_offset = (self.curr + 1) as u32;
        }
    }

    /// Advance one byte and return it.
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        self.inc_if_newline();

        let b = self.bytes[self.curr];
        self.curr += 1;
        b
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.inc_if_newline();
            self.curr += 1;
            true
        } else {
            false
        }
    }

    /// Coordinate of the current lexeme's first byte.
    fn current_position(&self) -> Position {
        let column = (self.start as u32).saturating_sub(self.newline_offset);

        Position::new(self.newline_cnt + 1, column)
    }

    fn lexeme(&self) -> &'a str {
        &self.src[self.start..self.curr]
    }

    fn add_token(&mut self, token_type: TokenType) {
        let position = self.current_position();
        self.tokens
            .push(Token::new(token_type, self.lexeme(), position));
    }

    fn report<S: Into<String>>(&mut self, message: S) {
        let position = self.current_position();
        self.reporter.report(Diagnostic::new(position, message));
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.start`.  Whitespace and
    /// comments produce no token; malformed input is reported and skipped.
    fn scan_token(&mut self) {
        let b = self.advance();

        match b {
            // ── single-character punctuators ──────────────────────────────
            b'(' => self.add_token(TokenType::LEFT_PAREN),
            b')' => self.add_token(TokenType::RIGHT_PAREN),
            b'{' => self.add_token(TokenType::LEFT_BRACE),
            b'}' => self.add_token(TokenType::RIGHT_BRACE),
            b',' => self.add_token(TokenType::COMMA),
            b'.' => self.add_token(TokenType::DOT),
            b';' => self.add_token(TokenType::SEMICOLON),
            b'?' => self.add_token(TokenType::QUESTION),
            b':' => self.add_token(TokenType::COLON),

            // ── operators with an optional '=' suffix ─────────────────────
            b'-' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::MINUS_EQUAL
                } else {
                    TokenType::MINUS
                };

                self.add_token(tt);
            }

            b'+' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::PLUS_EQUAL
                } else {
                    TokenType::PLUS
                };

                self.add_token(tt);
            }

            b'*' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::STAR_EQUAL
                } else {
                    TokenType::STAR
                };

                self.add_token(tt);
            }

            b'!' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::BANG_EQUAL
                } else {
                    TokenType::BANG
                };

                self.add_token(tt);
            }

            b'=' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::EQUAL_EQUAL
                } else {
                    TokenType::EQUAL
                };

                self.add_token(tt);
            }

            b'<' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::LESS_EQUAL
                } else {
                    TokenType::LESS
                };

                self.add_token(tt);
            }

            b'>' => {
                let tt = if self.match_byte(b'=') {
                    TokenType::GREATER_EQUAL
                } else {
                    TokenType::GREATER
                };

                self.add_token(tt);
            }

            // ── whitespace ────────────────────────────────────────────────
            b' ' | b'\r' | b'\t' | b'\n' => {} // newline counted by advance()

            // ── comments or division ──────────────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    self.skip_line_comment();
                } else if self.match_byte(b'*') {
                    self.skip_block_comment();
                } else if self.match_byte(b'=') {
                    self.add_token(TokenType::SLASH_EQUAL);
                } else {
                    self.add_token(TokenType::SLASH);
                }
            }

            // ── string literal, either delimiter ──────────────────────────
            b'"' | b'\'' => self.scan_string(b),

            // ── number literal (digit-leading) ────────────────────────────
            b'0'..=b'9' => self.scan_number(),

            // ── identifiers / keywords ────────────────────────────────────
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(),

            // ── unexpected character ──────────────────────────────────────
            _ => {
                // Consume any UTF-8 continuation bytes so the skip stays on
                // a character boundary.
                while self.peek() & 0xC0 == 0x80 {
                    self.curr += 1;
                }

                let bad = &self.src[self.start..self.curr];
                self.report(format!("Unexpected character: {}", bad));
            }
        }
    }

    /// Fast-forward past a `//` comment using `memchr` for the newline
    /// search.  The newline itself is left for the main loop so it is
    /// counted exactly once.
    fn skip_line_comment(&mut self) {
        if let Some(pos) = memchr(b'\n', &self.bytes[self.curr..]) {
            self.curr += pos;
        } else {
            self.curr = self.bytes.len();
        }
    }

    /// Skip a `/* ... */` comment.  Nesting is not tracked: the first `*/`
    /// closes.  Reaching EOF first is reported as an unterminated comment.
    fn skip_block_comment(&mut self) {
        loop {
            if self.is_at_end() {
                self.report("Unterminated comment. Must end with '*/'");
                return;
            }

            if self.match_byte(b'*') {
                if self.match_byte(b'/') {
                    return;
                }
            } else {
                self.advance();
            }
        }
    }

    /// Scan a string literal opened by `delimiter` (`"` or `'`).
    ///
    /// `self.start` still points at the opening quote; on success
    /// `self.curr` points past the closing quote and the stored literal
    /// excludes both delimiters.
    fn scan_string(&mut self, delimiter: u8) {
        while !self.is_at_end() && self.peek() != delimiter {
            self.advance(); // newlines inside strings are legal
        }

        if self.is_at_end() {
            self.report(format!(
                "Unterminated string. Must end with {}",
                delimiter as char
            ));
            return;
        }

        self.advance(); // closing delimiter

        let contents = self.src[self.start + 1..self.curr - 1].to_owned();
        self.add_token(TokenType::STRING(contents));
    }

    /// Scan a numeric literal (`123`, `3.14`).  Fractions are optional.
    fn scan_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // Optional fractional part.
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // parse never fails: the lexeme is digits with at most one dot
        let n: f64 = self.lexeme().parse::<f64>().unwrap_or(0.0);
        self.add_token(TokenType::NUMBER(n));
    }

    /// Scan an identifier and decide whether it is a **keyword** or a
    /// generic `IDENTIFIER` token.
    fn scan_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let tt: TokenType = KEYWORDS
            .get(&self.bytes[self.start..self.curr])
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER);

        self.add_token(tt);
    }
}

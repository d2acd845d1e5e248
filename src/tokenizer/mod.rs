//! JavaScript tokenizer producing classified tokens with exact source slices
//!
//! Converts raw source text into an ordered, finite sequence of tokens,
//! skipping whitespace and comments. Each token carries its classification
//! and the exact slice of the original text it spans, so `value.len()`
//! reflects the character footprint of that token once formatting is
//! stripped away.
//!
//! # Examples
//!
//! ```
//! use src_slim::tokenizer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("var answer = 42; // the answer").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Keyword,
//!         TokenKind::Identifier,
//!         TokenKind::Punctuator,
//!         TokenKind::NumericLiteral,
//!         TokenKind::Punctuator,
//!     ]
//! );
//! assert_eq!(tokens[1].value, "answer");
//! ```

use thiserror::Error;

/// Errors that can occur while tokenizing source text
///
/// Callers should treat any of these as "skip this resource" rather than a
/// fatal condition: malformed input is a property of the resource, not of
/// the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// String literal not closed before end of line or input
    #[error("unterminated string literal starting on line {line}")]
    UnterminatedString {
        /// 1-based line of the opening quote
        line: usize,
    },

    /// Template literal not closed before end of input
    #[error("unterminated template literal starting on line {line}")]
    UnterminatedTemplate {
        /// 1-based line of the opening backtick
        line: usize,
    },

    /// Block comment not closed before end of input
    #[error("unterminated block comment starting on line {line}")]
    UnterminatedComment {
        /// 1-based line of the opening `/*`
        line: usize,
    },

    /// Regular expression literal not closed before end of line or input
    #[error("unterminated regular expression starting on line {line}")]
    UnterminatedRegex {
        /// 1-based line of the opening slash
        line: usize,
    },

    /// Character that cannot start any token
    #[error("unexpected character '{ch}' on line {line}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// 1-based line where it appeared
        line: usize,
    },
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// User-defined identifier; the only kind a minifier may rename
    Identifier,
    /// Reserved word (`function`, `return`, ...); keeps its full text
    Keyword,
    /// Numeric literal, including hex/binary/octal/bigint forms
    NumericLiteral,
    /// Single- or double-quoted string literal
    StringLiteral,
    /// Template literal chunk (delimiters and `${` included)
    TemplateLiteral,
    /// Regular expression literal including flags
    RegexLiteral,
    /// Operator or delimiter
    Punctuator,
}

/// A classified, indivisible lexical unit of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Classification of this token
    pub kind: TokenKind,
    /// Exact slice of the source this token spans
    pub value: &'a str,
}

// ECMAScript reserved words plus literals a minifier must never rename.
const KEYWORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "of",
    "return",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "undefined",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

// Multi-character punctuators, longest first within each group.
const PUNCT4: &[&str] = &[">>>="];
const PUNCT3: &[&str] = &[
    "===", "!==", "**=", "...", "<<=", ">>=", ">>>", "&&=", "||=", "??=",
];
const PUNCT2: &[&str] = &[
    "=>", "==", "!=", "<=", ">=", "+=", "-=", "*=", "%=", "&=", "|=", "^=", "&&", "||", "??", "?.",
    "++", "--", "<<", ">>", "**",
];
const PUNCT1: &str = "{}()[];,<>+-*%&|^!~?:=.#@";

/// Tokenize JavaScript source text
///
/// Returns the ordered sequence of significant tokens, or a
/// [`TokenizeError`] if the text is not tokenizable. The returned tokens
/// borrow from `source`.
///
/// # Examples
///
/// ```
/// use src_slim::tokenizer::tokenize;
///
/// let tokens = tokenize("function f() { return 1; }").unwrap();
/// assert_eq!(tokens.len(), 9);
///
/// assert!(tokenize("var s = 'unterminated").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TokenizeError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token<'a>>,
    // Brace depth per open template interpolation, innermost last.
    template_stack: Vec<u32>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
            template_stack: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        if ch == '\n' {
            self.line += 1;
        }
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            value: &self.src[start..self.pos],
        });
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, TokenizeError> {
        // Hashbang lines appear in scripts served as-is; not significant.
        if self.src.starts_with("#!") {
            while let Some(ch) = self.peek() {
                if ch == '\n' {
                    break;
                }
                self.bump();
            }
        }

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
                continue;
            }

            let start = self.pos;
            match ch {
                '/' => self.slash(start)?,
                '\'' | '"' => self.string_literal(start, ch)?,
                '`' => self.template_chunk(start)?,
                '}' if self.interp_closes() => {
                    self.template_stack.pop();
                    self.template_chunk(start)?;
                }
                _ if ch.is_ascii_digit() => self.numeric_literal(start),
                '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.numeric_literal(start)
                }
                _ if is_ident_start(ch) => self.identifier(start),
                _ => self.punctuator(start, ch)?,
            }
        }

        if !self.template_stack.is_empty() {
            return Err(TokenizeError::UnterminatedTemplate { line: self.line });
        }

        Ok(self.tokens)
    }

    /// True when a `}` at the cursor terminates the current interpolation
    /// rather than closing an object or block inside it.
    fn interp_closes(&self) -> bool {
        self.template_stack.last() == Some(&0)
    }

    fn slash(&mut self, start: usize) -> Result<(), TokenizeError> {
        match self.peek_at(1) {
            Some('/') => {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.bump();
                }
                Ok(())
            }
            Some('*') => {
                let line = self.line;
                self.bump();
                self.bump();
                loop {
                    match self.bump() {
                        Some('*') if self.peek() == Some('/') => {
                            self.bump();
                            return Ok(());
                        }
                        Some(_) => {}
                        None => return Err(TokenizeError::UnterminatedComment { line }),
                    }
                }
            }
            _ if self.regex_allowed() => self.regex_literal(start),
            _ => {
                // Division operator, possibly compound.
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                }
                self.push(TokenKind::Punctuator, start);
                Ok(())
            }
        }
    }

    /// A slash starts a regex literal unless the previous significant token
    /// could end an expression. Heuristic shared by every lexer that does
    /// not track full grammar state.
    fn regex_allowed(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(tok) => match tok.kind {
                TokenKind::Keyword => !matches!(tok.value, "this" | "super" | "true" | "false"),
                TokenKind::Punctuator => !matches!(tok.value, ")" | "]" | "++" | "--"),
                _ => false,
            },
        }
    }

    fn regex_literal(&mut self, start: usize) -> Result<(), TokenizeError> {
        let line = self.line;
        self.bump();
        let mut in_class = false;
        loop {
            match self.peek() {
                None | Some('\n') => return Err(TokenizeError::UnterminatedRegex { line }),
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(TokenizeError::UnterminatedRegex { line });
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.bump();
                }
                Some(']') => {
                    in_class = false;
                    self.bump();
                }
                Some('/') if !in_class => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        self.push(TokenKind::RegexLiteral, start);
        Ok(())
    }

    fn string_literal(&mut self, start: usize, quote: char) -> Result<(), TokenizeError> {
        let line = self.line;
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(TokenizeError::UnterminatedString { line }),
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(TokenizeError::UnterminatedString { line });
                    }
                }
                Some(ch) => {
                    self.bump();
                    if ch == quote {
                        break;
                    }
                }
            }
        }
        self.push(TokenKind::StringLiteral, start);
        Ok(())
    }

    /// Scan one template chunk: from an opening backtick or a `}` closing an
    /// interpolation, up to the closing backtick or the next `${`. The
    /// expressions inside interpolations are tokenized normally by the main
    /// loop, with `template_stack` tracking brace depth per open level.
    fn template_chunk(&mut self, start: usize) -> Result<(), TokenizeError> {
        let line = self.line;
        self.bump();
        loop {
            match self.peek() {
                None => return Err(TokenizeError::UnterminatedTemplate { line }),
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(TokenizeError::UnterminatedTemplate { line });
                    }
                }
                Some('`') => {
                    self.bump();
                    break;
                }
                Some('$') if self.peek_at(1) == Some('{') => {
                    self.bump();
                    self.bump();
                    self.template_stack.push(0);
                    break;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        self.push(TokenKind::TemplateLiteral, start);
        Ok(())
    }

    fn numeric_literal(&mut self, start: usize) {
        // Permissive scan: consume everything that can legally continue a
        // numeric literal. Exact numeric grammar does not matter here, only
        // the span length does.
        let mut prev = '\0';
        while let Some(ch) = self.peek() {
            let continues = ch.is_ascii_alphanumeric()
                || ch == '.'
                || ch == '_'
                || ((ch == '+' || ch == '-') && matches!(prev, 'e' | 'E'));
            if !continues {
                break;
            }
            prev = ch;
            self.bump();
        }
        self.push(TokenKind::NumericLiteral, start);
    }

    fn identifier(&mut self, start: usize) {
        self.bump();
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        let kind = if KEYWORDS.contains(&&self.src[start..self.pos]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.push(kind, start);
    }

    fn punctuator(&mut self, start: usize, ch: char) -> Result<(), TokenizeError> {
        let rest = &self.src[self.pos..];
        for table in [PUNCT4, PUNCT3, PUNCT2] {
            if let Some(p) = table.iter().find(|p| rest.starts_with(**p)) {
                self.pos += p.len();
                self.push(TokenKind::Punctuator, start);
                return Ok(());
            }
        }
        if PUNCT1.contains(ch) {
            if ch == '{' {
                if let Some(depth) = self.template_stack.last_mut() {
                    *depth += 1;
                }
            } else if ch == '}' {
                if let Some(depth) = self.template_stack.last_mut() {
                    *depth -= 1;
                }
            }
            self.bump();
            self.push(TokenKind::Punctuator, start);
            return Ok(());
        }
        Err(TokenizeError::UnexpectedChar {
            ch,
            line: self.line,
        })
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphanumeric()
}

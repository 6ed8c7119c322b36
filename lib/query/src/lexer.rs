//! A minimal SPARQL tokenizer.
//!
//! Only distinguishes what is needed to locate the projection of a query: words (keywords and
//! prefixed names), variables, IRIs, string literals, and punctuation. Comments and whitespace
//! are skipped. The lexer never fails; unterminated literals extend to the end of the input.

/// The kind of a [Token].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A keyword, a prefixed name, or a number.
    Word,
    /// A variable including its sigil (`?x` or `$x`).
    Variable,
    /// An IRI reference including the angle brackets.
    Iri,
    /// A string literal including its quotes.
    String,
    /// Any other single character.
    Punct,
}

/// A token with its byte range in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'input>(&self, input: &'input str) -> &'input str {
        &input[self.start..self.end]
    }

    /// Returns true if this token is the given keyword (case-insensitive).
    pub fn is_keyword(&self, input: &str, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text(input).eq_ignore_ascii_case(keyword)
    }

    /// Returns the name of a variable token without its sigil.
    pub fn variable_name<'input>(&self, input: &'input str) -> Option<&'input str> {
        (self.kind == TokenKind::Variable).then(|| &input[self.start + 1..self.end])
    }
}

/// SPARQL lexer.
pub struct Lexer<'input> {
    input: &'input str,
    i: usize,
    tokens: Vec<Token>,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            i: 0,
            tokens: Vec::new(),
        }
    }

    /// Runs the lexer and returns all tokens in input order.
    pub fn lex(mut self) -> Vec<Token> {
        while let Some(c) = self.peek_char() {
            let start = self.i;
            match c {
                c if c.is_whitespace() => self.i += c.len_utf8(),
                '#' => self.skip_line(),
                '?' | '$' => {
                    self.i += 1;
                    self.eat_while(is_name_char);
                    let kind = if self.i > start + 1 {
                        TokenKind::Variable
                    } else {
                        TokenKind::Punct
                    };
                    self.push(kind, start);
                }
                '"' | '\'' => {
                    self.eat_string(c);
                    self.push(TokenKind::String, start);
                }
                '<' => {
                    if let Some(len) = self.iri_len() {
                        self.i += len;
                        self.push(TokenKind::Iri, start);
                    } else {
                        self.i += 1;
                        self.push(TokenKind::Punct, start);
                    }
                }
                c if is_word_char(c) => {
                    self.eat_while(is_word_char);
                    self.push(TokenKind::Word, start);
                }
                c => {
                    self.i += c.len_utf8();
                    self.push(TokenKind::Punct, start);
                }
            }
        }
        self.tokens
    }

    fn rest(&self) -> &'input str {
        &self.input[self.i..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            start,
            end: self.i,
        });
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !predicate(c) {
                break;
            }
            self.i += c.len_utf8();
        }
    }

    fn skip_line(&mut self) {
        self.i = self
            .rest()
            .find('\n')
            .map_or(self.input.len(), |offset| self.i + offset);
    }

    fn eat_string(&mut self, quote: char) {
        let long_delimiter: String = [quote; 3].iter().collect();
        let long = self.rest().starts_with(&long_delimiter);
        self.i += if long { 3 } else { 1 };

        let mut escaped = false;
        while let Some(c) = self.peek_char() {
            if escaped {
                escaped = false;
                self.i += c.len_utf8();
                continue;
            }
            if c == '\\' {
                escaped = true;
                self.i += 1;
                continue;
            }
            if long {
                if self.rest().starts_with(&long_delimiter) {
                    self.i += 3;
                    return;
                }
            } else if c == quote {
                self.i += 1;
                return;
            } else if c == '\n' {
                // Short strings cannot span lines.
                return;
            }
            self.i += c.len_utf8();
        }
    }

    /// Returns the length of the IRI reference starting at the current position, if the `<`
    /// opens one. Otherwise, it is a comparison operator.
    fn iri_len(&self) -> Option<usize> {
        for (offset, c) in self.rest().char_indices().skip(1) {
            match c {
                '>' => return Some(offset + 1),
                c if c.is_whitespace() || matches!(c, '<' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') => {
                    return None
                }
                _ => {}
            }
        }
        None
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-')
}

//! Lexical analysis for the tree description grammar: a character source
//! with one character of pushback, and a stream tokenizer that classifies
//! raw input into tokens on demand.

use std::fmt::Display;
use std::io::Read;

/// A character source with a single character of pushback capacity, so the
/// parser can un-consume a '(' it over-read while probing for a nested
/// child.
pub struct PushbackSource<'a> {
    inner: &'a mut dyn Read,
    pushback: Option<u8>,
}

impl<'a> PushbackSource<'a> {
    pub fn new(inner: &'a mut dyn Read) -> Self {
        return PushbackSource {
            inner,
            pushback: None,
        };
    }

    /// Reads the next character, serving a pushed-back character first.
    /// Returns `None` once the underlying source is exhausted.
    pub fn read_char(&mut self) -> std::io::Result<Option<char>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte as char));
        }

        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0] as char)),
                Err(io_error) if io_error.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(io_error) => return Err(io_error),
            }
        }
    }

    /// Pushes one character back; the next read returns it. The buffer
    /// holds a single character, pushing twice without an intervening read
    /// is a bug in the caller.
    pub fn unread(&mut self, ch: char) {
        assert!(self.pushback.is_none(), "Pushback buffer overflow.");
        self.pushback = Some(ch as u8);
    }
}

/// `Read` passthrough so a nested parse can wrap this source in its own
/// fresh `PushbackSource`, pulling any pushed-back character first.
impl Read for PushbackSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if let Some(byte) = self.pushback.take() {
            buf[0] = byte;
            return Ok(1);
        }

        return self.inner.read(buf);
    }
}

/// The different classes of tokens that compose the tree description
/// grammar. `Ordinary` covers any character the grammar has no use for;
/// the parser rejects it as an unexpected token.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Token {
    LeftParen,
    RightParen,
    Comma,
    Word(String),
    EndOfLine,
    EndOfStream,
    Ordinary(char),
}

/// Renders a token for diagnostics: a word as its text, the end markers as
/// literal marker names, single-character tokens as that character.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LeftParen => {
                return write!(f, "(");
            }
            Token::RightParen => {
                return write!(f, ")");
            }
            Token::Comma => {
                return write!(f, ",");
            }
            Token::Word(text) => {
                return write!(f, "{}", text);
            }
            Token::EndOfLine => {
                return write!(f, "EndOfLine");
            }
            Token::EndOfStream => {
                return write!(f, "EndOfStream");
            }
            Token::Ordinary(ch) => {
                return write!(f, "{}", ch);
            }
        }
    }
}

/// Produces tokens on demand from a pushback source. Whitespace between
/// tokens is skipped, end-of-line is significant, and digits are word
/// characters rather than the start of numeric literals, so an identifier
/// like `R1R2L3` comes out as a single word.
pub struct StreamTokenizer<'s, 'r> {
    source: &'s mut PushbackSource<'r>,
}

impl<'s, 'r> StreamTokenizer<'s, 'r> {
    pub fn new(source: &'s mut PushbackSource<'r>) -> Self {
        return StreamTokenizer { source };
    }

    /// The underlying source, for character-level pushback and for handing
    /// the stream to a nested parse.
    pub fn source_mut(&mut self) -> &mut PushbackSource<'r> {
        return self.source;
    }

    /// Reads the next token. Returns `Token::EndOfStream` once the source
    /// is exhausted, and on every call thereafter.
    pub fn next_token(&mut self) -> std::io::Result<Token> {
        loop {
            let ch = match self.source.read_char()? {
                None => return Ok(Token::EndOfStream),
                Some(ch) => ch,
            };

            match ch {
                '\n' => {
                    return Ok(Token::EndOfLine);
                }

                '\r' => {
                    // Fold "\r\n" into a single end-of-line token.
                    match self.source.read_char()? {
                        Some('\n') | None => {}
                        Some(other) => self.source.unread(other),
                    }
                    return Ok(Token::EndOfLine);
                }

                '(' => {
                    return Ok(Token::LeftParen);
                }

                ')' => {
                    return Ok(Token::RightParen);
                }

                ',' => {
                    return Ok(Token::Comma);
                }

                ch if ch.is_ascii_whitespace() => {
                    continue;
                }

                ch if is_word_char(ch) => {
                    return self.read_word(ch);
                }

                ch => {
                    return Ok(Token::Ordinary(ch));
                }
            }
        }
    }

    // Accumulates a word token starting from its first character, pushing
    // the terminating character back for the next token.
    fn read_word(&mut self, first_char: char) -> std::io::Result<Token> {
        let mut text = String::new();
        text.push(first_char);

        loop {
            match self.source.read_char()? {
                None => break,
                Some(ch) if is_word_char(ch) => text.push(ch),
                Some(ch) => {
                    self.source.unread(ch);
                    break;
                }
            }
        }

        return Ok(Token::Word(text));
    }
}

// Word characters are ASCII letters and digits plus the high byte range.
// Digits never form numeric literals, they extend identifiers; the high
// bytes keep invalid identifiers together as one word so the parser can
// report them by name.
fn is_word_char(ch: char) -> bool {
    return ch.is_ascii_alphanumeric() || (ch as u32) >= 0x80;
}

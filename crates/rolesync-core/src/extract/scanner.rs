//! Delimiter-depth scanning over brace-delimited source text.
//!
//! Every routine here is string-literal aware: delimiters, commas and
//! comment markers inside `"..."`, `'...'` or `` `...` `` never count, and a
//! backslash escapes the following character. All structural characters are
//! ASCII, so scanning works on bytes without splitting UTF-8 sequences.

const QUOTES: [u8; 3] = [b'"', b'\'', b'`'];

fn is_quote(b: u8) -> bool {
    QUOTES.contains(&b)
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'-' | b'.' | b'+') || b >= 0x80
}

fn closing_for(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'[' => Some(b']'),
        b'(' => Some(b')'),
        _ => None,
    }
}

/// Remove `//` line comments and `/* */` block comments.
///
/// Line comments keep their terminating newline; a block comment becomes a
/// single space. Comment markers inside string literals are left alone.
pub fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    let mut in_string: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(quote) = in_string {
            out.push(b);
            if b == b'\\' && i + 1 < bytes.len() {
                out.push(bytes[i + 1]);
                i += 2;
                continue;
            }
            if b == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }

        let next = bytes.get(i + 1).copied();
        match (b, next) {
            (b'/', Some(b'/')) => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            (b'/', Some(b'*')) => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                // Skip the closing `*/` (or run off the end of an unterminated comment)
                i = (i + 2).min(bytes.len());
                out.push(b' ');
            }
            _ => {
                if is_quote(b) {
                    in_string = Some(b);
                }
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Index of the delimiter closing the one at `open`.
///
/// Tracks the nesting depth of the opening delimiter's kind and ignores
/// delimiters inside string literals. Returns `None` when `open` is not an
/// opening delimiter or depth never returns to zero.
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open_byte = *bytes.get(open)?;
    let close_byte = closing_for(open_byte)?;

    let mut depth: usize = 0;
    let mut in_string: Option<u8> = None;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == quote {
                in_string = None;
            }
            continue;
        }
        if is_quote(b) {
            in_string = Some(b);
        } else if b == open_byte {
            depth += 1;
        } else if b == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Lexical token over comment-free source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Open(u8),
    Close(u8),
    /// String literal; the slice excludes the quotes and is still escaped
    Str(&'a str),
    /// Bare word: identifiers, numbers, `true`/`false`
    Word(&'a str),
    Colon,
    Comma,
    /// A string literal that runs off the end of the text
    Unterminated,
    Other(u8),
}

impl<'a> Token<'a> {
    /// Key text for `Str`/`Word` tokens, raw (escapes not decoded).
    pub fn key_text(&self) -> Option<&'a str> {
        match self {
            Token::Str(s) | Token::Word(s) => Some(s),
            _ => None,
        }
    }
}

/// A token and the byte range it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub start: usize,
    pub end: usize,
    pub token: Token<'a>,
}

/// Streaming tokenizer.
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let start = self.pos;
        let b = *bytes.get(start)?;

        let (token, end) = match b {
            b'{' | b'[' | b'(' => (Token::Open(b), start + 1),
            b'}' | b']' | b')' => (Token::Close(b), start + 1),
            b':' => (Token::Colon, start + 1),
            b',' => (Token::Comma, start + 1),
            q if is_quote(q) => match string_end(bytes, start) {
                Some(close) => (Token::Str(&self.text[start + 1..close]), close + 1),
                None => {
                    self.done = true;
                    (Token::Unterminated, bytes.len())
                }
            },
            w if is_word_byte(w) => {
                let mut end = start;
                while end < bytes.len() && is_word_byte(bytes[end]) {
                    end += 1;
                }
                (Token::Word(&self.text[start..end]), end)
            }
            other => (Token::Other(other), start + 1),
        };

        self.pos = end;
        Some(Spanned { start, end, token })
    }
}

/// Index of the quote closing the string literal opened at `open`.
fn string_end(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Decode the escape sequences of a raw string-literal body.
///
/// Unknown escapes keep the escaped character; malformed `\u` sequences are
/// kept verbatim.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push_str("\\u"),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! The tokenizer (spec §4.1), ported from the reference implementation's
//! `picolGetToken` dispatch and its per-kind `picolParse*` helpers. It
//! walks the script byte-by-byte over a borrowed `&str` rather than a
//! mutable C string, but keeps the same state machine: `in_quote`
//! persists across calls (a double-quoted word can be interrupted by a
//! `$var` or `[cmd]` substitution and resume afterwards), and the
//! parser remembers the *previous* token's kind to decide things like
//! "does `{*}` count as an expansion prefix here" before overwriting it.

use crate::error::InterpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Inter-word whitespace.
    Sep,
    /// End of a command (newline, `;`, or end of input).
    Eol,
    /// A brace-literal word fragment (no substitutions, no escapes).
    Str,
    /// A word fragment that may contain backslash escapes.
    Esc,
    /// `$name` or `${name}` variable substitution.
    Var,
    /// `[...]` command substitution.
    Cmd,
    /// End of input, once the final implicit EOL has been consumed.
    Eof,
}

/// Tokenizes a script, yielding one token's extent at a time via
/// [`next_token`](Parser::next_token). Mirrors `picolParser`.
pub struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    expand: bool,
    in_quote: bool,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Parser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            kind: TokenKind::Eol,
            start: 0,
            end: 0,
            expand: false,
            in_quote: false,
        }
    }

    /// The raw text of the last-returned token.
    pub fn token_text(&self) -> &'a str {
        &self.text[self.start..self.end]
    }

    /// Whether the last-returned word token was preceded by a bare `{*}`
    /// expansion prefix, per spec §4.1's `{*}` handling.
    pub fn expand_pending(&self) -> bool {
        self.expand
    }

    pub fn clear_expand(&mut self) {
        self.expand = false;
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Advances and returns the next token's kind, updating `start`/`end`
    /// to its extent in the original text.
    pub fn next_token(&mut self) -> Result<TokenKind, InterpError> {
        loop {
            if self.remaining() == 0 {
                self.kind = if self.kind != TokenKind::Eol && self.kind != TokenKind::Eof {
                    TokenKind::Eol
                } else {
                    TokenKind::Eof
                };
                self.start = self.pos;
                self.end = self.pos;
                return Ok(self.kind);
            }
            let prev_kind = self.kind;
            let b = self.bytes[self.pos];
            match b {
                b' ' | b'\t' if !self.in_quote => self.parse_sep(),
                b'\n' | b'\r' | b';' if !self.in_quote => self.parse_eol(),
                b'[' => self.parse_cmd()?,
                b'$' => self.parse_var(),
                b'#' if prev_kind == TokenKind::Eol => {
                    self.parse_comment();
                    continue;
                }
                _ => self.parse_string(prev_kind),
            }
            if self.end.saturating_sub(self.start) > crate::limits::MAX_STR {
                return Err(InterpError::Resource(format!(
                    "string buffer overflow: token exceeds {} bytes",
                    crate::limits::MAX_STR
                )));
            }
            return Ok(self.kind);
        }
    }

    fn parse_sep(&mut self) {
        self.start = self.pos;
        while matches!(self.at(0), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
        self.end = self.pos;
        self.kind = TokenKind::Sep;
    }

    fn parse_eol(&mut self) {
        self.start = self.pos;
        while matches!(
            self.at(0),
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b';')
        ) {
            self.pos += 1;
        }
        self.end = self.pos;
        self.kind = TokenKind::Eol;
    }

    fn parse_comment(&mut self) {
        while let Some(b) = self.at(0) {
            if b == b'\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn parse_cmd(&mut self) -> Result<(), InterpError> {
        self.pos += 1; // consume '['
        self.start = self.pos;
        let mut depth_bracket = 1i32;
        let mut depth_brace = 0i32;
        loop {
            match self.at(0) {
                None => {
                    return Err(InterpError::Parse("missing close-bracket".to_string()));
                }
                Some(b'\\') => {
                    self.pos += 2;
                    continue;
                }
                Some(b'{') => depth_brace += 1,
                Some(b'}') => depth_brace -= 1,
                Some(b'[') if depth_brace == 0 => depth_bracket += 1,
                Some(b']') if depth_brace == 0 => {
                    depth_bracket -= 1;
                    if depth_bracket == 0 {
                        self.end = self.pos;
                        self.pos += 1;
                        self.kind = TokenKind::Cmd;
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
            self.pos += 1;
        }
    }

    fn parse_var(&mut self) {
        self.pos += 1; // consume '$'
        if self.at(0) == Some(b'{') {
            self.pos += 1;
            self.start = self.pos;
            while !matches!(self.at(0), None | Some(b'}')) {
                self.pos += 1;
            }
            self.end = self.pos;
            if self.at(0) == Some(b'}') {
                self.pos += 1;
            }
            self.kind = TokenKind::Var;
            return;
        }
        self.start = self.pos;
        while matches!(self.at(0), Some(b) if is_name_byte(b)) {
            self.pos += 1;
        }
        if self.pos == self.start {
            // bare `$` with nothing following: a literal dollar sign.
            self.start = self.pos - 1;
            self.end = self.pos;
            self.kind = TokenKind::Str;
            return;
        }
        if self.at(0) == Some(b'(') {
            self.pos += 1;
            while !matches!(self.at(0), None | Some(b')')) {
                self.pos += 1;
            }
            if self.at(0) == Some(b')') {
                self.pos += 1;
            }
        }
        self.end = self.pos;
        self.kind = TokenKind::Var;
    }

    fn parse_brace(&mut self) {
        self.pos += 1; // consume '{'
        self.start = self.pos;
        let mut depth = 1i32;
        loop {
            match self.at(0) {
                None => {
                    // Unterminated brace: lenient, take everything collected so far.
                    self.end = self.pos;
                    self.kind = TokenKind::Str;
                    return;
                }
                Some(b'\\') => {
                    self.pos += 2;
                    continue;
                }
                Some(b'{') => depth += 1,
                Some(b'}') => {
                    depth -= 1;
                    if depth == 0 {
                        self.end = self.pos;
                        self.pos += 1;
                        self.kind = TokenKind::Str;
                        return;
                    }
                }
                Some(_) => {}
            }
            self.pos += 1;
        }
    }

    /// Scans a run of plain text, honoring and toggling `in_quote`, and
    /// stopping wherever a substitution or word boundary begins so the
    /// caller can re-enter via `$`/`[` handling or end the word.
    fn parse_string(&mut self, prev_kind: TokenKind) {
        let new_word = matches!(prev_kind, TokenKind::Sep | TokenKind::Eol);
        if new_word
            && self.at(0) == Some(b'{')
            && self.at(1) == Some(b'*')
            && self.at(2) == Some(b'}')
        {
            self.pos += 3;
            self.expand = true;
            return self.parse_string(TokenKind::Sep);
        }
        if !self.in_quote && self.at(0) == Some(b'{') {
            self.parse_brace();
            return;
        }
        if new_word && !self.in_quote && self.at(0) == Some(b'"') {
            self.pos += 1;
            self.in_quote = true;
        }
        self.start = self.pos;
        loop {
            match self.at(0) {
                None => break,
                Some(b'\\') => self.pos += 2,
                Some(b'"') if self.in_quote => break,
                Some(b'$') | Some(b'[') => break,
                Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b';')
                    if !self.in_quote =>
                {
                    break
                }
                Some(_) => self.pos += 1,
            }
        }
        self.end = self.pos;
        self.kind = TokenKind::Esc;
        if self.in_quote && self.at(0) == Some(b'"') {
            self.pos += 1;
            self.in_quote = false;
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b':'
}

/// Decodes backslash escapes in a word fragment: `\n \r \t`, `\xHH`, a
/// literal backslash-pair, a trailing backslash-newline (which also
/// swallows the following run of whitespace, collapsing a line
/// continuation to a single space), and otherwise drops the backslash.
pub fn unescape(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i] as char);
            i += 1;
            continue;
        }
        match bytes[i + 1] {
            b'n' => {
                out.push('\n');
                i += 2;
            }
            b'r' => {
                out.push('\r');
                i += 2;
            }
            b't' => {
                out.push('\t');
                i += 2;
            }
            b'\\' => {
                out.push('\\');
                i += 2;
            }
            b'x' if i + 3 < bytes.len()
                && bytes[i + 2].is_ascii_hexdigit()
                && bytes[i + 3].is_ascii_hexdigit() =>
            {
                let hex = std::str::from_utf8(&bytes[i + 2..i + 4]).unwrap();
                let v = u8::from_str_radix(hex, 16).unwrap_or(0);
                out.push(v as char);
                i += 4;
            }
            b'\n' => {
                out.push(' ');
                i += 2;
                while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
                    i += 1;
                }
            }
            other => {
                out.push(other as char);
                i += 2;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<(TokenKind, String)> {
        let mut p = Parser::new(src);
        let mut out = Vec::new();
        loop {
            let k = p.next_token().unwrap();
            if k == TokenKind::Eof {
                break;
            }
            out.push((k, p.token_text().to_string()));
        }
        out
    }

    #[test]
    fn simple_command_tokenizes_into_words() {
        let toks = tokens("set x 1");
        let words: Vec<_> = toks
            .iter()
            .filter(|(k, _)| !matches!(k, TokenKind::Sep | TokenKind::Eol))
            .map(|(_, t)| t.clone())
            .collect();
        assert_eq!(words, vec!["set", "x", "1"]);
    }

    #[test]
    fn brace_word_is_literal() {
        let toks = tokens("puts {hello world}");
        assert!(toks.iter().any(|(_, t)| t == "hello world"));
    }

    #[test]
    fn quoted_word_can_contain_substitutions() {
        let toks = tokens("puts \"a $x b\"");
        let kinds: Vec<_> = toks
            .iter()
            .skip(2) // "puts" then Sep
            .map(|(k, _)| *k)
            .collect();
        assert!(kinds.contains(&TokenKind::Var));
    }

    #[test]
    fn unterminated_bracket_is_parse_error() {
        let mut p = Parser::new("set x [expr 1+1");
        let mut err = None;
        loop {
            match p.next_token() {
                Ok(TokenKind::Eof) => break,
                Ok(_) => continue,
                Err(e) => {
                    err = Some(e);
                    break;
                }
            }
        }
        assert!(err.is_some());
    }

    #[test]
    fn oversized_token_is_a_resource_error() {
        let src = "x".repeat(crate::limits::MAX_STR + 1);
        let mut p = Parser::new(&src);
        let err = p.next_token().unwrap_err();
        assert!(err.to_string().contains("buffer overflow"));
    }

    #[test]
    fn unescape_handles_common_escapes() {
        assert_eq!(unescape("a\\nb"), "a\nb");
        assert_eq!(unescape("a\\tb"), "a\tb");
        assert_eq!(unescape("a\\\\b"), "a\\b");
        assert_eq!(unescape("\\x41"), "A");
    }
}

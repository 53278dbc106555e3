//! Recursive-descent parser from TOML text to the expression stream.

use crate::ast::{Expr, Key, Located, Val};
use crate::decode::cursor::Cursor;
use crate::decode::datetime;
use crate::error::Error;

pub(crate) struct Parser<'a> {
    cur: Cursor<'a>,
}

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Control characters are forbidden in comments and strings unless escaped;
/// tab is the one exception.
fn is_forbidden_control(c: char) -> bool {
    let u = c as u32;
    (u < 0x20 && c != '\t') || u == 0x7F
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut cur = Cursor::new(input);
        cur.eat('\u{FEFF}');
        Self { cur }
    }

    pub fn parse_document(mut self) -> Result<Vec<Expr>, Error> {
        let mut exprs = Vec::new();
        loop {
            self.cur.skip_ws();
            match self.cur.peek() {
                None => break,
                Some('\n') | Some('\r') => {
                    self.require_newline()?;
                }
                Some('#') => {
                    self.skip_comment()?;
                }
                Some('[') => {
                    exprs.push(self.parse_header()?);
                    self.end_of_line()?;
                }
                Some(_) => {
                    exprs.push(self.parse_keyval()?);
                    self.end_of_line()?;
                }
            }
        }
        Ok(exprs)
    }

    /// Consume `\n` or `\r\n`; anything else is an error.
    fn require_newline(&mut self) -> Result<(), Error> {
        match self.cur.peek() {
            Some('\n') => {
                self.cur.bump();
                Ok(())
            }
            Some('\r') => {
                self.cur.bump();
                if self.cur.eat('\n') {
                    Ok(())
                } else {
                    Err(self.cur.error("bare carriage return"))
                }
            }
            _ => Err(self.cur.error("expected newline")),
        }
    }

    /// Consume a newline if one is next. Bare `\r` is still an error.
    fn eat_newline(&mut self) -> Result<bool, Error> {
        match self.cur.peek() {
            Some('\n') | Some('\r') => {
                self.require_newline()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn skip_comment(&mut self) -> Result<(), Error> {
        self.cur.bump(); // '#'
        loop {
            match self.cur.peek() {
                None | Some('\n') => return Ok(()),
                Some('\r') => {
                    // Leave the CRLF for the caller; a lone CR is invalid.
                    if self.cur.rest().as_bytes().get(1) == Some(&b'\n') {
                        return Ok(());
                    }
                    return Err(self.cur.error("bare carriage return"));
                }
                Some(c) if is_forbidden_control(c) => {
                    return Err(self.cur.error("control character in comment"));
                }
                Some(_) => {
                    self.cur.bump();
                }
            }
        }
    }

    /// Trailing whitespace, optional comment, then newline or end of input.
    fn end_of_line(&mut self) -> Result<(), Error> {
        self.cur.skip_ws();
        if self.cur.peek() == Some('#') {
            self.skip_comment()?;
        }
        if self.cur.at_end() {
            return Ok(());
        }
        self.require_newline()
    }

    fn parse_header(&mut self) -> Result<Expr, Error> {
        self.cur.bump(); // '['
        let array = self.cur.eat('[');
        self.cur.skip_ws();
        let key = self.parse_key()?;
        if !self.cur.eat(']') {
            return Err(self.cur.error("expected ']'"));
        }
        if array && !self.cur.eat(']') {
            return Err(self.cur.error("expected ']]'"));
        }
        Ok(if array {
            Expr::ArrayTableHeader(key)
        } else {
            Expr::TableHeader(key)
        })
    }

    fn parse_keyval(&mut self) -> Result<Expr, Error> {
        let key = self.parse_key()?;
        if !self.cur.eat('=') {
            return Err(self.cur.error("expected '='"));
        }
        self.cur.skip_ws();
        let val = self.parse_value()?;
        Ok(Expr::KeyVal(key, val))
    }

    /// A dotted key: segments separated by `.` with optional whitespace
    /// around each dot. Consumes trailing whitespace.
    fn parse_key(&mut self) -> Result<Key, Error> {
        let mut key = vec![self.parse_key_segment()?];
        loop {
            self.cur.skip_ws();
            if self.cur.eat('.') {
                self.cur.skip_ws();
                key.push(self.parse_key_segment()?);
            } else {
                return Ok(key);
            }
        }
    }

    fn parse_key_segment(&mut self) -> Result<Located<String>, Error> {
        let pos = self.cur.pos();
        let item = match self.cur.peek() {
            Some('"') => self.parse_basic_string()?,
            Some('\'') => self.parse_literal_string()?,
            Some(c) if is_bare_key_char(c) => self.cur.take_while(is_bare_key_char).to_string(),
            _ => return Err(self.cur.error("expected key")),
        };
        Ok(Located::new(pos, item))
    }

    fn parse_value(&mut self) -> Result<Val, Error> {
        match self.cur.peek() {
            Some('"') => {
                if self.cur.rest().starts_with("\"\"\"") {
                    Ok(Val::String(self.parse_multiline_basic()?))
                } else {
                    Ok(Val::String(self.parse_basic_string()?))
                }
            }
            Some('\'') => {
                if self.cur.rest().starts_with("'''") {
                    Ok(Val::String(self.parse_multiline_literal()?))
                } else {
                    Ok(Val::String(self.parse_literal_string()?))
                }
            }
            Some('t') => {
                if self.cur.eat_str("true") {
                    Ok(Val::Bool(true))
                } else {
                    Err(self.cur.error("invalid value"))
                }
            }
            Some('f') => {
                if self.cur.eat_str("false") {
                    Ok(Val::Bool(false))
                } else {
                    Err(self.cur.error("invalid value"))
                }
            }
            Some('i') | Some('n') | Some('+') | Some('-') => self.parse_number(),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_inline_table(),
            Some(c) if c.is_ascii_digit() => {
                let rest = self.cur.rest().as_bytes();
                if rest.len() >= 5
                    && rest[..4].iter().all(u8::is_ascii_digit)
                    && rest[4] == b'-'
                {
                    datetime::parse_date_or_datetime(&mut self.cur)
                } else if rest.len() >= 3
                    && rest[..2].iter().all(u8::is_ascii_digit)
                    && rest[2] == b':'
                {
                    Ok(Val::TimeOfDay(datetime::parse_time(&mut self.cur)?))
                } else {
                    self.parse_number()
                }
            }
            _ => Err(self.cur.error("invalid value")),
        }
    }

    fn parse_array(&mut self) -> Result<Val, Error> {
        self.cur.bump(); // '['
        let mut items = Vec::new();
        loop {
            self.skip_array_ws()?;
            if self.cur.eat(']') {
                return Ok(Val::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_array_ws()?;
            if self.cur.eat(',') {
                continue;
            }
            if self.cur.eat(']') {
                return Ok(Val::Array(items));
            }
            return Err(self.cur.error("expected ',' or ']'"));
        }
    }

    /// Whitespace, newlines, and comments are all allowed inside arrays.
    fn skip_array_ws(&mut self) -> Result<(), Error> {
        loop {
            self.cur.skip_ws();
            match self.cur.peek() {
                Some('#') => self.skip_comment()?,
                Some('\n') | Some('\r') => {
                    self.require_newline()?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_inline_table(&mut self) -> Result<Val, Error> {
        self.cur.bump(); // '{'
        self.cur.skip_ws();
        let mut kvs = Vec::new();
        if self.cur.eat('}') {
            return Ok(Val::Table(kvs));
        }
        loop {
            let key = self.parse_key()?;
            if !self.cur.eat('=') {
                return Err(self.cur.error("expected '='"));
            }
            self.cur.skip_ws();
            let val = self.parse_value()?;
            kvs.push((key, val));
            self.cur.skip_ws();
            if self.cur.eat(',') {
                self.cur.skip_ws();
                continue;
            }
            if self.cur.eat('}') {
                return Ok(Val::Table(kvs));
            }
            return Err(self.cur.error("expected ',' or '}'"));
        }
    }

    fn parse_basic_string(&mut self) -> Result<String, Error> {
        self.cur.bump(); // '"'
        let mut out = String::new();
        loop {
            match self.cur.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.cur.error("unterminated string"));
                }
                Some('"') => {
                    self.cur.bump();
                    return Ok(out);
                }
                Some('\\') => {
                    self.cur.bump();
                    self.parse_escape(&mut out)?;
                }
                Some(c) if is_forbidden_control(c) => {
                    return Err(self.cur.error("control character in string"));
                }
                Some(c) => {
                    out.push(c);
                    self.cur.bump();
                }
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), Error> {
        match self.cur.bump() {
            Some('b') => out.push('\u{0008}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(self.unicode_escape(4)?),
            Some('U') => out.push(self.unicode_escape(8)?),
            _ => return Err(self.cur.error("invalid escape sequence")),
        }
        Ok(())
    }

    fn unicode_escape(&mut self, len: usize) -> Result<char, Error> {
        let mut code = 0u32;
        for _ in 0..len {
            let d = self
                .cur
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.cur.error("invalid unicode escape"))?;
            self.cur.bump();
            code = code * 16 + d;
        }
        char::from_u32(code).ok_or_else(|| self.cur.error("invalid unicode escape"))
    }

    fn parse_multiline_basic(&mut self) -> Result<String, Error> {
        self.cur.bump();
        self.cur.bump();
        self.cur.bump(); // opening `"""`
        self.eat_newline()?; // an immediate newline is trimmed
        let mut out = String::new();
        loop {
            if self.cur.peek() == Some('"') {
                let mut quotes = 0usize;
                while self.cur.eat('"') {
                    quotes += 1;
                }
                if quotes >= 3 {
                    if quotes > 5 {
                        return Err(self.cur.error("too many quotes"));
                    }
                    for _ in 0..quotes - 3 {
                        out.push('"');
                    }
                    return Ok(out);
                }
                for _ in 0..quotes {
                    out.push('"');
                }
                continue;
            }
            match self.cur.peek() {
                None => return Err(self.cur.error("unterminated string")),
                Some('\\') => {
                    self.cur.bump();
                    if matches!(
                        self.cur.peek(),
                        Some(' ') | Some('\t') | Some('\n') | Some('\r')
                    ) {
                        // Line-ending backslash: trim everything up to the
                        // next non-whitespace character.
                        self.cur.skip_ws();
                        if !self.eat_newline()? {
                            return Err(self.cur.error("invalid escape sequence"));
                        }
                        loop {
                            self.cur.skip_ws();
                            if !self.eat_newline()? {
                                break;
                            }
                        }
                    } else {
                        self.parse_escape(&mut out)?;
                    }
                }
                Some('\n') => {
                    out.push('\n');
                    self.cur.bump();
                }
                Some('\r') => {
                    self.cur.bump();
                    if self.cur.eat('\n') {
                        out.push_str("\r\n");
                    } else {
                        return Err(self.cur.error("bare carriage return"));
                    }
                }
                Some(c) if is_forbidden_control(c) => {
                    return Err(self.cur.error("control character in string"));
                }
                Some(c) => {
                    out.push(c);
                    self.cur.bump();
                }
            }
        }
    }

    fn parse_literal_string(&mut self) -> Result<String, Error> {
        self.cur.bump(); // '\''
        let mut out = String::new();
        loop {
            match self.cur.peek() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.cur.error("unterminated string"));
                }
                Some('\'') => {
                    self.cur.bump();
                    return Ok(out);
                }
                Some(c) if is_forbidden_control(c) => {
                    return Err(self.cur.error("control character in string"));
                }
                Some(c) => {
                    out.push(c);
                    self.cur.bump();
                }
            }
        }
    }

    fn parse_multiline_literal(&mut self) -> Result<String, Error> {
        self.cur.bump();
        self.cur.bump();
        self.cur.bump(); // opening `'''`
        self.eat_newline()?;
        let mut out = String::new();
        loop {
            if self.cur.peek() == Some('\'') {
                let mut quotes = 0usize;
                while self.cur.eat('\'') {
                    quotes += 1;
                }
                if quotes >= 3 {
                    if quotes > 5 {
                        return Err(self.cur.error("too many quotes"));
                    }
                    for _ in 0..quotes - 3 {
                        out.push('\'');
                    }
                    return Ok(out);
                }
                for _ in 0..quotes {
                    out.push('\'');
                }
                continue;
            }
            match self.cur.peek() {
                None => return Err(self.cur.error("unterminated string")),
                Some('\n') => {
                    out.push('\n');
                    self.cur.bump();
                }
                Some('\r') => {
                    self.cur.bump();
                    if self.cur.eat('\n') {
                        out.push_str("\r\n");
                    } else {
                        return Err(self.cur.error("bare carriage return"));
                    }
                }
                Some(c) if is_forbidden_control(c) => {
                    return Err(self.cur.error("control character in string"));
                }
                Some(c) => {
                    out.push(c);
                    self.cur.bump();
                }
            }
        }
    }

    fn parse_number(&mut self) -> Result<Val, Error> {
        let pos = self.cur.pos();
        let neg = self.cur.eat('-');
        let plus = !neg && self.cur.eat('+');

        if self.cur.eat_str("inf") {
            return Ok(Val::Float(if neg {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }));
        }
        if self.cur.eat_str("nan") {
            return Ok(Val::Float(if neg { -f64::NAN } else { f64::NAN }));
        }

        // Radix prefixes take no sign.
        if !neg && !plus {
            if self.cur.eat_str("0x") {
                return self.parse_radix_int(16, pos);
            }
            if self.cur.eat_str("0o") {
                return self.parse_radix_int(8, pos);
            }
            if self.cur.eat_str("0b") {
                return self.parse_radix_int(2, pos);
            }
        }

        let int_digits = self.digits_underscore(|c| c.is_ascii_digit())?;
        if int_digits.len() > 1 && int_digits.starts_with('0') {
            return Err(self.cur.error_at(pos, "leading zeros are not allowed"));
        }

        let mut text = String::new();
        if neg {
            text.push('-');
        }
        text.push_str(&int_digits);

        let mut is_float = false;
        if self.cur.eat('.') {
            is_float = true;
            text.push('.');
            text.push_str(&self.digits_underscore(|c| c.is_ascii_digit())?);
        }
        if matches!(self.cur.peek(), Some('e') | Some('E')) {
            self.cur.bump();
            is_float = true;
            text.push('e');
            if self.cur.eat('-') {
                text.push('-');
            } else {
                self.cur.eat('+');
            }
            // Exponent digits may carry leading zeros.
            text.push_str(&self.digits_underscore(|c| c.is_ascii_digit())?);
        }

        if is_float {
            text.parse::<f64>()
                .map(Val::Float)
                .map_err(|_| self.cur.error_at(pos, "invalid float"))
        } else {
            text.parse::<i64>()
                .map(Val::Integer)
                .map_err(|_| self.cur.error_at(pos, "integer out of range"))
        }
    }

    fn parse_radix_int(&mut self, radix: u32, pos: crate::ast::Pos) -> Result<Val, Error> {
        let digits = self.digits_underscore(|c| c.is_digit(radix))?;
        i64::from_str_radix(&digits, radix)
            .map(Val::Integer)
            .map_err(|_| self.cur.error_at(pos, "integer out of range"))
    }

    /// A run of digits with `_` separators; every underscore must sit
    /// between two digits.
    fn digits_underscore(&mut self, is_digit: impl Fn(char) -> bool) -> Result<String, Error> {
        let mut out = String::new();
        let mut prev_underscore = true;
        loop {
            match self.cur.peek() {
                Some(c) if is_digit(c) => {
                    out.push(c);
                    self.cur.bump();
                    prev_underscore = false;
                }
                Some('_') => {
                    if prev_underscore {
                        return Err(self.cur.error("underscore must be surrounded by digits"));
                    }
                    self.cur.bump();
                    prev_underscore = true;
                }
                _ => break,
            }
        }
        if out.is_empty() || prev_underscore {
            return Err(self.cur.error("expected digit"));
        }
        Ok(out)
    }
}

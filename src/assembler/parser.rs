//! Assembly source parser
//!
//! Splits one source line into an optional label and a [`Statement`], and
//! evaluates operand expressions. Parsing is independent of the pass: the
//! driver parses every line once and walks the result twice.

use std::str::FromStr;

use crate::assembler::{AssemblerError, ErrorKind};
use crate::opcodes::Mnemonic;

/// What a line asks the assembler to do, with operand text left unevaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    /// Nothing after the label (or a blank/comment line)
    Empty,

    /// `*= expr`, `ORG expr`
    Origin(&'a str),

    /// `.BYTE`/`DCB`/`.DB` items: expressions or quoted strings
    Bytes(Vec<&'a str>),

    /// `.WORD`/`DCW`/`.DW` expressions, emitted little-endian
    Words(Vec<&'a str>),

    /// `NAME = expr`
    Assign { name: &'a str, value: &'a str },

    /// `MNEMONIC [operand]`
    Instruction { mnemonic: Mnemonic, operand: &'a str },
}

/// A parsed line of assembly source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line number in source file (1-indexed)
    pub number: usize,

    /// Label defined at the start of the line, in either surface form
    pub label: Option<&'a str>,

    pub statement: Statement<'a>,
}

/// Parses one line of source.
pub fn parse_line(number: usize, text: &str) -> Result<SourceLine<'_>, AssemblerError> {
    let text = strip_comment(text).trim();
    let error = |kind, message| AssemblerError::new(number, kind, message);

    // `NAME:` form
    let (mut label, rest) = match split_identifier(text) {
        Some((name, after)) if after.starts_with(':') => (Some(name), after[1..].trim_start()),
        _ => (None, text),
    };

    let statement = match parse_statement(rest) {
        Ok(statement) => statement,
        // Bare `NAME rest` form: a leading word that is not a mnemonic,
        // followed by more text
        Err(Unrecognized { word, after })
            if label.is_none() && is_identifier(word) && !after.is_empty() =>
        {
            label = Some(word);
            parse_statement(after).map_err(|e| error(ErrorKind::UnknownMnemonic, e.message()))?
        }
        Err(e) => return Err(error(ErrorKind::UnknownMnemonic, e.message())),
    };

    Ok(SourceLine {
        number,
        label,
        statement,
    })
}

/// A leading word that is neither a mnemonic nor a directive.
struct Unrecognized<'a> {
    word: &'a str,
    after: &'a str,
}

impl Unrecognized<'_> {
    fn message(&self) -> String {
        format!("unknown mnemonic '{}'", self.word)
    }
}

fn parse_statement(text: &str) -> Result<Statement<'_>, Unrecognized<'_>> {
    if text.is_empty() {
        return Ok(Statement::Empty);
    }

    if let Some(value) = text
        .strip_prefix('*')
        .and_then(|t| t.trim_start().strip_prefix('='))
    {
        return Ok(Statement::Origin(value.trim()));
    }

    if let Some((name, after)) = split_identifier(text) {
        if let Some(value) = after.trim_start().strip_prefix('=') {
            return Ok(Statement::Assign {
                name,
                value: value.trim(),
            });
        }
    }

    let (word, after) = match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], text[i..].trim()),
        None => (text, ""),
    };

    let directive = word.to_ascii_uppercase();
    match directive.as_str() {
        "ORG" | ".ORG" => return Ok(Statement::Origin(after)),
        ".BYTE" | "DCB" | ".DB" => return Ok(Statement::Bytes(split_list(after))),
        ".WORD" | "DCW" | ".DW" => return Ok(Statement::Words(split_list(after))),
        _ => {}
    }

    match Mnemonic::from_str(word) {
        Ok(mnemonic) => Ok(Statement::Instruction {
            mnemonic,
            operand: after,
        }),
        Err(()) => Err(Unrecognized { word, after }),
    }
}

/// Removes a trailing `;` comment. Semicolons inside double quotes are kept.
pub fn strip_comment(line: &str) -> &str {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Splits a comma-separated list, respecting double quotes. An empty list
/// yields no items.
pub fn split_list(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                items.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(text[start..].trim());
    items
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits a leading identifier off `text`.
fn split_identifier(text: &str) -> Option<(&str, &str)> {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    let name = &text[..end];
    is_identifier(name).then(|| (name, &text[end..]))
}

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// The expression names a symbol that is not (yet) defined.
    Undefined(String),

    /// The expression is malformed.
    Invalid(String),
}

/// Evaluates `expr`: terms joined by `+`/`-`, optionally prefixed with `<`
/// (low byte) or `>` (high byte).
///
/// The result is signed so callers can apply their own range rules.
pub fn evaluate(expr: &str, lookup: &dyn Fn(&str) -> Option<u16>) -> Result<i32, ExprError> {
    let mut expr = expr.trim();
    let mut selectors = Vec::new();
    while let Some(c) = expr.chars().next().filter(|c| *c == '<' || *c == '>') {
        selectors.push(c);
        expr = expr[1..].trim_start();
    }

    let value = evaluate_sum(expr, lookup)?;
    // innermost selector applies first
    Ok(selectors.iter().rev().fold(value, |v, &c| match c {
        '<' => v & 0xFF,
        _ => (v >> 8) & 0xFF,
    }))
}

fn evaluate_sum(expr: &str, lookup: &dyn Fn(&str) -> Option<u16>) -> Result<i32, ExprError> {
    let mut total: i32 = 0;
    let mut sign = 1;
    let mut start = 0;
    let mut seen_term = false;

    for (i, c) in expr.char_indices() {
        if c != '+' && c != '-' {
            continue;
        }
        let term = expr[start..i].trim();
        if term.is_empty() {
            if seen_term || c == '+' {
                return Err(ExprError::Invalid(format!("missing operand in '{}'", expr)));
            }
            // leading unary minus
            sign = -sign;
        } else {
            total = total.wrapping_add(sign * parse_term(term, lookup)?);
            seen_term = true;
            sign = if c == '-' { -1 } else { 1 };
        }
        start = i + 1;
    }

    let last = expr[start..].trim();
    if last.is_empty() {
        return Err(ExprError::Invalid(if expr.is_empty() {
            "missing value".to_string()
        } else {
            format!("missing operand in '{}'", expr)
        }));
    }
    Ok(total.wrapping_add(sign * parse_term(last, lookup)?))
}

/// Resolves a single term: symbol first, then `$hex`, `0x` hex, `%binary`, decimal.
fn parse_term(term: &str, lookup: &dyn Fn(&str) -> Option<u16>) -> Result<i32, ExprError> {
    if let Some(value) = lookup(term) {
        return Ok(value as i32);
    }
    if is_identifier(term) {
        return Err(ExprError::Undefined(term.to_string()));
    }
    parse_number(term).map(|n| n as i32)
}

/// Parse a number from a string (supports hex `$XX` / `0xXX`, binary `%XXXXXXXX`, decimal)
pub fn parse_number(s: &str) -> Result<u16, ExprError> {
    let s = s.trim();
    let invalid = |kind: &str| ExprError::Invalid(format!("invalid {} number '{}'", kind, s));

    if let Some(hex) = s.strip_prefix('$') {
        u16::from_str_radix(hex, 16).map_err(|_| invalid("hex"))
    } else if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|_| invalid("hex"))
    } else if let Some(bin) = s.strip_prefix('%') {
        u16::from_str_radix(bin, 2).map_err(|_| invalid("binary"))
    } else if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.parse::<u16>().map_err(|_| invalid("decimal"))
    } else {
        Err(ExprError::Invalid(format!("cannot parse '{}'", s)))
    }
}

/// Decodes a `"..."` string item into its bytes, or `None` if `item` is not quoted.
pub fn string_literal(item: &str) -> Option<&[u8]> {
    item.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::as_bytes)
}

//! Response parser — turns free-text reasoning output into a decision.
//!
//! Model output is inherently ambiguous, so parsing is **total**: every
//! input string maps to exactly one [`Decision`] and nothing here ever
//! fails. Inputs that match neither directive degrade to
//! [`Decision::Inconclusive`], which the loop records as a recoverable
//! observation.
//!
//! # Grammar
//!
//! Markers are matched case-insensitively anywhere in the text:
//!
//! - `Final Answer: <text>` — everything after the marker, trimmed, is the
//!   answer. Checked before the action directive, so a response containing
//!   both terminates the run.
//! - `Action: name(key="value", other=bare)` — `name` is
//!   `[A-Za-z_][A-Za-z0-9_-]*`. Values are double-quoted strings with
//!   `\"` and `\\` escapes, or bare tokens trimmed of whitespace.
//!   A malformed argument list yields an empty argument mapping, never a
//!   parse failure.

use reagent_core::capability::Arguments;

/// The structured decision extracted from one reasoning step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Invoke a capability with named arguments.
    Act {
        capability: String,
        arguments: Arguments,
    },

    /// Terminate the run with this answer.
    Answer(String),

    /// Neither directive found; the loop treats this as a recoverable
    /// observation, not a fatal error.
    Inconclusive,
}

const FINAL_ANSWER_MARKER: &str = "final answer:";
const ACTION_MARKER: &str = "action:";

/// Parse one raw reasoning response into a [`Decision`]. Total: never
/// fails for any input, including the empty string.
pub fn parse(raw: &str) -> Decision {
    if let Some(idx) = find_ignore_case(raw, FINAL_ANSWER_MARKER) {
        let answer = raw[idx + FINAL_ANSWER_MARKER.len()..].trim();
        return Decision::Answer(answer.to_string());
    }

    if let Some(idx) = find_ignore_case(raw, ACTION_MARKER) {
        let rest = &raw[idx + ACTION_MARKER.len()..];
        if let Some((capability, after_name)) = scan_name(rest) {
            let arguments = scan_arguments(after_name).unwrap_or_default();
            return Decision::Act {
                capability,
                arguments,
            };
        }
    }

    Decision::Inconclusive
}

/// The reasoning text preceding the first recognized directive, with a
/// leading `Thought:` label stripped. For a response with no directive the
/// whole text is the thought. `None` when there is nothing but whitespace.
pub fn split_thought(raw: &str) -> Option<String> {
    let cut = [FINAL_ANSWER_MARKER, ACTION_MARKER]
        .iter()
        .filter_map(|marker| find_ignore_case(raw, marker))
        .min()
        .unwrap_or(raw.len());

    let mut text = raw[..cut].trim();
    if let Some(idx) = find_ignore_case(text, "thought:") {
        if idx == 0 {
            text = text["thought:".len()..].trim();
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Byte-wise case-insensitive substring search. Markers are pure ASCII, so
/// a byte match always lands on a char boundary.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Scan a capability name after the action marker. Returns the name and
/// the remaining text, or `None` if no identifier is present.
fn scan_name(text: &str) -> Option<(String, &str)> {
    let trimmed = text.trim_start();
    let mut end = 0;
    for (i, c) in trimmed.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_' || c == '-'
        };
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        return None;
    }
    Some((trimmed[..end].to_string(), &trimmed[end..]))
}

/// Scan a parenthesized `key="value"` list. Returns `None` for anything
/// malformed, which the caller maps to an empty argument set.
fn scan_arguments(text: &str) -> Option<Arguments> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    if !cursor.eat('(') {
        return None;
    }

    let mut arguments = Arguments::new();
    cursor.skip_whitespace();
    if cursor.eat(')') {
        return Some(arguments);
    }

    loop {
        cursor.skip_whitespace();
        let key = cursor.scan_ident()?;
        cursor.skip_whitespace();
        if !cursor.eat('=') {
            return None;
        }
        cursor.skip_whitespace();
        let value = if cursor.peek() == Some('"') {
            cursor.scan_quoted()?
        } else {
            cursor.scan_bare()
        };
        arguments.insert(key, value);

        cursor.skip_whitespace();
        if cursor.eat(')') {
            return Some(arguments);
        }
        if !cursor.eat(',') {
            return None;
        }
    }
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn scan_ident(&mut self) -> Option<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some(self.chars[start..self.pos].iter().collect())
    }

    /// Scan a double-quoted value with `\"` and `\\` escapes. `None` if
    /// the closing quote never arrives.
    fn scan_quoted(&mut self) -> Option<String> {
        if !self.eat('"') {
            return None;
        }
        let mut out = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.pos += 1;
                    return Some(out);
                }
                Some('\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some('"') => out.push('"'),
                        Some('\\') => out.push('\\'),
                        Some(other) => {
                            // Unknown escape: keep it verbatim.
                            out.push('\\');
                            out.push(other);
                        }
                        None => return None,
                    }
                    self.pos += 1;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
                None => return None,
            }
        }
    }

    /// Scan an unquoted value: everything up to the next `,` or `)`,
    /// trimmed of surrounding whitespace.
    fn scan_bare(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c != ',' && c != ')') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        raw.trim().to_string()
    }
}

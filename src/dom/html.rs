//! HTML serialization and a small fragment parser for [`Dom`].
//!
//! The parser handles what the editor itself produces: elements with quoted
//! or bare attributes, void elements, comments, and the common character
//! references. Unknown end tags are ignored and unclosed elements are closed
//! at the end of input.

use std::fmt;

use super::{Dom, NodeId, NodeKind};
use crate::util::text::escape_html;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "wbr"];

/// Errors produced while parsing a markup fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    /// A `<` that never reaches its closing `>`
    UnterminatedTag(usize),
    /// A `<!--` without `-->`
    UnterminatedComment(usize),
    /// A quoted attribute value without its closing quote
    UnterminatedAttribute(usize),
}

impl fmt::Display for HtmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HtmlError::UnterminatedTag(at) => write!(f, "Unterminated tag at byte {}", at),
            HtmlError::UnterminatedComment(at) => write!(f, "Unterminated comment at byte {}", at),
            HtmlError::UnterminatedAttribute(at) => {
                write!(f, "Unterminated attribute value at byte {}", at)
            }
        }
    }
}

impl std::error::Error for HtmlError {}

impl Dom {
    /// Serialized markup of the children of `id`
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialized markup of `id` itself
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element(data) => {
                out.push('<');
                out.push_str(&data.tag);
                for (name, value) in &data.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&data.tag.as_str()) {
                    return;
                }
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push('>');
            }
        }
    }

    /// Replace the children of `id` with the parsed fragment.
    ///
    /// On error the existing children are left untouched.
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) -> Result<(), HtmlError> {
        let tokens = tokenize(markup)?;
        self.remove_children(id);

        let mut stack = vec![id];
        for token in tokens {
            let parent = *stack.last().unwrap_or(&id);
            match token {
                Token::Text(text) => {
                    let node = self.create_text(&text);
                    self.append_child(parent, node);
                }
                Token::Open { tag, attrs, self_closing } => {
                    let node = self.create_element(&tag);
                    for (name, value) in attrs {
                        self.set_attribute(node, &name, &value);
                    }
                    self.append_child(parent, node);
                    if !self_closing && !VOID_ELEMENTS.contains(&tag.as_str()) {
                        stack.push(node);
                    }
                }
                Token::Close(tag) => {
                    // Pop back to the matching element; stray end tags are dropped
                    if let Some(pos) = stack
                        .iter()
                        .skip(1)
                        .rposition(|&n| self.tag(n) == Some(tag.as_str()))
                    {
                        stack.truncate(pos + 1);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Text(String),
    Open {
        tag: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
}

fn tokenize(markup: &str) -> Result<Vec<Token>, HtmlError> {
    let mut tokens = Vec::new();
    let mut rest = markup;
    let mut offset = 0;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("<!--") {
            let end = after
                .find("-->")
                .ok_or(HtmlError::UnterminatedComment(offset))?;
            let consumed = 4 + end + 3;
            rest = &rest[consumed..];
            offset += consumed;
            continue;
        }

        if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic() || c == '/') {
            let (token, consumed) = parse_tag(rest, offset)?;
            tokens.push(token);
            rest = &rest[consumed..];
            offset += consumed;
            continue;
        }

        // Text runs until the next tag-looking `<`
        let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        let end = rest[first..]
            .find('<')
            .map(|i| i + first)
            .unwrap_or(rest.len());
        let text = decode_entities(&rest[..end]);
        match tokens.last_mut() {
            Some(Token::Text(prev)) => prev.push_str(&text),
            _ => tokens.push(Token::Text(text)),
        }
        rest = &rest[end..];
        offset += end;
    }

    Ok(tokens)
}

/// Parse one tag starting at `<`; returns the token and bytes consumed
fn parse_tag(input: &str, offset: usize) -> Result<(Token, usize), HtmlError> {
    let bytes = input.as_bytes();
    let mut i = 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    let tag = input[name_start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i) {
            None => return Err(HtmlError::UnterminatedTag(offset)),
            Some(b'>') => {
                i += 1;
                break;
            }
            Some(b'/') => {
                self_closing = true;
                i += 1;
            }
            Some(_) => {
                let name_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                let name = input[name_start..i].to_ascii_lowercase();
                let mut value = String::new();
                if bytes.get(i) == Some(&b'=') {
                    i += 1;
                    match bytes.get(i) {
                        Some(&quote @ (b'"' | b'\'')) => {
                            let start = i + 1;
                            let len = input[start..]
                                .find(quote as char)
                                .ok_or(HtmlError::UnterminatedAttribute(offset + i))?;
                            value = decode_entities(&input[start..start + len]);
                            i = start + len + 1;
                        }
                        _ => {
                            let start = i;
                            while i < bytes.len()
                                && !bytes[i].is_ascii_whitespace()
                                && bytes[i] != b'>'
                            {
                                i += 1;
                            }
                            value = decode_entities(&input[start..i]);
                        }
                    }
                }
                attrs.push((name, value));
            }
        }
    }

    let token = if closing {
        Token::Close(tag)
    } else {
        Token::Open {
            tag,
            attrs,
            self_closing,
        }
    };
    Ok((token, i))
}

/// Decode the named references the editor emits plus numeric references
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi + 1))
        });

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

//! YAML parsing with source position tracking.
//!
//! Builds a [`YamlFile`] from YAML text by listening to yaml-rust2's marked
//! event stream. Every document of a multi-document stream is kept, and every
//! node records the character span, line and column it started at.
//!
//! # Example
//!
//! ```
//! use yamlnav::document::parser::parse_yaml;
//!
//! let file = parse_yaml("name: first\n---\nname: second\n").unwrap();
//! assert_eq!(file.documents().len(), 2);
//! assert_eq!(file.document(1).unwrap().scalar_property("name"), Some("second"));
//! ```

use super::node::{MappingEntry, Scalar, ScalarStyle, TextSpan, YamlNode, YamlValue};
use super::tree::YamlFile;
use anyhow::{Context, Result};
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parses YAML text (one or more documents) into a `YamlFile`.
///
/// # Errors
///
/// Returns an error if the text is not well-formed YAML.
pub fn parse_yaml(content: &str) -> Result<YamlFile> {
    parse_impl(content, None)
}

/// Like [`parse_yaml`], remembering the name of the file the text came from.
pub fn parse_yaml_named(content: &str, filename: &str) -> Result<YamlFile> {
    parse_impl(content, Some(filename))
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<YamlFile> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = DocumentBuilder::new(content);

    parser
        .load(&mut builder, true)
        .with_context(|| match filename {
            Some(name) => format!("Failed to parse YAML in {}", name),
            None => "Failed to parse YAML".to_string(),
        })?;

    log::debug!(
        "parsed {} document(s) from {}",
        builder.documents.len(),
        filename.unwrap_or("<input>")
    );

    Ok(YamlFile::new(
        builder.documents,
        content.to_string(),
        filename.map(str::to_string),
    ))
}

/// Where a child was written in the source. Differs from the node's own
/// span for aliases, whose node is a copy of the anchored one.
#[derive(Clone, Copy)]
struct Extent {
    start: usize,
    end: usize,
    line: usize,
    col: usize,
}

impl Extent {
    fn of(node: &YamlNode) -> Self {
        Self {
            start: node.span().start,
            end: node.span().end,
            line: node.line(),
            col: node.col(),
        }
    }
}

enum Children {
    Sequence(Vec<YamlNode>),
    Mapping {
        entries: Vec<MappingEntry>,
        pending_key: Option<YamlNode>,
    },
}

/// A container node whose children are still arriving.
struct Frame {
    start: Marker,
    anchor: usize,
    children: Children,
    first: Option<Extent>,
    last_end: Option<usize>,
}

impl Frame {
    fn new(start: Marker, anchor: usize, children: Children) -> Self {
        Self {
            start,
            anchor,
            children,
            first: None,
            last_end: None,
        }
    }
}

struct DocumentBuilder {
    source: Vec<char>,
    stack: Vec<Frame>,
    documents: Vec<YamlNode>,
    anchors: HashMap<usize, YamlNode>,
}

impl DocumentBuilder {
    fn new(content: &str) -> Self {
        Self {
            source: content.chars().collect(),
            stack: Vec::new(),
            documents: Vec::new(),
            anchors: HashMap::new(),
        }
    }

    fn push_complete(&mut self, node: YamlNode, extent: Extent) {
        let Some(frame) = self.stack.last_mut() else {
            self.documents.push(node);
            return;
        };
        frame.first.get_or_insert(extent);
        frame.last_end = Some(extent.end);
        match &mut frame.children {
            Children::Sequence(items) => items.push(node),
            Children::Mapping {
                entries,
                pending_key,
            } => match pending_key.take() {
                Some(key) => entries.push(MappingEntry::new(key, node)),
                None => *pending_key = Some(node),
            },
        }
    }

    fn remember_anchor(&mut self, anchor: usize, node: &YamlNode) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
    }

    /// Closes the innermost container; `end` is where its end event fired.
    ///
    /// A block mapping's start event fires after its first key, so the span
    /// starts at whichever comes first: the start marker or the first child.
    /// Block containers end with their last child, flow ones with their
    /// closing bracket.
    fn close_frame(&mut self, end: &Marker) {
        let Some(frame) = self.stack.pop() else {
            log::warn!("container end without a matching start at {}", end.index());
            return;
        };
        let value = match frame.children {
            Children::Sequence(items) => YamlValue::Sequence(items),
            Children::Mapping { entries, .. } => YamlValue::Mapping(entries),
        };

        let start = frame.start;
        let (span_start, line, col) = match frame.first {
            Some(first) if first.start < start.index() => (first.start, first.line, first.col),
            _ => (start.index(), start.line(), start.col() + 1),
        };
        let brackets = (self.source.get(start.index()), self.source.get(end.index()));
        let span_end = match brackets {
            (Some('['), Some(']')) | (Some('{'), Some('}')) => end.index() + 1,
            _ => frame.last_end.unwrap_or(span_start),
        };

        let node = YamlNode::with_position(
            value,
            TextSpan::new(span_start, span_end.max(span_start)),
            line,
            col,
        );
        self.remember_anchor(frame.anchor, &node);
        let extent = Extent::of(&node);
        self.push_complete(node, extent);
    }

    /// End of a scalar that starts at `start`, read back from the source.
    fn scalar_end(&self, start: usize, text: &str, style: ScalarStyle) -> usize {
        match style {
            ScalarStyle::DoubleQuoted => self.closing_quote(start, '"'),
            ScalarStyle::SingleQuoted => self.closing_quote(start, '\''),
            ScalarStyle::Literal | ScalarStyle::Folded => {
                // Content starts on the line after the `|` or `>` header.
                let body = self
                    .source
                    .get(start..)
                    .and_then(|rest| rest.iter().position(|&c| c == '\n'))
                    .map_or(self.source.len(), |i| start + i + 1);
                self.match_content(body, text).max(start + 1)
            }
            ScalarStyle::Plain => self.match_content(start, text),
        }
    }

    /// Index just past the quote closing a scalar opened at `start`.
    fn closing_quote(&self, start: usize, quote: char) -> usize {
        let mut i = start + 1;
        while i < self.source.len() {
            match self.source[i] {
                '\\' if quote == '"' => i += 2,
                '\'' if quote == '\'' && self.source.get(i + 1) == Some(&'\'') => i += 2,
                c if c == quote => return i + 1,
                _ => i += 1,
            }
        }
        self.source.len()
    }

    /// Walks the source from `from`, matching the non-blank characters of
    /// the decoded `text` in order. Line folding and indentation only change
    /// whitespace, so the last matched character ends the scalar.
    fn match_content(&self, from: usize, text: &str) -> usize {
        let mut pos = from;
        let mut end = from;
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            while pos < self.source.len()
                && self.source[pos] != c
                && self.source[pos].is_whitespace()
            {
                pos += 1;
            }
            if self.source.get(pos) != Some(&c) {
                break;
            }
            pos += 1;
            end = pos;
        }
        end
    }

    /// End of an `*alias` token starting at `start`.
    fn alias_end(&self, start: usize) -> usize {
        let name_len = self
            .source
            .iter()
            .skip(start + 1)
            .take_while(|&&c| !c.is_whitespace() && !matches!(c, ',' | ']' | '}'))
            .count();
        (start + 1 + name_len).min(self.source.len())
    }
}

impl MarkedEventReceiver for DocumentBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(text, style, anchor, _tag) => {
                let style = convert_style(style);
                let end = self.scalar_end(marker.index(), &text, style);
                let node = YamlNode::with_position(
                    YamlValue::Scalar(Scalar::new(text, style)),
                    TextSpan::new(marker.index(), end),
                    marker.line(),
                    marker.col() + 1,
                );
                self.remember_anchor(anchor, &node);
                let extent = Extent::of(&node);
                self.push_complete(node, extent);
            }
            Event::SequenceStart(anchor, _tag) => self.stack.push(Frame::new(
                marker,
                anchor,
                Children::Sequence(Vec::new()),
            )),
            Event::MappingStart(anchor, _tag) => self.stack.push(Frame::new(
                marker,
                anchor,
                Children::Mapping {
                    entries: Vec::new(),
                    pending_key: None,
                },
            )),
            Event::SequenceEnd | Event::MappingEnd => self.close_frame(&marker),
            Event::Alias(anchor) => {
                let extent = Extent {
                    start: marker.index(),
                    end: self.alias_end(marker.index()),
                    line: marker.line(),
                    col: marker.col() + 1,
                };
                // Aliases read as a copy of the anchored node; unknown anchors read as null.
                let node = match self.anchors.get(&anchor) {
                    Some(target) => target.clone(),
                    None => {
                        log::debug!("alias to unknown anchor id {}", anchor);
                        YamlNode::with_position(
                            YamlValue::Scalar(Scalar::plain("")),
                            TextSpan::new(extent.start, extent.end),
                            extent.line,
                            extent.col,
                        )
                    }
                };
                self.push_complete(node, extent);
            }
            _ => {}
        }
    }
}

fn convert_style(style: TScalarStyle) -> ScalarStyle {
    match style {
        TScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        TScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        TScalarStyle::Literal => ScalarStyle::Literal,
        TScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}

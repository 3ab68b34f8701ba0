use serde_json::Value;
use tracing::{debug, trace};

use crate::block::{Block, Span};
use crate::classify::{
    callout_kind, callout_title, heading_level, is_bullet, is_heading, is_hr, is_numbered,
    strip_bullet, strip_heading, strip_numbered,
};
use crate::inline::format_inline;
use crate::normalize::{normalize, normalize_value};

/// Text of the single block produced for empty input.
pub const NO_CONTENT: &str = "No content available";

/// Paragraphs ending in `:` up to this many characters are labels.
const LABEL_MAX_CHARS: usize = 80;

/// Parse text into a list of blocks. Never empty.
pub fn parse(text: &str) -> Vec<Block> {
    parse_normalized(&normalize(text))
}

/// Parse an arbitrary JSON payload into a list of blocks. Never empty.
pub fn parse_value(value: &Value) -> Vec<Block> {
    parse_normalized(&normalize_value(value))
}

fn parse_normalized(text: &str) -> Vec<Block> {
    if text.is_empty() {
        debug!("no content, emitting placeholder");
        return vec![Block::Paragraph {
            content: vec![Span::Text(NO_CONTENT.to_string())],
            is_label: false,
        }];
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let blocks = segment(&lines, true);
    debug!(lines = lines.len(), blocks = blocks.len(), "segmented text");
    blocks
}

/// Group lines into blocks. Callout bodies recurse with `callouts` off, so
/// callouts never nest.
fn segment(lines: &[&str], callouts: bool) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }

        let kind = if callouts { callout_kind(line) } else { None };

        if let Some(kind) = kind {
            let (body, next) = collect_callout_body(lines, i + 1);
            trace!(kind = kind.as_str(), start = i, end = next, "callout");
            blocks.push(Block::Callout {
                kind,
                title: callout_title(line),
                body: segment(&body, false),
            });
            i = next;
        } else if let Some(level) = heading_level(line) {
            blocks.push(Block::Heading {
                level,
                content: format_inline(strip_heading(line)),
            });
            i += 1;
        } else if is_hr(line) {
            blocks.push(Block::Rule);
            i += 1;
        } else if is_bullet(line) {
            let (items, next) = collect_items(lines, i, callouts, is_bullet, strip_bullet);
            if !items.is_empty() {
                blocks.push(Block::BulletList { items });
            }
            i = next;
        } else if is_numbered(line) {
            let (items, next) = collect_items(lines, i, callouts, is_numbered, strip_numbered);
            if !items.is_empty() {
                blocks.push(Block::NumberedList { items });
            }
            i = next;
        } else {
            let (text, next) = collect_paragraph(lines, i, callouts);
            let is_label = text.ends_with(':') && text.chars().count() <= LABEL_MAX_CHARS;
            blocks.push(Block::Paragraph {
                content: format_inline(&text),
                is_label,
            });
            i = next;
        }
    }

    blocks
}

/// Lines belonging to a callout opened on the line before `start`.
///
/// Stops at a rule, heading, another callout marker or two blank lines. A
/// single blank line is kept when nothing has been collected yet or a list
/// item follows it; otherwise it closes the callout.
fn collect_callout_body<'a>(lines: &[&'a str], start: usize) -> (Vec<&'a str>, usize) {
    let mut body = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            match lines.get(i + 1).map(|next| next.trim()) {
                None => return (body, i + 1),
                Some("") => return (body, i + 2),
                Some(next) if body.is_empty() || is_bullet(next) || is_numbered(next) => {
                    body.push("");
                    i += 1;
                    continue;
                }
                Some(_) => return (body, i + 1),
            }
        }

        if is_hr(line) || is_heading(line) || callout_kind(line).is_some() {
            break;
        }
        body.push(lines[i]);
        i += 1;
    }

    (body, i)
}

/// Consecutive list lines starting at `start`, markers stripped and inline
/// formatted. Empty items are dropped.
fn collect_items(
    lines: &[&str],
    start: usize,
    callouts: bool,
    is_item: fn(&str) -> bool,
    strip: fn(&str) -> &str,
) -> (Vec<Vec<Span>>, usize) {
    let mut items = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let line = lines[i].trim();
        if !is_item(line) || (callouts && callout_kind(line).is_some()) {
            break;
        }
        let item = strip(line);
        if !item.is_empty() {
            items.push(format_inline(item));
        }
        i += 1;
    }

    (items, i)
}

/// Join the paragraph starting at `start` with its continuation lines.
fn collect_paragraph(lines: &[&str], start: usize, callouts: bool) -> (String, usize) {
    let mut parts = vec![lines[start].trim()];
    let mut i = start + 1;

    while i < lines.len() {
        let peek = lines[i].trim();
        if peek.is_empty()
            || is_heading(peek)
            || is_hr(peek)
            || is_bullet(peek)
            || is_numbered(peek)
            || (callouts && callout_kind(peek).is_some())
        {
            break;
        }
        parts.push(peek);
        i += 1;
    }

    (parts.join(" "), i)
}

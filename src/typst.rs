use crate::block::{Block, Span};
use crate::config::Config;

/// Lists up to this many items are kept on one page.
const UNBREAKABLE_LIST_ITEMS: usize = 5;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = preamble(config);

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Heading { .. } => {
                // Keep heading with following content using a block that prevents breaks
                out.push_str("#block(breakable: false)[\n");
                emit_heading(block, &mut out);

                // Include the next block if it exists (to keep heading with first content)
                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], config, &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, config, &mut out);
            }
        }

        i += 1;
    }

    out
}

fn preamble(config: &Config) -> String {
    // Set up paragraph settings to prevent widows/orphans
    let mut out = String::from("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    if !config.links.color.is_empty() {
        out.push_str(&format!(
            "#show link: set text(fill: rgb(\"{}\"))\n",
            string_literal(&config.links.color)
        ));
    }
    if config.links.underline {
        out.push_str("#show link: underline\n");
    }
    out.push('\n');
    out
}

fn emit_heading(block: &Block, out: &mut String) {
    if let Block::Heading { level, content } = block {
        for _ in 0..*level {
            out.push('=');
        }
        out.push(' ');
        spans_to_typst(content, out);
        out.push('\n');
        out.push('\n');
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { .. } => {
            emit_heading(block, out);
        }
        Block::Paragraph { content, is_label } => {
            if *is_label {
                out.push_str("#strong[");
                spans_to_typst(content, out);
                out.push(']');
            } else {
                line_to_typst(content, out);
            }
            out.push('\n');
            out.push('\n');
        }
        Block::BulletList { items } => emit_list(items, false, out),
        Block::NumberedList { items } => emit_list(items, true, out),
        Block::Rule => {
            out.push_str("#line(length: 100%)\n\n");
        }
        Block::Callout { kind, title, body } => {
            let style = config.callout_style(kind.as_str());
            let accent = string_literal(&style.accent);
            out.push_str(&format!(
                "#block(fill: rgb(\"{}\"), stroke: (left: 3pt + rgb(\"{accent}\")), inset: 10pt, radius: 4pt, width: 100%, breakable: false)[\n",
                string_literal(&style.background),
            ));
            out.push_str(&format!(
                "#text(fill: rgb(\"{accent}\"), weight: \"bold\")[{} ",
                escape_text(&style.icon)
            ));
            out.push_str(&escape_text(title));
            out.push_str("]\n\n");
            for inner in body {
                emit_block(inner, config, out);
            }
            out.push_str("]\n\n");
        }
    }
}

fn emit_list(items: &[Vec<Span>], ordered: bool, out: &mut String) {
    // Wrap list to keep together when small, allow breaks when large
    if items.len() <= UNBREAKABLE_LIST_ITEMS {
        out.push_str("#block(breakable: false)[\n");
        list_to_typst(items, ordered, out);
        out.push_str("]\n\n");
    } else {
        list_to_typst(items, ordered, out);
        out.push('\n');
    }
}

fn list_to_typst(items: &[Vec<Span>], ordered: bool, out: &mut String) {
    let prefix = if ordered { "+" } else { "-" };

    for item in items {
        out.push_str(prefix);
        out.push(' ');
        line_to_typst(item, out);
        out.push('\n');
    }
}

/// Spans at the start of a line, where Typst would read `=`, `-` or `+` as
/// structure.
fn line_to_typst(spans: &[Span], out: &mut String) {
    let mut line = String::new();
    spans_to_typst(spans, &mut line);

    if line.starts_with(['=', '-', '+']) {
        out.push('\\');
    }
    out.push_str(&line);
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_typst(span, out);
    }
}

fn span_to_typst(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => out.push_str(&escape_text(text)),
        Span::Bold(text) => {
            out.push('*');
            out.push_str(&escape_text(text));
            out.push('*');
        }
        Span::Italic(text) => {
            out.push('_');
            out.push_str(&escape_text(text));
            out.push('_');
        }
        Span::Code(text) => {
            out.push('`');
            // Inside raw/code, backticks need special handling
            out.push_str(&text.replace('`', "\\`"));
            out.push('`');
        }
        Span::Link { label, url } => {
            out.push_str("#link(\"");
            out.push_str(&string_literal(url));
            out.push_str("\")[");
            spans_to_typst(label, out);
            out.push(']');
        }
    }
}

/// Escape special Typst characters in markup text.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            // `//` and `/*` open comments
            '/' if matches!(chars.peek(), Some('/' | '*')) => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for use inside a Typst string literal.
fn string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { label: Vec<Span>, url: String },
}

impl Span {
    /// The characters a reader sees, with markup delimiters removed.
    pub fn visible_text(&self) -> String {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => {
                text.clone()
            }
            Span::Link { label, .. } => visible_text(label),
        }
    }
}

/// Concatenated visible text of a span sequence.
pub fn visible_text(spans: &[Span]) -> String {
    spans.iter().map(Span::visible_text).collect()
}

/// The four kinds of highlighted aside box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    Disclaimer,
    Warning,
    Important,
    Note,
}

impl CalloutKind {
    pub const ALL: [CalloutKind; 4] = [
        CalloutKind::Disclaimer,
        CalloutKind::Warning,
        CalloutKind::Important,
        CalloutKind::Note,
    ];

    /// Lower-case keyword, also used as the style table key.
    pub fn as_str(self) -> &'static str {
        match self {
            CalloutKind::Disclaimer => "disclaimer",
            CalloutKind::Warning => "warning",
            CalloutKind::Important => "important",
            CalloutKind::Note => "note",
        }
    }
}

/// Block-level elements segmented from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Rule,
    BulletList {
        items: Vec<Vec<Span>>,
    },
    NumberedList {
        items: Vec<Vec<Span>>,
    },
    Paragraph {
        content: Vec<Span>,
        /// Short line ending in a colon; rendered as a label.
        is_label: bool,
    },
    Callout {
        kind: CalloutKind,
        title: String,
        /// Never contains another callout.
        body: Vec<Block>,
    },
}

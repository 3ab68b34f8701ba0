//! Inline tokenizer: links first, then emphasis on whatever text is left.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::block::Span;

/// `[label](target)` or a bare `http(s)://` URL running up to whitespace.
/// The target may hold one level of balanced parentheses.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]+)\]\(((?:[^()\s]|\([^()\s]*\))+)\)|https?://\S+").unwrap()
});

/// Alternation order is the priority: code, bold, italic `*`, italic `_`.
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]+`|\*\*[^*]+\*\*|\*[^*]+\*|_[^_]+_").unwrap());

const TRAILING_PUNCT: &[char] = &[')', ',', '.', ';', ':', '!', '?', ']'];

const LABEL_MAX_CHARS: usize = 60;

/// Tokenize a block's text into spans.
pub fn format_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    // Plain text waiting for the emphasis pass. Rejected links and trimmed
    // URL punctuation accumulate here so they merge with neighbouring text.
    let mut pending = String::new();
    let mut last = 0;

    for caps in LINK.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        pending.push_str(&text[last..whole.start()]);
        last = whole.end();

        if let (Some(label), Some(target)) = (caps.get(1), caps.get(2)) {
            if is_safe_url(target.as_str()) {
                flush(&mut pending, &mut spans);
                spans.push(Span::Link {
                    label: format_emphasis(label.as_str()),
                    url: target.as_str().to_string(),
                });
            } else {
                pending.push_str(whole.as_str());
            }
            continue;
        }

        let (target, trailing) = split_trailing_punct(whole.as_str());
        if is_safe_url(target) {
            flush(&mut pending, &mut spans);
            spans.push(Span::Link {
                label: vec![Span::Text(display_label(target))],
                url: target.to_string(),
            });
            pending.push_str(trailing);
        } else {
            pending.push_str(whole.as_str());
        }
    }

    pending.push_str(&text[last..]);
    flush(&mut pending, &mut spans);
    spans
}

fn flush(pending: &mut String, spans: &mut Vec<Span>) {
    if !pending.is_empty() {
        spans.extend(format_emphasis(pending));
        pending.clear();
    }
}

/// Split text on code, bold and italic markers. Unmatched text stays plain.
pub fn format_emphasis(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in EMPHASIS.find_iter(text) {
        if m.start() > last {
            spans.push(Span::Text(text[last..m.start()].to_string()));
        }
        spans.push(emphasis_span(m.as_str()));
        last = m.end();
    }

    if last < text.len() {
        spans.push(Span::Text(text[last..].to_string()));
    }
    spans
}

fn emphasis_span(token: &str) -> Span {
    let inner = |delim: &str| {
        token
            .strip_prefix(delim)
            .and_then(|rest| rest.strip_suffix(delim))
            .map(str::to_string)
    };

    if let Some(code) = inner("`") {
        Span::Code(code)
    } else if let Some(bold) = inner("**") {
        Span::Bold(bold)
    } else if let Some(italic) = inner("*").or_else(|| inner("_")) {
        Span::Italic(italic)
    } else {
        Span::Text(token.to_string())
    }
}

fn is_safe_url(url: &str) -> bool {
    ["http://", "https://"]
        .into_iter()
        .any(|scheme| url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

/// Separate trailing sentence punctuation from a bare URL.
fn split_trailing_punct(raw: &str) -> (&str, &str) {
    let core = raw.trim_end_matches(TRAILING_PUNCT);
    (core, &raw[core.len()..])
}

/// Host plus path for a bare URL, shortened for display.
fn display_label(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };
    let Some(host) = url.host_str() else {
        return raw.to_string();
    };
    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let label = match url.path() {
        "/" | "" => host,
        path => format!("{host}{path}"),
    };

    if label.chars().count() <= LABEL_MAX_CHARS {
        return label;
    }
    let mut short: String = label.chars().take(LABEL_MAX_CHARS - 3).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::visible_text;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Span {
        Span::Text(s.to_string())
    }

    fn bare_link(label: &str, url: &str) -> Span {
        Span::Link {
            label: vec![text(label)],
            url: url.to_string(),
        }
    }

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(format_inline("just words"), vec![text("just words")]);
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert_eq!(format_inline(""), Vec::<Span>::new());
    }

    #[test]
    fn bold_italic_and_code_in_order() {
        assert_eq!(
            format_inline("**bold** and *italic* and `code`"),
            vec![
                Span::Bold("bold".into()),
                text(" and "),
                Span::Italic("italic".into()),
                text(" and "),
                Span::Code("code".into()),
            ]
        );
    }

    #[test]
    fn underscore_italic() {
        assert_eq!(
            format_inline("take _with_ food"),
            vec![text("take "), Span::Italic("with".into()), text(" food")]
        );
    }

    #[test]
    fn code_wins_over_emphasis_inside_it() {
        assert_eq!(
            format_inline("`a*b*c` done"),
            vec![Span::Code("a*b*c".into()), text(" done")]
        );
    }

    #[test]
    fn unterminated_markers_stay_plain() {
        assert_eq!(
            format_inline("**open and `tick"),
            vec![text("**open and `tick")]
        );
    }

    #[test]
    fn bare_url_trailing_punctuation_becomes_text() {
        assert_eq!(
            format_inline("See https://example.com/a/b), thanks"),
            vec![
                text("See "),
                bare_link("example.com/a/b", "https://example.com/a/b"),
                text("), thanks"),
            ]
        );
    }

    #[test]
    fn bare_url_at_root_shows_host_only() {
        assert_eq!(
            format_inline("Visit https://example.com/."),
            vec![
                text("Visit "),
                bare_link("example.com", "https://example.com/"),
                text("."),
            ]
        );
    }

    #[test]
    fn bare_url_label_is_truncated() {
        let url = format!("https://example.com/{}", "a".repeat(80));
        let spans = format_inline(&url);
        let Span::Link { label, url: target } = &spans[0] else {
            panic!("expected link, got {spans:?}");
        };
        assert_eq!(target, &url);
        let shown = visible_text(label);
        assert_eq!(shown.chars().count(), 60);
        assert!(shown.starts_with("example.com/aaa"));
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn bare_url_underscores_are_not_italic() {
        assert_eq!(
            format_inline("https://a.org/x_y_z"),
            vec![bare_link("a.org/x_y_z", "https://a.org/x_y_z")]
        );
    }

    #[test]
    fn markdown_link_label_gets_emphasis() {
        assert_eq!(
            format_inline("Read [**the** guide](https://example.org/guide) now"),
            vec![
                text("Read "),
                Span::Link {
                    label: vec![Span::Bold("the".into()), text(" guide")],
                    url: "https://example.org/guide".into(),
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn markdown_link_target_keeps_balanced_parens() {
        assert_eq!(
            format_inline("See [wiki](https://en.wikipedia.org/wiki/Foo_(bar)) first"),
            vec![
                text("See "),
                Span::Link {
                    label: vec![text("wiki")],
                    url: "https://en.wikipedia.org/wiki/Foo_(bar)".into(),
                },
                text(" first"),
            ]
        );
    }

    #[test]
    fn bare_url_label_keeps_explicit_port() {
        assert_eq!(
            format_inline("https://a.com:8080/x and https://b.com:443/y"),
            vec![
                bare_link("a.com:8080/x", "https://a.com:8080/x"),
                text(" and "),
                bare_link("b.com/y", "https://b.com:443/y"),
            ]
        );
    }

    #[test]
    fn unsafe_markdown_link_passes_through() {
        assert_eq!(
            format_inline("[click](javascript:alert(1)) *now*"),
            vec![
                text("[click](javascript:alert(1)) "),
                Span::Italic("now".into()),
            ]
        );
    }

    #[test]
    fn scheme_only_is_not_a_link() {
        assert_eq!(format_inline("try https://."), vec![text("try https://.")]);
    }

    #[test]
    fn visible_text_drops_only_delimiters() {
        let source = "Take **two** tablets _after_ meals, see `dose.txt` or *ask*.";
        let spans = format_inline(source);
        assert_eq!(
            visible_text(&spans),
            "Take two tablets after meals, see dose.txt or ask."
        );
    }
}

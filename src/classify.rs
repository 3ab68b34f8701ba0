//! Single-line predicates and marker stripping.
//!
//! Every function takes one line of text; callers trim it first where the
//! segmenter does. No predicate looks at neighbouring lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::CalloutKind;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+").unwrap());
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+").unwrap());
/// Any run of heading, bullet, number and quote markers at the line start.
static STRUCTURAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:#{1,6}|[-*•]|\d+[.)])\s+|>\s*)*").unwrap()
});

pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

pub fn is_bullet(line: &str) -> bool {
    BULLET.is_match(line)
}

pub fn is_numbered(line: &str) -> bool {
    NUMBERED.is_match(line)
}

pub fn is_hr(line: &str) -> bool {
    matches!(line.trim(), "---" | "***" | "___")
}

/// Number of leading `#` for a heading line, `None` otherwise.
pub fn heading_level(line: &str) -> Option<u8> {
    HEADING.captures(line).map(|caps| caps[1].len() as u8)
}

pub fn strip_heading(line: &str) -> &str {
    strip_match(&HEADING, line)
}

pub fn strip_bullet(line: &str) -> &str {
    strip_match(&BULLET, line)
}

pub fn strip_numbered(line: &str) -> &str {
    strip_match(&NUMBERED, line)
}

fn strip_match<'a>(re: &Regex, line: &'a str) -> &'a str {
    match re.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// Detect a callout keyword line such as `**Warning:**` or `## Important notes`.
///
/// `disclaimer` must match exactly; the other keywords also match as a prefix.
pub fn callout_kind(line: &str) -> Option<CalloutKind> {
    let keyword = callout_title(line).to_lowercase();
    if keyword.is_empty() {
        return None;
    }
    if keyword == "disclaimer" {
        return Some(CalloutKind::Disclaimer);
    }
    [
        CalloutKind::Warning,
        CalloutKind::Important,
        CalloutKind::Note,
    ]
    .into_iter()
    .find(|kind| keyword.starts_with(kind.as_str()))
}

/// The semantic text of a callout marker line: structural prefixes and
/// emphasis markers removed, trailing colon dropped, case preserved.
pub fn callout_title(line: &str) -> String {
    let rest = match STRUCTURAL_PREFIX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    };
    let cleaned: String = rest
        .chars()
        .filter(|c| !matches!(c, '*' | '_' | '`'))
        .collect();
    cleaned.trim().trim_end_matches(':').trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some(1))]
    #[case("### Three", Some(3))]
    #[case("###### Six", Some(6))]
    #[case("####### Seven", None)]
    #[case("#NoSpace", None)]
    #[case("#", None)]
    fn heading_levels(#[case] line: &str, #[case] expected: Option<u8>) {
        assert_eq!(heading_level(line), expected);
        assert_eq!(is_heading(line), expected.is_some());
    }

    #[test]
    fn strips_heading_marker() {
        assert_eq!(strip_heading("##   Results  "), "Results");
    }

    #[rstest]
    #[case("---", true)]
    #[case("  ***  ", true)]
    #[case("___", true)]
    #[case("----", false)]
    #[case("- - -", false)]
    fn horizontal_rules(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_hr(line), expected);
    }

    #[rstest]
    #[case("- item", true)]
    #[case("* item", true)]
    #[case("• item", true)]
    #[case("   - indented", true)]
    #[case("-item", false)]
    #[case("**bold** start", false)]
    #[case("---", false)]
    fn bullets(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_bullet(line), expected);
    }

    #[rstest]
    #[case("1. first", true)]
    #[case("12) twelfth", true)]
    #[case("  3. indented", true)]
    #[case("1.5 mg daily", false)]
    #[case("2024.", false)]
    fn numbered(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_numbered(line), expected);
    }

    #[test]
    fn strips_list_markers() {
        assert_eq!(strip_bullet("  •  Drink water "), "Drink water");
        assert_eq!(strip_numbered("10)  Rest"), "Rest");
    }

    #[rstest]
    #[case("Disclaimer", Some(CalloutKind::Disclaimer))]
    #[case("**Disclaimer:**", Some(CalloutKind::Disclaimer))]
    #[case("Disclaimer: not advice", None)]
    #[case("Warning", Some(CalloutKind::Warning))]
    #[case("WARNING: high dose", Some(CalloutKind::Warning))]
    #[case("## Important Notes", Some(CalloutKind::Important))]
    #[case("- _Note_:", Some(CalloutKind::Note))]
    #[case("> Notes", Some(CalloutKind::Note))]
    #[case("1. Note", Some(CalloutKind::Note))]
    #[case("Nothing to note", None)]
    #[case("Some text", None)]
    #[case("**", None)]
    fn callout_keywords(#[case] line: &str, #[case] expected: Option<CalloutKind>) {
        assert_eq!(callout_kind(line), expected);
    }

    #[test]
    fn callout_title_keeps_case() {
        assert_eq!(callout_title("### **Important Notes:**"), "Important Notes");
        assert_eq!(callout_title("Warning"), "Warning");
    }
}

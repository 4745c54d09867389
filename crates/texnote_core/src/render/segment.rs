//! Two-pass math segmentation.
//!
//! Display spans (`\[...\]`, `$$...$$`) are claimed over the whole buffer
//! first; inline `$...$` spans are only looked for inside the plain-text
//! gaps left between them.

use once_cell::sync::Lazy;
use regex::Regex;

/// `\[...\]` or `$$...$$`, non-greedy, may span lines.
static DISPLAY_MATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\\[.*?\\\]|\$\$.*?\$\$").expect("valid display math regex")
});
/// `$...$`, non-greedy, single line.
static INLINE_MATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$.*?\$").expect("valid inline math regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    PlainText,
    DisplayMath,
    InlineMath,
}

/// Contiguous slice of the source buffer with its classification.
///
/// Math segments keep their delimiters so that concatenating `text` of all
/// segments gives back the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            kind: SegmentKind::PlainText,
        }
    }

    /// Expression text with the delimiter pair removed.
    ///
    /// Plain text is returned unchanged.
    pub fn math_source(&self) -> &'a str {
        let stripped = match self.kind {
            SegmentKind::PlainText => None,
            SegmentKind::DisplayMath => strip_pair(self.text, r"\[", r"\]")
                .or_else(|| strip_pair(self.text, "$$", "$$")),
            SegmentKind::InlineMath => strip_pair(self.text, "$", "$"),
        };
        stripped.unwrap_or(self.text)
    }
}

fn strip_pair<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    if text.len() < open.len() + close.len() {
        return None;
    }
    text.strip_prefix(open)?.strip_suffix(close)
}

/// First pass: splits `content` into display-math and plain-text segments.
pub fn split_display_math(content: &str) -> Vec<Segment<'_>> {
    split_by(content, &DISPLAY_MATH_RE, SegmentKind::DisplayMath)
}

/// Second pass: splits one plain-text run into inline-math and plain-text
/// segments. An unmatched `$` stays in the plain text.
pub fn split_inline_math(text: &str) -> Vec<Segment<'_>> {
    split_by(text, &INLINE_MATH_RE, SegmentKind::InlineMath)
}

/// Both passes, flattened in source order.
pub fn segments(content: &str) -> Vec<Segment<'_>> {
    split_display_math(content)
        .into_iter()
        .flat_map(|segment| match segment.kind {
            SegmentKind::PlainText => split_inline_math(segment.text),
            _ => vec![segment],
        })
        .collect()
}

fn split_by<'a>(text: &'a str, pattern: &Regex, kind: SegmentKind) -> Vec<Segment<'a>> {
    let mut parts = Vec::new();
    let mut last_end = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last_end {
            parts.push(Segment::plain(&text[last_end..found.start()]));
        }
        parts.push(Segment {
            text: found.as_str(),
            kind,
        });
        last_end = found.end();
    }
    if last_end < text.len() {
        parts.push(Segment::plain(&text[last_end..]));
    }
    parts
}

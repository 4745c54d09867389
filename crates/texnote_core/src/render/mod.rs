//! LaTeX preview rendering.
//!
//! # Responsibility
//! - Segment raw note text into plain text, display math and inline math.
//! - Typeset each math segment and reassemble the fragment in source order.
//!
//! # Invariants
//! - Rendering never fails as a whole; a bad expression degrades to an
//!   error span covering only that expression.
//! - No segment is dropped, reordered or merged with a neighbor.
//! - Empty input renders to an empty string.

pub mod markup;
pub mod math;
pub mod segment;

use log::warn;

pub use math::{MathError, MathLayout, MathMlTypesetter, MathTypesetter};
pub use segment::{segments, split_display_math, split_inline_math, Segment, SegmentKind};

/// Renders `content` with the default MathML engine.
pub fn render(content: &str) -> String {
    Renderer::new().render(content)
}

/// Preview renderer over a pluggable typesetting engine.
#[derive(Debug, Clone, Default)]
pub struct Renderer<T = MathMlTypesetter> {
    typesetter: T,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: MathTypesetter> Renderer<T> {
    pub fn with_typesetter(typesetter: T) -> Self {
        Self { typesetter }
    }

    /// Renders the whole buffer to fragment markup.
    pub fn render(&self, content: &str) -> String {
        self.render_parts(content)
            .into_iter()
            .map(|part| match part {
                Ok(markup) => markup,
                Err(err) => {
                    warn!(
                        "event=math_render module=render status=error layout={} expr_len={}",
                        err.layout.as_str(),
                        err.expression.len()
                    );
                    markup::error_span(&err.expression)
                }
            })
            .collect()
    }

    /// Per-piece results in source order; plain text pieces are always `Ok`.
    pub fn render_parts(&self, content: &str) -> Vec<Result<String, MathError>> {
        segments(content)
            .iter()
            .map(|segment| self.render_segment(segment))
            .collect()
    }

    fn render_segment(&self, segment: &Segment<'_>) -> Result<String, MathError> {
        let layout = match segment.kind {
            SegmentKind::PlainText => return Ok(markup::text_with_line_breaks(segment.text)),
            SegmentKind::DisplayMath => MathLayout::Display,
            SegmentKind::InlineMath => MathLayout::Inline,
        };
        self.typesetter.typeset(segment.math_source(), layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wraps expressions in a tag naming the layout; rejects anything with `bad`.
    struct TagTypesetter;

    impl MathTypesetter for TagTypesetter {
        fn typeset(&self, expression: &str, layout: MathLayout) -> Result<String, MathError> {
            if expression.contains("bad") {
                return Err(MathError::new(expression, layout, "rejected"));
            }
            Ok(format!("<{0}>{expression}</{0}>", layout.as_str()))
        }
    }

    fn tagged(content: &str) -> String {
        Renderer::with_typesetter(TagTypesetter).render(content)
    }

    #[test]
    fn reassembles_pieces_in_source_order() {
        assert_eq!(
            tagged("$a$ $$b$$ $c$"),
            "<inline>a</inline> <display>b</display> <inline>c</inline>"
        );
        assert_eq!(
            tagged("see \\[x+1\\]\nthen $y$\nend"),
            "see <display>x+1</display><br/>then <inline>y</inline><br/>end"
        );
    }

    #[test]
    fn failure_is_isolated_to_its_expression() {
        let out = tagged("$ok$ $bad$ $$fine$$");
        assert!(out.starts_with("<inline>ok</inline> "));
        assert!(out.contains(r#"<span class="math-error" style="color: red;">Error: bad</span>"#));
        assert!(out.ends_with("<display>fine</display>"));

        let parts = Renderer::with_typesetter(TagTypesetter).render_parts("$ok$ $bad$ $$fine$$");
        assert_eq!(parts.len(), 5);
        assert!(parts[2].is_err());
        assert!(parts[4].is_ok());
    }

    #[test]
    fn non_math_text_only_gains_line_breaks() {
        assert_eq!(tagged("line one\nline two"), "line one<br/>line two");
        assert_eq!(tagged(""), "");
    }

    #[test]
    fn unmatched_dollar_is_emitted_as_text() {
        assert_eq!(tagged("price: $5"), "price: $5");
    }
}

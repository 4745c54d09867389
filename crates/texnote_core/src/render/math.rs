//! Math typesetting seam and the default MathML engine.

use pulldown_latex::{
    config::DisplayMode, config::RenderConfig, mathml::push_mathml, Parser, Storage,
};
use thiserror::Error;

/// Block or inline layout for one expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathLayout {
    Display,
    Inline,
}

impl MathLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Inline => "inline",
        }
    }
}

/// One expression the engine could not typeset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot typeset {} math `{expression}`: {message}", layout.as_str())]
pub struct MathError {
    pub expression: String,
    pub layout: MathLayout,
    pub message: String,
}

impl MathError {
    pub fn new(expression: &str, layout: MathLayout, message: impl Into<String>) -> Self {
        Self {
            expression: expression.to_string(),
            layout,
            message: message.into(),
        }
    }
}

/// Converts one delimiter-free expression into presentational markup.
///
/// Implementations must not panic on malformed input; they report it as
/// `MathError` instead.
pub trait MathTypesetter {
    fn typeset(&self, expression: &str, layout: MathLayout) -> Result<String, MathError>;
}

/// `pulldown-latex` backed engine producing MathML.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathMlTypesetter;

impl MathTypesetter for MathMlTypesetter {
    fn typeset(&self, expression: &str, layout: MathLayout) -> Result<String, MathError> {
        let storage = Storage::new();
        let parser = Parser::new(expression, &storage);
        let config = RenderConfig {
            display_mode: match layout {
                MathLayout::Display => DisplayMode::Block,
                MathLayout::Inline => DisplayMode::Inline,
            },
            ..Default::default()
        };

        let events: Vec<_> = parser.collect();
        let errors: Vec<String> = events
            .iter()
            .filter_map(|event| event.as_ref().err().map(|err| err.to_string()))
            .collect();
        if !errors.is_empty() {
            return Err(MathError::new(expression, layout, errors.join("; ")));
        }

        let mut mathml = String::new();
        push_mathml(&mut mathml, events.into_iter(), config)
            .map_err(|err| MathError::new(expression, layout, err.to_string()))?;
        Ok(mathml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typesets_inline_and_display_layouts() {
        let inline = MathMlTypesetter.typeset("x^2", MathLayout::Inline).unwrap();
        assert!(inline.contains("<math"));

        let display = MathMlTypesetter
            .typeset(r"\frac{a}{b}", MathLayout::Display)
            .unwrap();
        assert!(display.contains("<mfrac"));
    }

    #[test]
    fn unbalanced_group_is_reported_not_panicked() {
        let err = MathMlTypesetter
            .typeset(r"\frac{1}{", MathLayout::Inline)
            .unwrap_err();
        assert_eq!(err.expression, r"\frac{1}{");
        assert_eq!(err.layout, MathLayout::Inline);
        assert!(!err.message.is_empty());
    }
}

//! Toolbar symbol palette for math, physics and chemistry notation.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolTab {
    Math,
    Physics,
    Chemistry,
}

impl SymbolTab {
    pub const ALL: [SymbolTab; 3] = [Self::Math, Self::Physics, Self::Chemistry];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
        }
    }

    /// Case-insensitive lookup by tab name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Whether a symbol is a bare token or a template with placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    InlineSymbol,
    Structure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Button face.
    pub label: &'static str,
    /// Text inserted into the buffer.
    pub latex: &'static str,
    pub kind: SymbolKind,
}

const fn sym(label: &'static str, latex: &'static str) -> Symbol {
    Symbol {
        label,
        latex,
        kind: SymbolKind::InlineSymbol,
    }
}

const fn structure(label: &'static str, latex: &'static str) -> Symbol {
    Symbol {
        label,
        latex,
        kind: SymbolKind::Structure,
    }
}

const MATH: &[Symbol] = &[
    sym("α", r"\alpha"),
    sym("β", r"\beta"),
    sym("γ", r"\gamma"),
    sym("θ", r"\theta"),
    sym("π", r"\pi"),
    sym("°", r"\degree"),
    sym("∞", r"\infty"),
    sym("=", "="),
    sym("+", "+"),
    sym("−", "-"),
    sym("×", r"\times"),
    sym("÷", r"\div"),
    sym("⊂", r"\subset"),
    sym("∈", r"\in"),
    sym("∉", r"\notin"),
    sym("∂", r"\partial"),
    sym("…", r"\dots"),
    structure("∑", r"\sum"),
    structure("∫", r"\int"),
    structure("a⁄b", r"\frac{}{}"),
    structure("√", r"\sqrt{}"),
    structure("lim", r"\lim"),
    structure("→", r"\vec{}"),
    structure("( )", "()"),
    structure("[ ]", "[]"),
    structure("{ }", "{}"),
    structure("|x|", "|{}|"),
    structure("‖x‖", r"\|{} \|"),
];

const PHYSICS: &[Symbol] = &[
    sym("Δ", r"\Delta"),
    sym("λ", r"\lambda"),
    sym("μ", r"\mu"),
    sym("σ", r"\sigma"),
    sym("Ω", r"\Omega"),
    sym("𝐅", "F"),
    sym("𝑚", "m"),
    sym("𝑎", "a"),
    sym("𝑣", "v"),
    sym("𝑡", "t"),
    sym("𝐄", "E"),
    sym("𝐏", "P"),
    sym("𝐖", "W"),
    sym("ℎ", "h"),
    sym("𝐆", "G"),
    sym("𝑐", "c"),
    sym("𝑅", "R"),
    sym("𝐈", "I"),
    sym("𝐕", "V"),
    sym("⋅", r"\cdot"),
    sym("×", r"\times"),
    sym("→", r"\rightarrow"),
    structure("→⃗", r"\vec{}"),
    structure("xₐ", "{}_{}"),
    structure("xᵃ", "{}^{}"),
];

const CHEMISTRY: &[Symbol] = &[
    sym("→", r"\rightarrow"),
    sym("⇌", r"\rightleftharpoons"),
    structure("⟶", r"\xrightarrow{}"),
    sym("⇄", r"\rightleftarrows"),
    sym("(s)", "(s)"),
    sym("(l)", "(l)"),
    sym("(g)", "(g)"),
    sym("(aq)", "(aq)"),
    sym("ΔH", r"\Delta H"),
    sym("ΔG", r"\Delta G"),
    sym("ΔS", r"\Delta S"),
    sym("±", r"\pm"),
    sym("≈", r"\approx"),
    sym("°", r"^\circ"),
    structure("x⁺", "{}^{}"),
    structure("H₂O", "{}_{}"),
    sym("α", r"\alpha"),
    sym("β", r"\beta"),
    sym("γ", r"\gamma"),
];

/// Symbols shown on `tab`, in toolbar order.
pub fn symbols_for(tab: SymbolTab) -> &'static [Symbol] {
    match tab {
        SymbolTab::Math => MATH,
        SymbolTab::Physics => PHYSICS,
        SymbolTab::Chemistry => CHEMISTRY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_parse_case_insensitively() {
        assert_eq!(SymbolTab::parse("Physics"), Some(SymbolTab::Physics));
        assert_eq!(SymbolTab::parse(" CHEMISTRY "), Some(SymbolTab::Chemistry));
        assert_eq!(SymbolTab::parse("biology"), None);
    }

    #[test]
    fn every_tab_lists_labelled_symbols() {
        for tab in SymbolTab::ALL {
            let symbols = symbols_for(tab);
            assert!(!symbols.is_empty(), "{}", tab.as_str());
            for symbol in symbols {
                assert!(!symbol.latex.is_empty());
                assert!(!symbol.label.is_empty());
            }
        }
        let sqrt = symbols_for(SymbolTab::Math)
            .iter()
            .find(|symbol| symbol.label == "√")
            .unwrap();
        assert_eq!(sqrt.latex, r"\sqrt{}");
        assert_eq!(sqrt.kind, SymbolKind::Structure);
    }
}

//! Toolbar insertion rules.
//!
//! # Responsibility
//! - Insert LaTeX templates at the selection and pick the caret position.
//! - Enter/leave inline math from the toolbar toggle.
//!
//! # Invariants
//! - Every function here is pure over `CursorState`.
//! - No selection means nothing changes.
//! - The resulting selection is always collapsed.

use crate::editor::cursor::{CursorState, Selection};
use crate::editor::palette::{symbols_for, Symbol, SymbolTab};

/// Text inserted when entering math mode.
pub const MATH_ENTRY: &str = "\n$ $";
/// Caret offset inside `MATH_ENTRY`: after the opening `$` and its space.
const MATH_ENTRY_CARET: usize = "\n$ ".len();

/// One caret-placement rule: returns the caret offset inside the template
/// when the rule applies.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderRule {
    pub name: &'static str,
    pub locate: fn(&str) -> Option<usize>,
}

/// Checked in order; the first rule that applies wins. Templates matching
/// none of them leave the caret after the inserted text.
pub const PLACEHOLDER_RULES: &[PlaceholderRule] = &[
    PlaceholderRule {
        name: "braces",
        locate: locate_braces,
    },
    PlaceholderRule {
        name: "parentheses",
        locate: locate_parentheses,
    },
    PlaceholderRule {
        name: "brackets",
        locate: locate_brackets,
    },
    PlaceholderRule {
        name: "sqrt",
        locate: locate_sqrt,
    },
    PlaceholderRule {
        name: "sub_superscript",
        locate: locate_sub_superscript,
    },
];

fn inside_pair(template: &str, pair: &str) -> Option<usize> {
    template.find(pair).map(|at| at + 1)
}

fn locate_braces(template: &str) -> Option<usize> {
    inside_pair(template, "{}")
}

fn locate_parentheses(template: &str) -> Option<usize> {
    inside_pair(template, "()")
}

fn locate_brackets(template: &str) -> Option<usize> {
    inside_pair(template, "[]")
}

fn locate_sqrt(template: &str) -> Option<usize> {
    let at = template.find(r"\sqrt{}")?;
    inside_pair(&template[at..], "{}").map(|offset| at + offset)
}

fn locate_sub_superscript(template: &str) -> Option<usize> {
    if template.contains("{}_{}") || template.contains("{}^{}") {
        template.find('{').map(|at| at + 1)
    } else {
        None
    }
}

/// Caret offset relative to the start of the inserted `template`.
pub fn caret_offset_in(template: &str) -> usize {
    PLACEHOLDER_RULES
        .iter()
        .find_map(|rule| (rule.locate)(template))
        .unwrap_or(template.len())
}

/// Replaces the selection with `template` and places the caret on its first
/// placeholder.
pub fn insert_template(state: &CursorState, template: &str) -> CursorState {
    match state.selection() {
        Some(selection) => state.splice(selection, template, caret_offset_in(template)),
        None => state.clone(),
    }
}

/// Enters or leaves inline math at the selection.
///
/// Entering replaces the selection with `"\n$ $"` and puts the caret between
/// the two `$`. Leaving moves past the closing `$` when the caret sits inside
/// an inline pair on its line, then starts a new line; delimiters are never
/// removed.
pub fn toggle_math_environment(state: &CursorState, entering: bool) -> CursorState {
    let Some(selection) = state.selection() else {
        return state.clone();
    };
    if entering {
        return state.splice(selection, MATH_ENTRY, MATH_ENTRY_CARET);
    }

    let anchor = math_exit_offset(state.buffer(), selection.end());
    state.splice(Selection::collapsed(anchor), "\n", 1)
}

/// Offset just after the `$` closing the inline pair around `caret`, or
/// `caret` itself when it is not inside one.
fn math_exit_offset(buffer: &str, caret: usize) -> usize {
    let line_start = buffer[..caret].rfind('\n').map_or(0, |at| at + 1);
    let open_dollars = buffer[line_start..caret].matches('$').count();
    if open_dollars % 2 == 0 {
        return caret;
    }
    let line_rest = buffer[caret..].split('\n').next().unwrap_or("");
    match line_rest.find('$') {
        Some(at) => caret + at + 1,
        None => caret,
    }
}

/// Toolbar UI state: math mode flag and visible tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    math_mode: bool,
    active_tab: SymbolTab,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            math_mode: false,
            active_tab: SymbolTab::Math,
        }
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn math_mode(&self) -> bool {
        self.math_mode
    }

    pub fn active_tab(&self) -> SymbolTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: SymbolTab) {
        self.active_tab = tab;
    }

    pub fn visible_symbols(&self) -> &'static [Symbol] {
        symbols_for(self.active_tab)
    }

    /// Flips math mode and applies the matching buffer edit.
    ///
    /// Without a selection the mode still flips but the buffer is untouched.
    pub fn toggle_math_mode(&mut self, state: &CursorState) -> CursorState {
        let entering = !self.math_mode;
        self.math_mode = entering;
        toggle_math_environment(state, entering)
    }

    /// Inserts `symbol` when math mode is on; symbols are inert otherwise.
    pub fn insert_symbol(&self, state: &CursorState, symbol: &Symbol) -> CursorState {
        if !self.math_mode {
            return state.clone();
        }
        insert_template(state, symbol.latex)
    }
}

use texnote_core::{
    insert_template, symbols_for, toggle_math_environment, CursorState, SymbolTab, Toolbar,
};

fn state(buffer: &str, start: usize, end: usize) -> CursorState {
    CursorState::with_selection(buffer, start, end).unwrap()
}

#[test]
fn brace_template_puts_caret_inside_first_pair() {
    let next = insert_template(&state("abcde", 5, 5), r"\vec{}");
    assert_eq!(next.buffer(), r"abcde\vec{}");
    assert_eq!(next.caret(), Some(10));
    assert!(next.selection().unwrap().is_collapsed());
}

#[test]
fn sqrt_template_puts_caret_inside_radicand() {
    let next = insert_template(&state("abcde", 5, 5), r"\sqrt{}");
    assert_eq!(next.buffer(), r"abcde\sqrt{}");
    assert_eq!(next.caret(), Some(11));
}

#[test]
fn bare_symbol_leaves_caret_after_it() {
    let next = insert_template(&state("ab", 2, 2), r"\pi");
    assert_eq!(next.buffer(), r"ab\pi");
    assert_eq!(next.caret(), Some(5));
}

#[test]
fn fraction_template_targets_numerator() {
    let next = insert_template(&state("", 0, 0), r"\frac{}{}");
    assert_eq!(next.caret(), Some(6));
}

#[test]
fn selection_is_replaced_by_template() {
    let next = insert_template(&state("a + old + b", 4, 7), r"\alpha");
    assert_eq!(next.buffer(), r"a + \alpha + b");
    assert_eq!(next.caret(), Some(10));
}

#[test]
fn no_selection_means_no_change() {
    let detached = CursorState::detached("abc");
    assert_eq!(insert_template(&detached, r"\vec{}"), detached);
    assert_eq!(toggle_math_environment(&detached, true), detached);
    assert_eq!(toggle_math_environment(&detached, false), detached);
}

#[test]
fn entering_math_inserts_inline_pair_on_new_line() {
    let next = toggle_math_environment(&state("x", 1, 1), true);
    assert_eq!(next.buffer(), "x\n$ $");
    assert_eq!(next.caret(), Some(4));
}

#[test]
fn leaving_math_moves_past_closing_delimiter() {
    let entered = toggle_math_environment(&state("x", 1, 1), true);
    let left = toggle_math_environment(&entered, false);
    assert_eq!(left.buffer(), "x\n$ $\n");
    assert_eq!(left.caret(), Some(6));
}

#[test]
fn leaving_math_outside_pair_just_breaks_line() {
    let left = toggle_math_environment(&state("$a$ b", 5, 5), false);
    assert_eq!(left.buffer(), "$a$ b\n");
    assert_eq!(left.caret(), Some(6));
}

#[test]
fn toolbar_symbols_are_inert_until_math_mode() {
    let mut toolbar = Toolbar::new();
    let start = state("ab", 2, 2);
    let pi = symbols_for(SymbolTab::Math)
        .iter()
        .find(|symbol| symbol.latex == r"\pi")
        .unwrap();

    assert_eq!(toolbar.insert_symbol(&start, pi), start);

    let entered = toolbar.toggle_math_mode(&start);
    assert!(toolbar.math_mode());
    assert_eq!(entered.buffer(), "ab\n$ $");

    let with_pi = toolbar.insert_symbol(&entered, pi);
    assert_eq!(with_pi.buffer(), "ab\n$ \\pi$");
    assert_eq!(with_pi.caret(), Some(8));

    let left = toolbar.toggle_math_mode(&with_pi);
    assert!(!toolbar.math_mode());
    assert_eq!(left.buffer(), "ab\n$ \\pi$\n");
}

#[test]
fn toolbar_tab_switch_changes_visible_symbols() {
    let mut toolbar = Toolbar::new();
    assert_eq!(toolbar.active_tab(), SymbolTab::Math);
    toolbar.select_tab(SymbolTab::Chemistry);
    assert_eq!(toolbar.active_tab(), SymbolTab::Chemistry);
    assert_eq!(
        toolbar.visible_symbols(),
        symbols_for(SymbolTab::Chemistry)
    );
}

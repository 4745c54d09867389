//! Editor-side helpers: cursor state, toolbar insertion rules, symbol
//! palette and the note editing session.
//!
//! # Invariants
//! - Toolbar operations are pure: they return a new `CursorState`.
//! - Without an active selection every toolbar operation is a no-op.

pub mod cursor;
pub mod palette;
pub mod session;
pub mod toolbar;

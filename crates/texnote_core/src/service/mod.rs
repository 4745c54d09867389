//! Core use-case services.
//!
//! Orchestrate repository calls into note use-cases so the API and editor
//! layers stay decoupled from storage details.

pub mod note_filter;
pub mod note_service;

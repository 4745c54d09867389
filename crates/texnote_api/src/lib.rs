//! Transport-agnostic note API.
//! Callers hand in raw ids and JSON bodies and get back a status code plus a
//! JSON body; wiring these to a socket is left to the embedding process.

pub mod api;

pub use api::{ApiResponse, NotesApi, DB_PATH_ENV};

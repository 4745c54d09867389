//! Use-case API for note clients.
//!
//! # Responsibility
//! - Expose list/get/create/update/delete as status + JSON envelopes.
//! - Map malformed ids, validation failures and missing notes to the
//!   conventional client error codes.
//!
//! # Invariants
//! - Calls never panic; store failures surface as `500 Server Error`.
//! - One database connection per call; nothing is cached between calls.
//! - Error bodies always have the `{"msg": "..."}` shape.

use log::{error, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use texnote_core::db::open_db;
use texnote_core::{
    parse_note_id, NewNote, NoteFilter, NoteId, NotePatch, NoteService, NoteServiceError,
    RepoError, SqliteNoteRepository,
};

/// Environment variable naming the SQLite database file.
pub const DB_PATH_ENV: &str = "TEXNOTE_DB_PATH";
const DB_FILE_NAME: &str = "texnote.sqlite3";

const HEALTH_MESSAGE: &str = "TexNote API is running!";
const MSG_NOTE_NOT_FOUND: &str = "Note not found";
const MSG_INVALID_ID: &str = "Invalid Note ID";
const MSG_REQUIRED_FIELDS: &str = "Please enter all required fields: title and subject";
const MSG_INVALID_BODY: &str = "Invalid request body";
const MSG_NOTE_REMOVED: &str = "Note removed";
const MSG_SERVER_ERROR: &str = "Server Error";

/// Status code plus JSON body of one API call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn json(status: u16, body: &impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!("event=api_encode module=api status=error error={err}");
                Self::message(500, MSG_SERVER_ERROR)
            }
        }
    }

    fn message(status: u16, msg: &str) -> Self {
        Self {
            status,
            body: json!({ "msg": msg }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `msg` field of an error body, if present.
    pub fn msg(&self) -> Option<&str> {
        self.body.get("msg").and_then(Value::as_str)
    }
}

/// Note API bound to one SQLite database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesApi {
    db_path: PathBuf,
}

impl NotesApi {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Reads the database path from `TEXNOTE_DB_PATH`, falling back to a
    /// file in the system temp directory.
    pub fn from_env() -> Self {
        let configured = std::env::var(DB_PATH_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());
        match configured {
            Some(path) => Self::new(path),
            None => Self::new(std::env::temp_dir().join(DB_FILE_NAME)),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn health(&self) -> ApiResponse {
        ApiResponse::json(200, &HEALTH_MESSAGE)
    }

    /// All notes, most recently updated first, narrowed by `filter`.
    pub fn list_notes(&self, filter: &NoteFilter) -> ApiResponse {
        match self.with_note_service(|service| service.list_notes(filter)) {
            Ok(notes) => ApiResponse::json(200, &notes),
            Err(err) => service_failure("note_list", err),
        }
    }

    /// Distinct subjects in list order.
    pub fn list_subjects(&self) -> ApiResponse {
        match self.with_note_service(|service| service.list_subjects()) {
            Ok(subjects) => ApiResponse::json(200, &subjects),
            Err(err) => service_failure("subject_list", err),
        }
    }

    pub fn get_note(&self, id: &str) -> ApiResponse {
        let id = match parse_id("note_get", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        match self.with_note_service(|service| service.get_note(id)) {
            Ok(note) => ApiResponse::json(200, &note),
            Err(err) => service_failure("note_get", err),
        }
    }

    /// Creates a note from a `{title, subject, content?}` JSON body.
    pub fn create_note(&self, body: &str) -> ApiResponse {
        let input: NewNote = match parse_body("note_create", body) {
            Ok(input) => input,
            Err(response) => return response,
        };
        if let Err(err) = input.validate() {
            warn!("event=note_create module=api status=error error_code=validation error={err}");
            return ApiResponse::message(400, MSG_REQUIRED_FIELDS);
        }
        match self.with_note_service(|service| service.create_note(input)) {
            Ok(note) => ApiResponse::json(201, &note),
            Err(err) => service_failure("note_create", err),
        }
    }

    /// Applies a partial `{title?, subject?, content?}` JSON body.
    pub fn update_note(&self, id: &str, body: &str) -> ApiResponse {
        let id = match parse_id("note_update", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        let patch: NotePatch = match parse_body("note_update", body) {
            Ok(patch) => patch,
            Err(response) => return response,
        };
        match self.with_note_service(|service| service.update_note(id, &patch)) {
            Ok(note) => ApiResponse::json(200, &note),
            Err(err) => service_failure("note_update", err),
        }
    }

    pub fn delete_note(&self, id: &str) -> ApiResponse {
        let id = match parse_id("note_delete", id) {
            Ok(id) => id,
            Err(response) => return response,
        };
        match self.with_note_service(|service| service.delete_note(id)) {
            Ok(()) => ApiResponse::message(200, MSG_NOTE_REMOVED),
            Err(err) => service_failure("note_delete", err),
        }
    }

    fn with_note_service<T>(
        &self,
        f: impl FnOnce(&NoteService<SqliteNoteRepository<'_>>) -> Result<T, NoteServiceError>,
    ) -> Result<T, NoteServiceError> {
        let conn = open_db(&self.db_path).map_err(RepoError::from)?;
        let repo = SqliteNoteRepository::try_new(&conn)?;
        let service = NoteService::new(repo);
        f(&service)
    }
}

fn parse_id(event: &str, raw: &str) -> Result<NoteId, ApiResponse> {
    parse_note_id(raw).map_err(|err| {
        warn!("event={event} module=api status=error error_code=invalid_id error={err}");
        ApiResponse::message(400, MSG_INVALID_ID)
    })
}

fn parse_body<T: serde::de::DeserializeOwned>(event: &str, body: &str) -> Result<T, ApiResponse> {
    serde_json::from_str(body).map_err(|err| {
        warn!(
            "event={event} module=api status=error error_code=invalid_body line={} column={}",
            err.line(),
            err.column()
        );
        ApiResponse::message(400, MSG_INVALID_BODY)
    })
}

fn service_failure(event: &str, err: NoteServiceError) -> ApiResponse {
    match err {
        NoteServiceError::NoteNotFound(_) => ApiResponse::message(404, MSG_NOTE_NOT_FOUND),
        NoteServiceError::Validation(_) => ApiResponse::message(400, MSG_REQUIRED_FIELDS),
        other => {
            error!("event={event} module=api status=error error={other}");
            ApiResponse::message(500, MSG_SERVER_ERROR)
        }
    }
}

//! TexNote command-line front end.
//!
//! # Responsibility
//! - Drive the note API against a local database and print JSON responses.
//! - Render LaTeX notes to preview markup from files or stdin.
//!
//! Exit status is non-zero whenever the API answers with a non-2xx code.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use texnote_api::{ApiResponse, NotesApi};
use texnote_core::{default_log_level, init_logging, render, symbols_for, NoteFilter, SymbolTab};

#[derive(Parser)]
#[command(version, about = "TexNote - LaTeX notes from the terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "TEXNOTE_DB_PATH")]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TEXNOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, env = "TEXNOTE_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, most recently updated first
    List {
        #[arg(long)]
        subject: Option<String>,
        /// Case-insensitive match on title or subject
        #[arg(long)]
        search: Option<String>,
    },
    /// List distinct subjects
    Subjects,
    /// Show one note
    Show {
        id: String,
        /// Add the rendered preview as `rendered`
        #[arg(long)]
        render: bool,
    },
    /// Create a note
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        subject: String,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Update a note; omitted fields keep their stored value
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[command(flatten)]
        content: ContentArgs,
    },
    /// Delete a note
    Delete { id: String },
    /// Render LaTeX note text to preview markup
    Render {
        /// Input file; stdin when absent
        file: Option<PathBuf>,
    },
    /// List toolbar symbols
    Symbols {
        /// math|physics|chemistry; all tabs when absent
        tab: Option<String>,
    },
}

#[derive(clap::Args)]
struct ContentArgs {
    /// Note body
    #[arg(long, conflicts_with = "file")]
    content: Option<String>,
    /// Read the note body from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl ContentArgs {
    fn resolve(self) -> Result<Option<String>> {
        match (self.content, self.file) {
            (Some(content), _) => Ok(Some(content)),
            (None, Some(path)) => read_file(&path).map(Some),
            (None, None) => Ok(None),
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let api = match cli.db {
        Some(path) => NotesApi::new(path),
        None => NotesApi::from_env(),
    };

    let response = match cli.command {
        Commands::List { subject, search } => api.list_notes(&NoteFilter { subject, search }),
        Commands::Subjects => api.list_subjects(),
        Commands::Show { id, render } => {
            let mut response = api.get_note(&id);
            if render && response.is_success() {
                attach_preview(&mut response);
            }
            response
        }
        Commands::Create {
            title,
            subject,
            content,
        } => {
            let mut body = Map::new();
            body.insert("title".into(), title.into());
            body.insert("subject".into(), subject.into());
            if let Some(content) = content.resolve()? {
                body.insert("content".into(), content.into());
            }
            api.create_note(&Value::Object(body).to_string())
        }
        Commands::Update {
            id,
            title,
            subject,
            content,
        } => {
            let body = update_body(title, subject, content.resolve()?);
            api.update_note(&id, &body.to_string())
        }
        Commands::Delete { id } => api.delete_note(&id),
        Commands::Render { file } => {
            let source = match file {
                Some(path) => read_file(&path)?,
                None => read_stdin()?,
            };
            println!("{}", render(&source));
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Symbols { tab } => {
            println!("{}", serde_json::to_string_pretty(&symbols_json(tab.as_deref())?)?);
            return Ok(ExitCode::SUCCESS);
        }
    };

    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("request failed with status {}", response.status);
        Ok(ExitCode::FAILURE)
    }
}

fn update_body(title: Option<String>, subject: Option<String>, content: Option<String>) -> Value {
    let mut body = Map::new();
    for (key, value) in [("title", title), ("subject", subject), ("content", content)] {
        if let Some(value) = value {
            body.insert(key.to_string(), Value::String(value));
        }
    }
    Value::Object(body)
}

fn attach_preview(response: &mut ApiResponse) {
    let rendered = response
        .body
        .get("content")
        .and_then(Value::as_str)
        .map(render);
    if let (Some(rendered), Some(note)) = (rendered, response.body.as_object_mut()) {
        note.insert("rendered".to_string(), Value::String(rendered));
    }
}

fn symbols_json(tab: Option<&str>) -> Result<Value> {
    let tabs = match tab {
        Some(name) => match SymbolTab::parse(name) {
            Some(tab) => vec![tab],
            None => bail!("unknown symbol tab `{name}`; expected math|physics|chemistry"),
        },
        None => SymbolTab::ALL.to_vec(),
    };
    let mut out = Map::new();
    for tab in tabs {
        out.insert(tab.as_str().to_string(), serde_json::to_value(symbols_for(tab))?);
    }
    Ok(Value::Object(out))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read stdin")?;
    Ok(source)
}

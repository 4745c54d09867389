//! In-memory note list filtering for the notes overview.

use crate::model::note::Note;

/// Overview filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Exact subject match.
    pub subject: Option<String>,
    /// Case-insensitive substring over title or subject.
    pub search: Option<String>,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        let subject_ok = match self.subject.as_deref() {
            Some(subject) => note.subject == subject,
            None => true,
        };
        let search_ok = match self.search.as_deref().map(str::to_lowercase) {
            Some(term) if !term.is_empty() => {
                note.title.to_lowercase().contains(&term)
                    || note.subject.to_lowercase().contains(&term)
            }
            _ => true,
        };
        subject_ok && search_ok
    }
}

/// Keeps notes matching `filter`, preserving input order.
pub fn filter_notes(notes: Vec<Note>, filter: &NoteFilter) -> Vec<Note> {
    notes.into_iter().filter(|note| filter.matches(note)).collect()
}

/// Subjects in first-seen order, without duplicates.
pub fn distinct_subjects(notes: &[Note]) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::new();
    for note in notes {
        if !subjects.iter().any(|known| known == &note.subject) {
            subjects.push(note.subject.clone());
        }
    }
    subjects
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn note(title: &str, subject: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            subject: subject.to_string(),
            content: String::new(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn search_matches_title_or_subject_case_insensitively() {
        let notes = vec![
            note("Ideal gas law", "Chemistry"),
            note("Vectors", "Physics"),
            note("Series", "Math"),
        ];
        let filter = NoteFilter {
            subject: None,
            search: Some("PHYS".to_string()),
        };
        let titles: Vec<_> = filter_notes(notes.clone(), &filter)
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["Vectors"]);

        let filter = NoteFilter {
            subject: None,
            search: Some("gas".to_string()),
        };
        assert_eq!(filter_notes(notes, &filter).len(), 1);
    }

    #[test]
    fn subject_filter_is_exact_and_combines_with_search() {
        let notes = vec![
            note("Limits", "Math"),
            note("Limits of detection", "Chemistry"),
        ];
        let filter = NoteFilter {
            subject: Some("Math".to_string()),
            search: Some("limits".to_string()),
        };
        let kept = filter_notes(notes, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].subject, "Math");
    }

    #[test]
    fn distinct_subjects_keeps_first_seen_order() {
        let notes = vec![
            note("a", "Physics"),
            note("b", "Math"),
            note("c", "Physics"),
        ];
        assert_eq!(distinct_subjects(&notes), vec!["Physics", "Math"]);
    }
}

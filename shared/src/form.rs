//! Create/edit form state.
//!
//! Dual-mode: `Create` starts blank, `Edit` pre-loads the record before
//! the form renders. Validation runs client-side before submission; a
//! server-side rejection carrying field errors replaces the local error
//! map rather than being re-derived.

use std::collections::BTreeMap;

use crate::{ApiError, Todo, TodoDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Per-field errors, local or server-sent.
    pub errors: BTreeMap<String, String>,
    /// Generic submission failure banner; the form stays editable.
    pub form_error: Option<String>,
    pub saving: bool,
    /// Edit-mode preload in flight; blocks rendering the fields.
    pub loading: bool,
}

impl FormState {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            title: String::new(),
            description: String::new(),
            completed: false,
            errors: BTreeMap::new(),
            form_error: None,
            saving: false,
            loading: matches!(mode, FormMode::Edit(_)),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Seed the fields from a fetched record (edit mode). A record whose
    /// id does not match the edit target is ignored, so a late preload
    /// can never fill the form with another todo's fields.
    pub fn seed(&mut self, todo: &Todo) {
        if self.mode != FormMode::Edit(todo.id) {
            return;
        }
        self.title = todo.title.clone();
        self.description = todo.description.clone().unwrap_or_default();
        self.completed = todo.completed;
        self.loading = false;
    }

    /// Editing a field clears its error immediately.
    pub fn set_title(&mut self, value: String) {
        self.title = value;
        self.errors.remove("title");
    }

    pub fn set_description(&mut self, value: String) {
        self.description = value;
        self.errors.remove("description");
    }

    pub fn set_completed(&mut self, value: bool) {
        self.completed = value;
    }

    /// Client-side pre-check. Returns false (and records the field
    /// error) when submission must be blocked.
    pub fn validate(&mut self) -> bool {
        if self.title.trim().is_empty() {
            self.errors
                .insert("title".to_string(), "Title is required".to_string());
        }
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// The payload submission sends, for create and update alike. An
    /// all-whitespace description is treated as absent.
    pub fn draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.clone(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            completed: self.completed,
        }
    }

    pub fn begin_submit(&mut self) {
        self.saving = true;
        self.form_error = None;
    }

    /// Record a submission failure. Server field errors take precedence
    /// over whatever was set locally; anything else becomes a generic
    /// banner and the input is left intact.
    pub fn apply_failure(&mut self, err: &ApiError) {
        self.saving = false;
        match err {
            ApiError::Validation(body) if !body.errors.is_empty() => {
                self.errors = body.errors.clone();
                self.form_error = Some(body.message.clone());
            }
            other => {
                self.form_error = Some(other.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorBody;
    use chrono::{TimeZone, Utc};

    #[test]
    fn blank_title_blocks_submission() {
        let mut form = FormState::new(FormMode::Create);
        form.title = "   ".to_string();

        assert!(!form.validate());
        assert_eq!(form.error_for("title"), Some("Title is required"));
    }

    #[test]
    fn editing_the_title_clears_its_error() {
        let mut form = FormState::new(FormMode::Create);
        assert!(!form.validate());

        form.set_title("Buy milk".to_string());
        assert_eq!(form.error_for("title"), None);
        assert!(form.validate());
    }

    #[test]
    fn empty_description_maps_to_none() {
        let mut form = FormState::new(FormMode::Create);
        form.set_title("Buy milk".to_string());
        form.set_description("  ".to_string());

        let draft = form.draft();
        assert_eq!(draft.description, None);
        assert!(!draft.completed);
    }

    #[test]
    fn seed_fills_the_fields_from_the_record() {
        let todo = Todo {
            id: 3,
            title: "Water plants".to_string(),
            description: Some("Balcony only".to_string()),
            completed: true,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        };
        let mut form = FormState::new(FormMode::Edit(3));
        assert!(form.loading);

        form.seed(&todo);
        assert_eq!(form.title, "Water plants");
        assert_eq!(form.description, "Balcony only");
        assert!(form.completed);
        assert!(!form.loading);
    }

    #[test]
    fn seed_ignores_a_record_for_a_different_todo() {
        let stale = Todo {
            id: 1,
            title: "Old route's todo".to_string(),
            description: Some("Should never appear".to_string()),
            completed: true,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        };
        let mut form = FormState::new(FormMode::Edit(2));

        // A preload that resolved after the route moved on to todo 2.
        form.seed(&stale);

        assert_eq!(form.title, "");
        assert_eq!(form.description, "");
        assert!(!form.completed);
        assert!(form.loading);
    }

    #[test]
    fn seed_is_a_no_op_in_create_mode() {
        let todo = Todo {
            id: 1,
            title: "x".to_string(),
            description: None,
            completed: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        };
        let mut form = FormState::new(FormMode::Create);

        form.seed(&todo);

        assert_eq!(form.title, "");
        assert!(!form.loading);
    }

    #[test]
    fn server_field_errors_replace_local_ones() {
        let mut form = FormState::new(FormMode::Create);
        form.errors
            .insert("title".to_string(), "stale local error".to_string());
        form.begin_submit();

        let err = ApiError::Validation(ErrorBody {
            message: "Validation failed".to_string(),
            errors: [("title".to_string(), "Title is required".to_string())]
                .into_iter()
                .collect(),
        });
        form.apply_failure(&err);

        assert_eq!(form.error_for("title"), Some("Title is required"));
        assert!(!form.saving);
    }

    #[test]
    fn transport_failure_keeps_the_input_intact() {
        let mut form = FormState::new(FormMode::Create);
        form.set_title("Buy milk".to_string());
        form.begin_submit();

        form.apply_failure(&ApiError::network("connection refused"));

        assert_eq!(form.title, "Buy milk");
        assert!(form.form_error.is_some());
        assert!(form.errors.is_empty());
    }
}

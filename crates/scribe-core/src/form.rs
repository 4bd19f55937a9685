//! Post form validation - binds raw submitted fields to a persistable draft.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Group;

/// Raw field values as submitted, kept around for redisplay on failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    /// Group id as a string; empty or absent means "no group".
    #[serde(default)]
    pub group: String,
}

/// A validated post draft, ready for persistence once the caller sets the
/// author.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub text: String,
    pub group_id: Option<Uuid>,
}

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl PostForm {
    /// Validate against the set of available groups.
    ///
    /// `text` must be non-empty after trimming; `group` must be blank or
    /// name an existing group's id. No side effects on failure - the
    /// original input stays in `self` for redisplay.
    pub fn validate(&self, groups: &[Group]) -> Result<PostDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let text = self.text.trim();
        if text.is_empty() {
            errors.push(FieldError {
                field: "text",
                message: "This field is required.".to_string(),
            });
        }

        let group_id = if self.group.trim().is_empty() {
            None
        } else {
            match self.group.trim().parse::<Uuid>() {
                Ok(id) if groups.iter().any(|g| g.id == id) => Some(id),
                _ => {
                    errors.push(FieldError {
                        field: "group",
                        message: "Select a valid choice.".to_string(),
                    });
                    None
                }
            }
        };

        if errors.is_empty() {
            Ok(PostDraft {
                text: text.to_string(),
                group_id,
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_groups() -> Vec<Group> {
        vec![Group::new(
            "test-slug".to_string(),
            "Test group".to_string(),
            "A group for tests".to_string(),
        )]
    }

    #[test]
    fn test_valid_form_without_group() {
        let form = PostForm {
            text: "hello".to_string(),
            group: String::new(),
        };

        let draft = form.validate(&sample_groups()).unwrap();
        assert_eq!(draft.text, "hello");
        assert_eq!(draft.group_id, None);
    }

    #[test]
    fn test_valid_form_with_group() {
        let groups = sample_groups();
        let form = PostForm {
            text: "hello".to_string(),
            group: groups[0].id.to_string(),
        };

        let draft = form.validate(&groups).unwrap();
        assert_eq!(draft.group_id, Some(groups[0].id));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let form = PostForm {
            text: "   ".to_string(),
            group: String::new(),
        };

        let errors = form.validate(&sample_groups()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "text");
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let form = PostForm {
            text: "hello".to_string(),
            group: Uuid::new_v4().to_string(),
        };

        let errors = form.validate(&sample_groups()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "group");
    }

    #[test]
    fn test_garbage_group_id_is_rejected() {
        let form = PostForm {
            text: "hello".to_string(),
            group: "not-a-uuid".to_string(),
        };

        let errors = form.validate(&sample_groups()).unwrap_err();
        assert_eq!(errors[0].field, "group");
    }

    #[test]
    fn test_both_fields_invalid_reports_both() {
        let form = PostForm {
            text: String::new(),
            group: "nope".to_string(),
        };

        let errors = form.validate(&sample_groups()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_text_is_trimmed_in_draft() {
        let form = PostForm {
            text: "  hello  ".to_string(),
            group: String::new(),
        };

        let draft = form.validate(&sample_groups()).unwrap();
        assert_eq!(draft.text, "hello");
    }
}

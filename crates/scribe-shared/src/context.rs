//! Page contexts - the key-value data handed to the presentation layer.
//!
//! Each handler selects a logical template name and a context struct; the
//! external template collaborator renders the pair into HTML. Field names
//! here are the context-key contract (`page_obj`, `group`, `author`, ...).

use serde::Serialize;

use scribe_core::form::{FieldError, PostForm};
use scribe_core::pagination::Page;

use crate::dto::{AuthorView, GroupView, PostView};

/// A rendered page: logical template name plus its context.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage<C> {
    pub template: &'static str,
    pub context: C,
}

impl<C: Serialize> RenderedPage<C> {
    pub fn new(template: &'static str, context: C) -> Self {
        Self { template, context }
    }
}

/// Context for the `index` template.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub page_obj: Page<PostView>,
}

/// Context for the `group_list` template.
#[derive(Debug, Clone, Serialize)]
pub struct GroupListContext {
    pub group: GroupView,
    pub page_obj: Page<PostView>,
}

/// Context for the `profile` template.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileContext {
    pub author: AuthorView,
    pub page_obj: Page<PostView>,
}

/// Context for the `post_detail` template.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailContext {
    pub post: PostView,
}

/// Context for the `create_post` template, shared by create and edit.
///
/// On validation failure `form` carries the submitted values back for
/// redisplay alongside the field errors.
#[derive(Debug, Clone, Serialize)]
pub struct PostFormContext {
    pub form: FormState,
    pub groups: Vec<GroupView>,
    pub is_edit: bool,
}

/// Form values plus any field-level errors.
#[derive(Debug, Clone, Serialize)]
pub struct FormState {
    pub values: PostForm,
    pub errors: Vec<FieldError>,
}

impl FormState {
    pub fn clean(values: PostForm) -> Self {
        Self {
            values,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(values: PostForm, errors: Vec<FieldError>) -> Self {
        Self { values, errors }
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Post, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their username (the profile URL key).
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Save a user (create or update).
    async fn save(&self, user: User) -> Result<User, RepoError>;
}

/// Group repository. Groups are administered out of band, so there is no
/// create/delete surface here - only the lookups the handlers need.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by its URL slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// List every group, for the create-form's picker and form validation.
    async fn list(&self) -> Result<Vec<Group>, RepoError>;

    async fn save(&self, group: Group) -> Result<Group, RepoError>;
}

/// Post repository. Every listing comes back ordered by `pub_date`
/// descending, newest first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts, most recent first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts filed under one group, most recent first.
    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts by one author, most recent first.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Save a post (create or update).
    async fn save(&self, post: Post) -> Result<Post, RepoError>;
}

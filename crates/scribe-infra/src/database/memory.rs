//! In-memory repository implementations - used as fallback when the
//! database is not configured, and by handler tests.
//!
//! Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Group, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{GroupRepository, PostRepository, UserRepository};

/// In-memory user repository backed by a HashMap with async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        let clash = store
            .values()
            .any(|u| u.id != user.id && (u.username == user.username || u.email == user.email));
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory group repository.
#[derive(Default)]
pub struct InMemoryGroupRepository {
    store: RwLock<HashMap<Uuid, Group>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|g| g.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let store = self.store.read().await;
        let mut groups: Vec<Group> = store.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }

    async fn save(&self, group: Group) -> Result<Group, RepoError> {
        let mut store = self.store.write().await;
        let clash = store
            .values()
            .any(|g| g.id != group.id && g.slug == group.slug);
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(group.id, group.clone());
        Ok(group)
    }
}

/// In-memory post repository. Listings come back newest first, matching
/// the PostgreSQL implementation.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sorted_where<F>(&self, pred: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().filter(|p| pred(p)).cloned().collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        posts
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.sorted_where(|_| true).await)
    }

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.sorted_where(|p| p.group_id == Some(group_id)).await)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self.sorted_where(|p| p.author_id == author_id).await)
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id, post.clone());
        Ok(post)
    }
}

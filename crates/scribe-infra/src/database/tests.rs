#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
    use uuid::Uuid;

    use scribe_core::domain::{Group, Post};
    use scribe_core::error::RepoError;
    use scribe_core::ports::{GroupRepository, PostRepository};

    use crate::database::entity::{group, post};
    use crate::database::postgres::{PostgresGroupRepository, PostgresPostRepository, query_err};

    fn post_model(text: &str) -> post::Model {
        post::Model {
            id: Uuid::new_v4(),
            text: text.to_owned(),
            pub_date: chrono::Utc::now().into(),
            author_id: Uuid::new_v4(),
            group_id: None,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("Test post");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.text, "Test post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_find_post_by_id_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let result = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_recent_maps_all_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model("newer"), post_model("older")]])
            .into_connection();

        let repo = PostgresPostRepository::new(Arc::new(db));

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "newer");
    }

    #[tokio::test]
    async fn test_find_group_by_slug() {
        let model = group::Model {
            id: Uuid::new_v4(),
            slug: "test-slug".to_owned(),
            title: "Test group".to_owned(),
            description: "A group".to_owned(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresGroupRepository::new(Arc::new(db));

        let result: Option<Group> = repo.find_by_slug("test-slug").await.unwrap();
        assert_eq!(result.unwrap().slug, "test-slug");
    }

    #[tokio::test]
    async fn test_repositories_share_one_connection() {
        let model = group::Model {
            id: Uuid::new_v4(),
            slug: "shared".to_owned(),
            title: "Shared".to_owned(),
            description: String::new(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![model]])
                .append_query_results(vec![vec![post_model("via shared conn")]])
                .into_connection(),
        );

        let groups = PostgresGroupRepository::new(Arc::clone(&db));
        let posts = PostgresPostRepository::new(db);

        assert!(groups.find_by_slug("shared").await.unwrap().is_some());
        assert_eq!(posts.list_recent().await.unwrap().len(), 1);
    }

    #[test]
    fn test_connection_errors_map_to_connection_variant() {
        let err = query_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned())));
        assert!(matches!(err, RepoError::Connection(_)));

        let err = query_err(DbErr::Query(RuntimeErr::Internal(
            "duplicate key value".to_owned(),
        )));
        assert!(matches!(err, RepoError::Constraint(_)));
    }
}

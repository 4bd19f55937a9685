use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use uuid::Uuid;

use scribe_core::domain::{Group, Post, User};
use scribe_core::form::PostForm;
use scribe_core::ports::TokenService;
use scribe_infra::auth::{JwtConfig, JwtTokenService};
use scribe_infra::database::memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};

use crate::state::AppState;

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }))
}

fn test_state() -> AppState {
    AppState {
        users: Arc::new(InMemoryUserRepository::new()),
        groups: Arc::new(InMemoryGroupRepository::new()),
        posts: Arc::new(InMemoryPostRepository::new()),
    }
}

async fn test_app(
    state: &AppState,
    tokens: &Arc<dyn TokenService>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let password_service: Arc<dyn scribe_core::ports::PasswordService> =
        Arc::new(scribe_infra::auth::Argon2PasswordService::new());

    test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(password_service))
            .configure(super::configure_routes),
    )
    .await
}

async fn seed_user(state: &AppState, username: &str) -> User {
    let user = User::new(
        username.to_string(),
        format!("{username}@example.com"),
        "hash".to_string(),
    );
    state.users.save(user).await.unwrap()
}

async fn seed_group(state: &AppState, slug: &str) -> Group {
    let group = Group::new(
        slug.to_string(),
        format!("Group {slug}"),
        "A test group".to_string(),
    );
    state.groups.save(group).await.unwrap()
}

/// Seed `count` posts with strictly increasing pub_dates so listing order
/// is deterministic.
async fn seed_posts(state: &AppState, author: &User, group: Option<&Group>, count: i64) {
    for i in 0..count {
        let mut post = Post::new(author.id, format!("post {i}"), group.map(|g| g.id));
        post.pub_date = chrono::Utc::now() + chrono::TimeDelta::seconds(i);
        state.posts.save(post).await.unwrap();
    }
}

fn bearer(tokens: &Arc<dyn TokenService>, user: &User) -> (header::HeaderName, String) {
    let token = tokens.generate_token(user.id, &user.username).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

async fn get_json(
    app: &impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    uri: &str,
) -> serde_json::Value {
    let resp = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    test::read_body_json(resp).await
}

fn page_items(body: &serde_json::Value) -> &Vec<serde_json::Value> {
    body["context"]["page_obj"]["items"]
        .as_array()
        .expect("page_obj.items missing")
}

#[actix_web::test]
async fn test_listings_paginate_thirteen_posts_as_ten_plus_three() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let group = seed_group(&state, "test-slug").await;
    seed_posts(&state, &author, Some(&group), 13).await;

    let app = test_app(&state, &tokens).await;

    for base in ["/", "/group/test-slug/", "/profile/auth/"] {
        let body = get_json(&app, base).await;
        assert_eq!(page_items(&body).len(), 10, "{base} first page");

        let second = get_json(&app, &format!("{base}?page=2")).await;
        assert_eq!(page_items(&second).len(), 3, "{base} second page");
        assert_eq!(second["context"]["page_obj"]["total_pages"], 2);
    }
}

#[actix_web::test]
async fn test_index_orders_posts_newest_first() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    seed_posts(&state, &author, None, 3).await;

    let app = test_app(&state, &tokens).await;

    let body = get_json(&app, "/").await;
    let items = page_items(&body);
    assert_eq!(items[0]["text"], "post 2");
    assert_eq!(items[2]["text"], "post 0");
}

#[actix_web::test]
async fn test_group_page_excludes_other_groups_posts() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let group = seed_group(&state, "test-slug").await;
    let other = seed_group(&state, "test-other-slug").await;
    seed_posts(&state, &author, Some(&group), 1).await;

    let app = test_app(&state, &tokens).await;

    let body = get_json(&app, "/group/test-other-slug/").await;
    assert_eq!(page_items(&body).len(), 0);
    assert_eq!(body["context"]["group"]["slug"], other.slug);
}

#[actix_web::test]
async fn test_create_then_detail_round_trip() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/")
            .insert_header(bearer(&tokens, &author))
            .set_form(PostForm {
                text: "hello".to_string(),
                group: String::new(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/profile/auth/"
    );

    let posts = state.posts.list_recent().await.unwrap();
    let created = &posts[0];
    let body = get_json(&app, &format!("/posts/{}/", created.id)).await;
    assert_eq!(body["template"], "post_detail");
    assert_eq!(body["context"]["post"]["text"], "hello");
    assert!(body["context"]["post"]["group_id"].is_null());
}

#[actix_web::test]
async fn test_create_with_empty_text_persists_nothing() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/create/")
            .insert_header(bearer(&tokens, &author))
            .set_form(PostForm {
                text: String::new(),
                group: String::new(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["template"], "create_post");
    assert_eq!(body["context"]["form"]["errors"][0]["field"], "text");

    assert!(state.posts.list_recent().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_unauthenticated_create_redirects_to_login() {
    let state = test_state();
    let tokens = token_service();
    let app = test_app(&state, &tokens).await;

    for req in [
        test::TestRequest::get().uri("/create/").to_request(),
        test::TestRequest::post()
            .uri("/create/")
            .set_form(PostForm {
                text: "hello".to_string(),
                group: String::new(),
            })
            .to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/auth/login"
        );
    }
}

#[actix_web::test]
async fn test_create_form_offers_group_picker() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    seed_group(&state, "test-slug").await;

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/create/")
            .insert_header(bearer(&tokens, &author))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["template"], "create_post");
    assert_eq!(body["context"]["is_edit"], false);
    assert_eq!(body["context"]["groups"][0]["slug"], "test-slug");
    assert_eq!(body["context"]["form"]["values"]["text"], "");
}

#[actix_web::test]
async fn test_edit_by_author_changes_text() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let post = state
        .posts
        .save(Post::new(author.id, "a".to_string(), None))
        .await
        .unwrap();

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(bearer(&tokens, &author))
            .set_form(PostForm {
                text: "b".to_string(),
                group: String::new(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
        format!("/posts/{}/", post.id)
    );

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "b");
    assert_eq!(stored.pub_date, post.pub_date);
    assert_eq!(stored.author_id, author.id);
}

#[actix_web::test]
async fn test_edit_by_non_author_is_silently_redirected() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let other = seed_user(&state, "intruder").await;
    let post = state
        .posts
        .save(Post::new(author.id, "original".to_string(), None))
        .await
        .unwrap();

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(bearer(&tokens, &other))
            .set_form(PostForm {
                text: "hijacked".to_string(),
                group: String::new(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
        format!("/posts/{}/", post.id)
    );

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "original");
}

#[actix_web::test]
async fn test_edit_form_prefills_current_values() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let group = seed_group(&state, "test-slug").await;
    let post = state
        .posts
        .save(Post::new(author.id, "current text".to_string(), Some(group.id)))
        .await
        .unwrap();

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(bearer(&tokens, &author))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["context"]["is_edit"], true);
    assert_eq!(body["context"]["form"]["values"]["text"], "current text");
    assert_eq!(
        body["context"]["form"]["values"]["group"],
        group.id.to_string()
    );
}

#[actix_web::test]
async fn test_edit_validation_failure_rerenders_with_is_edit() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let post = state
        .posts
        .save(Post::new(author.id, "original".to_string(), None))
        .await
        .unwrap();

    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/posts/{}/edit/", post.id))
            .insert_header(bearer(&tokens, &author))
            .set_form(PostForm {
                text: "   ".to_string(),
                group: String::new(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["template"], "create_post");
    assert_eq!(body["context"]["is_edit"], true);
    assert_eq!(body["context"]["form"]["errors"][0]["field"], "text");

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "original");
}

#[actix_web::test]
async fn test_context_keys_per_template() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    let group = seed_group(&state, "test-slug").await;
    seed_posts(&state, &author, Some(&group), 1).await;

    let app = test_app(&state, &tokens).await;

    let index = get_json(&app, "/").await;
    assert_eq!(index["template"], "index");
    assert!(index["context"]["page_obj"].is_object());

    let group_page = get_json(&app, "/group/test-slug/").await;
    assert_eq!(group_page["template"], "group_list");
    assert!(group_page["context"]["page_obj"].is_object());
    assert_eq!(group_page["context"]["group"]["slug"], "test-slug");

    let profile = get_json(&app, "/profile/auth/").await;
    assert_eq!(profile["template"], "profile");
    assert!(profile["context"]["page_obj"].is_object());
    assert_eq!(profile["context"]["author"]["username"], "auth");
}

#[actix_web::test]
async fn test_missing_lookups_return_404() {
    let state = test_state();
    let tokens = token_service();
    let app = test_app(&state, &tokens).await;

    for uri in [
        "/group/no-such-slug/".to_string(),
        "/profile/nobody/".to_string(),
        format!("/posts/{}/", Uuid::new_v4()),
    ] {
        let resp =
            test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
    }
}

#[actix_web::test]
async fn test_register_then_login_flow() {
    let state = test_state();
    let tokens = token_service();
    let app = test_app(&state, &tokens).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({
                "username": "auth",
                "email": "auth@example.com",
                "password": "secure_password_123",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["access_token"].as_str().unwrap().is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({
                "username": "auth",
                "password": "secure_password_123",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({
                "username": "auth",
                "password": "wrong_password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_out_of_range_page_clamps_to_last() {
    let state = test_state();
    let tokens = token_service();
    let author = seed_user(&state, "auth").await;
    seed_posts(&state, &author, None, 13).await;

    let app = test_app(&state, &tokens).await;

    let body = get_json(&app, "/?page=99").await;
    assert_eq!(body["context"]["page_obj"]["number"], 2);
    assert_eq!(page_items(&body).len(), 3);

    let body = get_json(&app, "/?page=not-a-number").await;
    assert_eq!(body["context"]["page_obj"]["number"], 2);
}

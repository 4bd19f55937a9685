//! Post handlers - the paginated listings, the post detail page, and the
//! login-gated create/edit forms.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use scribe_core::domain::{Group, Post};
use scribe_core::form::PostForm;
use scribe_core::pagination::{PER_PAGE, Page, paginate};
use scribe_shared::context::{
    FormState, GroupListContext, IndexContext, PostDetailContext, PostFormContext, ProfileContext,
    RenderedPage,
};
use scribe_shared::dto::{AuthorView, GroupView, PostView};

use crate::middleware::auth::RequireLogin;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Pagination query parameter. Kept as a raw string so a non-numeric
/// value clamps instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn page_of(posts: &[Post], query: &PageQuery) -> Page<PostView> {
    let views: Vec<PostView> = posts.iter().map(PostView::from).collect();
    paginate(views, PER_PAGE, query.page.as_deref())
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn detail_url(post_id: Uuid) -> String {
    format!("/posts/{post_id}/")
}

/// GET / - all posts, newest first.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;

    let context = IndexContext {
        page_obj: page_of(&posts, &query),
    };
    Ok(HttpResponse::Ok().json(RenderedPage::new("index", context)))
}

/// GET /group/{slug}/ - posts filed under one group.
pub async fn group_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group '{slug}' not found")))?;

    let posts = state.posts.list_by_group(group.id).await?;

    let context = GroupListContext {
        group: GroupView::from(&group),
        page_obj: page_of(&posts, &query),
    };
    Ok(HttpResponse::Ok().json(RenderedPage::new("group_list", context)))
}

/// GET /profile/{username}/ - posts by one author.
pub async fn profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = username.into_inner();
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))?;

    let posts = state.posts.list_by_author(author.id).await?;

    let context = ProfileContext {
        author: AuthorView::from(&author),
        page_obj: page_of(&posts, &query),
    };
    Ok(HttpResponse::Ok().json(RenderedPage::new("profile", context)))
}

/// GET /posts/{id}/ - a single post.
pub async fn post_detail(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{id}' not found")))?;

    let context = PostDetailContext {
        post: PostView::from(&post),
    };
    Ok(HttpResponse::Ok().json(RenderedPage::new("post_detail", context)))
}

fn form_page(form: FormState, groups: &[Group], is_edit: bool) -> HttpResponse {
    let context = PostFormContext {
        form,
        groups: groups.iter().map(GroupView::from).collect(),
        is_edit,
    };
    HttpResponse::Ok().json(RenderedPage::new("create_post", context))
}

/// GET /create/ - empty form plus the group picker.
pub async fn post_create_form(
    state: web::Data<AppState>,
    login: RequireLogin,
) -> AppResult<HttpResponse> {
    let RequireLogin(_identity) = login;
    let groups = state.groups.list().await?;

    Ok(form_page(FormState::clean(PostForm::default()), &groups, false))
}

/// POST /create/ - validate and persist a new post.
pub async fn post_create(
    state: web::Data<AppState>,
    login: RequireLogin,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let RequireLogin(identity) = login;
    let form = form.into_inner();
    let groups = state.groups.list().await?;

    match form.validate(&groups) {
        Ok(draft) => {
            let post = Post::new(identity.user_id, draft.text, draft.group_id);
            state.posts.save(post).await?;

            tracing::info!(author = %identity.username, "Post created");
            Ok(redirect(format!("/profile/{}/", identity.username)))
        }
        Err(errors) => Ok(form_page(FormState::with_errors(form, errors), &groups, false)),
    }
}

/// GET /posts/{id}/edit/ - form pre-populated with the post's values.
pub async fn post_edit_form(
    state: web::Data<AppState>,
    login: RequireLogin,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let RequireLogin(identity) = login;
    let id = id.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{id}' not found")))?;

    // Only the author may edit; everyone else bounces to the detail page.
    if identity.user_id != post.author_id {
        tracing::debug!(post_id = %post.id, user = %identity.username, "Edit denied, redirecting");
        return Ok(redirect(detail_url(post.id)));
    }

    let groups = state.groups.list().await?;
    let form = PostForm {
        text: post.text.clone(),
        group: post.group_id.map(|g| g.to_string()).unwrap_or_default(),
    };

    Ok(form_page(FormState::clean(form), &groups, true))
}

/// POST /posts/{id}/edit/ - validate and overwrite text/group.
pub async fn post_edit(
    state: web::Data<AppState>,
    login: RequireLogin,
    id: web::Path<Uuid>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let RequireLogin(identity) = login;
    let id = id.into_inner();
    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post '{id}' not found")))?;

    if identity.user_id != post.author_id {
        tracing::debug!(post_id = %post.id, user = %identity.username, "Edit denied, redirecting");
        return Ok(redirect(detail_url(post.id)));
    }

    let form = form.into_inner();
    let groups = state.groups.list().await?;

    match form.validate(&groups) {
        Ok(draft) => {
            post.revise(draft.text, draft.group_id);
            let post = state.posts.save(post).await?;

            tracing::info!(post_id = %post.id, author = %identity.username, "Post edited");
            Ok(redirect(detail_url(post.id)))
        }
        Err(errors) => Ok(form_page(FormState::with_errors(form, errors), &groups, true)),
    }
}

//! Bulletin board handlers.

use axum::{
    Extension,
    http::{HeaderName, StatusCode, header},
    response::Json,
};

use crate::{
    errors::AppError,
    extract::{ApiPath, ApiQuery, ValidatedJson},
    models::{PostDetail, PostSummary},
    pagination::{Direction, PageQuery, PageResponse, PostSort},
    post_service::PostService,
    types::{PostDeleteRequest, PostSaveRequest, PostUpdateRequest},
};

/// Empty response carrying a `Location` header.
type Located = (StatusCode, [(HeaderName, String); 1]);

/// Value of the `Location` header for a post. Not prefixed with the API root.
pub fn post_location(id: i64) -> String {
    format!("/posts/{id}")
}

fn located(status: StatusCode, id: i64) -> Located {
    (status, [(header::LOCATION, post_location(id))])
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = PostSaveRequest,
    responses(
        (status = 201, description = "Post created", headers(("Location" = String))),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn save_post(
    Extension(posts): Extension<PostService>,
    ValidatedJson(req): ValidatedJson<PostSaveRequest>,
) -> Result<Located, AppError> {
    let id = posts.save(req).await?;
    Ok(located(StatusCode::CREATED, id))
}

/// List posts.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of posts", body = PageResponse<PostSummary>),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn get_posts(
    Extension(posts): Extension<PostService>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<PageResponse<PostSummary>>, AppError> {
    let page = query.resolve(PostSort::CreatedAt, Direction::Desc)?;
    Ok(Json(posts.list(page).await?))
}

/// Get a single post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post detail", body = PostDetail),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    Extension(posts): Extension<PostService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PostDetail>, AppError> {
    Ok(Json(posts.get(id).await?))
}

/// Update a post. Answers 201 like creation does; existing clients expect it.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostUpdateRequest,
    responses(
        (status = 201, description = "Post updated", headers(("Location" = String))),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    Extension(posts): Extension<PostService>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<PostUpdateRequest>,
) -> Result<Located, AppError> {
    posts.update(id, req).await?;
    Ok(located(StatusCode::CREATED, id))
}

/// Delete a post after checking its password.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostDeleteRequest,
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Password missing"),
        (status = 403, description = "Password does not match"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    Extension(posts): Extension<PostService>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<PostDeleteRequest>,
) -> Result<StatusCode, AppError> {
    posts.delete(id, &req.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::{
    handlers::{
        __path_delete_post, __path_get_education, __path_get_post, __path_get_posts,
        __path_health_check, __path_list_educations, __path_save_post, __path_update_post,
    },
    models::{EducationDetail, EducationSummary, PostDetail, PostSummary},
    types::{PostDeleteRequest, PostSaveRequest, PostUpdateRequest},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Senior Job Training API",
        description = "Education catalog and bulletin board"
    ),
    paths(
        health_check,
        list_educations,
        get_education,
        save_post,
        get_posts,
        get_post,
        update_post,
        delete_post,
    ),
    components(schemas(
        EducationSummary,
        EducationDetail,
        PostSummary,
        PostDetail,
        PostSaveRequest,
        PostUpdateRequest,
        PostDeleteRequest,
    )),
    tags(
        (name = "educations", description = "Training program catalog"),
        (name = "posts", description = "Bulletin board"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

//! Education catalog handlers.

use axum::{Extension, response::Json};

use crate::{
    education_service::EducationService,
    errors::AppError,
    extract::{ApiPath, ApiQuery},
    models::{EducationDetail, EducationSummary},
    pagination::{Direction, EducationSort, PageQuery, PageResponse},
};

/// List educations, seeding the catalog on the first call of the process.
#[utoipa::path(
    get,
    path = "/api/v1/educations",
    tag = "educations",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of educations", body = PageResponse<EducationSummary>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 502, description = "Education source unavailable")
    )
)]
pub async fn list_educations(
    Extension(educations): Extension<EducationService>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<PageResponse<EducationSummary>>, AppError> {
    let page = query.resolve(EducationSort::State, Direction::Desc)?;
    Ok(Json(educations.list(page).await?))
}

/// Get a single education.
#[utoipa::path(
    get,
    path = "/api/v1/educations/{id}",
    tag = "educations",
    params(("id" = i64, Path, description = "Education ID")),
    responses(
        (status = 200, description = "Education detail", body = EducationDetail),
        (status = 404, description = "Education not found")
    )
)]
pub async fn get_education(
    Extension(educations): Extension<EducationService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EducationDetail>, AppError> {
    Ok(Json(educations.get(id).await?))
}

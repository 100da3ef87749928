use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;

/// A training program in the catalog, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub id: i64,
    pub source_id: String,
    pub name: String,
    pub state: String,
    pub institution: String,
    pub capacity: Option<i32>,
    pub price: Option<i64>,
    pub url: Option<String>,
    pub registration_start: Option<Date>,
    pub registration_end: Option<Date>,
    pub education_start: Option<Date>,
    pub education_end: Option<Date>,
    pub created_at: OffsetDateTime,
}

/// A training program as delivered by a seed source, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEducation {
    pub source_id: String,
    pub name: String,
    pub state: String,
    pub institution: String,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub registration_start: Option<Date>,
    #[serde(default)]
    pub registration_end: Option<Date>,
    #[serde(default)]
    pub education_start: Option<Date>,
    #[serde(default)]
    pub education_end: Option<Date>,
}

/// Education row in a catalog page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EducationSummary {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub institution: String,
    pub registration_start: Option<Date>,
    pub registration_end: Option<Date>,
    pub education_start: Option<Date>,
    pub education_end: Option<Date>,
}

impl From<Education> for EducationSummary {
    fn from(e: Education) -> Self {
        Self {
            id: e.id,
            name: e.name,
            state: e.state,
            institution: e.institution,
            registration_start: e.registration_start,
            registration_end: e.registration_end,
            education_start: e.education_start,
            education_end: e.education_end,
        }
    }
}

/// Full education detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EducationDetail {
    pub id: i64,
    pub source_id: String,
    pub name: String,
    pub state: String,
    pub institution: String,
    pub capacity: Option<i32>,
    pub price: Option<i64>,
    pub url: Option<String>,
    pub registration_start: Option<Date>,
    pub registration_end: Option<Date>,
    pub education_start: Option<Date>,
    pub education_end: Option<Date>,
}

impl From<Education> for EducationDetail {
    fn from(e: Education) -> Self {
        Self {
            id: e.id,
            source_id: e.source_id,
            name: e.name,
            state: e.state,
            institution: e.institution,
            capacity: e.capacity,
            price: e.price,
            url: e.url,
            registration_start: e.registration_start,
            registration_end: e.registration_end,
            education_start: e.education_start,
            education_end: e.education_end,
        }
    }
}

/// A bulletin board post, as stored. The password hash never leaves the service.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub content: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Post fields ready for insertion (password already hashed).
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub content: String,
    pub password_hash: String,
}

/// Editable post fields.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: String,
}

/// Post row in a board page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostSummary {
    pub id: i64,
    pub user_name: Option<String>,
    pub title: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Post> for PostSummary {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user_name: p.user_name,
            title: p.title,
            created_at: p.created_at,
        }
    }
}

/// Full post detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostDetail {
    pub id: i64,
    pub user_name: Option<String>,
    pub title: Option<String>,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Post> for PostDetail {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user_name: p.user_name,
            title: p.title,
            content: p.content,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

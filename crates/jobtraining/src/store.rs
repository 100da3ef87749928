//! Persistence seams used by the services.
//!
//! [`Database`](crate::database::Database) backs both traits with Postgres;
//! [`MemoryStore`](crate::memory::MemoryStore) keeps everything in process.

use async_trait::async_trait;

use crate::{
    errors::AppError,
    models::{Education, NewEducation, NewPost, Post, PostChanges},
    pagination::{EducationSort, PageRequest, PostSort},
};

#[async_trait]
pub trait EducationStore: Send + Sync {
    /// Inserts or refreshes records keyed by `source_id`. Returns rows written.
    async fn upsert_educations(&self, educations: &[NewEducation]) -> Result<u64, AppError>;

    /// One page of educations plus the total row count.
    async fn list_educations(
        &self,
        page: &PageRequest<EducationSort>,
    ) -> Result<(Vec<Education>, i64), AppError>;

    async fn get_education(&self, id: i64) -> Result<Option<Education>, AppError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts a post and returns its id.
    async fn insert_post(&self, post: &NewPost) -> Result<i64, AppError>;

    /// One page of posts plus the total row count.
    async fn list_posts(&self, page: &PageRequest<PostSort>) -> Result<(Vec<Post>, i64), AppError>;

    async fn get_post(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Returns false when no post has this id.
    async fn update_post(&self, id: i64, changes: &PostChanges) -> Result<bool, AppError>;

    /// Returns false when no post has this id.
    async fn delete_post(&self, id: i64) -> Result<bool, AppError>;
}

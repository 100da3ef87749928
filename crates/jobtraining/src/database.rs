use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::{Education, NewEducation, NewPost, Post, PostChanges};
use crate::pagination::{EducationSort, PageRequest, PostSort, SortField};
use crate::store::{EducationStore, PostStore};

const EDUCATION_COLUMNS: &str = r#"
    id, source_id, name, state, institution, capacity, price, url,
    registration_start, registration_end, education_start, education_end,
    created_at
"#;

const POST_COLUMNS: &str = "id, user_name, title, content, password_hash, created_at, updated_at";

/// `ORDER BY` clause for a page request. Only whitelisted column names reach the SQL.
fn order_by<S: SortField>(page: &PageRequest<S>) -> String {
    format!(
        "ORDER BY {} {} NULLS LAST, id DESC",
        page.sort.column(),
        page.direction.as_sql()
    )
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EducationStore for Database {
    async fn upsert_educations(&self, educations: &[NewEducation]) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for education in educations {
            let result = sqlx::query(
                r#"
                INSERT INTO educations (source_id, name, state, institution, capacity, price, url,
                                        registration_start, registration_end,
                                        education_start, education_end)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT (source_id) DO UPDATE SET
                    name = EXCLUDED.name,
                    state = EXCLUDED.state,
                    institution = EXCLUDED.institution,
                    capacity = EXCLUDED.capacity,
                    price = EXCLUDED.price,
                    url = EXCLUDED.url,
                    registration_start = EXCLUDED.registration_start,
                    registration_end = EXCLUDED.registration_end,
                    education_start = EXCLUDED.education_start,
                    education_end = EXCLUDED.education_end
                "#,
            )
            .bind(&education.source_id)
            .bind(&education.name)
            .bind(&education.state)
            .bind(&education.institution)
            .bind(education.capacity)
            .bind(education.price)
            .bind(&education.url)
            .bind(education.registration_start)
            .bind(education.registration_end)
            .bind(education.education_start)
            .bind(education.education_end)
            .execute(&mut *tx)
            .await?;

            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    async fn list_educations(
        &self,
        page: &PageRequest<EducationSort>,
    ) -> Result<(Vec<Education>, i64), AppError> {
        let sql = format!(
            "SELECT {EDUCATION_COLUMNS} FROM educations {} LIMIT $1 OFFSET $2",
            order_by(page)
        );
        let educations: Vec<Education> = sqlx::query_as(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM educations")
            .fetch_one(&self.pool)
            .await?;

        Ok((educations, total))
    }

    async fn get_education(&self, id: i64) -> Result<Option<Education>, AppError> {
        let sql = format!("SELECT {EDUCATION_COLUMNS} FROM educations WHERE id = $1");
        let education = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(education)
    }
}

#[async_trait]
impl PostStore for Database {
    async fn insert_post(&self, post: &NewPost) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (user_name, title, content, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&post.user_name)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_posts(&self, page: &PageRequest<PostSort>) -> Result<(Vec<Post>, i64), AppError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts {} LIMIT $1 OFFSET $2",
            order_by(page)
        );
        let posts: Vec<Post> = sqlx::query_as(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok((posts, total))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, AppError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let post = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn update_post(&self, id: i64, changes: &PostChanges) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Direction;

    #[test]
    fn test_order_by_uses_column_and_tie_breaker() {
        let page = PageRequest::new(0, 20, EducationSort::State, Direction::Desc);
        assert_eq!(order_by(&page), "ORDER BY state DESC NULLS LAST, id DESC");

        let page = PageRequest::new(0, 20, PostSort::CreatedAt, Direction::Asc);
        assert_eq!(order_by(&page), "ORDER BY created_at ASC NULLS LAST, id DESC");
    }
}

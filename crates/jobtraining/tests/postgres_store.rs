//! Integration tests for the Postgres store.
//!
//! To run these tests, you need a PostgreSQL database and the DATABASE_URL
//! environment variable set. Migrations are applied by the tests.
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p jobtraining postgres`
//!
//! Note: These tests create and clean up their own data using unique source
//! ids and post contents, so they can safely run against a development database.

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::env;
use uuid::Uuid;

use jobtraining::database::Database;
use jobtraining::models::{NewEducation, NewPost, PostChanges};
use jobtraining::pagination::{Direction, EducationSort, PageRequest, PostSort};
use jobtraining::store::{EducationStore, PostStore};

/// Get database pool, skipping tests if DATABASE_URL is not set.
async fn get_test_pool() -> Option<PgPool> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

fn education(source_id: String, state: &str) -> NewEducation {
    NewEducation {
        source_id,
        name: "Integration course".to_string(),
        state: state.to_string(),
        institution: "Test Campus".to_string(),
        capacity: None,
        price: None,
        url: None,
        registration_start: None,
        registration_end: None,
        education_start: None,
        education_end: None,
    }
}

#[tokio::test]
async fn test_education_upsert_is_idempotent() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool.clone());
    let source_id = format!("it-{}", Uuid::new_v4());

    db.upsert_educations(&[education(source_id.clone(), "closed")])
        .await
        .expect("Failed to insert education");
    let page = PageRequest::new(0, 1, EducationSort::Id, Direction::Desc);
    let (_, total_before) = db.list_educations(&page).await.unwrap();

    db.upsert_educations(&[education(source_id.clone(), "open")])
        .await
        .expect("Failed to upsert education");
    let (_, total_after) = db.list_educations(&page).await.unwrap();
    assert_eq!(total_before, total_after);

    let id: i64 = sqlx::query_scalar("SELECT id FROM educations WHERE source_id = $1")
        .bind(&source_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let stored = db.get_education(id).await.unwrap().unwrap();
    assert_eq!(stored.state, "open");

    let _ = sqlx::query("DELETE FROM educations WHERE source_id = $1")
        .bind(&source_id)
        .execute(&pool)
        .await;
}

#[tokio::test]
async fn test_post_lifecycle() {
    let Some(pool) = get_test_pool().await else {
        return;
    };
    let db = Database::new(pool);
    let marker = format!("it-{}", Uuid::new_v4());

    let id = db
        .insert_post(&NewPost {
            user_name: None,
            title: None,
            content: marker.clone(),
            password_hash: "hash".to_string(),
        })
        .await
        .expect("Failed to insert post");

    let page = PageRequest::new(0, 5, PostSort::CreatedAt, Direction::Desc);
    let (posts, total) = db.list_posts(&page).await.unwrap();
    assert!(posts.len() <= 5);
    assert!(total >= 1);
    assert!(posts.iter().any(|p| p.id == id));

    let updated = db
        .update_post(
            id,
            &PostChanges {
                title: Some("Edited".to_string()),
                content: format!("{marker} edited"),
            },
        )
        .await
        .unwrap();
    assert!(updated);
    let post = db.get_post(id).await.unwrap().unwrap();
    assert_eq!(post.title.as_deref(), Some("Edited"));
    assert!(post.updated_at >= post.created_at);

    assert!(db.delete_post(id).await.unwrap());
    assert!(db.get_post(id).await.unwrap().is_none());
    assert!(!db.delete_post(id).await.unwrap());
}

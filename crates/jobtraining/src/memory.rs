//! In-process store used by tests and `STORAGE=memory`.
//!
//! Ordering matches the Postgres queries: the requested column with nulls
//! last, then `id DESC`.

use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    errors::AppError,
    models::{Education, NewEducation, NewPost, Post, PostChanges},
    pagination::{Direction, EducationSort, PageRequest, PostSort},
    store::{EducationStore, PostStore},
};

#[derive(Default)]
struct Tables {
    educations: BTreeMap<i64, Education>,
    education_seq: i64,
    posts: BTreeMap<i64, Post>,
    post_seq: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables.lock().map_err(|_| AppError::Internal)
    }
}

fn directed<T: Ord + ?Sized>(a: &T, b: &T, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => a.cmp(b),
        Direction::Desc => b.cmp(a),
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a, b, direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_educations(a: &Education, b: &Education, page: &PageRequest<EducationSort>) -> Ordering {
    let d = page.direction;
    let primary = match page.sort {
        EducationSort::State => directed(a.state.as_str(), b.state.as_str(), d),
        EducationSort::Name => directed(a.name.as_str(), b.name.as_str(), d),
        EducationSort::Id => directed(&a.id, &b.id, d),
        EducationSort::RegistrationStart => {
            nulls_last(&a.registration_start, &b.registration_start, d)
        }
        EducationSort::EducationStart => nulls_last(&a.education_start, &b.education_start, d),
    };
    primary.then_with(|| b.id.cmp(&a.id))
}

fn compare_posts(a: &Post, b: &Post, page: &PageRequest<PostSort>) -> Ordering {
    let d = page.direction;
    let primary = match page.sort {
        PostSort::CreatedAt => directed(&a.created_at, &b.created_at, d),
        PostSort::UpdatedAt => directed(&a.updated_at, &b.updated_at, d),
        PostSort::Id => directed(&a.id, &b.id, d),
    };
    primary.then_with(|| b.id.cmp(&a.id))
}

/// Sorts, then slices out the requested page.
fn paginate<T: Clone, S>(
    mut rows: Vec<T>,
    page: &PageRequest<S>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    rows.sort_by(cmp);
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    (items, total)
}

#[async_trait]
impl EducationStore for MemoryStore {
    async fn upsert_educations(&self, educations: &[NewEducation]) -> Result<u64, AppError> {
        let mut tables = self.tables()?;

        for new in educations {
            let existing = tables
                .educations
                .values()
                .find(|e| e.source_id == new.source_id)
                .map(|e| (e.id, e.created_at));

            let (id, created_at) = match existing {
                Some(found) => found,
                None => {
                    tables.education_seq += 1;
                    (tables.education_seq, OffsetDateTime::now_utc())
                }
            };

            tables.educations.insert(
                id,
                Education {
                    id,
                    source_id: new.source_id.clone(),
                    name: new.name.clone(),
                    state: new.state.clone(),
                    institution: new.institution.clone(),
                    capacity: new.capacity,
                    price: new.price,
                    url: new.url.clone(),
                    registration_start: new.registration_start,
                    registration_end: new.registration_end,
                    education_start: new.education_start,
                    education_end: new.education_end,
                    created_at,
                },
            );
        }

        Ok(educations.len() as u64)
    }

    async fn list_educations(
        &self,
        page: &PageRequest<EducationSort>,
    ) -> Result<(Vec<Education>, i64), AppError> {
        let rows: Vec<Education> = self.tables()?.educations.values().cloned().collect();
        Ok(paginate(rows, page, |a, b| compare_educations(a, b, page)))
    }

    async fn get_education(&self, id: i64) -> Result<Option<Education>, AppError> {
        Ok(self.tables()?.educations.get(&id).cloned())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: &NewPost) -> Result<i64, AppError> {
        let mut tables = self.tables()?;
        tables.post_seq += 1;
        let id = tables.post_seq;
        let now = OffsetDateTime::now_utc();

        tables.posts.insert(
            id,
            Post {
                id,
                user_name: post.user_name.clone(),
                title: post.title.clone(),
                content: post.content.clone(),
                password_hash: post.password_hash.clone(),
                created_at: now,
                updated_at: now,
            },
        );

        Ok(id)
    }

    async fn list_posts(&self, page: &PageRequest<PostSort>) -> Result<(Vec<Post>, i64), AppError> {
        let rows: Vec<Post> = self.tables()?.posts.values().cloned().collect();
        Ok(paginate(rows, page, |a, b| compare_posts(a, b, page)))
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.tables()?.posts.get(&id).cloned())
    }

    async fn update_post(&self, id: i64, changes: &PostChanges) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(false);
        };

        post.title = changes.title.clone();
        post.content = changes.content.clone();
        post.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables()?.posts.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn education(source_id: &str, state: &str) -> NewEducation {
        NewEducation {
            source_id: source_id.to_string(),
            name: format!("Course {source_id}"),
            state: state.to_string(),
            institution: "Seoul 50+ Campus".to_string(),
            capacity: Some(20),
            price: None,
            url: None,
            registration_start: None,
            registration_end: None,
            education_start: None,
            education_end: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_ids_stable() {
        let store = MemoryStore::new();
        store
            .upsert_educations(&[education("A", "closed"), education("B", "open")])
            .await
            .unwrap();
        store
            .upsert_educations(&[education("A", "open")])
            .await
            .unwrap();

        let page = PageRequest::new(0, 10, EducationSort::Id, Direction::Asc);
        let (rows, total) = store.list_educations(&page).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(rows[0].source_id, "A");
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].state, "open");
    }

    #[tokio::test]
    async fn test_state_desc_with_id_tie_breaker() {
        let store = MemoryStore::new();
        store
            .upsert_educations(&[
                education("A", "closed"),
                education("B", "open"),
                education("C", "open"),
            ])
            .await
            .unwrap();

        let page = PageRequest::new(0, 10, EducationSort::State, Direction::Desc);
        let (rows, _) = store.list_educations(&page).await.unwrap();
        let order: Vec<&str> = rows.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_nulls_sort_last_both_directions() {
        let store = MemoryStore::new();
        let mut dated = education("A", "open");
        dated.education_start = Some(time::macros::date!(2024 - 03 - 01));
        store
            .upsert_educations(&[education("B", "open"), dated])
            .await
            .unwrap();

        for direction in [Direction::Asc, Direction::Desc] {
            let page = PageRequest::new(0, 10, EducationSort::EducationStart, direction);
            let (rows, _) = store.list_educations(&page).await.unwrap();
            assert_eq!(rows[0].source_id, "A");
        }
    }

    #[tokio::test]
    async fn test_post_page_slicing() {
        let store = MemoryStore::new();
        for i in 0..7 {
            store
                .insert_post(&NewPost {
                    user_name: None,
                    title: None,
                    content: format!("post {i}"),
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
        }

        let page = PageRequest::new(1, 3, PostSort::Id, Direction::Asc);
        let (rows, total) = store.list_posts(&page).await.unwrap();
        assert_eq!(total, 7);
        let ids: Vec<i64> = rows.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let store = MemoryStore::new();
        let changes = PostChanges {
            title: None,
            content: "x".to_string(),
        };
        assert!(!store.update_post(42, &changes).await.unwrap());
        assert!(!store.delete_post(42).await.unwrap());
    }
}

//! Store seeding utilities.

use jobtraining::{
    errors::AppError,
    models::{NewEducation, NewPost},
    password::hash_password,
    store::{EducationStore, PostStore},
};
use thiserror::Error;
use tracing::info;

use crate::generators::GeneratedPost;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] AppError),
}

/// Writes generated data through the service's store traits.
pub struct Seeder<S> {
    store: S,
    batch_size: usize,
}

impl<S> Seeder<S>
where
    S: EducationStore + PostStore,
{
    /// Creates a new seeder over the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            batch_size: 50,
        }
    }

    /// Sets the batch size for bulk operations.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Seeds posts, hashing each password the way the API does. Returns the new ids.
    pub async fn seed_posts(&self, posts: &[GeneratedPost]) -> Result<Vec<i64>, SeedError> {
        info!("Seeding {} posts...", posts.len());

        let mut ids = Vec::with_capacity(posts.len());
        for (i, post) in posts.iter().enumerate() {
            let new_post = NewPost {
                user_name: post.user_name.clone(),
                title: post.title.clone(),
                content: post.content.clone(),
                password_hash: hash_password(&post.password)?,
            };
            ids.push(self.store.insert_post(&new_post).await?);

            if (i + 1) % self.batch_size == 0 {
                info!("  Seeded {}/{} posts", i + 1, posts.len());
            }
        }

        info!("Seeded {} posts", posts.len());
        Ok(ids)
    }

    /// Upserts educations in batches. Returns rows written.
    pub async fn seed_educations(&self, educations: &[NewEducation]) -> Result<u64, SeedError> {
        info!("Seeding {} educations...", educations.len());

        let mut written = 0;
        for chunk in educations.chunks(self.batch_size) {
            written += self.store.upsert_educations(chunk).await?;
        }

        info!("Seeded {written} educations");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{EducationGenerator, PostGenerator};
    use jobtraining::{
        memory::MemoryStore,
        pagination::{Direction, EducationSort, PageRequest, PostSort},
        password::verify_password,
    };
    use rand::{SeedableRng, rngs::StdRng};

    #[tokio::test]
    async fn test_seed_posts_hashes_passwords() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(store.clone()).with_batch_size(2);
        let mut rng = StdRng::seed_from_u64(3);
        let posts = PostGenerator::new().generate_batch(3, &mut rng);

        let ids = seeder.seed_posts(&posts).await.unwrap();
        assert_eq!(ids, vec![1, 2, 3]);

        let stored = store.get_post(2).await.unwrap().unwrap();
        assert!(verify_password("1234", &stored.password_hash).unwrap());

        let page = PageRequest::new(0, 10, PostSort::Id, Direction::Asc);
        assert_eq!(store.list_posts(&page).await.unwrap().1, 3);
    }

    #[tokio::test]
    async fn test_seed_educations_twice_keeps_count() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(store.clone()).with_batch_size(4);
        let mut rng = StdRng::seed_from_u64(9);
        let educations = EducationGenerator::new().generate_batch(10, &mut rng);

        seeder.seed_educations(&educations).await.unwrap();
        seeder.seed_educations(&educations).await.unwrap();

        let page = PageRequest::new(0, 5, EducationSort::State, Direction::Desc);
        let (rows, total) = store.list_educations(&page).await.unwrap();
        assert_eq!(total, 10);
        assert_eq!(rows.len(), 5);
    }
}

//! Education catalog: first-request seeding plus read access.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::{
    errors::AppError,
    models::{EducationDetail, EducationSummary},
    pagination::{EducationSort, PageRequest, PageResponse},
    seed_source::EducationSource,
    store::EducationStore,
};

/// Loads the catalog from its source at most once per process.
///
/// Concurrent first callers wait on the same load. A failed load leaves the
/// cell empty, so the next caller tries again.
pub struct EducationSeeder {
    source: Arc<dyn EducationSource>,
    seeded: OnceCell<u64>,
}

impl EducationSeeder {
    pub fn new(source: Arc<dyn EducationSource>) -> Self {
        Self {
            source,
            seeded: OnceCell::new(),
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded.initialized()
    }

    /// Runs the seed if it has not yet succeeded. Returns the rows written by
    /// the run that did succeed.
    pub async fn ensure_seeded(&self, store: &dyn EducationStore) -> Result<u64, AppError> {
        let written = self
            .seeded
            .get_or_try_init(|| async {
                let educations = self.source.fetch_all().await.inspect_err(|e| {
                    warn!("Education seed failed, will retry on next request: {e}");
                })?;
                let written = store.upsert_educations(&educations).await?;
                info!("Seeded {written} educations");
                Ok::<_, AppError>(written)
            })
            .await?;

        Ok(*written)
    }
}

#[derive(Clone)]
pub struct EducationService {
    store: Arc<dyn EducationStore>,
    seeder: Arc<EducationSeeder>,
}

impl EducationService {
    pub fn new(store: Arc<dyn EducationStore>, seeder: Arc<EducationSeeder>) -> Self {
        Self { store, seeder }
    }

    /// Seeds on the first call of the process, then returns one page.
    pub async fn list(
        &self,
        page: PageRequest<EducationSort>,
    ) -> Result<PageResponse<EducationSummary>, AppError> {
        self.seeder.ensure_seeded(self.store.as_ref()).await?;

        let (educations, total) = self.store.list_educations(&page).await?;
        Ok(PageResponse::new(educations, total, &page).map(EducationSummary::from))
    }

    pub async fn get(&self, id: i64) -> Result<EducationDetail, AppError> {
        self.store
            .get_education(id)
            .await?
            .map(EducationDetail::from)
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        memory::MemoryStore, models::NewEducation, pagination::Direction,
        seed_source::SeedSourceError,
    };

    struct CountingSource {
        calls: AtomicUsize,
        fail_first: usize,
    }

    impl CountingSource {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first,
            }
        }
    }

    #[async_trait]
    impl EducationSource for CountingSource {
        async fn fetch_all(&self) -> Result<Vec<NewEducation>, SeedSourceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if call < self.fail_first {
                return Err(SeedSourceError::MissingService("test".to_string()));
            }
            Ok((0..3)
                .map(|i| NewEducation {
                    source_id: format!("E{i}"),
                    name: format!("Course {i}"),
                    state: if i == 1 { "open" } else { "closed" }.to_string(),
                    institution: "Campus".to_string(),
                    capacity: None,
                    price: None,
                    url: None,
                    registration_start: None,
                    registration_end: None,
                    education_start: None,
                    education_end: None,
                })
                .collect())
        }
    }

    fn service(source: Arc<CountingSource>) -> EducationService {
        EducationService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(EducationSeeder::new(source)),
        )
    }

    fn first_page() -> PageRequest<EducationSort> {
        PageRequest::new(0, 20, EducationSort::State, Direction::Desc)
    }

    #[tokio::test]
    async fn test_seeds_only_once() {
        let source = Arc::new(CountingSource::new(0));
        let svc = service(source.clone());

        let first = svc.list(first_page()).await.unwrap();
        let second = svc.list(first_page()).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.total_count, 3);
        assert_eq!(second.total_count, first.total_count);
        assert_eq!(first.items[0].state, "open");
    }

    #[tokio::test]
    async fn test_failed_seed_retries() {
        let source = Arc::new(CountingSource::new(1));
        let svc = service(source.clone());

        assert!(matches!(
            svc.list(first_page()).await,
            Err(AppError::SeedSource(_))
        ));
        assert!(!svc.seeder.is_seeded());

        let page = svc.list(first_page()).await.unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert!(svc.seeder.is_seeded());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_requests_seed_once() {
        let source = Arc::new(CountingSource::new(0));
        let svc = service(source.clone());

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.list(first_page()).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().total_count, 3);
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let svc = service(Arc::new(CountingSource::new(0)));
        assert!(matches!(svc.get(99).await, Err(AppError::NotFound)));
    }
}

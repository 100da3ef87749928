use std::sync::Arc;

use tracing::info;

use crate::{
    errors::AppError,
    models::{NewPost, PostChanges, PostDetail, PostSummary},
    pagination::{PageRequest, PageResponse, PostSort},
    password::{hash_password, verify_password},
    store::PostStore,
    types::{PostSaveRequest, PostUpdateRequest},
};

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Stores a new post and returns its id.
    pub async fn save(&self, req: PostSaveRequest) -> Result<i64, AppError> {
        let post = NewPost {
            user_name: req.user_name,
            title: req.title,
            content: req.content,
            password_hash: hash_password(&req.password)?,
        };
        let id = self.store.insert_post(&post).await?;
        info!(post_id = id, "Post created");
        Ok(id)
    }

    pub async fn list(
        &self,
        page: PageRequest<PostSort>,
    ) -> Result<PageResponse<PostSummary>, AppError> {
        let (posts, total) = self.store.list_posts(&page).await?;
        Ok(PageResponse::new(posts, total, &page).map(PostSummary::from))
    }

    pub async fn get(&self, id: i64) -> Result<PostDetail, AppError> {
        self.store
            .get_post(id)
            .await?
            .map(PostDetail::from)
            .ok_or(AppError::NotFound)
    }

    pub async fn update(&self, id: i64, req: PostUpdateRequest) -> Result<(), AppError> {
        let changes = PostChanges {
            title: req.title,
            content: req.content,
        };
        if !self.store.update_post(id, &changes).await? {
            return Err(AppError::NotFound);
        }
        info!(post_id = id, "Post updated");
        Ok(())
    }

    /// Deletes the post when `password` matches the one it was created with.
    pub async fn delete(&self, id: i64, password: &str) -> Result<(), AppError> {
        let post = self.store.get_post(id).await?.ok_or(AppError::NotFound)?;

        if !verify_password(password, &post.password_hash)? {
            return Err(AppError::PasswordMismatch);
        }

        if !self.store.delete_post(id).await? {
            return Err(AppError::NotFound);
        }
        info!(post_id = id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn service() -> PostService {
        PostService::new(Arc::new(MemoryStore::new()))
    }

    fn save_request(content: &str, password: &str) -> PostSaveRequest {
        PostSaveRequest {
            user_name: Some("grandma".to_string()),
            title: Some("Hello".to_string()),
            content: content.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_password_is_hashed_at_rest() {
        let store = Arc::new(MemoryStore::new());
        let svc = PostService::new(store.clone());
        let id = svc.save(save_request("hi", "abc")).await.unwrap();

        let stored = store.get_post(id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "abc");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_delete_checks_password() {
        let svc = service();
        let id = svc.save(save_request("hi", "abc")).await.unwrap();

        assert!(matches!(
            svc.delete(id, "wrong").await,
            Err(AppError::PasswordMismatch)
        ));
        assert!(svc.get(id).await.is_ok());

        svc.delete(id, "abc").await.unwrap();
        assert!(matches!(svc.get(id).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let svc = service();
        let req = PostUpdateRequest {
            title: None,
            content: "new".to_string(),
        };
        assert!(matches!(svc.update(7, req).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        assert!(matches!(
            service().delete(7, "abc").await,
            Err(AppError::NotFound)
        ));
    }
}

//! Request body types for API endpoints.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Post creation request.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PostSaveRequest {
    #[validate(length(max = 30, message = "Name must be at most 30 characters"))]
    pub user_name: Option<String>,
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Content must be between 1 and 2000 characters"
    ))]
    pub content: String,
    /// Required later to delete the post. Stored hashed, never returned.
    #[validate(length(
        min = 1,
        max = 64,
        message = "Password must be between 1 and 64 characters"
    ))]
    pub password: String,
}

/// Post update request.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PostUpdateRequest {
    #[validate(length(max = 100, message = "Title must be at most 100 characters"))]
    pub title: Option<String>,
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Content must be between 1 and 2000 characters"
    ))]
    pub content: String,
}

/// Post deletion request.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PostDeleteRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_post_is_valid() {
        let req: PostSaveRequest =
            serde_json::from_str(r#"{"content":"hi","password":"abc"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.title.is_none());
    }

    #[test]
    fn test_blank_content_and_password_rejected() {
        let req: PostSaveRequest =
            serde_json::from_str(r#"{"content":"","password":""}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("content"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_long_title_rejected() {
        let req = PostUpdateRequest {
            title: Some("x".repeat(101)),
            content: "ok".to_string(),
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("title"));
    }

    #[test]
    fn test_delete_request_requires_password() {
        assert!(serde_json::from_str::<PostDeleteRequest>("{}").is_err());
        let req: PostDeleteRequest = serde_json::from_str(r#"{"password":""}"#).unwrap();
        assert!(req.validate().is_err());
    }
}

//! HTTP request handlers for the job-training API.
//!
//! This module re-exports handlers from focused submodules organized by resource.

pub mod educations;
pub mod health;
pub mod posts;

// Re-export handlers from submodules (including utoipa __path types for OpenAPI)
pub use educations::{__path_get_education, __path_list_educations, get_education, list_educations};
pub use health::{__path_health_check, health_check};
pub use posts::{
    __path_delete_post, __path_get_post, __path_get_posts, __path_save_post, __path_update_post,
    delete_post, get_post, get_posts, post_location, save_post, update_post,
};

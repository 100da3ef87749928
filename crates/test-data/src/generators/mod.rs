//! Entity generators for test data.
//!
//! - [`PostGenerator`]: bulletin board posts with a known password
//! - [`EducationGenerator`]: training programs shaped like seed source rows

pub mod education;
pub mod post;

pub use education::{EducationGenConfig, EducationGenerator};
pub use post::{GeneratedPost, PostGenConfig, PostGenerator};

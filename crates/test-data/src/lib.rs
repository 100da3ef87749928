//! Test data generation for the job-training API.
//!
//! This crate generates bulletin board posts and education catalogs to
//! support manual verification and integration testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(12345);
//! let seeder = Seeder::new(Database::new(pool));
//! seeder.seed_posts(&PostGenerator::new().generate_batch(100, &mut rng)).await?;
//! ```

pub mod config;
pub mod db;
pub mod fixture;
pub mod generators;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::fixture::write_education_fixture;
    pub use crate::generators::{
        EducationGenConfig, EducationGenerator, GeneratedPost, PostGenConfig, PostGenerator,
    };
    pub use jobtraining::database::Database;
    pub use rand::{SeedableRng, rngs::StdRng};
}

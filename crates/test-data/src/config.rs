//! Configuration types for test data generation.

use std::path::PathBuf;

/// Configuration for seeding operations.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Number of posts to generate.
    pub post_count: usize,

    /// Number of educations to generate.
    pub education_count: usize,

    /// Batch size for store insertions.
    pub batch_size: usize,

    /// RNG seed for reproducible data.
    pub rng_seed: u64,

    /// When set, educations are also written here as a fixture file.
    pub fixture_out: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            post_count: 100,
            education_count: 60,
            batch_size: 50,
            rng_seed: 12345,
            fixture_out: None,
        }
    }
}

impl SeedConfig {
    /// Reads overrides from `SEED_POSTS`, `SEED_EDUCATIONS`, `SEED_RNG` and `FIXTURE_OUT`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("SEED_POSTS") {
            config.post_count = v.parse()?;
        }
        if let Ok(v) = std::env::var("SEED_EDUCATIONS") {
            config.education_count = v.parse()?;
        }
        if let Ok(v) = std::env::var("SEED_RNG") {
            config.rng_seed = v.parse()?;
        }
        config.fixture_out = std::env::var("FIXTURE_OUT").ok().map(PathBuf::from);
        Ok(config)
    }
}

//! Store integration for seeding test data.
//!
//! The [`Seeder`] inserts generated data through the same store traits the
//! API uses, so it works against Postgres and the in-memory store alike.

mod seeder;

pub use seeder::{SeedError, Seeder};

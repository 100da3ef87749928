//! Education catalog generation.

use rand::{Rng, seq::SliceRandom};
use time::{Date, Duration, macros::date};

use jobtraining::models::NewEducation;

/// Recruitment states as the Seoul 50+ portal reports them.
pub const STATES: [&str; 3] = ["접수중", "접수예정", "마감"];

const TOPICS: [&str; 10] = [
    "Smartphone Basics",
    "Barista Certification",
    "Care Worker Training",
    "Urban Farming",
    "Digital Photography",
    "Forest Guide",
    "Library Assistant",
    "Bookkeeping",
    "School Safety Patrol",
    "Tour Interpreter",
];

const LEVELS: [&str; 3] = ["Introductory", "Intermediate", "Advanced"];

const INSTITUTIONS: [&str; 5] = [
    "Seoul 50+ Central Campus",
    "Seoul 50+ Western Campus",
    "Seoul 50+ Southern Campus",
    "Seoul 50+ Northern Campus",
    "Mapo 50+ Center",
];

/// Configuration for education generation.
#[derive(Debug, Clone)]
pub struct EducationGenConfig {
    /// Earliest registration opening date.
    pub first_registration: Date,
    /// Registration openings are spread over this many days.
    pub spread_days: i64,
    /// Prefix for generated source ids.
    pub source_prefix: String,
}

impl Default for EducationGenConfig {
    fn default() -> Self {
        Self {
            first_registration: date!(2024 - 01 - 02),
            spread_days: 180,
            source_prefix: "GEN".to_string(),
        }
    }
}

/// Generates training programs shaped like seed source rows.
pub struct EducationGenerator {
    config: EducationGenConfig,
}

impl EducationGenerator {
    pub fn new() -> Self {
        Self {
            config: EducationGenConfig::default(),
        }
    }

    pub fn with_config(config: EducationGenConfig) -> Self {
        Self { config }
    }

    /// Generates the `index`-th education; the index keeps source ids unique.
    pub fn generate(&self, index: usize, rng: &mut impl Rng) -> NewEducation {
        let topic = TOPICS.choose(rng).copied().unwrap_or(TOPICS[0]);
        let level = LEVELS.choose(rng).copied().unwrap_or(LEVELS[0]);
        let institution = INSTITUTIONS.choose(rng).copied().unwrap_or(INSTITUTIONS[0]);
        let state = STATES.choose(rng).copied().unwrap_or(STATES[0]);

        let registration_start =
            self.config.first_registration + Duration::days(rng.gen_range(0..=self.config.spread_days));
        let registration_end = registration_start + Duration::days(rng.gen_range(7..=21));
        let education_start = registration_end + Duration::days(rng.gen_range(3..=14));
        let education_end = education_start + Duration::weeks(rng.gen_range(4..=12));

        let price = if rng.gen_bool(0.6) {
            0
        } else {
            rng.gen_range(1..=10) * 10_000
        };

        NewEducation {
            source_id: format!("{}-{index:05}", self.config.source_prefix),
            name: format!("{topic} ({level})"),
            state: state.to_string(),
            institution: institution.to_string(),
            capacity: Some(rng.gen_range(10..=40)),
            price: Some(price),
            url: Some(format!("https://50plus.or.kr/education/{index}")),
            registration_start: Some(registration_start),
            registration_end: Some(registration_end),
            education_start: Some(education_start),
            education_end: Some(education_end),
        }
    }

    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<NewEducation> {
        (0..count).map(|i| self.generate(i, rng)).collect()
    }
}

impl Default for EducationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_dates_are_ordered() {
        let education_gen = EducationGenerator::new();
        let mut rng = StdRng::seed_from_u64(42);

        for edu in education_gen.generate_batch(100, &mut rng) {
            let (rs, re) = (edu.registration_start.unwrap(), edu.registration_end.unwrap());
            let (es, ee) = (edu.education_start.unwrap(), edu.education_end.unwrap());
            assert!(rs < re && re < es && es < ee);
            assert!(STATES.contains(&edu.state.as_str()));
        }
    }

    #[test]
    fn test_source_ids_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let batch = EducationGenerator::new().generate_batch(500, &mut rng);
        let ids: HashSet<_> = batch.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(ids.len(), 500);
    }
}

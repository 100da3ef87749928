//! Education fixture files for `EDUCATION_SOURCE=file`.

use std::path::Path;

use jobtraining::models::NewEducation;

/// Writes educations as the JSON array `FileSource` reads.
pub fn write_education_fixture(
    path: impl AsRef<Path>,
    educations: &[NewEducation],
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(educations)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote {} educations to {}", educations.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::EducationGenerator;
    use jobtraining::seed_source::{EducationSource, FileSource};
    use rand::{SeedableRng, rngs::StdRng};

    #[tokio::test]
    async fn test_fixture_reads_back_through_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("educations.json");
        let mut rng = StdRng::seed_from_u64(5);
        let educations = EducationGenerator::new().generate_batch(4, &mut rng);

        write_education_fixture(&path, &educations).unwrap();
        let loaded = FileSource::new(&path).fetch_all().await.unwrap();
        assert_eq!(loaded, educations);
    }
}

//! Runtime configuration read from the environment.

use std::{env, path::PathBuf};

use anyhow::{Context, bail};

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_SEOUL_API_BASE: &str = "http://openapi.seoul.go.kr:8088";
const DEFAULT_SEOUL_SERVICE: &str = "FiftyPotalEduInfo";

/// Where posts and educations are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Postgres { database_url: String },
    Memory,
}

/// Where the education catalog is seeded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationSourceConfig {
    Seoul {
        base_url: String,
        api_key: String,
        service: String,
    },
    File(PathBuf),
    None,
}

impl EducationSourceConfig {
    /// Short name for logs; never includes the API key.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Seoul { .. } => "seoul",
            Self::File(_) => "file",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub storage: Storage,
    pub education_source: EducationSourceConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };

        let storage = match lookup("STORAGE").as_deref().unwrap_or("postgres") {
            "postgres" => Storage::Postgres {
                database_url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| "postgres://docker:pg@0.0.0.0".to_string()),
            },
            "memory" => Storage::Memory,
            other => bail!("STORAGE must be `postgres` or `memory`, got `{other}`"),
        };

        let education_source = match lookup("EDUCATION_SOURCE").as_deref().unwrap_or("seoul") {
            "seoul" => EducationSourceConfig::Seoul {
                base_url: lookup("SEOUL_API_BASE")
                    .unwrap_or_else(|| DEFAULT_SEOUL_API_BASE.to_string()),
                api_key: lookup("SEOUL_API_KEY")
                    .context("SEOUL_API_KEY is required when EDUCATION_SOURCE=seoul")?,
                service: lookup("SEOUL_API_SERVICE")
                    .unwrap_or_else(|| DEFAULT_SEOUL_SERVICE.to_string()),
            },
            "file" => EducationSourceConfig::File(
                lookup("EDUCATION_FIXTURE")
                    .context("EDUCATION_FIXTURE is required when EDUCATION_SOURCE=file")?
                    .into(),
            ),
            "none" => EducationSourceConfig::None,
            other => bail!("EDUCATION_SOURCE must be `seoul`, `file` or `none`, got `{other}`"),
        };

        Ok(Self {
            port,
            storage,
            education_source,
        })
    }
}

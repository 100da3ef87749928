//! Sources the education catalog is seeded from.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use time::{Date, macros::format_description};
use tracing::{debug, info};

use crate::models::NewEducation;

/// Rows per request; the Seoul Open Data API refuses larger windows.
const SEOUL_PAGE_SIZE: u32 = 1000;

/// Result code the Seoul API uses for "no data".
const SEOUL_NO_DATA: &str = "INFO-200";

#[derive(Debug, Error)]
pub enum SeedSourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API returned {code}: {message}")]
    Api { code: String, message: String },
    #[error("Response has no `{0}` section")]
    MissingService(String),
}

/// Supplies the full set of education records.
#[async_trait]
pub trait EducationSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<NewEducation>, SeedSourceError>;
}

/// Source that supplies nothing; the catalog is managed out of band.
pub struct NoopSource;

#[async_trait]
impl EducationSource for NoopSource {
    async fn fetch_all(&self) -> Result<Vec<NewEducation>, SeedSourceError> {
        Ok(Vec::new())
    }
}

/// Reads a JSON array of educations from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EducationSource for FileSource {
    async fn fetch_all(&self) -> Result<Vec<NewEducation>, SeedSourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let educations: Vec<NewEducation> = serde_json::from_slice(&bytes)?;
        info!(
            "Read {} educations from {}",
            educations.len(),
            self.path.display()
        );
        Ok(educations)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResult {
    #[serde(rename = "CODE")]
    code: String,
    #[serde(rename = "MESSAGE")]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ServicePayload {
    list_total_count: u32,
    #[serde(default)]
    row: Vec<SeoulRow>,
}

/// One row of the 50+ portal education listing. Every value arrives as text.
#[derive(Debug, Deserialize)]
struct SeoulRow {
    #[serde(rename = "LCT_NO")]
    lecture_no: String,
    #[serde(rename = "LCT_NM")]
    lecture_name: String,
    #[serde(rename = "LCT_STAT", default)]
    status: String,
    #[serde(rename = "INST_NM", default)]
    institution: String,
    #[serde(rename = "CR_PPL", default)]
    capacity: Option<String>,
    #[serde(rename = "LCT_COST", default)]
    cost: Option<String>,
    #[serde(rename = "HMPG_ADDR", default)]
    homepage: Option<String>,
    #[serde(rename = "APLY_SDT", default)]
    apply_start: Option<String>,
    #[serde(rename = "APLY_EDT", default)]
    apply_end: Option<String>,
    #[serde(rename = "EDU_SDT", default)]
    edu_start: Option<String>,
    #[serde(rename = "EDU_EDT", default)]
    edu_end: Option<String>,
}

fn parse_date(value: Option<&str>) -> Option<Date> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(value, format_description!("[year].[month].[day]")))
        .or_else(|_| Date::parse(value, format_description!("[year][month][day]")))
        .ok()
}

/// Pulls the digits out of values like `"30"`, `"10,000"` or `"무료"` (free).
fn parse_number<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    let digits: String = value?.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl From<SeoulRow> for NewEducation {
    fn from(row: SeoulRow) -> Self {
        Self {
            registration_start: parse_date(row.apply_start.as_deref()),
            registration_end: parse_date(row.apply_end.as_deref()),
            education_start: parse_date(row.edu_start.as_deref()),
            education_end: parse_date(row.edu_end.as_deref()),
            capacity: parse_number(row.capacity.as_deref()),
            price: match row.cost.as_deref() {
                Some(cost) if cost.contains("무료") => Some(0),
                cost => parse_number(cost),
            },
            url: non_empty(row.homepage),
            source_id: row.lecture_no.trim().to_string(),
            name: row.lecture_name.trim().to_string(),
            state: row.status.trim().to_string(),
            institution: row.institution.trim().to_string(),
        }
    }
}

/// Splits one Seoul API response into its total count and rows.
fn parse_page(service: &str, body: Value) -> Result<(u32, Vec<NewEducation>), SeedSourceError> {
    if let Some(section) = body.get(service) {
        let payload: ServicePayload = serde_json::from_value(section.clone())?;
        let rows = payload.row.into_iter().map(NewEducation::from).collect();
        return Ok((payload.list_total_count, rows));
    }

    match body.get("RESULT") {
        Some(result) => {
            let result: ApiResult = serde_json::from_value(result.clone())?;
            if result.code == SEOUL_NO_DATA {
                Ok((0, Vec::new()))
            } else {
                Err(SeedSourceError::Api {
                    code: result.code,
                    message: result.message,
                })
            }
        }
        None => Err(SeedSourceError::MissingService(service.to_string())),
    }
}

/// Client for the Seoul Open Data education listing.
pub struct SeoulOpenApiSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    service: String,
}

impl SeoulOpenApiSource {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            service: service.into(),
        }
    }

    fn page_url(&self, start: u32, end: u32) -> String {
        format!(
            "{}/{}/json/{}/{}/{}/",
            self.base_url, self.api_key, self.service, start, end
        )
    }
}

#[async_trait]
impl EducationSource for SeoulOpenApiSource {
    async fn fetch_all(&self) -> Result<Vec<NewEducation>, SeedSourceError> {
        let mut educations = Vec::new();
        let mut start = 1;

        loop {
            let end = start + SEOUL_PAGE_SIZE - 1;
            debug!("Fetching {} rows {start}..={end}", self.service);

            let body: Value = self
                .client
                .get(self.page_url(start, end))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            let (total, rows) = parse_page(&self.service, body)?;
            let fetched = rows.len();
            educations.extend(rows);

            if fetched == 0 || end >= total {
                break;
            }
            start = end + 1;
        }

        info!("Fetched {} educations from {}", educations.len(), self.service);
        Ok(educations)
    }
}

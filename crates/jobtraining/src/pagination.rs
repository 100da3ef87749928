//! Pagination helpers and types.
//!
//! Query parameters follow the Spring Data convention the board's clients
//! already speak: `page` is 0-based, `size` is the page length and
//! `sort=<field>[,asc|desc]` picks the ordering.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;

/// Default page length.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound for caller-requested page lengths.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// A resource field that list endpoints may order by.
pub trait SortField: Copy {
    /// Resolves a client-supplied field name (camelCase or snake_case).
    fn parse(name: &str) -> Option<Self>;

    /// Column the field maps to. Always a fixed identifier, never client text.
    fn column(self) -> &'static str;
}

/// Sortable education fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationSort {
    State,
    Name,
    Id,
    RegistrationStart,
    EducationStart,
}

impl SortField for EducationSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "state" => Some(Self::State),
            "name" => Some(Self::Name),
            "id" => Some(Self::Id),
            "registrationStart" | "registration_start" => Some(Self::RegistrationStart),
            "educationStart" | "education_start" => Some(Self::EducationStart),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Name => "name",
            Self::Id => "id",
            Self::RegistrationStart => "registration_start",
            Self::EducationStart => "education_start",
        }
    }
}

/// Sortable post fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSort {
    CreatedAt,
    UpdatedAt,
    Id,
}

impl SortField for PostSort {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Id => "id",
        }
    }
}

/// Standard pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index. Negative values read as 0.
    pub page: Option<i64>,
    /// Page length (default 20, at most 100). Values below 1 read as the default.
    pub size: Option<i64>,
    /// `<field>[,asc|desc]`.
    pub sort: Option<String>,
}

/// A resolved page request handed to the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub page: u32,
    pub size: u32,
    pub sort: S,
    pub direction: Direction,
}

impl<S> PageRequest<S> {
    pub fn new(page: u32, size: u32, sort: S, direction: Direction) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
            direction,
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

impl PageQuery {
    /// Applies resource defaults and validates the sort expression.
    pub fn resolve<S: SortField>(
        self,
        default_sort: S,
        default_direction: Direction,
    ) -> Result<PageRequest<S>, AppError> {
        let page = u32::try_from(self.page.unwrap_or(0).max(0)).unwrap_or(u32::MAX);
        let size = match self.size {
            Some(size) if size > 0 => u32::try_from(size).unwrap_or(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        let (sort, direction) = match self.sort.as_deref().map(str::trim) {
            None | Some("") => (default_sort, default_direction),
            Some(expr) => parse_sort(expr)?,
        };

        Ok(PageRequest::new(page, size, sort, direction))
    }
}

fn parse_sort<S: SortField>(expr: &str) -> Result<(S, Direction), AppError> {
    let (field, direction) = match expr.split_once(',') {
        Some((field, direction)) => {
            let direction = Direction::parse(direction).ok_or_else(|| {
                AppError::InvalidInput(format!("Invalid sort direction: {direction}"))
            })?;
            (field.trim(), direction)
        }
        None => (expr, Direction::Asc),
    };

    let field = S::parse(field)
        .ok_or_else(|| AppError::InvalidInput(format!("Invalid sort field: {field}")))?;

    Ok((field, direction))
}

/// Paginated response wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_count: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new<S>(items: Vec<T>, total_count: i64, request: &PageRequest<S>) -> Self {
        let size = i64::from(request.size);
        Self {
            items,
            page: request.page,
            size: request.size,
            total_count,
            total_pages: (total_count + size - 1) / size,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Filter, sort, and pagination contracts for listing endpoints
///
/// Listing queries in TaskHub never fetch unrestricted rows and filter them
/// afterwards; the caller's identity and filters are folded into the SQL
/// itself (see the model listing functions). This module owns the pure parts
/// of that contract: page arithmetic, sort-key parsing with documented
/// fallbacks, and the task filter set.
///
/// # Sort keys
///
/// Projects accept `field:direction` (e.g. `title:asc`); anything
/// unrecognized falls back to newest-first. Tasks accept a bare field name
/// with a fixed direction per field: `deadline` (soonest first, undated
/// last), `priority` (high first), `createdAt` (newest first, the default).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::task::{TaskPriority, TaskStatus};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on rows per page
pub const MAX_PAGE_SIZE: i64 = 100;

/// A 1-indexed pagination window
///
/// # Example
///
/// ```
/// use taskhub_shared::query::Page;
///
/// let page = Page::new(Some(2), Some(10));
/// assert_eq!(page.offset(), 10);
/// assert_eq!(page.total_pages(25), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: i64,
    limit: i64,
}

impl Page {
    /// Builds a page window from raw query parameters
    ///
    /// Missing or out-of-range values are normalized: page is at least 1,
    /// limit defaults to 10 and is clamped to [1, 100].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        Self { page, limit }
    }

    /// The 1-indexed page number
    pub fn number(&self) -> i64 {
        self.page
    }

    /// Rows per page
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Rows to skip before this page starts
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Total pages for a matching-row count: `ceil(total / limit)`
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Sort direction for caller-specified sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending
    Asc,

    /// Descending
    Desc,
}

/// Sort order for project listings
///
/// Parsed from a `field:direction` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSort {
    /// Sort by title
    Title(SortDirection),

    /// Sort by creation time (descending is the global default)
    CreatedAt(SortDirection),
}

impl ProjectSort {
    /// Parses a `field:direction` string
    ///
    /// Unrecognized fields or directions fall back to `createdAt:desc`.
    ///
    /// # Example
    ///
    /// ```
    /// use taskhub_shared::query::{ProjectSort, SortDirection};
    ///
    /// assert_eq!(ProjectSort::parse(Some("title:asc")), ProjectSort::Title(SortDirection::Asc));
    /// assert_eq!(ProjectSort::parse(Some("bogus:asc")), ProjectSort::default());
    /// assert_eq!(ProjectSort::parse(None), ProjectSort::default());
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (field, direction),
            None => (raw, "desc"),
        };

        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Self::default(),
        };

        match field {
            "title" => Self::Title(direction),
            "createdAt" => Self::CreatedAt(direction),
            _ => Self::default(),
        }
    }

    /// The ORDER BY clause for this sort
    ///
    /// Returns a whitelisted static fragment; caller input never reaches the
    /// SQL string directly.
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            Self::Title(SortDirection::Asc) => "ORDER BY p.title ASC, p.id",
            Self::Title(SortDirection::Desc) => "ORDER BY p.title DESC, p.id",
            Self::CreatedAt(SortDirection::Asc) => "ORDER BY p.created_at ASC, p.id",
            Self::CreatedAt(SortDirection::Desc) => "ORDER BY p.created_at DESC, p.id",
        }
    }
}

impl Default for ProjectSort {
    fn default() -> Self {
        Self::CreatedAt(SortDirection::Desc)
    }
}

/// Sort order for task listings
///
/// Each key carries a fixed direction: deadlines are soonest-first with
/// undated tasks last, priority is most-severe-first, creation time is
/// newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Soonest deadline first, tasks without a deadline last
    Deadline,

    /// High before medium before low
    Priority,

    /// Newest first (the default)
    #[default]
    CreatedAt,
}

impl TaskSort {
    /// Parses a task sort key, falling back to `createdAt`
    ///
    /// A `:direction` suffix is tolerated and ignored; task sort directions
    /// are fixed per field.
    ///
    /// # Example
    ///
    /// ```
    /// use taskhub_shared::query::TaskSort;
    ///
    /// assert_eq!(TaskSort::parse(Some("deadline")), TaskSort::Deadline);
    /// assert_eq!(TaskSort::parse(Some("priority:desc")), TaskSort::Priority);
    /// assert_eq!(TaskSort::parse(Some("anything")), TaskSort::CreatedAt);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        let field = raw
            .map(|s| s.split(':').next().unwrap_or(s))
            .unwrap_or("createdAt");

        match field {
            "deadline" => Self::Deadline,
            "priority" => Self::Priority,
            _ => Self::CreatedAt,
        }
    }

    /// The ORDER BY clause for this sort
    ///
    /// Ties break on creation time and then on the row id, so consecutive
    /// pages never overlap under a fixed key.
    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            Self::Deadline => "ORDER BY t.deadline ASC NULLS LAST, t.created_at DESC, t.id",
            Self::Priority => {
                "ORDER BY CASE t.priority \
                 WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, \
                 t.created_at DESC, t.id"
            }
            Self::CreatedAt => "ORDER BY t.created_at DESC, t.id",
        }
    }
}

/// Filters for task listings
///
/// `project_id` narrows the listing to one project (the service re-checks
/// the viewer's access to that project independently); the rest are plain
/// column filters.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Restrict to a single project
    pub project_id: Option<Uuid>,

    /// Exact status match
    pub status: Option<TaskStatus>,

    /// Exact priority match
    pub priority: Option<TaskPriority>,

    /// Case-insensitive substring match on the title
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let page = Page::default();
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_normalizes_bad_input() {
        let page = Page::new(Some(0), Some(-5));
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), 1);

        let page = Page::new(Some(-3), Some(100_000));
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_offset_arithmetic() {
        let page = Page::new(Some(3), Some(25));
        assert_eq!(page.offset(), 50);
        assert_eq!(page.limit(), 25);
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        let page = Page::new(None, Some(10));
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(1), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(page.total_pages(95), 10);
    }

    #[test]
    fn test_project_sort_parse() {
        assert_eq!(
            ProjectSort::parse(Some("title:asc")),
            ProjectSort::Title(SortDirection::Asc)
        );
        assert_eq!(
            ProjectSort::parse(Some("title:desc")),
            ProjectSort::Title(SortDirection::Desc)
        );
        assert_eq!(
            ProjectSort::parse(Some("createdAt:asc")),
            ProjectSort::CreatedAt(SortDirection::Asc)
        );

        // Bare field defaults to descending
        assert_eq!(
            ProjectSort::parse(Some("title")),
            ProjectSort::Title(SortDirection::Desc)
        );
    }

    #[test]
    fn test_project_sort_falls_back_to_created_desc() {
        assert_eq!(ProjectSort::parse(None), ProjectSort::default());
        assert_eq!(ProjectSort::parse(Some("")), ProjectSort::default());
        assert_eq!(ProjectSort::parse(Some("owner:asc")), ProjectSort::default());
        assert_eq!(
            ProjectSort::parse(Some("title:sideways")),
            ProjectSort::default()
        );
    }

    #[test]
    fn test_task_sort_parse() {
        assert_eq!(TaskSort::parse(Some("deadline")), TaskSort::Deadline);
        assert_eq!(TaskSort::parse(Some("priority")), TaskSort::Priority);
        assert_eq!(TaskSort::parse(Some("createdAt")), TaskSort::CreatedAt);
        assert_eq!(TaskSort::parse(None), TaskSort::CreatedAt);
        assert_eq!(TaskSort::parse(Some("unknown")), TaskSort::CreatedAt);
    }

    #[test]
    fn test_task_sort_direction_suffix_ignored() {
        assert_eq!(TaskSort::parse(Some("deadline:desc")), TaskSort::Deadline);
        assert_eq!(TaskSort::parse(Some("priority:asc")), TaskSort::Priority);
    }

    #[test]
    fn test_order_by_fragments_are_whitelisted() {
        // Every variant renders a static fragment; nothing caller-supplied
        // can reach the SQL string.
        assert!(ProjectSort::default().order_by().starts_with("ORDER BY"));
        assert!(TaskSort::Deadline.order_by().contains("NULLS LAST"));
        assert!(TaskSort::Priority.order_by().contains("WHEN 'high' THEN 0"));
    }
}

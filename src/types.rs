use serde::{Deserialize, Serialize};

/// Category prefix marking a violation of a forbidden language feature
pub const FORBIDDEN_MARKER: &str = "[FORBIDDEN]";

/// A single style violation reported by the checking service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Category name, possibly prefixed with `[FORBIDDEN]`
    pub category: String,
    /// Line the violation was found on (1-indexed)
    pub line_number: u32,
    /// How many times this category occurred in the whole file
    pub occurrence_count: u32,
    /// Explanation of the violation
    pub message: String,
    /// The offending source line as the service saw it
    pub source_line: String,
}

impl ViolationRecord {
    pub fn new(
        category: impl Into<String>,
        line_number: u32,
        occurrence_count: u32,
        message: impl Into<String>,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            line_number,
            occurrence_count,
            message: message.into(),
            source_line: source_line.into(),
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.category.starts_with(FORBIDDEN_MARKER)
    }

    /// Category with the forbidden marker removed
    pub fn display_category(&self) -> &str {
        self.category
            .strip_prefix(FORBIDDEN_MARKER)
            .unwrap_or(&self.category)
            .trim()
    }
}

/// Violations in the order the service reported them
pub type ViolationList = Vec<ViolationRecord>;

/// Snapshot of the editor contents sent in one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub source: String,
    pub tab_size: u8,
}

/// Aggregate counts over a violation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub unique_categories: usize,
    pub unique_forbidden: usize,
}

impl Summary {
    pub fn of(violations: &[ViolationRecord]) -> Self {
        let mut categories: Vec<&str> = violations.iter().map(|v| v.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();

        Self {
            total: violations.len(),
            unique_categories: categories.len(),
            unique_forbidden: categories
                .iter()
                .filter(|c| c.starts_with(FORBIDDEN_MARKER))
                .count(),
        }
    }
}

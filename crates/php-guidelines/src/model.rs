use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Topical category of a PHP question. The set is closed.
///
/// Variants are declared in priority order (highest first), so the derived
/// `Ord` doubles as the tie-break order used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Testing,
    Performance,
    Framework,
    Architecture,
    General,
}

impl Category {
    /// Every category, highest priority first.
    pub const ALL: [Category; 6] = [
        Category::Security,
        Category::Testing,
        Category::Performance,
        Category::Framework,
        Category::Architecture,
        Category::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Testing => "testing",
            Category::Performance => "performance",
            Category::Framework => "framework",
            Category::Architecture => "architecture",
            Category::General => "general",
        }
    }

    /// Comma-separated tags in priority order.
    pub fn tags() -> String {
        Category::ALL.map(Category::as_str).join(", ")
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Security => "Security",
            Category::Testing => "Testing",
            Category::Performance => "Performance",
            Category::Framework => "Framework usage",
            Category::Architecture => "Architecture & code review",
            Category::General => "General PHP",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| AppError::UnknownCategory(tag.to_string()))
    }
}

/// A single imperative recommendation, e.g. "Use prepared statements for every query".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceItem {
    pub category: Category,
    pub text: String,
}

/// A named example snippet with `{placeholder}` tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleTemplate {
    /// Unique template name, e.g. "pdo_prepared_statement"
    pub name: String,
    /// Owning category; uncategorized templates are reachable by name only
    #[serde(default)]
    pub category: Option<Category>,
    /// One-line summary of what the example shows
    #[serde(default)]
    pub description: String,
    /// Template text (usually PHP source)
    pub body: String,
}

/// One line of the code-review checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub text: String,
    #[serde(default)]
    pub checked: bool,
}

/// The response bundle for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub category: Category,
    pub items: Vec<GuidanceItem>,
    pub examples: Vec<ExampleTemplate>,
}

/// Assistant persona; its summary becomes the server instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub summary: String,
    /// Stated priorities, most important first
    #[serde(default)]
    pub priorities: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_category_tags() {
        assert_eq!("security".parse::<Category>().unwrap(), Category::Security);
        assert_eq!("  Framework ".parse::<Category>().unwrap(), Category::Framework);
        assert_eq!("GENERAL".parse::<Category>().unwrap(), Category::General);
    }

    #[test]
    fn reject_unknown_tag() {
        let err = "devops".parse::<Category>().unwrap_err();
        assert!(matches!(err, AppError::UnknownCategory(ref tag) if tag == "devops"));
    }

    #[test]
    fn priority_order_matches_declaration() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert!(Category::Security < Category::Testing);
        assert!(Category::Architecture < Category::General);
    }

    #[test]
    fn tags_follow_priority_order() {
        assert_eq!(
            Category::tags(),
            "security, testing, performance, framework, architecture, general"
        );
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Category::Performance).unwrap();
        assert_eq!(json, "\"performance\"");
        for c in Category::ALL {
            assert_eq!(c.to_string(), c.as_str());
        }
    }
}

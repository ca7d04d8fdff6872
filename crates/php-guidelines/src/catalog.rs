use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::model::{Category, ChecklistEntry, ExampleTemplate, GuidanceItem, Persona};

/// Catalog shipped inside the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.toml");

/// The validated static definition all guidance is served from.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub items: Vec<GuidanceItem>,
    #[serde(default)]
    pub templates: Vec<ExampleTemplate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistEntry>,
}

/// Load the catalog from `path`, or the embedded one when `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    let catalog = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            parse_catalog(&content).map_err(|e| match e {
                AppError::Catalog { line, message } => AppError::Catalog {
                    line,
                    message: format!("{message} in {}", path.display()),
                },
                other => other,
            })?
        }
        None => parse_catalog(EMBEDDED_CATALOG)?,
    };

    info!(
        items = catalog.items.len(),
        templates = catalog.templates.len(),
        checklist = catalog.checklist.len(),
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse and validate catalog TOML.
pub fn parse_catalog(content: &str) -> Result<Catalog, AppError> {
    let mut catalog: Catalog = toml::from_str(content).map_err(|e| AppError::Catalog {
        line: e
            .span()
            .map(|span| line_of(content, span.start))
            .unwrap_or(0),
        message: e.message().to_string(),
    })?;

    for template in &mut catalog.templates {
        template.name = template.name.trim().to_string();
    }
    for entry in &mut catalog.checklist {
        entry.text = entry.text.trim().to_string();
        entry.checked = false;
    }

    validate(&catalog)?;
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<(), AppError> {
    for category in Category::ALL {
        if !catalog.items.iter().any(|i| i.category == category) {
            return Err(invalid(format!("category '{category}' has no guidance items")));
        }
    }

    if let Some(item) = catalog.items.iter().find(|i| i.text.trim().is_empty()) {
        return Err(invalid(format!("empty guidance item in category '{}'", item.category)));
    }

    let mut names = HashSet::new();
    for template in &catalog.templates {
        let name = template.name.as_str();
        if name.is_empty() {
            return Err(invalid("template with empty name".to_string()));
        }
        if !names.insert(name.to_ascii_lowercase()) {
            return Err(invalid(format!("duplicate template name: {name}")));
        }
    }

    let mut seen = HashSet::new();
    for entry in &catalog.checklist {
        if !seen.insert(entry.text.as_str()) {
            return Err(invalid(format!("duplicate checklist entry: {}", entry.text)));
        }
    }

    Ok(())
}

fn invalid(message: String) -> AppError {
    AppError::Catalog { line: 0, message }
}

fn line_of(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(extra: &str) -> String {
        let mut content = String::new();
        for category in Category::ALL {
            content.push_str(&format!(
                "[[items]]\ncategory = \"{category}\"\ntext = \"Do the {category} thing\"\n\n"
            ));
        }
        content.push_str(extra);
        content
    }

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = parse_catalog(EMBEDDED_CATALOG).expect("embedded catalog should parse");
        assert!(!catalog.persona.summary.is_empty());
        assert!(!catalog.checklist.is_empty());
        assert!(catalog.templates.len() >= Category::ALL.len());
        assert!(catalog.checklist.iter().all(|e| !e.checked));
    }

    #[test]
    fn parse_minimal_catalog() {
        let content = minimal(
            r#"
[[templates]]
name = "value_object"
description = "Immutable value object"
body = "final class {class_name} {}"

[[checklist]]
text = "Inputs are validated"
"#,
        );
        let catalog = parse_catalog(&content).unwrap();
        assert_eq!(catalog.items.len(), Category::ALL.len());
        assert_eq!(catalog.templates[0].category, None);
        assert_eq!(catalog.checklist[0].text, "Inputs are validated");
    }

    #[test]
    fn reject_category_without_items() {
        let content = r#"
[[items]]
category = "security"
text = "Escape output"
"#;
        let err = parse_catalog(content).unwrap_err();
        assert!(err.to_string().contains("'testing' has no guidance items"), "{err}");
    }

    #[test]
    fn reject_unknown_category() {
        let content = minimal("[[items]]\ncategory = \"devops\"\ntext = \"Ship it\"\n");
        let err = parse_catalog(&content).unwrap_err();
        assert!(matches!(err, AppError::Catalog { .. }));
        assert!(err.to_string().contains("devops"), "{err}");
    }

    #[test]
    fn syntax_error_reports_line() {
        let content = minimal("[[templates]]\nname = \"broken\nbody = \"x\"\n");
        let err = parse_catalog(&content).unwrap_err();
        match err {
            AppError::Catalog { line, .. } => assert!(line >= 25, "line was {line}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reject_duplicate_checklist_text() {
        let content = minimal("[[checklist]]\ntext = \"Tests pass\"\n\n[[checklist]]\ntext = \"Tests pass \"\n");
        let err = parse_catalog(&content).unwrap_err();
        assert!(err.to_string().contains("duplicate checklist entry"), "{err}");
    }

    #[test]
    fn reject_duplicate_template_name() {
        let content = minimal(
            "[[templates]]\nname = \"dto\"\nbody = \"a\"\n\n[[templates]]\nname = \"DTO\"\nbody = \"b\"\n",
        );
        let err = parse_catalog(&content).unwrap_err();
        assert!(err.to_string().contains("duplicate template name"), "{err}");
    }

    #[test]
    fn names_and_checklist_text_are_trimmed() {
        let content = minimal(
            "[[templates]]\nname = \" dto \"\nbody = \"a\"\n\n[[checklist]]\ntext = \"  Tests pass\"\n",
        );
        let catalog = parse_catalog(&content).unwrap();
        assert_eq!(catalog.templates[0].name, "dto");
        assert_eq!(catalog.checklist[0].text, "Tests pass");
    }

    #[test]
    fn reject_blank_template_name() {
        let content = minimal("[[templates]]\nname = \"   \"\nbody = \"a\"\n");
        let err = parse_catalog(&content).unwrap_err();
        assert!(err.to_string().contains("empty name"), "{err}");
    }

    #[test]
    fn checked_flag_is_reset() {
        let content = minimal("[[checklist]]\ntext = \"Done\"\nchecked = true\n");
        let catalog = parse_catalog(&content).unwrap();
        assert!(!catalog.checklist[0].checked);
    }

    #[test]
    fn line_numbers_are_one_based() {
        assert_eq!(line_of("abc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 4), 3);
    }
}

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::catalog::Catalog;
use crate::classifier::{self, Classification};
use crate::error::AppError;
use crate::model::{Bundle, Category, ChecklistEntry, ExampleTemplate, Persona};
use crate::template::render;

/// Classification result together with the bundle it selects.
#[derive(Debug, Clone)]
pub struct Answer<'a> {
    pub classification: Classification,
    pub bundle: &'a Bundle,
}

/// Item and example counts for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub item_count: usize,
    pub example_count: usize,
}

/// Immutable lookup table from categories to guidance bundles.
///
/// Built once from a validated [`Catalog`]; every method is a read.
#[derive(Debug)]
pub struct GuidanceDispatcher {
    persona: Persona,
    bundles: BTreeMap<Category, Bundle>,
    templates: Vec<ExampleTemplate>,
    checklist: Vec<ChecklistEntry>,
}

impl GuidanceDispatcher {
    pub fn new(catalog: Catalog) -> Self {
        let mut bundles: BTreeMap<Category, Bundle> = Category::ALL
            .into_iter()
            .map(|category| {
                (
                    category,
                    Bundle {
                        category,
                        items: Vec::new(),
                        examples: Vec::new(),
                    },
                )
            })
            .collect();

        for item in catalog.items {
            if let Some(bundle) = bundles.get_mut(&item.category) {
                bundle.items.push(item);
            }
        }

        for template in &catalog.templates {
            if let Some(bundle) = template.category.and_then(|c| bundles.get_mut(&c)) {
                bundle.examples.push(template.clone());
            }
        }

        Self {
            persona: catalog.persona,
            bundles,
            templates: catalog.templates,
            checklist: catalog.checklist,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn classify(&self, text: &str) -> Category {
        self.classify_detailed(text).category
    }

    pub fn classify_detailed(&self, text: &str) -> Classification {
        let classification = classifier::classify(text);
        debug!(
            category = %classification.category,
            matched = ?classification.matched_keywords,
            "classified question"
        );
        classification
    }

    pub fn get_bundle(&self, category: Category) -> Result<&Bundle, AppError> {
        self.bundles
            .get(&category)
            .ok_or_else(|| AppError::UnknownCategory(category.to_string()))
    }

    /// Classify `text` and return the matching bundle.
    pub fn answer(&self, text: &str) -> Result<Answer<'_>, AppError> {
        let classification = self.classify_detailed(text);
        let bundle = self.get_bundle(classification.category)?;
        Ok(Answer {
            classification,
            bundle,
        })
    }

    pub fn get_checklist(&self) -> &[ChecklistEntry] {
        &self.checklist
    }

    /// Markdown rendering of the review checklist, one task item per line.
    pub fn render_checklist(&self) -> String {
        self.checklist
            .iter()
            .map(|entry| {
                let mark = if entry.checked { 'x' } else { ' ' };
                format!("- [{mark}] {}", entry.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn templates(&self) -> &[ExampleTemplate] {
        &self.templates
    }

    pub fn template(&self, name: &str) -> Result<&ExampleTemplate, AppError> {
        let name = name.trim();
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AppError::TemplateNotFound(name.to_string()))
    }

    pub fn render_example(
        &self,
        template: &ExampleTemplate,
        substitutions: &HashMap<String, String>,
    ) -> Result<String, AppError> {
        render(template, substitutions)
    }

    /// Categories in priority order with their content counts.
    pub fn categories(&self) -> Vec<CategoryStats> {
        self.bundles
            .values()
            .map(|b| CategoryStats {
                category: b.category,
                item_count: b.items.len(),
                example_count: b.examples.len(),
            })
            .collect()
    }
}

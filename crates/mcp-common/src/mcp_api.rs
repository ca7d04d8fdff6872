use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QuestionParams {
    /// The free-form question, e.g. "How do I prevent SQL injection?".
    pub question: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetGuidanceParams {
    /// Category tag such as "security" or "testing".
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RenderExampleParams {
    /// Template name as returned by list_templates, e.g. "phpunit_mock".
    pub template: String,
    /// Placeholder values keyed by placeholder name (without braces).
    #[serde(default)]
    pub substitutions: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationResponse {
    pub category: String,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: String,
    pub display_name: String,
    pub item_count: usize,
    pub example_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    /// Categories in priority order, highest first.
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExampleDetail {
    pub name: String,
    pub category: Option<String>,
    pub description: String,
    pub body: String,
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GuidanceBundleResponse {
    pub category: CategoryInfo,
    /// Recommendations in presentation order.
    pub items: Vec<String>,
    pub examples: Vec<ExampleDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnswerResponse {
    pub classification: ClassificationResponse,
    pub guidance: GuidanceBundleResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistItem {
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistResponse {
    pub entries: Vec<ChecklistItem>,
    /// The same checklist as markdown task items.
    pub markdown: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TemplateSummary {
    pub name: String,
    pub category: Option<String>,
    pub description: String,
    pub placeholders: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderExampleResponse {
    pub template: String,
    pub rendered: String,
}

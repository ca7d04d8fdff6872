/// MCP server exposing the PHP guidance dispatcher.
///
/// The dispatcher is immutable, so clones of the server share it through an
/// `Arc` without locking.
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use crate::classifier::Classification;
use crate::dispatcher::GuidanceDispatcher;
use crate::error::AppError;
use crate::model::{Bundle, Category, ExampleTemplate};
use crate::template::placeholders;
use mcp_common::mcp_api::{
    AnswerResponse, CategoryInfo, CategoryListResponse, ChecklistItem, ChecklistResponse,
    ClassificationResponse, ExampleDetail, GetGuidanceParams, GuidanceBundleResponse,
    QuestionParams, RenderExampleParams, RenderExampleResponse, TemplateListResponse,
    TemplateSummary,
};

#[derive(Clone)]
pub struct PhpGuidelinesServer {
    dispatcher: Arc<GuidanceDispatcher>,
    tool_router: ToolRouter<PhpGuidelinesServer>,
}

impl PhpGuidelinesServer {
    pub fn new(dispatcher: Arc<GuidanceDispatcher>) -> Self {
        Self {
            dispatcher,
            tool_router: Self::tool_router(),
        }
    }

    fn category_info(&self, category: Category) -> CategoryInfo {
        let (item_count, example_count) = self
            .dispatcher
            .get_bundle(category)
            .map(|b| (b.items.len(), b.examples.len()))
            .unwrap_or((0, 0));
        CategoryInfo {
            key: category.to_string(),
            display_name: category.display_name().to_string(),
            item_count,
            example_count,
        }
    }

    fn to_api_bundle(&self, bundle: &Bundle) -> GuidanceBundleResponse {
        GuidanceBundleResponse {
            category: self.category_info(bundle.category),
            items: bundle.items.iter().map(|i| i.text.clone()).collect(),
            examples: bundle.examples.iter().map(to_api_example).collect(),
        }
    }
}

#[tool_router]
impl PhpGuidelinesServer {
    #[tool(description = "Classify a PHP question into a guidance category (security, testing, performance, framework, architecture, general).")]
    async fn classify_question(
        &self,
        Parameters(params): Parameters<QuestionParams>,
    ) -> Result<Json<ClassificationResponse>, String> {
        let question = non_empty(&params.question, "question")?;
        let classification = self.dispatcher.classify_detailed(question);
        Ok(Json(to_api_classification(&classification)))
    }

    #[tool(description = "Get the guidance bundle (recommendations and example templates) for a category tag.")]
    async fn get_guidance(
        &self,
        Parameters(params): Parameters<GetGuidanceParams>,
    ) -> Result<Json<GuidanceBundleResponse>, String> {
        let tag = non_empty(&params.category, "category")?;
        let category: Category = tag.parse().map_err(tool_error)?;
        let bundle = self.dispatcher.get_bundle(category).map_err(tool_error)?;
        Ok(Json(self.to_api_bundle(bundle)))
    }

    #[tool(description = "Answer a PHP question: classify it and return the matching guidance bundle.")]
    async fn answer_question(
        &self,
        Parameters(params): Parameters<QuestionParams>,
    ) -> Result<Json<AnswerResponse>, String> {
        let question = non_empty(&params.question, "question")?;
        let answer = self.dispatcher.answer(question).map_err(tool_error)?;
        Ok(Json(AnswerResponse {
            classification: to_api_classification(&answer.classification),
            guidance: self.to_api_bundle(answer.bundle),
        }))
    }

    #[tool(description = "List guidance categories in priority order with item and example counts.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let categories = self
            .dispatcher
            .categories()
            .into_iter()
            .map(|s| CategoryInfo {
                key: s.category.to_string(),
                display_name: s.category.display_name().to_string(),
                item_count: s.item_count,
                example_count: s.example_count,
            })
            .collect();
        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Get the PHP code review checklist.")]
    async fn get_checklist(&self) -> Result<Json<ChecklistResponse>, String> {
        let entries = self
            .dispatcher
            .get_checklist()
            .iter()
            .map(|e| ChecklistItem {
                text: e.text.clone(),
                checked: e.checked,
            })
            .collect();
        Ok(Json(ChecklistResponse {
            entries,
            markdown: self.dispatcher.render_checklist(),
        }))
    }

    #[tool(description = "List all example templates with their placeholders.")]
    async fn list_templates(&self) -> Result<Json<TemplateListResponse>, String> {
        let templates = self
            .dispatcher
            .templates()
            .iter()
            .map(|t| TemplateSummary {
                name: t.name.clone(),
                category: t.category.map(|c| c.to_string()),
                description: t.description.clone(),
                placeholders: placeholders(&t.body),
            })
            .collect();
        Ok(Json(TemplateListResponse { templates }))
    }

    #[tool(description = "Render an example template. Every placeholder must be given a substitution.")]
    async fn render_example(
        &self,
        Parameters(params): Parameters<RenderExampleParams>,
    ) -> Result<Json<RenderExampleResponse>, String> {
        let name = non_empty(&params.template, "template")?;
        let template = self.dispatcher.template(name).map_err(tool_error)?;
        let rendered = self
            .dispatcher
            .render_example(template, &params.substitutions)
            .map_err(tool_error)?;
        info!(template = %template.name, "example rendered");
        Ok(Json(RenderExampleResponse {
            template: template.name.clone(),
            rendered,
        }))
    }
}

fn non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(value)
}

fn tool_error(e: AppError) -> String {
    warn!(error = %e, "tool call failed");
    e.to_string()
}

fn to_api_classification(classification: &Classification) -> ClassificationResponse {
    ClassificationResponse {
        category: classification.category.to_string(),
        matched_keywords: classification
            .matched_keywords
            .iter()
            .map(|k| k.to_string())
            .collect(),
    }
}

fn to_api_example(template: &ExampleTemplate) -> ExampleDetail {
    ExampleDetail {
        name: template.name.clone(),
        category: template.category.map(|c| c.to_string()),
        description: template.description.clone(),
        body: template.body.clone(),
        placeholders: placeholders(&template.body),
    }
}

#[tool_handler]
impl ServerHandler for PhpGuidelinesServer {
    fn get_info(&self) -> ServerInfo {
        let persona = self.dispatcher.persona();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "php-guidelines".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: (!persona.name.is_empty()).then(|| persona.name.clone()),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "{} Priorities: {}. Use answer_question for free-form PHP questions, \
                 get_guidance for a known category, get_checklist during code review, and \
                 list_templates with render_example for ready-made snippets.",
                persona.summary.trim(),
                persona.priorities.join(" > ")
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("catalog error at line {line}: {message}")]
    Catalog { line: usize, message: String },

    #[error(
        "unknown category: '{0}'. Available categories: {available}",
        available = crate::model::Category::tags()
    )]
    UnknownCategory(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template '{template}' requires placeholder '{key}' but no substitution was given")]
    MissingPlaceholder { template: String, key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn unknown_category_lists_every_tag() {
        let message = AppError::UnknownCategory("devops".to_string()).to_string();
        assert!(message.starts_with("unknown category: 'devops'"), "{message}");
        for category in Category::ALL {
            assert!(message.contains(category.as_str()), "{message} lacks {category}");
        }
    }
}

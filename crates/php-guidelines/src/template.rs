/// Placeholder handling for example templates.
///
/// A token is `{name}` where `name` starts with a lowercase ASCII letter and
/// continues with lowercase letters, digits or `_`. Anything else in braces
/// (PHP blocks, `{$var}` interpolation, `{ }`) is literal text.
use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::AppError;
use crate::model::ExampleTemplate;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}").expect("valid regex"))
}

/// Distinct placeholder keys in order of first appearance.
pub fn placeholders(body: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in placeholder_re().captures_iter(body) {
        let key = &caps[1];
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Substitute every placeholder in `template`.
///
/// Fails on the first placeholder without a substitution; nothing is
/// rendered in that case. Values are inserted verbatim and never rescanned.
pub fn render(
    template: &ExampleTemplate,
    substitutions: &HashMap<String, String>,
) -> Result<String, AppError> {
    if let Some(key) = placeholders(&template.body)
        .into_iter()
        .find(|k| !substitutions.contains_key(k))
    {
        return Err(AppError::MissingPlaceholder {
            template: template.name.clone(),
            key,
        });
    }

    let rendered = placeholder_re().replace_all(&template.body, |caps: &Captures| {
        substitutions
            .get(&caps[1])
            .map(String::as_str)
            .unwrap_or_default()
            .to_string()
    });
    Ok(rendered.into_owned())
}

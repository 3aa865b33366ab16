//! Variable replacer
//!
//! Replaces `{name}` tokens with values from a [`DocumentContext`]. Token
//! names start with a letter or underscore and may contain letters, digits,
//! underscores and dots (`{meta.shelfmark}`). Text outside tokens is copied
//! unchanged.

use super::traits::TemplateResolver;
use crate::domain::{DocumentContext, TemplateError};
use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_.]*)\}").expect("token pattern is a valid regex")
    })
}

/// Default [`TemplateResolver`] implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableReplacer;

impl VariableReplacer {
    /// Creates a new variable replacer
    pub fn new() -> Self {
        Self
    }
}

impl TemplateResolver for VariableReplacer {
    fn substitute(
        &self,
        template: &str,
        context: &DocumentContext,
    ) -> Result<String, TemplateError> {
        let mut output = String::with_capacity(template.len());
        let mut last_end = 0;

        for captures in token_pattern().captures_iter(template) {
            let whole = captures.get(0).ok_or_else(|| TemplateError::Invalid {
                template: template.to_string(),
                reason: "token match without span".to_string(),
            })?;
            let name = &captures[1];
            let value = context
                .get(name)
                .ok_or_else(|| TemplateError::UnresolvableToken {
                    token: name.to_string(),
                    template: template.to_string(),
                })?;

            output.push_str(&template[last_end..whole.start()]);
            output.push_str(value);
            last_end = whole.end();
        }

        output.push_str(&template[last_end..]);
        Ok(output)
    }
}

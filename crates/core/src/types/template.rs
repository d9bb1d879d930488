//! Compiled value templates
//!
//! A template has exactly one input: the raw secret string, bound to the
//! name `value`. The dot placeholder of Go templates (`{{.}}`) is accepted
//! as an alias so existing references keep working.

use lazy_static::lazy_static;
use minijinja::{context, Environment, UndefinedBehavior};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

lazy_static! {
    // `{{.}}`, `{{ . }}`, `{{- . | upper -}}` and friends
    static ref DOT_PLACEHOLDER: Regex = Regex::new(r"\{\{(-?)\s*\.\s*(\||-?\}\})").unwrap();
}

const TEMPLATE_NAME: &str = "value";

/// A value template compiled once when the reference is parsed
#[derive(Clone)]
pub struct ValueTemplate {
    source: String,
    env: Arc<Environment<'static>>,
}

impl ValueTemplate {
    /// Compile `source`, failing on malformed syntax
    pub fn compile(source: &str) -> Result<Self, minijinja::Error> {
        let normalized = DOT_PLACEHOLDER
            .replace_all(source, "{{${1} value ${2}")
            .into_owned();

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(TEMPLATE_NAME, normalized)?;

        Ok(Self {
            source: source.to_string(),
            env: Arc::new(env),
        })
    }

    /// Render the template with `value` as its only input
    pub fn render(&self, value: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template(TEMPLATE_NAME)?
            .render(context! { value => value })
    }

    /// The template text as written in the reference
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for ValueTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueTemplate")
            .field("source", &self.source)
            .finish()
    }
}

impl PartialEq for ValueTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ValueTemplate {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_placeholder() {
        let template = ValueTemplate::compile("password={{ value }}").unwrap();
        assert_eq!(template.render("s3cr3t").unwrap(), "password=s3cr3t");
    }

    #[test]
    fn test_dot_placeholder_alias() {
        for source in ["{{.}}", "{{ . }}", "{{- . -}}"] {
            let template = ValueTemplate::compile(source).unwrap();
            assert_eq!(template.render("abc").unwrap(), "abc", "source {source}");
        }
        let template = ValueTemplate::compile("{{ . | upper }}").unwrap();
        assert_eq!(template.render("abc").unwrap(), "ABC");
    }

    #[test]
    fn test_value_is_not_escaped() {
        let template = ValueTemplate::compile("<{{ value }}>").unwrap();
        assert_eq!(template.render("a&b\"c").unwrap(), "<a&b\"c>");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let template = ValueTemplate::compile("{{ value }}\n").unwrap();
        assert_eq!(template.render("x").unwrap(), "x\n");
    }

    #[test]
    fn test_malformed_syntax_fails_to_compile() {
        assert!(ValueTemplate::compile("{{ value ").is_err());
        assert!(ValueTemplate::compile("{% if %}").is_err());
    }

    #[test]
    fn test_unknown_name_fails_to_render() {
        let template = ValueTemplate::compile("{{ missing }}").unwrap();
        assert!(template.render("x").is_err());
    }
}

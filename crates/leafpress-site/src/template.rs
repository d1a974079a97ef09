//! Page layout templates.
//!
//! A lightweight string-interpolation template system. Placeholders are
//! written `{{ name }}`; `{{ name? }}` renders nothing when the variable is
//! missing. Substituted values are not re-scanned.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped, true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        registry.register(Template::new("article", DEFAULT_ARTICLE_TEMPLATE));
        registry.register(Template::new("list", DEFAULT_LIST_TEMPLATE));
        registry
    }

    /// Register a template, replacing one with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        self.get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?
            .render(context)
    }
}

/// Outer page shell.
pub const DEFAULT_BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }} | {{ site_title }}</title>
    <meta name="description" content="{{ description? }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <style>
        body { font-family: system-ui, sans-serif; line-height: 1.7; color: #1e293b; margin: 0; }
        .container { max-width: 760px; margin: 0 auto; padding: 0 1.25rem; }
        header, footer { border-bottom: 1px solid #e2e8f0; padding: 1rem 0; }
        footer {
            border-top: 1px solid #e2e8f0; border-bottom: none;
            color: #64748b; font-size: .875rem;
        }
        .article-meta { color: #64748b; font-size: .875rem; }
        .cover { width: 100%; height: auto; border-radius: .5rem; }
        .toc ol { padding-left: 1.25rem; }
        .section-summary { font-size: 1.1rem; color: #475569; }
        .checklist-items { list-style: none; padding-left: 0; }
        .tick { color: #16a34a; font-weight: 700; }
        .comparison-table { overflow-x: auto; }
        .comparison-table table { border-collapse: collapse; width: 100%; }
        .comparison-table th, .comparison-table td {
            border: 1px solid #e2e8f0; padding: .5rem; text-align: left;
        }
        .qa-item h3 { margin-bottom: .25rem; }
        .tags a { margin-right: .5rem; }
    </style>
</head>
<body>
    <header>
        <div class="container"><a href="/" class="site-title">{{ site_title }}</a></div>
    </header>
    <main class="container">
{{ content }}
    </main>
    <footer><div class="container">&copy; {{ year }} {{ site_title }}</div></footer>
</body>
</html>
"#;

/// Article body layout.
pub const DEFAULT_ARTICLE_TEMPLATE: &str = r#"<article class="article">
    <header class="article-header">
        <p class="article-category">{{ category? }}</p>
        <h1>{{ title }}</h1>
        <p class="article-meta">{{ byline? }}{{ dates? }} · {{ reading_time }} min read</p>
        {{ cover? }}
    </header>
    {{ toc? }}
    <div class="article-body">
{{ body }}
    </div>
    {{ tags? }}
</article>
"#;

/// Listing page layout.
pub const DEFAULT_LIST_TEMPLATE: &str = r#"<section class="listing">
    <h1>{{ title }}</h1>
    {{ description? }}
    <ul class="article-list">
{{ items }}
    </ul>
</section>
"#;

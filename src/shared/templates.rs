//! HTML template engine for the dashboard pages.
//!
//! Templates are compiled into the binary and the environment is owned by an
//! injected engine value, constructed once during application assembly.

use minijinja::Environment;
use serde::Serialize;

use crate::core::error::{AppError, Result};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("records.html", include_str!("../../templates/records.html")),
];

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(|e| {
                AppError::Internal(format!("Failed to load template '{}': {}", name, e))
            })?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| AppError::Internal(format!("Template '{}' not found: {}", name, e)))?;

        template
            .render(ctx)
            .map_err(|e| AppError::Internal(format!("Failed to render '{}': {}", name, e)))
    }
}
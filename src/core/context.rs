//! Build context - variables substituted into patterns and step commands

use crate::core::config::BuildConfig;
use std::collections::HashMap;

/// Variables derived from a resolved configuration
///
/// Placeholders use the `{{ name }}` form. Unknown placeholders are left as-is.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    variables: HashMap<String, String>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        let mut ctx = Self::new();
        ctx.set_variable("theme", &config.theme);
        ctx.set_variable("env", config.env.tag());

        // Dist paths may reference {{ theme }} and {{ env }}, never each other
        let paths = &config.paths;
        let dist = [
            ("scripts_dist", ctx.render(&paths.scripts_dist)),
            ("styles_dist", ctx.render(&paths.styles_dist)),
            ("images_dist", ctx.render(&paths.images_dist)),
            ("theme_dist", ctx.render(&paths.theme_dist)),
        ];
        for (key, value) in dist {
            ctx.set_variable(key, value);
        }
        ctx
    }

    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get_variable(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Substitute `{{ name }}` placeholders in a single left-to-right pass
    ///
    /// Substituted values are not rendered again.
    pub fn render(&self, template: &str) -> String {
        let mut rendered = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            rendered.push_str(&rest[..start]);
            let inner = &rest[start + 2..];
            let Some(end) = inner.find("}}") else {
                rest = &rest[start..];
                break;
            };

            match self.variables.get(inner[..end].trim()) {
                Some(value) => rendered.push_str(value),
                None => rendered.push_str(&rest[start..start + end + 4]),
            }
            rest = &inner[end + 2..];
        }

        rendered.push_str(rest);
        rendered
    }

    pub fn render_all(&self, templates: &[String]) -> Vec<String> {
        templates.iter().map(|t| self.render(t)).collect()
    }
}

use minijinja::{default_auto_escape_callback, Environment};
use serde::Serialize;
use std::sync::OnceLock;

static TEMPLATES: OnceLock<Templates> = OnceLock::new();

/// HTML renderer over templates compiled into the binary.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        env.add_filter("path_segment", path_segment);
        Self { env }
    }

    /// Process-wide instance; templates are parsed on first use.
    pub fn shared() -> &'static Templates {
        TEMPLATES.get_or_init(Templates::new)
    }

    pub fn render<S: Serialize>(&self, template_name: &str, context: S) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent-encodes `value` as one URL path segment; `/` becomes `%2F`.
fn path_segment(value: String) -> String {
    urlencoding::encode(&value).into_owned()
}

fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "base.html" => Some(include_str!("templates/base.html")),
        "index.html" => Some(include_str!("templates/index.html")),
        "detail.html" => Some(include_str!("templates/detail.html")),
        "tag.html" => Some(include_str!("templates/tag.html")),

        // Error pages
        "error_404.html" => Some(include_str!("templates/error_404.html")),
        "error_500.html" => Some(include_str!("templates/error_500.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}

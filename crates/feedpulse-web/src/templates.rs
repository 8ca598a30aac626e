//! HTML templates, compiled into the binary and rendered with minijinja.
//!
//! `.html` templates are auto-escaped, so feedback text is safe to render.

use minijinja::Environment;
use serde::Serialize;

const INDEX_HTML: &str = include_str!("../templates/index.html");

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| match name {
            "index.html" => Ok(Some(INDEX_HTML.to_string())),
            _ => Ok(None),
        });
        Self { env }
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

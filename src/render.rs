use std::path::Path;

use anyhow::Context as _;
use tera::{Context, Tera};

#[derive(thiserror::Error, Debug)]
#[error("Failed to render template {template}")]
pub struct RenderError {
    template: String,
    #[source]
    source: tera::Error,
}

/// Template environment shared by the site pages, the outgoing mail and
/// the print output. Parsed once at startup; a broken template directory
/// fails the build of the application, not a request.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn load(templates_dir: &Path) -> Result<Self, anyhow::Error> {
        let glob = format!("{}/**/*", templates_dir.display());
        let tera = Tera::new(&glob).with_context(|| {
            format!(
                "Failed to parse the templates under {}",
                templates_dir.display()
            )
        })?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, ctx: &Context) -> Result<String, RenderError> {
        self.tera.render(template, ctx).map_err(|source| RenderError {
            template: template.to_string(),
            source,
        })
    }
}

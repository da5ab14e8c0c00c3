//! Virtual-host file rendering.

use std::path::Path;

use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::AppError;

const TEMPLATE_NAME: &str = "worker.conf";
const TEMPLATE_SOURCE: &str = include_str!("../assets/worker.conf.j2");

/// Values substituted into the virtual-host template.
#[derive(Debug, Clone, Copy)]
pub struct VirtualHost<'a> {
    pub hostname: &'a str,
    pub web_docroot: &'a Path,
    /// Site name, used for the log file names.
    pub site: &'a str,
}

impl VirtualHost<'_> {
    /// Render the site file exactly as it should appear on disk.
    pub fn render(&self) -> Result<String, AppError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)
            .map_err(|e| AppError::TemplateRender(e.to_string()))?;

        let template =
            env.get_template(TEMPLATE_NAME).map_err(|e| AppError::TemplateRender(e.to_string()))?;

        let docroot = self.web_docroot.to_str().ok_or_else(|| {
            AppError::TemplateRender(format!(
                "Document root is not valid UTF-8: {}",
                self.web_docroot.display()
            ))
        })?;

        template
            .render(context! {
                hostname => self.hostname,
                web_docroot => docroot,
                site => self.site,
            })
            .map_err(|e| AppError::TemplateRender(e.to_string()))
    }
}

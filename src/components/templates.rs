use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use log::{debug, error};
use regex::{Captures, Regex};

use crate::errors::WikiError;
use crate::types::{Page, Title};
use crate::utils::{escape_attr, escape_html};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z_]+)\}\}").expect("placeholder pattern is valid"));

/// Fills the named HTML templates under a fixed directory
#[derive(Debug, Clone)]
pub struct TemplateComponent {
    templates_dir: PathBuf,
}

impl TemplateComponent {
    /// Create a new template component
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self { templates_dir: templates_dir.into() }
    }

    fn load(&self, name: &str) -> Result<String, WikiError> {
        let path = self.templates_dir.join(format!("{}.html", name));
        debug!("Loading template '{}' from {:?}", name, path);
        fs::read_to_string(&path).map_err(|e| {
            error!("Failed to load template {:?}: {}", path, e);
            WikiError::TemplateError(format!("open {}: {}", path.display(), e))
        })
    }

    /// Render `name` with the page's title and body
    pub fn render(&self, name: &str, page: &Page) -> Result<String, WikiError> {
        let template = self.load(name)?;
        fill(
            name,
            template,
            &[
                ("TITLE", escape_html(page.title.as_str())),
                ("BODY", escape_html(&page.body_text())),
            ],
        )
    }

    /// Render the index template with one link per title
    pub fn render_index(&self, titles: &[Title]) -> Result<String, WikiError> {
        let template = self.load("index")?;
        let mut pages = String::new();
        for title in titles {
            pages.push_str(&format!(
                "<li><a href=\"/view/{}\">{}</a></li>\n",
                escape_attr(title.as_str()),
                escape_html(title.as_str())
            ));
        }
        fill("index", template, &[("PAGES", pages)])
    }
}

/// Substitute placeholders in one pass so inserted values are never rescanned
fn fill(name: &str, template: String, values: &[(&str, String)]) -> Result<String, WikiError> {
    let mut unknown: Option<String> = None;
    let html = PLACEHOLDER.replace_all(&template, |caps: &Captures<'_>| {
        match values.iter().find(|(key, _)| *key == &caps[1]) {
            Some((_, value)) => value.clone(),
            None => {
                unknown.get_or_insert_with(|| caps[1].to_string());
                String::new()
            }
        }
    });

    if let Some(field) = unknown {
        error!("Template '{}' references unknown field {}", name, field);
        return Err(WikiError::TemplateError(format!(
            "template {}: unknown field {}",
            name, field
        )));
    }

    Ok(html.into_owned())
}

//! HTML rendering of the build list.

use std::collections::HashMap;
use std::fmt::Write;

use patchnotes_commit::MISC_CATEGORY;
use patchnotes_config::Config;

use crate::BuildEntry;

/// Renders the daily builds page.
#[derive(Debug, Clone)]
pub struct BuildPageFormatter {
    title: String,
    categories: Vec<String>,
    labels: HashMap<String, String>,
    include_misc: bool,
}

impl BuildPageFormatter {
    /// Creates a formatter showing `categories` in the given order.
    #[must_use]
    pub fn new(categories: &[String], labels: HashMap<String, String>) -> Self {
        Self {
            title: "Daily Builds".to_string(),
            categories: categories.to_vec(),
            labels,
            include_misc: false,
        }
    }

    /// Creates a formatter from the category and site settings.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.categories.names, config.site.labels.clone())
            .include_misc(config.site.include_misc)
    }

    /// Shows the fallback category after the configured ones.
    #[must_use]
    pub fn include_misc(mut self, include: bool) -> Self {
        self.include_misc = include;
        self
    }

    /// Sets the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn label<'a>(&'a self, category: &'a str) -> &'a str {
        self.labels.get(category).map_or(category, String::as_str)
    }

    fn sections(&self) -> impl Iterator<Item = &str> {
        let misc = self.include_misc.then_some(MISC_CATEGORY);
        self.categories.iter().map(String::as_str).chain(misc)
    }

    /// Renders a complete HTML document.
    #[must_use]
    pub fn format(&self, builds: &[BuildEntry]) -> String {
        let mut output = String::new();
        let title = escape(&self.title);

        _ = writeln!(output, "<!DOCTYPE html>");
        _ = writeln!(output, "<html lang=\"en\">");
        _ = writeln!(output, "<head>");
        _ = writeln!(output, "<meta charset=\"utf-8\">");
        _ = writeln!(output, "<title>{title}</title>");
        _ = writeln!(output, "</head>");
        _ = writeln!(output, "<body>");
        _ = writeln!(output, "<h1>{title}</h1>");

        if builds.is_empty() {
            _ = writeln!(output, "<p>No builds yet.</p>");
        }

        for build in builds {
            self.format_build(&mut output, build);
        }

        _ = writeln!(output, "</body>");
        _ = writeln!(output, "</html>");
        output
    }

    fn format_build(&self, output: &mut String, build: &BuildEntry) {
        let name = escape(&build.name);
        _ = writeln!(output, "<section class=\"build\" id=\"{name}\">");
        _ = writeln!(output, "<h2>{name}</h2>");

        _ = writeln!(output, "<ul class=\"downloads\">");
        for download in &build.downloads {
            _ = writeln!(
                output,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&download.href),
                escape(&download.platform)
            );
        }
        _ = writeln!(output, "</ul>");

        if let Some(notes) = &build.notes {
            for category in self.sections() {
                let Some(records) = notes.get(category).filter(|r| !r.is_empty()) else {
                    continue;
                };
                _ = writeln!(output, "<h3>{}</h3>", escape(self.label(category)));
                _ = writeln!(output, "<ul class=\"notes\">");
                for record in records {
                    _ = writeln!(output, "<li>{}</li>", escape(&record.message));
                }
                _ = writeln!(output, "</ul>");
            }
        }

        _ = writeln!(output, "</section>");
    }
}

/// Escapes text for HTML element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

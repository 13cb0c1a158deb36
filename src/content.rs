//! Content Resolver
//!
//! Supplies default content for files that have none in memory yet.

use crate::config::TemplateConfig;
use crate::tree::Node;
use crate::types::FileKind;

pub const DEFAULT_TEX_TEMPLATE: &str = "\\documentclass{article}\n\
\\usepackage[utf8]{inputenc}\n\
\n\
\\title{Untitled}\n\
\\author{}\n\
\\date{\\today}\n\
\n\
\\begin{document}\n\
\n\
\\maketitle\n\
\n\
\\end{document}\n";

pub const DEFAULT_BIB_TEMPLATE: &str = "@article{key,\n\
  author  = {Author Name},\n\
  title   = {Article Title},\n\
  journal = {Journal Name},\n\
  year    = {2024}\n\
}\n";

#[derive(Debug, Clone)]
pub struct ContentResolver {
    tex: String,
    bib: String,
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self {
            tex: DEFAULT_TEX_TEMPLATE.to_string(),
            bib: DEFAULT_BIB_TEMPLATE.to_string(),
        }
    }
}

impl ContentResolver {
    pub fn new(templates: &TemplateConfig) -> Self {
        let defaults = Self::default();
        Self {
            tex: templates.tex.clone().unwrap_or(defaults.tex),
            bib: templates.bib.clone().unwrap_or(defaults.bib),
        }
    }

    /// Default content for a kind: skeletons for tex and bib, empty otherwise.
    pub fn template_for(&self, kind: FileKind) -> &str {
        match kind {
            FileKind::Tex => &self.tex,
            FileKind::Bib => &self.bib,
            _ => "",
        }
    }

    /// Existing content when present, otherwise the template for the file's kind.
    ///
    /// Folders resolve to an empty string. Never fails.
    pub fn resolve(&self, node: &Node) -> String {
        match node.as_file() {
            Some(file) => match file.content() {
                Some(content) => content.to_string(),
                None => self.template_for(file.kind()).to_string(),
            },
            None => String::new(),
        }
    }
}

//! Charge notification document templates.
//!
//! Templates are TOML files describing the document as ordered header and
//! body elements. They are loaded through [`TemplateSource`] at item
//! execution time, so a broken or missing template surfaces as an item
//! fault rather than a startup failure.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A document template: header elements, then body elements.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentTemplate {
    #[serde(default)]
    pub header: Vec<TemplateElement>,
    #[serde(default)]
    pub body: Vec<TemplateElement>,
}

/// One element of a document template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateElement {
    HorizontalLine {
        #[serde(default = "default_thickness")]
        thickness: u32,
    },
    Text {
        #[serde(default)]
        style: TextStyle,
        #[serde(default)]
        alignment: TextAlignment,
        #[serde(default = "default_size")]
        size: u32,
        #[serde(default = "default_color")]
        color: String,
        value: String,
    },
    /// A table over the notification rows: one heading, then `cells`
    /// rendered once per row with the row placeholders substituted.
    ChargeTable {
        heading: Vec<String>,
        cells: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Left,
    Right,
    Center,
}

fn default_thickness() -> u32 {
    1
}

fn default_size() -> u32 {
    12
}

fn default_color() -> String {
    "#000000".to_string()
}

/// Source of the current document template.
pub trait TemplateSource: Send + Sync {
    fn load(&self) -> Result<DocumentTemplate>;
}

/// Loads the template from a TOML file on every call.
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TemplateSource for FileTemplateSource {
    fn load(&self) -> Result<DocumentTemplate> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read template file: {:?}", self.path))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse template file: {:?}", self.path))
    }
}

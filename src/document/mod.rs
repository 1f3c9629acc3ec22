mod renderer;
mod template;

pub use renderer::{DocumentRenderer, TextDocumentRenderer};
pub use template::{
    DocumentTemplate, FileTemplateSource, TemplateElement, TemplateSource, TextAlignment,
    TextStyle,
};

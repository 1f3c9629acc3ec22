//! Plain-text rendering of charge notification documents.

use super::template::{DocumentTemplate, TemplateElement, TextAlignment};
use crate::notification::{ChargeNotification, NotificationRow};
use anyhow::{Context, Result};
use std::path::Path;

/// Width of a rendered document line, used for alignment padding.
const LINE_WIDTH: usize = 72;

/// Renders a notification into a document artifact at the given path.
pub trait DocumentRenderer: Send + Sync {
    fn render(
        &self,
        template: &DocumentTemplate,
        notification: &ChargeNotification,
        output_path: &Path,
    ) -> Result<()>;
}

/// Text renderer producing `.txt` artifacts.
///
/// Substitutes `{{CUSTOMER_NAME}}`, `{{CUSTOMER_NUMBER}}` and
/// `{{CUSTOMER_TOTAL}}` in text elements, and `{{CHARGE_NAME}}`,
/// `{{CHARGE_DATE}}` and `{{CHARGE_COST}}` per table row. Text style, size
/// and color have no plain-text representation and only alignment is
/// honored; richer renderers use them.
pub struct TextDocumentRenderer;

impl DocumentRenderer for TextDocumentRenderer {
    fn render(
        &self,
        template: &DocumentTemplate,
        notification: &ChargeNotification,
        output_path: &Path,
    ) -> Result<()> {
        let mut lines = Vec::new();
        for element in template.header.iter().chain(template.body.iter()) {
            render_element(element, notification, &mut lines);
        }

        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(output_path, content)
            .with_context(|| format!("Failed to write document: {:?}", output_path))
    }
}

fn render_element(
    element: &TemplateElement,
    notification: &ChargeNotification,
    lines: &mut Vec<String>,
) {
    match element {
        TemplateElement::HorizontalLine { thickness } => {
            let line_char = if *thickness >= 2 { '=' } else { '-' };
            lines.push(line_char.to_string().repeat(LINE_WIDTH));
        }
        TemplateElement::Text {
            alignment, value, ..
        } => {
            let text = substitute_customer(value, notification);
            lines.push(align(&text, *alignment));
        }
        TemplateElement::ChargeTable { heading, cells } => {
            render_table(heading, cells, notification, lines);
        }
    }
}

fn render_table(
    heading: &[String],
    cells: &[String],
    notification: &ChargeNotification,
    lines: &mut Vec<String>,
) {
    let rows: Vec<Vec<String>> = notification
        .rows
        .iter()
        .map(|row| cells.iter().map(|cell| substitute_row(cell, row)).collect())
        .collect();

    // Column widths fit the widest of heading and row values.
    let columns = heading.len().max(cells.len());
    let mut widths: Vec<usize> = (0..columns)
        .map(|i| heading.get(i).map(String::len).unwrap_or(0))
        .collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.len());
        }
    }

    lines.push(format_table_row(heading, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(format_table_row(row, &widths));
    }
}

fn format_table_row(values: &[String], widths: &[usize]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| format!("{:<width$}", value, width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn substitute_customer(text: &str, notification: &ChargeNotification) -> String {
    text.replace("{{CUSTOMER_NAME}}", &notification.name)
        .replace("{{CUSTOMER_NUMBER}}", &notification.number.to_string())
        .replace("{{CUSTOMER_TOTAL}}", &notification.total_cost.to_string())
}

fn substitute_row(text: &str, row: &NotificationRow) -> String {
    text.replace("{{CHARGE_NAME}}", &row.name)
        .replace("{{CHARGE_DATE}}", &row.date.format("%Y-%m-%d").to_string())
        .replace("{{CHARGE_COST}}", &row.cost.to_string())
}

fn align(text: &str, alignment: TextAlignment) -> String {
    if text.len() >= LINE_WIDTH {
        return text.to_string();
    }
    match alignment {
        TextAlignment::Left => text.to_string(),
        TextAlignment::Right => format!("{:>width$}", text, width = LINE_WIDTH),
        TextAlignment::Center => format!("{:^width$}", text, width = LINE_WIDTH)
            .trim_end()
            .to_string(),
    }
}

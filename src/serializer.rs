//! Serialization of the in-memory document model to YAML text.
//!
//! The renderer is self-contained: output is assembled by indentation-driven
//! recursion so that block ordering, key ordering and indentation depth are
//! byte-reproducible for a given document. Top-level blocks appear as
//! `info`, `servers`, `tags`, `paths`, `components`, in that order; within an
//! operation the field order is summary, tags, security, parameters,
//! requestBody, responses. An explicitly empty parameter list renders as the
//! empty-list token instead of being omitted.

use crate::extractor::HttpMethod;
use crate::openapi_builder::{Document, Operation, Parameter, Schema, MEDIA_TYPE};
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Renders a document to its complete YAML text.
pub fn render(document: &Document) -> String {
    let mut out = String::new();

    out.push_str("openapi: 3.1.0\n");
    out.push_str("info:\n");
    out.push_str(&format!("  title: {}\n", document.info.title));
    out.push_str(&format!("  summary: {}\n", document.info.summary));
    out.push_str(&format!("  description: {}\n", document.info.description));
    out.push_str(&format!("  version: {}\n", document.info.version));

    out.push_str("\nservers:\n");
    out.push_str("  - url: '/api/index.php/v1'\n");
    out.push_str("    description: Current site\n");

    out.push_str("\ntags:\n");
    for tag in &document.tags {
        out.push_str(&format!("  - name: {}\n", tag.name));
        out.push_str(&format!("    description: {}\n", tag.description));
    }

    out.push_str("\npaths:\n");
    for entry in &document.paths {
        out.push_str(&format!("  /{}:\n", entry.path.trim_start_matches('/')));
        for (method, operation) in &entry.operations {
            render_operation(&mut out, *method, operation);
        }
    }

    out.push_str("\ncomponents:\n");
    out.push_str("  securitySchemes:\n");
    out.push_str("    BearerAuth:\n");
    out.push_str("      type: http\n");
    out.push_str("      scheme: bearer\n");
    out.push_str("      bearerFormat: JWT\n");
    out.push_str("      description: JWT Bearer token for API authentication\n");

    out.push_str("\n  schemas:\n");
    for (name, schema) in &document.schemas {
        out.push_str(&format!("    {name}:\n"));
        render_schema(&mut out, schema, 6);
    }

    out
}

fn render_operation(out: &mut String, method: HttpMethod, operation: &Operation) {
    out.push_str(&format!("    {}:\n", method.key()));
    out.push_str(&format!("      summary: {}\n", operation.summary));

    out.push_str("      tags:\n");
    for tag in &operation.tags {
        out.push_str(&format!("        - {tag}\n"));
    }

    if operation.security {
        out.push_str("      security:\n");
        out.push_str("        - BearerAuth: []\n");
    }

    match &operation.parameters {
        Some(parameters) if parameters.is_empty() => {
            out.push_str("      parameters: []\n");
        }
        Some(parameters) => {
            out.push_str("      parameters:\n");
            for parameter in parameters {
                render_parameter(out, parameter);
            }
        }
        None => {}
    }

    if let Some(schema) = &operation.request_body {
        out.push_str("      requestBody:\n");
        out.push_str("        required: true\n");
        out.push_str("        content:\n");
        out.push_str(&format!("          {MEDIA_TYPE}:\n"));
        out.push_str("            schema:\n");
        render_schema(out, schema, 14);
    }

    out.push_str("      responses:\n");
    for (status, response) in &operation.responses {
        out.push_str(&format!("        '{status}':\n"));
        out.push_str(&format!("          description: {}\n", response.description));
        if let Some(schema) = &response.content {
            out.push_str("          content:\n");
            out.push_str(&format!("            {MEDIA_TYPE}:\n"));
            out.push_str("              schema:\n");
            render_schema(out, schema, 16);
        }
    }
}

fn render_parameter(out: &mut String, parameter: &Parameter) {
    out.push_str(&format!("        - name: {}\n", parameter.name));
    out.push_str(&format!("          in: {}\n", parameter.location.as_str()));

    if parameter.required {
        out.push_str("          required: true\n");
    }
    if let Some(description) = &parameter.description {
        out.push_str(&format!("          description: {description}\n"));
    }

    out.push_str("          schema:\n");
    out.push_str(&format!("            type: {}\n", parameter.param_type.as_str()));
    if let Some(default) = parameter.default {
        out.push_str(&format!("            default: {default}\n"));
    }
    if !parameter.enum_values.is_empty() {
        out.push_str("            enum:\n");
        for value in &parameter.enum_values {
            out.push_str(&format!("              - {value}\n"));
        }
    }
}

/// Renders one schema node at the given indentation depth. Properties nest
/// their children one level (two spaces) below the property name; array items
/// nest one level below the `items` key.
fn render_schema(out: &mut String, schema: &Schema, indent: usize) {
    let pad = " ".repeat(indent);

    if !schema.type_name.is_empty() {
        out.push_str(&format!("{pad}type: {}\n", schema.type_name));
    }

    if !schema.properties.is_empty() {
        out.push_str(&format!("{pad}properties:\n"));
        for (name, property) in &schema.properties {
            out.push_str(&format!("{pad}  {name}:\n"));
            render_schema(out, property, indent + 4);
        }
    }

    if let Some(items) = &schema.items {
        out.push_str(&format!("{pad}items:\n"));
        render_schema(out, items, indent + 2);
    }
}

/// Writes rendered content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directories cannot be created or the file cannot
/// be written.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

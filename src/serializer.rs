//! Serialization module for converting Swagger documents to JSON or YAML format.
//!
//! This module provides functions to serialize API declarations and resource listings
//! into standard formats and write them to files or return them as strings.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a Swagger document to JSON format with pretty printing.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use swagger_from_service::declaration_builder::DeclarationBuilder;
/// use swagger_from_service::descriptor::ServiceDescriptor;
/// use swagger_from_service::serializer::serialize_json;
///
/// let service = ServiceDescriptor::new("Widget", "/widgets[/:id]", "1");
/// let doc = DeclarationBuilder::new("http://localhost").build(&service).unwrap();
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"swaggerVersion\": \"1.2\""));
/// ```
pub fn serialize_json<T: Serialize>(doc: &T) -> Result<String> {
    debug!("Serializing Swagger document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize Swagger document to JSON")
}

/// Serializes a Swagger document to YAML format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml<T: Serialize>(doc: &T) -> Result<String> {
    debug!("Serializing Swagger document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize Swagger document to YAML")
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

//! Category types.

use crate::error::CommerceError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Server-assigned identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// An image attached to a category form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload, guessing the MIME type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Form submitted as multipart to create or update a category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    /// Optional image part (`file`).
    pub image: Option<ImageUpload>,
}

impl CategoryForm {
    /// Apply the category form rules.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if let Some(image) = &self.image {
            if image.bytes.is_empty() {
                return Err(CommerceError::invalid("file", "image is empty"));
            }
            if !image.content_type.starts_with("image/") {
                return Err(CommerceError::invalid(
                    "file",
                    format!("{} is not an image", image.file_name),
                ));
            }
        }
        Ok(())
    }
}

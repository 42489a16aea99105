use crate::config::Resource;
use crate::{ApiClient, ApiError};
use shop_commerce::prelude::*;
use shop_data::{Form, Method};
use tracing::instrument;

/// `/categories` operations. Create and update are sent as
/// `multipart/form-data` with `name`, `description` and an optional `file`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryService<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoryService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get_list(Resource::Categories, "").await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.client.get(Resource::Categories, &id.to_string()).await
    }

    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(&self, form: &CategoryForm) -> Result<Category, ApiError> {
        form.validate()?;
        self.client
            .send_multipart(Method::Post, Resource::Categories, "", category_form(form))
            .await
    }

    #[instrument(skip(self, form))]
    pub async fn update(&self, id: CategoryId, form: &CategoryForm) -> Result<Category, ApiError> {
        form.validate()?;
        self.client
            .send_multipart(Method::Put, Resource::Categories, &id.to_string(), category_form(form))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), ApiError> {
        self.client.delete(Resource::Categories, &id.to_string()).await
    }
}

pub(crate) fn category_form(form: &CategoryForm) -> Form {
    let multipart = Form::new()
        .text("name", form.name.trim())
        .text("description", form.description.as_str());
    match &form.image {
        Some(image) => multipart.file(
            "file",
            image.file_name.as_str(),
            image.content_type.as_str(),
            image.bytes.clone(),
        ),
        None => multipart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_form_parts() {
        let form = CategoryForm {
            name: " Books ".to_string(),
            description: "Paper".to_string(),
            image: Some(ImageUpload::new("cover.png", vec![1, 2])),
        };
        let multipart = category_form(&form);
        assert_eq!(multipart.text_value("name"), Some("Books"));
        assert_eq!(multipart.text_value("description"), Some("Paper"));
        assert!(multipart.has_part("file"));

        let multipart = category_form(&CategoryForm {
            image: None,
            ..form
        });
        assert!(!multipart.has_part("file"));
    }
}

//! Category grid and category admin commands.

use std::fs;

use anyhow::{Context as _, Result};
use shop_commerce::{Category, CategoryForm, ImageUpload};

use super::{products::print_grid, CategoriesArgs, CategoriesCommand, CategoryFields};
use crate::context::Context;
use crate::output::{format_bytes, truncate, Output};

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client()?;
    match args.command.unwrap_or(CategoriesCommand::List) {
        CategoriesCommand::List => {
            let spinner = ctx.output.spinner("Loading categories...");
            let categories = api.categories().list().await;
            spinner.finish_and_clear();
            print_categories(&categories?, &ctx.output);
            Ok(())
        }
        CategoriesCommand::Show { id } => {
            let spinner = ctx.output.spinner("Loading category...");
            let (categories, catalog) = (api.categories(), api.products());
            let (category, products) =
                tokio::join!(categories.get(id), catalog.by_category(id));
            spinner.finish_and_clear();
            let (category, products) = (category?, products?);

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "category": category, "products": products }));
                return Ok(());
            }
            ctx.output.header(&category.name);
            if let Some(description) = &category.description {
                ctx.output.info(description);
            }
            print_grid(&products, &ctx.output);
            Ok(())
        }
        CategoriesCommand::Create(fields) => {
            let form = category_form(fields, ctx)?;
            let category = api.categories().create(&form).await?;
            ctx.output.success(&format!("Created category {} ({})", category.name, category.id));
            Ok(())
        }
        CategoriesCommand::Update { id, fields } => {
            let form = category_form(fields, ctx)?;
            let category = api.categories().update(id, &form).await?;
            ctx.output.success(&format!("Updated category {}", category.id));
            Ok(())
        }
        CategoriesCommand::Delete { id } => {
            if !ctx.confirm(&format!("Delete category {}?", id))? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            api.categories().delete(id).await?;
            ctx.output.success(&format!("Deleted category {}", id));
            Ok(())
        }
    }
}

fn category_form(fields: CategoryFields, ctx: &Context) -> Result<CategoryForm> {
    let image = match fields.image {
        Some(path) => {
            let path = ctx.resolve_path(&path);
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read image: {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "image".to_string());
            let size = format_bytes(bytes.len() as u64);
            ctx.output.debug(&format!("Uploading {} ({})", file_name, size));
            Some(ImageUpload::new(file_name, bytes))
        }
        None => None,
    };

    Ok(CategoryForm {
        name: fields.name,
        description: fields.description,
        image,
    })
}

fn print_categories(categories: &[Category], output: &Output) {
    if output.is_json() {
        output.json(&categories);
        return;
    }

    if categories.is_empty() {
        output.info("No categories found");
        return;
    }

    let widths = [6, 24, 44];
    output.table_header(&["ID", "NAME", "DESCRIPTION"], &widths);
    for category in categories {
        let description = category.description.as_deref().unwrap_or("-");
        output.table_row(
            &[&category.id.to_string(), &category.name, &truncate(description, 44)],
            &widths,
        );
    }
}

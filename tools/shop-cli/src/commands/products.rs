//! Product grid and product admin commands.

use anyhow::Result;
use shop_api::ApiClient;
use shop_commerce::{Money, NewProduct, Product};

use super::{ProductFields, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{stock_label, truncate, Output};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client()?;
    match args.command.unwrap_or(ProductsCommand::List { category: None }) {
        ProductsCommand::List { category } => {
            let spinner = ctx.output.spinner("Loading products...");
            let products = match category {
                Some(id) => api.products().by_category(id).await,
                None => api.products().list().await,
            };
            spinner.finish_and_clear();
            print_grid(&products?, &ctx.output);
            Ok(())
        }
        ProductsCommand::Show { id } => {
            let product = api.products().get(id).await?;
            print_product(&product, &ctx.output);
            Ok(())
        }
        ProductsCommand::Create(fields) => {
            let product = api.products().create(&new_product(fields, &api)).await?;
            ctx.output.success(&format!("Created product {} ({})", product.name, product.id));
            print_product(&product, &ctx.output);
            Ok(())
        }
        ProductsCommand::Update { id, fields } => {
            let product = api.products().update(id, &new_product(fields, &api)).await?;
            ctx.output.success(&format!("Updated product {}", product.id));
            print_product(&product, &ctx.output);
            Ok(())
        }
        ProductsCommand::Delete { id } => {
            if !ctx.confirm(&format!("Delete product {}?", id))? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            api.products().delete(id).await?;
            ctx.output.success(&format!("Deleted product {}", id));
            Ok(())
        }
    }
}

fn new_product(fields: ProductFields, api: &ApiClient) -> NewProduct {
    NewProduct {
        name: fields.name,
        description: fields.description,
        price: Money::from_decimal(fields.price, api.currency()),
        category: fields.category,
        category_id: fields.category_id,
        stock: fields.stock,
        image_url: fields.image_url,
    }
}

/// Print products the way the catalog grid lays them out.
pub(crate) fn print_grid(products: &[Product], output: &Output) {
    if output.is_json() {
        output.json(&products);
        return;
    }

    if products.is_empty() {
        output.info("No products found");
        return;
    }

    let widths = [6, 30, 16, 12, 14];
    output.table_header(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in products {
        output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                product.category_label(),
                &product.price.to_string(),
                &stock_label(product.stock),
            ],
            &widths,
        );
    }
    output.info(&format!(
        "{} product(s); add one with `shop cart add <ID> -q <N>`",
        products.len()
    ));
}

fn print_product(product: &Product, output: &Output) {
    if output.is_json() {
        output.json(product);
        return;
    }

    output.header(&product.name);
    output.kv("id", &product.id.to_string());
    output.kv("price", &product.price.to_string());
    output.kv("category", product.category_label());
    output.kv("stock", &stock_label(product.stock));
    if let Some(description) = &product.description {
        output.kv("description", &truncate(description, 72));
    }
    if let Some(url) = &product.image_url {
        output.kv("image", url);
    }
}

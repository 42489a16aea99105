//! Order admin commands.

use anyhow::{Context as _, Result};
use shop_commerce::{NewOrder, NewOrderItem, Order, ProductId};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{status_badge, Output};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client()?;
    match args.command.unwrap_or(OrdersCommand::List) {
        OrdersCommand::List => {
            let spinner = ctx.output.spinner("Loading orders...");
            let orders = api.orders().list().await;
            spinner.finish_and_clear();
            print_orders(&orders?, &ctx.output);
        }
        OrdersCommand::Show { id } => {
            let order = api.orders().get(id).await?;
            print_order(&order, &ctx.output);
        }
        OrdersCommand::Create {
            customer_id,
            items,
            name,
            email,
            phone,
            address,
        } => {
            let items = items
                .iter()
                .map(|raw| parse_line(raw))
                .collect::<Result<Vec<_>>>()?;
            let order = NewOrder {
                customer_id,
                items,
                customer_name: name,
                customer_email: email,
                customer_phone: phone,
                shipping_address: address,
            };
            let order = api.orders().create(&order).await?;
            ctx.output.success(&format!("Placed order {}", order.id));
            print_order(&order, &ctx.output);
        }
        OrdersCommand::Status { id, status } => {
            let order = api.orders().update_status(id, status).await?;
            ctx.output.success(&format!("Order {} is now {}", order.id, status.display_name()));
        }
    }
    Ok(())
}

/// Parse a `PRODUCT_ID:QUANTITY` order line.
fn parse_line(raw: &str) -> Result<NewOrderItem> {
    let (product, quantity) = raw
        .split_once(':')
        .with_context(|| format!("Expected PRODUCT_ID:QUANTITY, got '{}'", raw))?;
    let product_id: ProductId = product
        .parse()
        .with_context(|| format!("Invalid product id in '{}'", raw))?;
    let quantity = quantity
        .trim()
        .parse()
        .with_context(|| format!("Invalid quantity in '{}'", raw))?;
    Ok(NewOrderItem { product_id, quantity })
}

fn print_orders(orders: &[Order], output: &Output) {
    if output.is_json() {
        output.json(&orders);
        return;
    }

    if orders.is_empty() {
        output.info("No orders found");
        return;
    }

    let widths = [6, 24, 20, 10, 6, 12];
    output.table_header(&["ID", "CUSTOMER", "DATE", "STATUS", "ITEMS", "TOTAL"], &widths);
    for order in orders {
        output.table_row(
            &[
                &order.id.to_string(),
                &customer_label(order),
                order.order_date.as_deref().unwrap_or("-"),
                order.status.display_name(),
                &order.item_count().to_string(),
                &order.total_amount.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()),
            ],
            &widths,
        );
    }
}

fn print_order(order: &Order, output: &Output) {
    if output.is_json() {
        output.json(order);
        return;
    }

    output.header(&format!("Order {}", order.id));
    output.kv("status", &status_badge(order.status));
    output.kv("customer", &customer_label(order));
    if let Some(date) = &order.order_date {
        output.kv("date", date);
    }
    if let Some(address) = &order.shipping_address {
        output.kv("ship to", address);
    }
    for item in &order.items {
        let price = item.unit_price.map(|p| format!(" @ {}", p)).unwrap_or_default();
        output.list_item(&format!("product {} x{}{}", item.product_id, item.quantity, price));
    }
    if let Some(total) = order.total_amount {
        output.kv("total", &total.to_string());
    }
}

fn customer_label(order: &Order) -> String {
    match (&order.customer_name, order.customer_id) {
        (Some(name), _) if !name.is_empty() => name.clone(),
        (_, Some(id)) => format!("customer {}", id),
        _ => "-".to_string(),
    }
}

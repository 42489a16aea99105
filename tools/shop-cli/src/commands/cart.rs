//! Cart commands: the drawer, the full cart page and the header badge.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use shop_cart::{CartError, CartEvent, CartStore, CountBadge, Notice};
use shop_commerce::{AddQuantity, Cart, CartItemId};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{truncate, Output};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    match args.command.unwrap_or(CartCommand::Show { full: false }) {
        CartCommand::Show { full } => show(&store, full, ctx).await,
        CartCommand::Add { product, quantity } => {
            let picked = AddQuantity::new(quantity);
            if picked.get() != quantity {
                ctx.output.warn(&format!("Quantity {} adjusted to {}", quantity, picked.get()));
            }
            let cart = perform(&store, ctx, "Adding to cart...", store.add(product, picked)).await?;
            print_cart(&cart, false, &ctx.output);
            Ok(())
        }
        CartCommand::Set { item, quantity } => {
            let update = store.set_quantity(item, quantity);
            let cart = perform(&store, ctx, "Updating cart...", update).await?;
            print_cart(&cart, true, &ctx.output);
            Ok(())
        }
        CartCommand::Inc { item } => step(&store, item, true, ctx).await,
        CartCommand::Dec { item } => step(&store, item, false, ctx).await,
        CartCommand::Remove { item } => {
            if !ctx.confirm(&format!("Remove line {} from the cart?", item))? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            let cart = perform(&store, ctx, "Removing item...", store.remove(item)).await?;
            print_cart(&cart, true, &ctx.output);
            Ok(())
        }
        CartCommand::Clear => {
            if !ctx.confirm("Remove every item from the cart?")? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            let cart = perform(&store, ctx, "Clearing cart...", store.clear()).await?;
            print_cart(&cart, false, &ctx.output);
            Ok(())
        }
        CartCommand::Count => count(&store, ctx).await,
        CartCommand::Watch { interval } => watch(&store, interval, ctx).await,
    }
}

async fn show(store: &CartStore, full: bool, ctx: &Context) -> Result<()> {
    let cart = perform(store, ctx, "Loading cart...", store.load()).await?;
    print_cart(&cart, full, &ctx.output);
    Ok(())
}

async fn step(store: &CartStore, item: CartItemId, up: bool, ctx: &Context) -> Result<()> {
    // The step is computed from the current line, so the snapshot comes first.
    perform(store, ctx, "Loading cart...", store.load()).await?;
    let cart = if up {
        perform(store, ctx, "Updating cart...", store.increment(item)).await?
    } else {
        perform(store, ctx, "Updating cart...", store.decrement(item)).await?
    };
    print_cart(&cart, true, &ctx.output);
    Ok(())
}

async fn count(store: &CartStore, ctx: &Context) -> Result<()> {
    let badge = CountBadge::new(store);
    let count = perform(store, ctx, "Counting items...", store.refresh_count()).await?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "count": count }));
    } else {
        println!("{}", badge.render());
    }
    Ok(())
}

/// Refresh on a timer and print every store event until interrupted.
async fn watch(store: &CartStore, interval: u64, ctx: &Context) -> Result<()> {
    let mut events = store.subscribe();
    let mut badge = CountBadge::new(store);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));
    let mut last: Option<Cart> = None;

    ctx.output.info("Watching the cart, press Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                // Failures are reported through the event stream.
                let _ = tokio::join!(store.load(), store.refresh_count());
            }
            Some(count) = badge.changed() => {
                ctx.output.debug(&format!("badge: Cart ({})", count));
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event, &mut last, &ctx.output),
                Err(RecvError::Lagged(skipped)) => {
                    ctx.output.warn(&format!("Skipped {} event(s)", skipped));
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

fn print_event(event: &CartEvent, last: &mut Option<Cart>, output: &Output) {
    if output.is_json() {
        output.json_line(event);
        return;
    }

    let at = Local::now().format("%H:%M:%S");
    match event {
        CartEvent::Loaded { cart } => {
            if last.as_ref() == Some(cart) {
                return;
            }
            println!("[{}] cart: {} item(s), {}", at, cart.total_items, cart.total_amount);
            *last = Some(cart.clone());
        }
        CartEvent::CountChanged { count } => println!("[{}] Cart ({})", at, count),
        CartEvent::Mutated { op } => println!("[{}] {} done", at, op),
        CartEvent::Busy { op, busy } => {
            output.debug(&format!("{} {}", op, if *busy { "started" } else { "finished" }));
        }
        CartEvent::Notice { notice } => output.notice(notice),
    }
}

/// Run one store operation behind a spinner and print the notices it
/// publishes. When the operation fails, its own error notice becomes the
/// returned error instead of being printed twice.
async fn perform<T>(
    store: &CartStore,
    ctx: &Context,
    message: &str,
    operation: impl Future<Output = Result<T, CartError>>,
) -> Result<T> {
    let mut events = store.subscribe();
    let spinner = ctx.output.spinner(message);
    let result = operation.await;
    spinner.finish_and_clear();

    for notice in notices_to_show(drain_notices(&mut events), result.is_err()) {
        ctx.output.notice(&notice);
    }

    result.map_err(|err| {
        let shown = store.last_error().unwrap_or_else(|| err.to_string());
        anyhow::Error::new(err).context(shown)
    })
}

fn drain_notices(events: &mut broadcast::Receiver<CartEvent>) -> Vec<Notice> {
    let mut notices = Vec::new();
    loop {
        match events.try_recv() {
            Ok(CartEvent::Notice { notice }) => notices.push(notice),
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    notices
}

/// Drop the last error notice of a failed operation; every other notice,
/// including errors from a follow-up refetch, is kept.
fn notices_to_show(mut notices: Vec<Notice>, failed: bool) -> Vec<Notice> {
    if failed {
        if let Some(last_error) = notices.iter().rposition(Notice::is_error) {
            notices.remove(last_error);
        }
    }
    notices
}

/// Print a cart as the drawer summary or the full page.
fn print_cart(cart: &Cart, full: bool, output: &Output) {
    if output.is_json() {
        output.json(cart);
        return;
    }

    output.header(&format!("Cart ({})", cart.total_items));
    if cart.is_empty() {
        output.info("Your cart is empty");
        return;
    }

    if full {
        let widths = [6, 28, 10, 5, 12];
        output.table_header(&["LINE", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"], &widths);
        for item in &cart.items {
            output.table_row(
                &[
                    &item.id.to_string(),
                    &item.product.name,
                    &item.product.price.to_string(),
                    &item.quantity.to_string(),
                    &item.subtotal.to_string(),
                ],
                &widths,
            );
        }
    } else {
        for item in &cart.items {
            output.list_item(&format!(
                "{} x{}  {}",
                truncate(&item.product.name, 32),
                item.quantity,
                item.subtotal
            ));
        }
    }

    println!();
    output.kv("Items", &cart.total_items.to_string());
    output.kv("Total", &cart.total_amount.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_notices_skips_other_events() {
        let (tx, mut rx) = broadcast::channel(8);
        tx.send(CartEvent::CountChanged { count: 2 }).unwrap();
        tx.send(CartEvent::Notice {
            notice: Notice::success("Cart cleared"),
        })
        .unwrap();
        tx.send(CartEvent::Loaded { cart: Cart::empty() }).unwrap();

        let notices = drain_notices(&mut rx);
        assert_eq!(notices, vec![Notice::success("Cart cleared")]);
        assert!(drain_notices(&mut rx).is_empty());
    }

    #[test]
    fn test_refetch_errors_shown_after_success() {
        let notices = vec![
            Notice::success("Item added to cart"),
            Notice::error("Failed to fetch cart"),
        ];
        assert_eq!(notices_to_show(notices.clone(), false), notices);
    }

    #[test]
    fn test_failed_operation_error_not_repeated() {
        let notices = vec![
            Notice::error("Failed to fetch cart count"),
            Notice::error("Product out of stock"),
        ];
        assert_eq!(
            notices_to_show(notices, true),
            vec![Notice::error("Failed to fetch cart count")]
        );
        assert!(notices_to_show(Vec::new(), true).is_empty());
    }
}

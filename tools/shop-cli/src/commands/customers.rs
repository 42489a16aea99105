//! Customer admin commands.

use anyhow::Result;
use shop_commerce::{Customer, NewCustomer};

use super::{CustomerFields, CustomersArgs, CustomersCommand};
use crate::context::Context;
use crate::output::Output;

/// Run the customers command.
pub async fn run(args: CustomersArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client()?;
    match args.command.unwrap_or(CustomersCommand::List) {
        CustomersCommand::List => {
            let customers = api.customers().list().await?;
            print_customers(&customers, &ctx.output);
        }
        CustomersCommand::Show { id } => {
            let customer = api.customers().get(id).await?;
            print_customers(std::slice::from_ref(&customer), &ctx.output);
        }
        CustomersCommand::Create(fields) => {
            let customer = api.customers().create(&new_customer(fields)).await?;
            ctx.output.success(&format!(
                "Created customer {} ({})",
                customer.full_name(),
                customer.id
            ));
        }
        CustomersCommand::Update { id, fields } => {
            let customer = api.customers().update(id, &new_customer(fields)).await?;
            ctx.output.success(&format!("Updated customer {}", customer.id));
        }
        CustomersCommand::Delete { id } => {
            if !ctx.confirm(&format!("Delete customer {}?", id))? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            api.customers().delete(id).await?;
            ctx.output.success(&format!("Deleted customer {}", id));
        }
    }
    Ok(())
}

fn new_customer(fields: CustomerFields) -> NewCustomer {
    NewCustomer {
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone: fields.phone,
        address: fields.address,
    }
}

fn print_customers(customers: &[Customer], output: &Output) {
    if output.is_json() {
        output.json(&customers);
        return;
    }

    let widths = [6, 24, 30, 16];
    output.table_header(&["ID", "NAME", "EMAIL", "PHONE"], &widths);
    for customer in customers {
        output.table_row(
            &[
                &customer.id.to_string(),
                &customer.full_name(),
                &customer.email,
                customer.phone.as_deref().unwrap_or("-"),
            ],
            &widths,
        );
    }
}

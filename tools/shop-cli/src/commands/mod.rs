//! CLI command implementations.

pub mod cart;
pub mod categories;
pub mod config;
pub mod customers;
pub mod orders;
pub mod products;

use clap::{Args, Subcommand};
use shop_commerce::{CartItemId, CategoryId, CustomerId, OrderId, OrderStatus, ProductId};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show {
        /// Full-page listing with line ids and unit prices.
        #[arg(short, long)]
        full: bool,
    },
    /// Add a product to the cart.
    Add {
        /// Product ID.
        product: ProductId,
        /// Quantity (clamped to 1-5).
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set the quantity of a cart line (0 or less removes it).
    Set {
        /// Cart line ID.
        item: CartItemId,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a cart line by one.
    Inc {
        /// Cart line ID.
        item: CartItemId,
    },
    /// Decrease a cart line by one, removing it at zero.
    Dec {
        /// Cart line ID.
        item: CartItemId,
    },
    /// Remove a cart line.
    Remove {
        /// Cart line ID.
        item: CartItemId,
    },
    /// Remove every line from the cart.
    Clear,
    /// Show the cart count badge.
    Count,
    /// Follow the cart and print every change.
    Watch {
        /// Seconds between refreshes.
        #[arg(short, long, default_value = "5")]
        interval: u64,
    },
}

/// Product fields shared by create and update.
#[derive(Args)]
pub struct ProductFields {
    /// Product name.
    #[arg(long)]
    pub name: String,
    /// Unit price as a decimal amount.
    #[arg(long)]
    pub price: f64,
    /// Units in stock.
    #[arg(long, default_value = "0")]
    pub stock: i64,
    /// Category ID.
    #[arg(long)]
    pub category_id: Option<CategoryId>,
    /// Category label, for backends that store it as text.
    #[arg(long)]
    pub category: Option<String>,
    /// Description.
    #[arg(long)]
    pub description: Option<String>,
    /// Image URL.
    #[arg(long)]
    pub image_url: Option<String>,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products as a grid.
    List {
        /// Only products in this category.
        #[arg(long)]
        category: Option<CategoryId>,
    },
    /// Show one product.
    Show {
        /// Product ID.
        id: ProductId,
    },
    /// Create a product.
    Create(ProductFields),
    /// Replace a product.
    Update {
        /// Product ID.
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: ProductId,
    },
}

/// Category fields shared by create and update.
#[derive(Args)]
pub struct CategoryFields {
    /// Category name.
    #[arg(long)]
    pub name: String,
    /// Description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Image file to upload.
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: Option<CategoriesCommand>,
}

#[derive(Subcommand)]
pub enum CategoriesCommand {
    /// List categories.
    List,
    /// Show one category and its products.
    Show {
        /// Category ID.
        id: CategoryId,
    },
    /// Create a category.
    Create(CategoryFields),
    /// Replace a category.
    Update {
        /// Category ID.
        id: CategoryId,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category.
    Delete {
        /// Category ID.
        id: CategoryId,
    },
}

/// Customer fields shared by create and update.
#[derive(Args)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

/// Arguments for the customers command.
#[derive(Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: Option<CustomersCommand>,
}

#[derive(Subcommand)]
pub enum CustomersCommand {
    /// List customers.
    List,
    /// Show one customer.
    Show {
        /// Customer ID.
        id: CustomerId,
    },
    /// Create a customer.
    Create(CustomerFields),
    /// Replace a customer.
    Update {
        /// Customer ID.
        id: CustomerId,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer.
    Delete {
        /// Customer ID.
        id: CustomerId,
    },
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: Option<OrdersCommand>,
}

#[derive(Subcommand)]
pub enum OrdersCommand {
    /// List orders.
    List,
    /// Show one order.
    Show {
        /// Order ID.
        id: OrderId,
    },
    /// Place an order.
    Create {
        /// Existing customer ID.
        #[arg(long)]
        customer_id: Option<CustomerId>,
        /// Order line as PRODUCT_ID:QUANTITY (repeatable).
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
        /// Guest customer name.
        #[arg(long)]
        name: Option<String>,
        /// Guest customer e-mail.
        #[arg(long)]
        email: Option<String>,
        /// Guest customer phone.
        #[arg(long)]
        phone: Option<String>,
        /// Shipping address.
        #[arg(long)]
        address: Option<String>,
    },
    /// Change an order's status.
    Status {
        /// Order ID.
        id: OrderId,
        /// New status (pending, confirmed, shipped, delivered, cancelled).
        status: OrderStatus,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Base URL of the backend.
        #[arg(long)]
        base_url: Option<String>,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

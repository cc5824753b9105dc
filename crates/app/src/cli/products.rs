use std::io;

use clap::{Args, Subcommand};
use stockroom::{
    presentation::write_products_table,
    products::{ProductDraft, ProductId},
};
use stockroom_app::{context::AppContext, controller::ProductsController};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// List every product
    List,

    /// Add a product
    Add(AddProductArgs),

    /// Replace a product's fields; omitted fields keep their value
    Edit(EditProductArgs),

    /// Sell one unit of a product
    Sell(ProductIdArgs),

    /// Delete a product
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct AddProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Free-text description
    #[arg(long)]
    description: String,

    /// Unit price, e.g. 12.50
    #[arg(long)]
    price: String,

    /// Units in stock
    #[arg(long)]
    quantity: String,
}

#[derive(Debug, Args)]
struct EditProductArgs {
    /// Product identifier
    #[arg(long)]
    id: String,

    /// New product name
    #[arg(long)]
    name: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New unit price
    #[arg(long)]
    price: Option<String>,

    /// New stock level
    #[arg(long)]
    quantity: Option<String>,
}

#[derive(Debug, Args)]
struct ProductIdArgs {
    /// Product identifier
    #[arg(long)]
    id: String,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    /// Product identifier
    #[arg(long)]
    id: String,

    /// Confirm the deletion
    #[arg(long)]
    yes: bool,
}

pub(crate) async fn run(ctx: &AppContext, command: ProductsCommand) -> Result<(), String> {
    let mut controller = ctx.products_controller();

    match command.command {
        ProductsSubcommand::List => {
            controller.refresh().await.map_err(|error| error.to_string())?;
        }
        ProductsSubcommand::Add(args) => {
            controller.start_new();

            *controller.draft_mut() = ProductDraft {
                name: args.name,
                description: args.description,
                price: args.price,
                quantity: args.quantity,
            };

            controller.submit().await.map_err(|error| error.to_string())?;
        }
        ProductsSubcommand::Edit(args) => {
            let id = ProductId::from(args.id.as_str());

            controller.refresh().await.map_err(|error| error.to_string())?;
            controller.edit(&id).map_err(|error| error.to_string())?;

            let draft = controller.draft_mut();

            if let Some(name) = args.name {
                draft.name = name;
            }
            if let Some(description) = args.description {
                draft.description = description;
            }
            if let Some(price) = args.price {
                draft.price = price;
            }
            if let Some(quantity) = args.quantity {
                draft.quantity = quantity;
            }

            controller.submit().await.map_err(|error| error.to_string())?;
        }
        ProductsSubcommand::Sell(args) => {
            let id = ProductId::from(args.id.as_str());

            controller.refresh().await.map_err(|error| error.to_string())?;
            controller.sell(&id).await.map_err(|error| error.to_string())?;
        }
        ProductsSubcommand::Delete(args) => {
            if !args.yes {
                return Err(format!(
                    "refusing to delete product {} without --yes",
                    args.id
                ));
            }

            let id = ProductId::from(args.id.as_str());

            controller.delete(&id).await.map_err(|error| error.to_string())?;
        }
    }

    print_table(&controller)
}

fn print_table(controller: &ProductsController) -> Result<(), String> {
    write_products_table(io::stdout().lock(), controller.items()).map_err(|error| error.to_string())
}

use std::io;

use clap::{Args, Subcommand};
use stockroom::{presentation::write_users_table, users::UserId};
use stockroom_app::{context::AppContext, controller::UsersController};

#[derive(Debug, Args)]
pub(crate) struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// List every account
    List,

    /// Add an account
    Add(AddUserArgs),

    /// Rename an account and set its password
    Edit(EditUserArgs),

    /// Delete an account
    Delete(DeleteUserArgs),
}

#[derive(Debug, Args)]
struct AddUserArgs {
    /// Account name
    #[arg(long)]
    username: String,

    /// Account password
    #[arg(long)]
    password: String,
}

#[derive(Debug, Args)]
struct EditUserArgs {
    /// User identifier
    #[arg(long)]
    id: String,

    /// New account name; keeps the current one when omitted
    #[arg(long)]
    username: Option<String>,

    /// New password; passwords are never pre-filled, so this is required
    #[arg(long)]
    password: String,
}

#[derive(Debug, Args)]
struct DeleteUserArgs {
    /// User identifier
    #[arg(long)]
    id: String,

    /// Confirm the deletion
    #[arg(long)]
    yes: bool,
}

pub(crate) async fn run(ctx: &AppContext, command: UsersCommand) -> Result<(), String> {
    let mut controller = ctx.users_controller();

    controller.refresh().await.map_err(|error| error.to_string())?;

    match command.command {
        UsersSubcommand::List => {}
        UsersSubcommand::Add(args) => {
            controller.start_new();

            let draft = controller.draft_mut();

            draft.username = args.username;
            draft.password = args.password;

            controller.submit().await.map_err(|error| error.to_string())?;
        }
        UsersSubcommand::Edit(args) => {
            let id = UserId::from(args.id.as_str());

            controller.edit(&id).map_err(|error| error.to_string())?;

            let draft = controller.draft_mut();

            if let Some(username) = args.username {
                draft.username = username;
            }

            draft.password = args.password;

            controller.submit().await.map_err(|error| error.to_string())?;
        }
        UsersSubcommand::Delete(args) => {
            if !args.yes {
                return Err(format!("refusing to delete user {} without --yes", args.id));
            }

            let id = UserId::from(args.id.as_str());

            controller.delete(&id).await.map_err(|error| error.to_string())?;
        }
    }

    print_table(&controller)
}

fn print_table(controller: &UsersController) -> Result<(), String> {
    write_users_table(io::stdout().lock(), controller.items()).map_err(|error| error.to_string())
}

use clap::{Parser, Subcommand};
use stockroom_app::{
    config::AppConfig,
    context::AppContext,
    observability,
    session::{MemorySessionStore, SESSION_TOKEN_KEY, SessionGate, SessionStore, View},
};

mod dashboard;
mod products;
mod session;
mod users;

#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "Stockroom inventory admin", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an account
    Signup(session::CredentialsArgs),

    /// Log in and print a session token
    Login(session::CredentialsArgs),

    /// Forget the session token
    Logout,

    /// Stock chart and product table
    Dashboard,

    /// Manage products
    Products(products::ProductsCommand),

    /// Manage user accounts
    Users(users::UsersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| error.to_string())?;

        let ctx = AppContext::from_api_base(&self.config.api.api_url);
        let mut gate = ctx.session_gate(session_store(self.config.api.session_token.as_deref()));

        match self.command {
            Commands::Signup(args) => session::signup(&mut gate, args).await,
            Commands::Login(args) => session::login(&mut gate, args).await,
            Commands::Logout => session::logout(&mut gate),
            Commands::Dashboard => {
                enter(&mut gate, View::Dashboard)?;
                dashboard::run(&ctx).await
            }
            Commands::Products(command) => {
                enter(&mut gate, View::Products)?;
                products::run(&ctx, command).await
            }
            Commands::Users(command) => {
                enter(&mut gate, View::Users)?;
                users::run(&ctx, command).await
            }
        }
    }
}

fn session_store(token: Option<&str>) -> Box<dyn SessionStore> {
    match token {
        Some(token) => Box::new(MemorySessionStore::with(SESSION_TOKEN_KEY, token)),
        None => Box::new(MemorySessionStore::new()),
    }
}

fn enter(gate: &mut SessionGate, view: View) -> Result<(), String> {
    let reached = gate.navigate(view);

    if reached == view {
        Ok(())
    } else {
        Err(format!(
            "{view} requires a session; run `stockroom login` and pass the token with --session-token"
        ))
    }
}

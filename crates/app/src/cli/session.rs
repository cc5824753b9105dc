use clap::Args;
use stockroom_app::session::{AuthError, SessionGate, View};

#[derive(Debug, Args)]
pub(crate) struct CredentialsArgs {
    /// Account name
    #[arg(long)]
    username: String,

    /// Account password
    #[arg(long)]
    password: String,
}

pub(crate) async fn signup(gate: &mut SessionGate, args: CredentialsArgs) -> Result<(), String> {
    if gate.view() != View::Signup {
        gate.toggle_mode();
    }

    let next = gate
        .signup(&args.username, &args.password)
        .await
        .map_err(|error| rejection(gate, &error))?;

    println!("signed up: {}", args.username);
    println!("next: {next}");

    Ok(())
}

pub(crate) async fn login(gate: &mut SessionGate, args: CredentialsArgs) -> Result<(), String> {
    let next = gate
        .login(&args.username, &args.password)
        .await
        .map_err(|error| rejection(gate, &error))?;

    println!("session_token: {}", gate.token().unwrap_or_default());
    println!("next: {next}");

    Ok(())
}

pub(crate) fn logout(gate: &mut SessionGate) -> Result<(), String> {
    let next = gate.logout();

    println!("next: {next}");

    Ok(())
}

fn rejection(gate: &SessionGate, error: &AuthError) -> String {
    gate.error()
        .map_or_else(|| format!("Error: {}", error.reason()), str::to_string)
}

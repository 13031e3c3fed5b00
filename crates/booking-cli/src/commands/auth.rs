//! Account commands: login, register, logout, status.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use booking_core::{LoginForm, RegisterForm, SessionState};

use super::{connect, connect_authenticated};
use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the session
    Login(LoginArgs),

    /// Create an account and log in
    Register(RegisterArgs),

    /// End the session and forget stored tokens
    Logout,

    /// Show whether a session is stored
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name (at least 3 characters)
    #[arg(long)]
    pub name: String,

    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Password (at least 6 characters)
    #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn handle(cmd: AuthCommand, global: &GlobalArgs) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login(args, global).await,
        AuthSubcommand::Register(args) => register(args, global).await,
        AuthSubcommand::Logout => logout(global).await,
        AuthSubcommand::Status => status(global).await,
    }
}

async fn login(args: LoginArgs, global: &GlobalArgs) -> Result<()> {
    let client = connect(global).await?;
    output::note("Logging in...");

    client
        .login(&LoginForm::new(&args.email, &args.password))
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    output::field("Email", &args.email);
    output::field("API", global.api_url.as_str());
    Ok(())
}

async fn register(args: RegisterArgs, global: &GlobalArgs) -> Result<()> {
    let client = connect(global).await?;
    output::note("Creating account...");

    client
        .register(&RegisterForm::new(&args.name, &args.email, &args.password))
        .await
        .context("Failed to register")?;

    output::success(&format!("Account created for {}", args.email));
    Ok(())
}

async fn logout(global: &GlobalArgs) -> Result<()> {
    let client = connect_authenticated(global).await?;
    client.logout().await.context("Failed to logout")?;
    output::success("Logged out");
    Ok(())
}

async fn status(global: &GlobalArgs) -> Result<()> {
    let client = connect(global).await?;
    let authenticated = client.session_state() == SessionState::Authenticated;

    if global.json {
        return output::json_pretty(&json!({
            "authenticated": authenticated,
            "api": global.api_url.as_str(),
        }));
    }

    if authenticated {
        output::success("Logged in");
    } else {
        output::error("Not logged in");
    }
    output::field("API", global.api_url.as_str());
    Ok(())
}

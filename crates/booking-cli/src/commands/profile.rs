//! Profile commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use booking_core::UpdateProfileForm;
use booking_core::model::UserProfile;

use super::connect_authenticated;
use crate::cli::GlobalArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileSubcommand {
    /// Show the signed-in user
    Show,

    /// Change name, email or password
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Current password, required for any change
    #[arg(long)]
    pub current_password: String,

    /// New password; omit to keep the current one
    #[arg(long)]
    pub new_password: Option<String>,
}

pub async fn handle(cmd: ProfileCommand, global: &GlobalArgs) -> Result<()> {
    let client = connect_authenticated(global).await?;

    match cmd.command {
        ProfileSubcommand::Show => {
            let profile = client.profile().await.context("Failed to load profile")?;
            print_profile(&profile, global)
        }
        ProfileSubcommand::Update(args) => {
            let form = UpdateProfileForm::new(
                args.name,
                args.email,
                args.current_password,
                args.new_password,
            );
            let profile = client
                .update_profile(&form)
                .await
                .context("Failed to update profile")?;
            if !global.json {
                output::success("Profile updated");
            }
            print_profile(&profile, global)
        }
    }
}

fn print_profile(profile: &UserProfile, global: &GlobalArgs) -> Result<()> {
    if global.json {
        return output::json_pretty(profile);
    }
    output::field("ID", &profile.id.to_string());
    output::field("Name", &profile.name);
    output::field("Email", &profile.email);
    Ok(())
}

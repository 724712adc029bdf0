//! Profile commands for the signed-in user.

use std::path::PathBuf;

use clap::Subcommand;
use relic_arcade_client::models::{UpdatePasswordRequest, UpdateUserRequest};
use relic_arcade_client::{RelicArcade, UploadFile};
use serde_json::json;

use super::{CliError, print_json};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,
    /// Change profile fields
    Update {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },
    /// Change the password
    Password {
        #[arg(long, env = "RELIC_ARCADE_PASSWORD", hide_env_values = true)]
        current: String,

        #[arg(long, env = "RELIC_ARCADE_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
    /// Upload a new avatar
    Avatar { file: PathBuf },
}

pub async fn run(arcade: &RelicArcade, action: ProfileAction) -> Result<(), CliError> {
    let users = arcade.users();

    match action {
        ProfileAction::Show => print_json(&users.get_profile().await?),
        ProfileAction::Update {
            email,
            username,
            phone,
        } => {
            let changes = UpdateUserRequest {
                email,
                username,
                phone,
            };
            if changes.is_empty() {
                return Err(CliError::InvalidArgument(
                    "nothing to update; pass --email, --username or --phone".to_string(),
                ));
            }
            print_json(&users.update_profile(&changes).await?)
        }
        ProfileAction::Password { current, new } => {
            users
                .change_password(&UpdatePasswordRequest {
                    current_password: current.into(),
                    new_password: new.into(),
                })
                .await?;
            print_json(&json!({ "passwordChanged": true }))
        }
        ProfileAction::Avatar { file } => {
            let upload = UploadFile::from_path(&file).await?;
            print_json(&users.upload_avatar(upload).await?)
        }
    }
}

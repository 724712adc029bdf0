//! Authentication commands.
//!
//! # Usage
//!
//! ```bash
//! ra-cli auth login -e player1@example.com -p 'Hunter2!'
//! ra-cli auth register -u player1 -e player1@example.com -p 'Hunter2!' --cpf 12345678901
//! ra-cli auth forgot -e player1@example.com
//! ra-cli auth reset --token abc123 -p 'NewPass1!'
//! ra-cli auth whoami
//! ra-cli auth logout
//! ```

use clap::Subcommand;
use relic_arcade_client::RelicArcade;
use relic_arcade_client::models::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use serde_json::json;

use super::{CliError, print_json};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in and store the issued token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "RELIC_ARCADE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "RELIC_ARCADE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Brazilian taxpayer ID
        #[arg(long)]
        cpf: String,

        #[arg(long)]
        phone: Option<String>,
    },
    /// Request a password-reset email
    Forgot {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with a reset token
    Reset {
        #[arg(long)]
        token: String,

        #[arg(short, long, env = "RELIC_ARCADE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the claims of the stored token
    Whoami,
    /// Forget the stored token
    Logout,
}

pub async fn run(arcade: &RelicArcade, action: AuthAction) -> Result<(), CliError> {
    let auth = arcade.auth();

    match action {
        AuthAction::Login { email, password } => {
            let token = auth
                .login(&LoginRequest {
                    email,
                    password: password.into(),
                })
                .await?;
            let claims = token.claims();
            print_json(&json!({ "authenticated": true, "session": claims }))
        }
        AuthAction::Register {
            username,
            email,
            password,
            cpf,
            phone,
        } => {
            let response = auth
                .register(&RegisterRequest {
                    username,
                    email,
                    password: password.into(),
                    cpf,
                    phone,
                })
                .await?;
            print_json(&json!({
                "authenticated": auth.is_authenticated(),
                "user": response.user,
            }))
        }
        AuthAction::Forgot { email } => {
            let response = auth
                .forgot_password(&ForgotPasswordRequest { email })
                .await?;
            print_json(&response)
        }
        AuthAction::Reset { token, password } => {
            let response = auth
                .reset_password(&ResetPasswordRequest {
                    token,
                    password: password.into(),
                })
                .await?;
            print_json(&response)
        }
        AuthAction::Whoami => print_json(&json!({
            "authenticated": auth.is_authenticated(),
            "session": auth.session(),
        })),
        AuthAction::Logout => {
            auth.logout()?;
            tracing::info!("Logged out");
            print_json(&json!({ "authenticated": false }))
        }
    }
}

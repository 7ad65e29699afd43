use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::{context::Context, util::prelude::*};

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
	/// Store a dashboard token and check it against the backend
	Login { token: String },
	/// Forget the stored token
	Logout,
	/// Show whether a valid token is stored
	Status,
}

#[derive(Serialize)]
struct AuthStatus {
	logged_in: bool,
	api_url: String,
}

pub async fn run(ctx: &Context, cmd: AuthCmd) -> Result<()> {
	let dashboard = &ctx.dashboard;

	match cmd {
		AuthCmd::Login { token } => {
			if token.trim().is_empty() {
				anyhow::bail!("Token cannot be empty");
			}

			dashboard.login(&token).await?;
			if !dashboard.verify_token().await? {
				anyhow::bail!("The backend rejected this token");
			}

			println!("Logged in to {}", dashboard.config().api_url);
		}
		AuthCmd::Logout => {
			dashboard.logout().await?;
			println!("Logged out");
		}
		AuthCmd::Status => {
			let status = AuthStatus {
				logged_in: dashboard.verify_token().await?,
				api_url: dashboard.config().api_url.clone(),
			};

			print_output!(ctx, &status, |s: &AuthStatus| {
				if s.logged_in {
					println!("Logged in to {}", s.api_url);
				} else {
					println!("Not logged in to {}", s.api_url);
				}
			});
		}
	}

	Ok(())
}

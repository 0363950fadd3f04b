//! CRM diagnostics
//!
//! Inspect how access checks resolve for a user against the hosted database,
//! insert test notifications and preview avatar URLs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crm_core::avatar::AvatarGenerator;
use crm_core::notifications::{create_notification, NewNotification, NotificationKind};
use crm_core::permissions::{PermissionGate, PgAccessSource, RoleSource};
use crm_core::{config, db, observability};

#[derive(Parser)]
#[command(
    name = "crm-diagnose",
    about = "Diagnostics for CRM access checks and notifications"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the role resolved for a user.
    Role {
        #[arg(long)]
        user: Uuid,
    },

    /// Evaluate a permission gate for a user.
    Gate {
        #[arg(long)]
        user: Uuid,

        /// Named action to check (e.g., "leads.delete").
        #[arg(long)]
        action: Option<String>,

        /// Require the elevated role.
        #[arg(long)]
        require_admin: bool,
    },

    /// Insert a notification for a user.
    Notify {
        #[arg(long)]
        user: Uuid,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        message: String,

        /// One of info, success, warning, error.
        #[arg(long, default_value = "info")]
        kind: NotificationKind,

        #[arg(long)]
        link: Option<String>,
    },

    /// Print the avatar URL for a name.
    Avatar {
        #[arg(long)]
        name: String,

        /// Explicit avatar URL, used as-is when set.
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;
    observability::init(config.log_format);

    let cli = Cli::parse();

    match cli.command {
        Command::Role { user } => {
            let source = access_source(&config, user).await?;
            let role = source.current_role().await?;
            println!("{}", json!({ "user_id": user, "role": role }));
        }
        Command::Gate {
            user,
            action,
            require_admin,
        } => {
            let source = access_source(&config, user).await?;
            let mut gate = PermissionGate::new()
                .require_admin(require_admin)
                .admin_role(config.admin_role.clone());
            if let Some(action) = action {
                gate = gate.action(action);
            }
            if gate.is_unrestricted() {
                tracing::warn!("no --action or --require-admin given; gate allows everything");
            }

            let state = gate.resolve(&source, &source).await?;
            let decision = gate.decide(&state);
            println!(
                "{}",
                json!({
                    "user_id": user,
                    "action": gate.action_name(),
                    "require_admin": require_admin,
                    "state": state,
                    "decision": decision,
                })
            );
        }
        Command::Notify {
            user,
            title,
            message,
            kind,
            link,
        } => {
            let pool = db::create_pool(config.require_database_url()?).await?;
            let mut new = NewNotification::new(user, title).message(message).kind(kind);
            if let Some(link) = link {
                new = new.link(link);
            }

            let notification = create_notification(&pool, &new)
                .await
                .context("failed to create notification")?;
            println!("{}", serde_json::to_string_pretty(&notification)?);
        }
        Command::Avatar { name, url } => {
            let generator = AvatarGenerator::from_config(&config);
            let avatar = generator
                .url_for(&name, url.as_deref())
                .context("AVATAR_BASE_URL is not a valid URL")?;
            println!("{avatar}");
        }
    }

    Ok(())
}

async fn access_source(config: &config::Config, user: Uuid) -> Result<PgAccessSource> {
    let pool = db::create_pool(config.require_database_url()?).await?;
    info!(user_id = %user, "resolving access");
    Ok(PgAccessSource::new(pool, user))
}

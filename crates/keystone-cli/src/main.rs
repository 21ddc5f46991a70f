use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keystone_core::auth::create_account;
use keystone_core::password::DEFAULT_COST;
use keystone_core::{PasswordHasher, Role};
use keystone_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "keystone", version, about = "Keystone operator tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create an account directly in the database (the only way to create an admin)
    CreateUser {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Login email, matched exactly at sign-in
        #[arg(short, long)]
        email: String,

        /// Plaintext password (reads from KEYSTONE_PASSWORD if not provided)
        #[arg(short, long, env = "KEYSTONE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Account role: "user" or "admin"
        #[arg(short, long, default_value = "user")]
        role: Role,

        /// bcrypt work factor
        #[arg(long, env = "BCRYPT_COST", default_value_t = DEFAULT_COST)]
        cost: u32,
    },

    /// Print the number of registered accounts
    CountUsers,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("keystone=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Migrate => {
            db.migrate().await.context("Failed to run migrations")?;
            println!("Migrations applied");
        }
        Commands::CreateUser {
            name,
            email,
            password,
            role,
            cost,
        } => {
            db.migrate().await.context("Failed to run migrations")?;
            cmd_create_user(&db, name, email, &password, role, cost).await?;
        }
        Commands::CountUsers => {
            let total = db.user_repo().count().await?;
            println!("{total}");
        }
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env()?;
    Database::connect(&config)
        .await
        .context("Failed to connect to database")
}

async fn cmd_create_user(
    db: &Database,
    name: String,
    email: String,
    password: &str,
    role: Role,
    cost: u32,
) -> Result<()> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("name, email and password must not be empty");
    }

    let hasher = PasswordHasher::new(cost)?;
    let user = create_account(&db.user_repo(), &hasher, name, email, password, role).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "Account created");
    println!("{} <{}> ({})", user.id, user.email, user.role);

    Ok(())
}

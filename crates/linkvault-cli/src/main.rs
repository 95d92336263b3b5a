use chrono::Utc;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use linkvault_cli::commands;
use linkvault_db::{PgPool, PgRefreshTokenStore, PgUserStore, init_db_pool};

#[derive(Parser)]
#[command(name = "linkvault-cli")]
#[command(about = "LinkVault CLI - Administrative tools for LinkVault", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user account
    CreateUser {
        /// Display name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Delete expired refresh tokens from the allow-list
    PruneTokens,
    /// List the active refresh tokens of a user
    ListSessions {
        /// Email address of the user
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Revoke every refresh token of a user (signs out all devices)
    RevokeSessions {
        /// Email address of the user
        #[arg(short = 'e', long)]
        email: String,
    },
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => fail("Configuration error", "DATABASE_URL must be set"),
    };

    let pool = match init_db_pool(&database_url, 5).await {
        Ok(pool) => pool,
        Err(e) => fail("Failed to connect to database", e),
    };

    match cli.command {
        Commands::CreateUser {
            username,
            email,
            password,
        } => handle_create_user(&pool, username, email, password).await,
        Commands::PruneTokens => handle_prune_tokens(&pool).await,
        Commands::ListSessions { email } => handle_list_sessions(&pool, &email).await,
        Commands::RevokeSessions { email } => handle_revoke_sessions(&pool, &email).await,
    }
}

fn prompt_text(prompt: &str) -> String {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .unwrap_or_else(|e| fail(&format!("Failed to read {}", prompt.to_lowercase()), e))
}

async fn handle_create_user(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt_text("Username"));
    let email = email.unwrap_or_else(|| prompt_text("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    let users = PgUserStore::new(pool.clone());
    match commands::create_user(&users, &username, &email, &password).await {
        Ok(user) => {
            println!("\n✅ User created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email);
            println!("   Username: {}", user.username);
        }
        Err(e) => fail("Error creating user", e.error),
    }
}

async fn handle_prune_tokens(pool: &PgPool) {
    let tokens = PgRefreshTokenStore::new(pool.clone());
    match commands::prune_tokens(&tokens, Utc::now()).await {
        Ok(count) => println!("✅ Pruned {} expired refresh tokens", count),
        Err(e) => fail("Error pruning refresh tokens", e.error),
    }
}

async fn handle_list_sessions(pool: &PgPool, email: &str) {
    let users = PgUserStore::new(pool.clone());
    let tokens = PgRefreshTokenStore::new(pool.clone());
    let now = Utc::now();

    match commands::list_sessions(&users, &tokens, email).await {
        Ok((user, sessions)) => {
            println!("Sessions for {} ({}):", user.email, user.id);
            if sessions.is_empty() {
                println!("   (none)");
            }
            for session in sessions {
                let status = if session.is_expired(now) {
                    "expired"
                } else {
                    "active"
                };
                println!(
                    "   {}  issued {}  expires {}  [{}]",
                    session.jti,
                    session.created_at.to_rfc3339(),
                    session.expires_at.to_rfc3339(),
                    status
                );
            }
        }
        Err(e) => fail("Error listing sessions", e.error),
    }
}

async fn handle_revoke_sessions(pool: &PgPool, email: &str) {
    let users = PgUserStore::new(pool.clone());
    let tokens = PgRefreshTokenStore::new(pool.clone());
    match commands::revoke_sessions(&users, &tokens, email).await {
        Ok(count) => println!("✅ Revoked {} refresh tokens for {}", count, email.trim()),
        Err(e) => fail("Error revoking sessions", e.error),
    }
}

//! Photo Kiosk CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! kiosk-cli migrate
//!
//! # Seed a demo session, photos, and order for receipt testing
//! kiosk-cli seed --photos 3
//!
//! # Reset the admin PIN
//! kiosk-cli admin set-pin --pin 4321
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Create demo data for receipt testing
//! - `admin set-pin` - Reset the admin PIN

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kiosk-cli")]
#[command(author, version, about = "Photo Kiosk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed a demo session, photos, and order for receipt testing
    Seed {
        /// Number of placeholder photos to create
        #[arg(short, long, default_value_t = 3)]
        photos: u32,
    },
    /// Manage the admin PIN
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Set a new admin PIN (4-8 digits)
    SetPin {
        /// The new PIN
        #[arg(short, long)]
        pin: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { photos } => commands::seed::run(photos).await?,
        Commands::Admin { action } => match action {
            AdminAction::SetPin { pin } => commands::admin::set_pin(&pin).await?,
        },
    }
    Ok(())
}

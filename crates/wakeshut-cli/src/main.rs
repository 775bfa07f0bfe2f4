//! Wakeshut CLI
//!
//! Shut down a remote machine over SSH and wake it with a magic packet.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "wakeshut")]
#[command(author, version, about = "Wakeshut - remote shutdown over SSH and Wake-on-LAN", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Shut down the configured machine over SSH
    Shutdown {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Send a Wake-on-LAN magic packet to the configured machine
    Wake,

    /// Manage SSH and Wake-on-LAN settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the stored settings (secrets masked)
    Show,

    /// Edit and save the SSH connection settings
    Ssh {
        /// Host name or IP address
        #[arg(long)]
        host: Option<String>,

        /// SSH port
        #[arg(long)]
        port: Option<u16>,

        /// Login user
        #[arg(short, long)]
        user: Option<String>,

        /// Authenticate with a password (prompted)
        #[arg(long, conflicts_with = "key_file")]
        password: bool,

        /// Authenticate with an unencrypted private key file
        #[arg(long)]
        key_file: Option<std::path::PathBuf>,
    },

    /// Edit and save the Wake-on-LAN settings
    Wol {
        /// Target MAC address
        #[arg(long)]
        mac: Option<String>,

        /// Broadcast address (blank for 255.255.255.255)
        #[arg(long)]
        broadcast: Option<String>,

        /// UDP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Test the SSH connection without saving
    Test {
        /// Timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Send a test magic packet with the stored Wake-on-LAN settings
    #[command(name = "wake-test")]
    WakeTest,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "wakeshut_cli=debug,wakeshut_core=debug"
        } else {
            "wakeshut_cli=info"
        })
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    debug!("Starting Wakeshut CLI");

    let result = match cli.command {
        Commands::Shutdown { yes } => commands::shutdown::execute(yes).await,
        Commands::Wake => commands::wake::execute().await,
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await,
            SettingsAction::Ssh {
                host,
                port,
                user,
                password,
                key_file,
            } => {
                commands::settings::edit_ssh(commands::settings::SshOptions {
                    host,
                    port,
                    user,
                    password,
                    key_file,
                })
                .await
            }
            SettingsAction::Wol {
                mac,
                broadcast,
                port,
            } => commands::settings::edit_wol(mac, broadcast, port).await,
            SettingsAction::Test { timeout } => commands::test::connection(timeout).await,
            SettingsAction::WakeTest => commands::test::wake().await,
        },
    };

    if let Err(ref e) = result {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    result
}

//! refund-form - terminal client for booking refund and cancellation
//! requests.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use refund_form::api::{self, RefundClient};
use refund_form::app::App;
use refund_form::config::Config;
use refund_form::error::{AppError, Result};
use refund_form::events::EventHandler;
use refund_form::form::{FormController, FormField, Notifier, SubmissionLifecycle};
use refund_form::logging;
use refund_form::tasks::TaskSpawner;

#[derive(Debug, Parser)]
#[command(name = "refund-form", version, about = "Submit booking refund and cancellation requests")]
struct Cli {
    /// Override the API base URL from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a request without opening the form.
    Submit {
        #[arg(long)]
        booking_id: String,
        /// cancellation, refund or modification.
        #[arg(long, default_value = "cancellation")]
        request_type: String,
        /// emergency, property_issue, host_cancelled, travel_restrictions or other.
        #[arg(long)]
        reason: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        details: String,
    },
    /// Manage the API token stored in the OS keyring.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Write the current settings to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file and logs live.
    Path,
}

#[derive(Debug, Subcommand)]
enum TokenAction {
    /// Store a token.
    Set { token: String },
    /// Remove the stored token.
    Delete,
}

/// Prints submission outcomes to the console.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_success(&mut self, message: &str) {
        println!("✓ {}", message);
    }

    fn notify_failure(&mut self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let result = run(cli).await;
    logging::shutdown(log_guard);

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {}", e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load()?;
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
        config.validate()?;
    }

    match cli.command {
        None => run_tui(&config).map(|_| ExitCode::SUCCESS),
        Some(Command::Submit {
            booking_id,
            request_type,
            reason,
            name,
            email,
            details,
        }) => {
            let client = RefundClient::new(&config.api)?;
            let mut controller = FormController::new();
            controller.update_field(FormField::BookingId, booking_id);
            controller.update_field(FormField::RequestType, request_type);
            controller.update_field(FormField::Reason, reason);
            controller.update_field(FormField::Name, name);
            controller.update_field(FormField::ContactEmail, email);
            controller.update_field(FormField::AdditionalDetails, details);

            let missing = controller.draft().missing_required_fields();
            if !missing.is_empty() {
                let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
                eprintln!("Missing required fields: {}", names.join(", "));
                return Ok(ExitCode::FAILURE);
            }

            controller.submit(&client, &mut ConsoleNotifier).await;
            Ok(match controller.lifecycle() {
                SubmissionLifecycle::Succeeded => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Some(Command::Token { action }) => {
            match action {
                TokenAction::Set { token } => {
                    api::store_token(&config.api.token_account, &token)?;
                    println!("Token stored for account '{}'", config.api.token_account);
                }
                TokenAction::Delete => {
                    api::delete_token(&config.api.token_account)?;
                    println!("Token removed for account '{}'", config.api.token_account);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Config { action }) => run_config(&config, action),
    }
}

fn run_config(config: &Config, action: ConfigAction) -> Result<ExitCode> {
    let path = Config::config_path()?;
    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                eprintln!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
                return Ok(ExitCode::FAILURE);
            }
            config.save_to(&path)?;
            info!(path = %path.display(), "Wrote configuration");
            println!("Wrote {}", path.display());
        }
        ConfigAction::Path => {
            println!("config: {}", path.display());
            match logging::log_directory() {
                Ok(dir) => println!("logs:   {}", dir.display()),
                Err(e) => println!("logs:   unavailable ({})", e),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_tui(config: &Config) -> Result<()> {
    let client = RefundClient::new(&config.api)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let spawner = TaskSpawner::new(tx, Arc::new(client));
    let mut app = App::new(spawner, Duration::from_secs(config.ui.notification_secs));

    enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // The event loop blocks on terminal polling; keep it off the async workers.
    let result = tokio::task::block_in_place(|| {
        app.run(&mut terminal, &EventHandler::new(), &mut rx)
    });

    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

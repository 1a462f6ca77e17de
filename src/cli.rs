//! CLI definitions and entry point

use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::commands;
use taskboard::app::App;
use taskboard::config::Config;
use taskboard::notify::{Notification, NotificationKind, Notifier};
use taskboard::output::OutputMode;
use taskboard::storage::FileStorage;
use taskboard::VERSION;

/// taskboard - Task board client
#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    version,
    about = "Task board client",
    long_about = "Manage tasks on a remote task board from the terminal.\n\n\
                  Log in once; the session is kept in ~/.taskboard/session.json\n\
                  until you log out or the server rejects it."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Create an account and log in
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Reset a forgotten password
    ResetPassword {
        #[command(subcommand)]
        action: ResetAction,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Show tasks grouped by status
    Board,

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ResetAction {
    /// Email a reset link
    Request {
        /// Account email
        email: String,
    },

    /// Set a new password with the token from the reset link
    Confirm {
        /// Reset token
        token: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the saved settings
    Show,

    /// Save the API base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:5000
        url: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Filter by status: pending, in_progress, completed
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },

    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Due date (as accepted by the server, e.g. 2025-01-31)
        #[arg(long)]
        due: String,

        /// Initial status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Update fields of a task
    Update {
        /// Task ID
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due date
        #[arg(long)]
        due: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Start a task (mark as in_progress)
    Start {
        /// Task ID
        id: String,
    },

    /// Complete a task (mark as completed)
    Done {
        /// Task ID
        id: String,
    },

    /// Move a task to another board column
    Move {
        /// Task ID
        id: String,

        /// Target status: pending, in_progress, completed
        status: String,
    },

    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
}

/// Notifier that prints to stderr
#[derive(Debug, Clone, Copy)]
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        let label = match notification.kind {
            NotificationKind::Info => "info:".blue(),
            NotificationKind::Warning => "warning:".yellow(),
            NotificationKind::Error => "error:".red(),
        };
        eprintln!("{label} {}", notification.message);
    }
}

/// Run the CLI; returns whether the command succeeded
pub async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": VERSION,
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("taskboard v{VERSION}");
            println!("\nRun 'taskboard --help' for usage");
            println!("Run 'taskboard login' to get started");
        }
        return Ok(true);
    };

    if let Command::Version = command {
        if output_mode == OutputMode::Json {
            println!("{}", serde_json::json!({ "version": VERSION }));
        } else {
            println!("taskboard v{VERSION}");
        }
        return Ok(true);
    }

    // Saved settings, not the --api-url override
    if let Command::Config { action } = command {
        return commands::config_cmd(action, output_mode);
    }

    let mut config = Config::load();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }

    let storage = Arc::new(FileStorage::new(config.session_path()));
    let app = App::new(&config, storage, Arc::new(StderrNotifier));
    log::debug!("Using API at {}", config.api.url);

    match command {
        Command::Login { email, password } => {
            commands::login(&app, &email, &password, output_mode).await
        },
        Command::Register {
            email,
            username,
            password,
        } => commands::register(&app, email, username, password, output_mode).await,
        Command::Logout => commands::logout(&app, output_mode).await,
        Command::Whoami => Ok(commands::whoami(&app, output_mode)),
        Command::ResetPassword { action } => {
            commands::reset_password(&app, action, output_mode).await
        },
        Command::Task { action } => commands::task_cmd(&app, action, output_mode).await,
        Command::Board => commands::board(&app, output_mode).await,
        Command::Version | Command::Config { .. } => Ok(true),
    }
}

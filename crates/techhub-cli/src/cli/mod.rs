//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use techhub_core::client::AuthClient;
use techhub_core::config::{self, Config};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "techhub")]
#[command(version)]
#[command(about = "Embroidery Tech Hub terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the authentication service (overrides config and
    /// the TECHHUB_BASE_URL environment variable)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in once and print the technician profile
    Login {
        /// Account email address
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Register {
        /// First name
        #[arg(long)]
        name: String,

        /// Last name
        #[arg(long)]
        surname: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,

        /// Department
        #[arg(long)]
        department: String,

        /// Task or role
        #[arg(long)]
        task: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let Some(command) = cli.command else {
        // Interactive mode. Logs go to a file: the alternate screen
        // owns stderr while the TUI runs.
        let _guard = init_file_logging()?;
        let auth = build_client(cli.base_url.as_deref(), &config)?;
        return techhub_tui::run_app(auth).await;
    };

    match command {
        Commands::Login { email, password } => {
            init_stderr_logging();
            let auth = build_client(cli.base_url.as_deref(), &config)?;
            commands::auth::login(&auth, email, password).await
        }
        Commands::Register {
            name,
            surname,
            email,
            password,
            department,
            task,
        } => {
            init_stderr_logging();
            let auth = build_client(cli.base_url.as_deref(), &config)?;
            commands::auth::register(
                &auth,
                commands::auth::RegisterArgs {
                    name,
                    surname,
                    email,
                    password,
                    department,
                    task,
                },
            )
            .await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn build_client(flag: Option<&str>, config: &Config) -> Result<AuthClient> {
    let base_url = config::resolve_base_url(flag, config)?;
    AuthClient::new(base_url, config.request_timeout())
}

fn init_stderr_logging() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        tracing::warn!("Failed to initialise logging: {e}");
    }
}

fn init_file_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let dir = config::paths::logs_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "techhub.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    if let Err(e) = result {
        tracing::warn!("Failed to initialise logging: {e}");
    }
    Ok(guard)
}

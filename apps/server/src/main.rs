use anyhow::Context;
use clap::{Parser, Subcommand};
use jackfruit_backend_runtime::{shutdown_signal, telemetry, BackendServices};
use jackfruit_config::{load as load_config, AppConfig};
use jackfruit_gateway::create_router;
use jackfruit_users::{RegisterRequest, UserError, UserRepresentation};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "jackfruit-backend")]
#[command(about = "Jackfruit backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Create a user through the registration rules
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Print every user in the database
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Migrate => migrate(config).await,
        Commands::CreateUser {
            username,
            password,
            email,
        } => create_user(config, username, password, email).await,
        Commands::ListUsers => list_users(config).await,
    }
}

async fn initialise(config: &AppConfig) -> anyhow::Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    info!("starting Jackfruit backend");

    let services = initialise(&config).await?;
    let app = create_router(services.app_state(&config));

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    let services = initialise(&config).await?;
    let users = services.users.count().await.context("failed to count users")?;

    println!("Migrations applied to {} ({users} users)", config.database.url);
    Ok(())
}

async fn create_user(
    config: AppConfig,
    username: String,
    password: String,
    email: Option<String>,
) -> anyhow::Result<()> {
    let services = initialise(&config).await?;

    let request = RegisterRequest {
        username: Some(username),
        password: Some(password),
        email,
        ..Default::default()
    };

    match services.user_service().register(request).await {
        Ok(user) => {
            println!("Created user {} (id {})", user.username, user.id);
            Ok(())
        }
        Err(UserError::Validation(fields)) => {
            for (field, messages) in fields.as_map() {
                for message in messages {
                    eprintln!("{field}: {message}");
                }
            }
            anyhow::bail!("user was not created")
        }
        Err(error) => Err(error).context("failed to create user"),
    }
}

async fn list_users(config: AppConfig) -> anyhow::Result<()> {
    let services = initialise(&config).await?;
    let users = services
        .user_service()
        .list_users()
        .await
        .context("failed to list users")?;

    if users.is_empty() {
        println!("No users found in database");
        return Ok(());
    }

    println!(
        "{:<6} {:<30} {:<40} {:<20} {:<20}",
        "ID", "Username", "Email", "First name", "Last name"
    );
    println!("{}", "-".repeat(120));
    for UserRepresentation {
        id,
        username,
        email,
        first_name,
        last_name,
    } in users
    {
        println!("{id:<6} {username:<30} {email:<40} {first_name:<20} {last_name:<20}");
    }

    Ok(())
}

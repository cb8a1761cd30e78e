use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use sea_orm::Database;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Memflip database migration tool")]
struct Args {
    /// Migration command to run: up | down | fresh | reset | refresh | status
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(
        short,
        long,
        value_enum,
        default_value = "postgres",
        help = "Database type: postgres, sqlite-file"
    )]
    db: Db,
}

/// Build the database URL for the requested environment.
///
/// Migrations always run as the schema owner, never as the app user.
/// SQLite in-memory is intentionally unsupported here: each CLI invocation
/// would create a fresh ephemeral database, making migration commands
/// pointless.
fn database_url(env: &Env, db: &Db) -> Result<String, String> {
    match db {
        Db::SqliteFile => {
            let path = must_var("SQLITE_DB_PATH")?;
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        Db::Postgres => {
            let host = std::env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let user = must_var("MEMFLIP_OWNER_USER")?;
            let password = must_var("MEMFLIP_OWNER_PASSWORD")?;
            let db_name = match env {
                Env::Prod => must_var("PROD_DB")?,
                Env::Test => {
                    let name = must_var("TEST_DB")?;
                    if !name.ends_with("_test") {
                        return Err(format!(
                            "Test environment requires a database name ending with '_test', got: '{name}'"
                        ));
                    }
                    name
                }
            };
            Ok(format!("postgresql://{user}:{password}@{host}:{port}/{db_name}"))
        }
    }
}

fn must_var(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("Required environment variable '{name}' is not set"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.as_str() {
        "up" => MigrationCommand::Up,
        "down" => MigrationCommand::Down,
        "fresh" => MigrationCommand::Fresh,
        "reset" => MigrationCommand::Reset,
        "refresh" => MigrationCommand::Refresh,
        "status" => MigrationCommand::Status,
        other => {
            eprintln!("Unknown command: {other}. Use: up | down | fresh | reset | refresh | status");
            std::process::exit(2);
        }
    };

    let url = match database_url(&args.env, &args.db) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}

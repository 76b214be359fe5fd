use anyhow::Context;
use bookstore_kernel::{settings::Settings, ModuleRegistry};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

#[derive(Debug, Parser)]
#[command(name = "bookstore-cli", version, about = "Operate the bookstore service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service until SIGINT/SIGTERM
    Serve,
    /// Print the schema statements every module applies at startup
    Schema,
    /// Connect to the configured database and run a liveness query
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    match cli.command {
        Command::Serve => {
            bookstore_telemetry::init(&settings.telemetry)?;
            bookstore_app::run(settings).await
        }
        Command::Schema => print_schema(&settings),
        Command::Ping => {
            bookstore_telemetry::init(&settings.telemetry)?;
            let pool = bookstore_db::connect(&settings.database)
                .await
                .context("database is not reachable")?;
            println!(
                "database {}:{}/{} is reachable",
                settings.database.host, settings.database.port, settings.database.name
            );
            pool.close().await;
            Ok(())
        }
    }
}

/// Modules need a pool to be constructed; a lazy one never opens a connection.
fn print_schema(settings: &Settings) -> anyhow::Result<()> {
    let pool = PgPoolOptions::new()
        .connect_lazy_with(bookstore_db::connect_options(&settings.database));

    let mut registry = ModuleRegistry::new();
    bookstore_app::modules::register_all(&mut registry, pool);

    for (module, statement) in registry.collect_schema() {
        println!("-- {}/{}", module, statement.id);
        println!("{}", statement.sql.trim());
    }
    Ok(())
}

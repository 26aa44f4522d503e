use etudiant_etranger::config::Config;
use etudiant_etranger::migrations::Migrator;
use etudiant_etranger::routes;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let config = Config::from_env();
    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    let app = routes::app(&db);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

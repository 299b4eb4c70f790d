//! A minimal greeting service with axum.

use hello_world_service::{app, infra::config, infra::logging};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let config = config::load_config()?;
    let _guard = logging::init_logging(&config.logging);

    let listener = TcpListener::bind(config.server.bind_address()?).await?;
    app::run_app(listener, config).await?;

    Ok(())
}

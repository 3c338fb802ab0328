use taskboard_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Logging goes to a file in production, the console otherwise
    taskboard_api::setup::telemetry::init_telemetry(&config)?;

    // Initialize the application (database, routes)
    let (_state, router) = taskboard_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    taskboard_api::setup::server::start_server(&config, router).await?;

    Ok(())
}

use recipe_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logger)
    let config = setup_environment()?;

    print_banner();

    tracing::info!(
        "Recipe server starting (env: {}, port: {})",
        config.environment,
        config.http_port
    );

    // 2. Database, migrations, admin provisioning
    let state = ServerState::initialize(&config).await?;

    // 3. Serve until ctrl-c
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

use redactor_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router) = redactor_function::setup::initialize_app(config.clone()).await?;

    redactor_function::setup::server::start_server(&config, router).await?;

    Ok(())
}

use wipercheck::config::Config;
use wipercheck::engine::Engine;
use wipercheck::error::Error;
use wipercheck::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(err) = run().await {
        tracing::error!(code = err.code, error = %err.message, "wipercheck stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let engine = Engine::from_config(&config).await?;

    serve(engine, config.listen_address).await
}

use anyhow::Context;

mod api;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let addr = std::env::var("RRG_BACKEND_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    log::info!("Listening on {addr}");
    axum::serve(listener, api::router())
        .await
        .context("server stopped unexpectedly")
}

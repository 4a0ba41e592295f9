use std::net::SocketAddr;
use std::sync::Arc;

use photo_transform_proxy::{api, config, openai};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().expect("OPENAI_API_KEY must be set");
    config::Config::print_env_vars();

    // Create the upstream image-edit client
    let openai_client = openai::client::OpenAiImageClient::new(
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
    );
    let state = Arc::new(api::routes::AppState { openai_client });

    // Build our application with a route
    let app = api::routes::router(state);

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 3000", port_str);
        3000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

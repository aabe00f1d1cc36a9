use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::http::create_app;
use crate::local_calendar::LocalCalendar;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod error;
mod http;
mod local_calendar;
mod simulation;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("#########################");
    println!("# Venue Booking Backend #");
    println!("#########################");

    let configuration = ConfigurationHandler::from_env();
    info!("Server running in {} mode", configuration.run_mode());

    let backend = LocalCalendar::new();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessable at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = create_app(backend, configuration);
    axum::serve(listener, app).await.unwrap();
}

use anyhow::Result;
use clap::Parser;
use social_gemini_backend::app::App;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "social-gemini-backend")]
#[command(about = "Serve the Drive + Gemini social content API")]
struct CliArgs {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Listening port. Overrides PORT from the environment.
    #[arg(long, value_parser = parse_port_arg)]
    port: Option<u16>,
}

fn parse_port_arg(input: &str) -> std::result::Result<u16, String> {
    match input.parse::<u16>() {
        Ok(0) | Err(_) => Err(format!("Invalid port '{}'. Expected 1-65535", input)),
        Ok(port) => Ok(port),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_gemini_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting social-gemini-backend");

    let args = CliArgs::parse();

    match App::new() {
        Ok(app) => match app.run(&args.host, args.port).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Server failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}

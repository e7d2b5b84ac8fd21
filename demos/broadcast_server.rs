//! Broadcast hub demo
//!
//! Run with: cargo run --example broadcast_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example broadcast_server                  # binds to 0.0.0.0:8080
//!   cargo run --example broadcast_server localhost        # binds to 127.0.0.1:8080
//!   cargo run --example broadcast_server 127.0.0.1:9000   # binds to 127.0.0.1:9000
//!
//! Connect a few clients and type:
//!   nc localhost 8080
//!
//! Every line you send is delivered to all other connected clients; you get
//! an acknowledgment back instead of your own text.

use std::net::SocketAddr;

use tcphub::{HubConfig, HubServer};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:8080
/// - "localhost:9000" -> 127.0.0.1:9000
/// - "127.0.0.1" -> 127.0.0.1:8080
/// - "0.0.0.0:8080" -> 0.0.0.0:8080
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8080;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: broadcast_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:8080)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:8080".parse().unwrap(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tcphub=debug".parse()?)
                .add_directive("broadcast_server=debug".parse()?),
        )
        .init();

    let config = HubConfig::default().bind(bind_addr);
    let server = HubServer::bind(config).await?;

    println!("Broadcast hub listening on {}", server.local_addr());
    println!("Try it: nc {} {}", server.local_addr().ip(), server.local_addr().port());

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
            println!("\nShutting down...");
        })
        .await?;

    Ok(())
}

//! Live attendance server.
//!
//! Run with:
//! ```not_rust
//! ROLLCALL_JWT_SECRET=secret cargo run --bin rollcall-server -- --seed classes.json
//! ```

use clap::Parser;
use rollcall_server::ServerConfig;
use rollcall_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = rollcall_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! Run the mock 115 authorization backend until Ctrl-C.
//!
//! ```sh
//! cargo run --example mock_server --features mock-server
//! ```

use film_fusion::mock::MockAuthServer;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let server = MockAuthServer::start().await?;
    println!("mock 115 auth backend listening at {}", server.uri());
    println!("phases: scan after 10s, confirm after 20s, cancel after 300s");
    tokio::signal::ctrl_c().await?;
    Ok(())
}

//! Drive a full QR authorization flow against the embedded mock backend.
//!
//! ```sh
//! cargo run --example qr_login --features mock-server
//! ```

use std::sync::Arc;
use std::time::Duration;

use film_fusion::auth::{EngineState, HttpQrAuth, QrCodeRequest, QrLoginEngine};
use film_fusion::mock::{MockAuthServer, MockPhases};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockAuthServer::start_with_phases(MockPhases {
        scan_after: Duration::from_secs(2),
        confirm_after: Duration::from_secs(4),
        expire_after: Duration::from_secs(300),
    })
    .await?;
    println!("mock backend at {}", server.uri());

    let engine = QrLoginEngine::new(Arc::new(HttpQrAuth::new(server.uri())))
        .with_poll_interval(Duration::from_secs(1));
    let session = engine
        .start(QrCodeRequest::new("demo-app", "Demo Drive"))
        .await?;
    println!("scan this: {}", session.qr_code_data);

    let mut states = engine.subscribe_state();
    loop {
        states.changed().await?;
        let state = states.borrow_and_update().clone();
        println!("state: {state:?} ({}s left)", engine.remaining_secs());
        match state {
            EngineState::Confirmed => break,
            EngineState::Expired | EngineState::Cancelled => {
                println!("flow ended without confirmation");
                return Ok(());
            }
            _ => {}
        }
    }

    let credential = engine.finalize(None).await?;
    println!(
        "stored credential: storage_id={} expires_in={}s",
        credential.storage_id, credential.expires_in
    );
    Ok(())
}

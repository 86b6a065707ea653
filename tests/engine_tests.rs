mod auth_support;

use std::sync::Arc;
use std::time::Duration;

use film_fusion::auth::{AuthError, AuthStatus, EngineState, QrCodeRequest, QrLoginEngine};
use pretty_assertions::assert_eq;

use auth_support::{PollScript, ScriptedQrAuth};

fn request() -> QrCodeRequest {
    QrCodeRequest::new("app123", "My Drive")
}

async fn advance(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn waiting_status_keeps_polling_on_fixed_cadence() {
    // Three waiting polls leave the flow in AwaitingScan with exactly one
    // create call and three poll calls.
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(7).await;
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.poll_calls(), 3);
    assert_eq!(
        engine.state(),
        EngineState::AwaitingScan {
            status: AuthStatus::WaitingScan
        }
    );
}

#[tokio::test(start_paused = true)]
async fn login_success_confirms_and_stops_polling() {
    // The fourth poll reports login success.
    let api = Arc::new(ScriptedQrAuth::new(vec![
        PollScript::Status(AuthStatus::WaitingScan),
        PollScript::Status(AuthStatus::WaitingScan),
        PollScript::Status(AuthStatus::WaitingScan),
        PollScript::Status(AuthStatus::LoginSuccess),
    ]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(9).await;
    assert_eq!(engine.state(), EngineState::Confirmed);
    assert_eq!(api.poll_calls(), 4);

    // no poll is issued after the terminal transition
    advance(10).await;
    assert_eq!(api.poll_calls(), 4);

    let credential = engine.finalize(None).await.expect("finalize");
    assert_eq!(credential.storage_id, 901);
    assert_eq!(api.finalize_calls(), 1);
    assert_eq!(engine.state(), EngineState::Idle);
}

#[tokio::test(start_paused = true)]
async fn countdown_expiry_ends_the_flow_without_finalize() {
    // No poll ever advances and the 300 s budget runs out.
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(301).await;
    assert_eq!(engine.state(), EngineState::Expired);
    assert_eq!(api.finalize_calls(), 0);
    assert_eq!(engine.remaining_secs(), 0);

    let polls_at_expiry = api.poll_calls();
    advance(10).await;
    assert_eq!(api.poll_calls(), polls_at_expiry);

    assert!(matches!(
        engine.finalize(None).await,
        Err(AuthError::NotConfirmed)
    ));
    assert_eq!(api.finalize_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn finalize_with_storage_id_echoes_the_record() {
    // Re-authorization updates a known record.
    let api = Arc::new(ScriptedQrAuth::new(vec![PollScript::Status(
        AuthStatus::LoginSuccess,
    )]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(3).await;
    assert_eq!(engine.state(), EngineState::Confirmed);

    let credential = engine.finalize(Some(42)).await.expect("finalize");
    assert_eq!(credential.storage_id, 42);
}

#[tokio::test(start_paused = true)]
async fn transient_poll_failures_are_retried_silently() {
    // Three network failures, then success, with no state regression.
    let api = Arc::new(ScriptedQrAuth::new(vec![
        PollScript::NetworkError,
        PollScript::NetworkError,
        PollScript::NetworkError,
        PollScript::Status(AuthStatus::LoginSuccess),
    ]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(7).await;
    assert_eq!(api.poll_calls(), 3);
    assert_eq!(
        engine.state(),
        EngineState::AwaitingScan {
            status: AuthStatus::WaitingScan
        }
    );

    advance(2).await;
    assert_eq!(engine.state(), EngineState::Confirmed);
    assert_eq!(api.poll_calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn scan_success_updates_the_awaiting_status() {
    let api = Arc::new(ScriptedQrAuth::new(vec![PollScript::Status(
        AuthStatus::ScanSuccess,
    )])
    .with_fallback(AuthStatus::ScanSuccess));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(3).await;
    assert_eq!(
        engine.state(),
        EngineState::AwaitingScan {
            status: AuthStatus::ScanSuccess
        }
    );
}

#[tokio::test(start_paused = true)]
async fn remote_cancellation_is_terminal() {
    let api = Arc::new(ScriptedQrAuth::new(vec![PollScript::Status(
        AuthStatus::Cancelled,
    )]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(3).await;
    assert_eq!(engine.state(), EngineState::Cancelled);
    assert_eq!(api.poll_calls(), 1);

    advance(10).await;
    assert_eq!(api.poll_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_poll_response_cannot_resurrect_an_expired_flow() {
    // The poll resolves with LoginSuccess after the countdown already fired;
    // the result must be discarded.
    let api = Arc::new(
        ScriptedQrAuth::new(vec![PollScript::Status(AuthStatus::LoginSuccess)])
            .with_poll_delay(Duration::from_secs(5)),
    );
    let engine = QrLoginEngine::new(api.clone()).with_countdown(3);
    engine.start(request()).await.expect("start");

    advance(4).await;
    assert_eq!(engine.state(), EngineState::Expired);

    // the in-flight poll resolves at t=7
    advance(5).await;
    assert_eq!(engine.state(), EngineState::Expired);
    assert!(matches!(
        engine.finalize(None).await,
        Err(AuthError::NotConfirmed)
    ));
}

#[tokio::test(start_paused = true)]
async fn at_most_one_poll_is_ever_in_flight() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]).with_poll_delay(Duration::from_secs(5)));
    let engine = QrLoginEngine::new(api.clone()).with_poll_interval(Duration::from_secs(1));
    engine.start(request()).await.expect("start");

    advance(30).await;
    assert!(api.poll_calls() > 1);
    assert_eq!(api.max_in_flight(), 1);
}

#[tokio::test(start_paused = true)]
async fn finalize_before_confirmation_issues_no_network_call() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());

    // Idle
    assert!(matches!(
        engine.finalize(None).await,
        Err(AuthError::NotConfirmed)
    ));

    // AwaitingScan
    engine.start(request()).await.expect("start");
    advance(3).await;
    assert!(matches!(
        engine.finalize(Some(42)).await,
        Err(AuthError::NotConfirmed)
    ));
    assert_eq!(api.finalize_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn empty_fields_are_rejected_before_any_request() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());

    assert!(matches!(
        engine.start(QrCodeRequest::new("", "My Drive")).await,
        Err(AuthError::MissingField("client_id"))
    ));
    assert!(matches!(
        engine.start(QrCodeRequest::new("app123", "  ")).await,
        Err(AuthError::MissingField("name"))
    ));
    assert_eq!(api.create_calls(), 0);
    assert_eq!(engine.state(), EngineState::Idle);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_both_timers_and_returns_to_idle() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(5).await;
    let polls_before = api.poll_calls();
    assert!(polls_before > 0);
    engine.cancel();
    assert_eq!(engine.state(), EngineState::Idle);

    advance(20).await;
    assert_eq!(api.poll_calls(), polls_before);
    // countdown was reset, not left ticking
    assert_eq!(engine.remaining_secs(), 300);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_engine_tears_the_flow_down() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    advance(5).await;
    let polls_before = api.poll_calls();
    drop(engine);

    advance(20).await;
    assert_eq!(api.poll_calls(), polls_before);
}

#[tokio::test(start_paused = true)]
async fn expired_flow_can_be_restarted() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone()).with_countdown(2);
    engine.start(request()).await.expect("start");

    advance(3).await;
    assert_eq!(engine.state(), EngineState::Expired);

    engine.start(request()).await.expect("restart");
    assert_eq!(api.create_calls(), 2);
    assert_eq!(
        engine.state(),
        EngineState::AwaitingScan {
            status: AuthStatus::WaitingScan
        }
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_at_a_tick_boundary_keeps_the_countdown_reset() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    // Cancel exactly when a countdown tick is due; the tick that raced the
    // cancel must not publish its stale value over the reset.
    advance(5).await;
    engine.cancel();
    assert_eq!(engine.remaining_secs(), 300);

    let mut countdown = engine.subscribe_countdown();
    advance(10).await;
    assert_eq!(engine.remaining_secs(), 300);
    assert!(!countdown.has_changed().expect("channel open"));
}

#[tokio::test(start_paused = true)]
async fn countdown_is_observable_per_second() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");

    tokio::time::sleep(Duration::from_millis(5500)).await;
    assert_eq!(engine.remaining_secs(), 295);
}

#[tokio::test(start_paused = true)]
async fn starting_over_an_active_flow_disposes_the_old_one() {
    let api = Arc::new(ScriptedQrAuth::new(vec![]));
    let engine = QrLoginEngine::new(api.clone());
    engine.start(request()).await.expect("start");
    advance(3).await;

    engine.start(request()).await.expect("second start");
    assert_eq!(api.create_calls(), 2);
    advance(4).await;
    // only the second flow's poll loop is alive; cadence stays one poll
    // per interval
    assert_eq!(engine.state(), EngineState::AwaitingScan {
        status: AuthStatus::WaitingScan
    });
    assert_eq!(api.max_in_flight(), 1);
}

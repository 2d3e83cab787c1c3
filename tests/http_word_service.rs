// Exercises the blocking HTTP client against the real axum word service,
// hosted on an ephemeral port in a background tokio runtime.

use std::net::SocketAddr;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use assert_matches::assert_matches;
use axum::{routing::get, Router};
use tokio::net::TcpListener;

use wordrush::controller::{InputSink, KeyInput, SessionController};
use wordrush::countdown::ManualDriver;
use wordrush::error::{GameError, ServiceError};
use wordrush::server::{self, WordBank};
use wordrush::word_service::{HttpWordService, WordService};

fn spawn_router(router: Router) -> SocketAddr {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            let _ = axum::serve(listener, router).await;
        });
    });
    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

fn spawn_word_service(words: &str) -> SocketAddr {
    let bank = WordBank::from_json(words).unwrap();
    spawn_router(server::build_router(Arc::new(bank)))
}

fn client(addr: SocketAddr) -> HttpWordService {
    HttpWordService::new(format!("http://{addr}"), Duration::from_secs(2)).unwrap()
}

#[test]
fn lists_words_in_uppercase() {
    let addr = spawn_word_service(r#"["crane", "slate", "audio"]"#);
    let words = client(addr).list_words().unwrap();
    assert_eq!(words, vec!["AUDIO", "CRANE", "SLATE"]);
}

#[test]
fn validates_case_insensitively() {
    let addr = spawn_word_service(r#"["crane", "slate"]"#);
    let service = client(addr);
    assert!(service.validate("CRANE").unwrap());
    assert!(service.validate("slate").unwrap());
    assert!(!service.validate("XXXXX").unwrap());
}

#[test]
fn non_success_status_is_distinct_from_invalid() {
    let addr = spawn_word_service(r#"["crane"]"#);
    let service =
        HttpWordService::new(format!("http://{addr}/missing"), Duration::from_secs(2)).unwrap();
    assert_matches!(
        service.validate("CRANE"),
        Err(ServiceError::Status { status: 404, .. })
    );
}

#[test]
fn malformed_body_is_reported() {
    let router = Router::new()
        .route("/api/words", get(|| async { "definitely not json" }))
        .route("/api/validate", get(|| async { r#"{"answer": 42}"# }));
    let service = client(spawn_router(router));

    assert_matches!(service.list_words(), Err(ServiceError::Malformed { .. }));
    assert_matches!(service.validate("CRANE"), Err(ServiceError::Malformed { .. }));
}

#[test]
fn controller_plays_against_live_service() {
    let addr = spawn_word_service(r#"["crane", "slate"]"#);
    let mut controller =
        SessionController::new(Arc::new(client(addr)), Box::new(ManualDriver::new()));
    controller.start_session(30).unwrap();
    assert_eq!(controller.word_list().len(), 2);

    for c in "QQQQQ".chars() {
        controller.on_key(KeyInput::Letter(c));
    }
    assert_matches!(controller.submit_guess(), Err(GameError::InvalidWord(_)));
    assert_eq!(controller.session().row_index, 0);

    for _ in 0..5 {
        controller.on_key(KeyInput::Backspace);
    }
    let target = controller.session().target_word.clone();
    for c in target.chars() {
        controller.on_key(KeyInput::Letter(c));
    }
    controller.submit_guess().unwrap();
    assert_eq!(controller.session().solved_count, 1);
}

#[test]
fn unreachable_service_fails_session_start() {
    // Bind and drop to get a port nothing listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut controller =
        SessionController::new(Arc::new(client(addr)), Box::new(ManualDriver::new()));
    assert_matches!(
        controller.start_session(30),
        Err(GameError::ServiceUnavailable(ServiceError::Transport { .. }))
    );
}

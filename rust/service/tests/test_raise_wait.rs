use std::sync::Arc;
use std::time::Duration;

use pontoon_engine::player::{PlayerStatus, RaiseResponse};
use pontoon_service::config::ServiceConfig;
use pontoon_service::errors::ServiceError;
use pontoon_service::registry::TableService;

fn service() -> TableService {
    let config = ServiceConfig {
        deck_seed: Some(42),
        ..ServiceConfig::default()
    };
    TableService::new(config).unwrap()
}

#[tokio::test(start_paused = true)]
async fn timeout_folds_every_non_responder_and_closes_the_raise() {
    let service = service();
    for id in ["a", "b", "c", "d"] {
        service.join("t", "s", id).unwrap();
    }
    let outcome = service.start_raise("t", "a", 1).unwrap();
    assert_eq!(outcome.responders.len(), 3);
    assert_eq!(outcome.current_raise, 1);

    service.respond_to_raise("t", "b", RaiseResponse::Call).unwrap();
    service.respond_to_raise("t", "c", RaiseResponse::Fold).unwrap();

    // d never answers; the paused clock advances to the deadline
    let wait = service.wait_for_raise("t").await.unwrap();
    assert_eq!(wait.timed_out, vec!["d".to_string()]);
    assert_eq!(wait.responses.len(), 2);

    let view = service.show("t", "d").unwrap();
    assert_eq!(view.status, PlayerStatus::Fold);

    // the raise is closed: hits are allowed again and there is nothing
    // left to respond to
    assert!(service.hit("t", "b").is_ok());
    assert!(matches!(
        service.respond_to_raise("t", "d", RaiseResponse::Call),
        Err(ServiceError::NoPendingRaise)
    ));
}

#[tokio::test(start_paused = true)]
async fn wait_returns_immediately_when_everyone_already_answered() {
    let service = service();
    service.join("t", "s", "a").unwrap();
    service.join("t", "s", "b").unwrap();
    service.start_raise("t", "a", 2).unwrap();
    service.respond_to_raise("t", "b", RaiseResponse::Call).unwrap();

    let before = tokio::time::Instant::now();
    let wait = service.wait_for_raise("t").await.unwrap();
    assert!(wait.timed_out.is_empty());
    assert_eq!(
        wait.responses,
        vec![("b".to_string(), RaiseResponse::Call)]
    );
    assert!(
        before.elapsed() < Duration::from_secs(60),
        "must not wait out the deadline"
    );

    assert!(matches!(
        service.wait_for_raise("t").await,
        Err(ServiceError::NoPendingRaise)
    ));
}

#[tokio::test(start_paused = true)]
async fn wait_wakes_the_instant_the_last_responder_answers() {
    let service = Arc::new(service());
    for id in ["a", "b", "c"] {
        service.join("t", "s", id).unwrap();
    }
    service.start_raise("t", "a", 1).unwrap();

    let svc = Arc::clone(&service);
    let waiter = tokio::spawn(async move { svc.wait_for_raise("t").await });
    tokio::task::yield_now().await;

    service.respond_to_raise("t", "b", RaiseResponse::Call).unwrap();
    service.respond_to_raise("t", "c", RaiseResponse::Call).unwrap();

    let wait = waiter.await.unwrap().unwrap();
    assert!(wait.timed_out.is_empty());
    assert_eq!(wait.responses.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn a_standing_responder_is_not_reported_as_timed_out() {
    let service = service();
    for id in ["a", "b", "c"] {
        service.join("t", "s", id).unwrap();
    }
    service.stand("t", "b").unwrap();
    service.start_raise("t", "a", 1).unwrap();

    // nobody answers; at the deadline c is folded, but b was already
    // standing so the table declines the fold and b keeps the stand
    let wait = service.wait_for_raise("t").await.unwrap();
    assert_eq!(wait.timed_out, vec!["c".to_string()]);
    assert!(wait.responses.is_empty());
    assert_eq!(service.show("t", "b").unwrap().status, PlayerStatus::Stand);
}

#[tokio::test(start_paused = true)]
async fn a_lone_raiser_has_nobody_to_wait_for() {
    let service = service();
    service.join("t", "s", "a").unwrap();
    let outcome = service.start_raise("t", "a", 3).unwrap();
    assert!(outcome.responders.is_empty());

    // the raise closed on the spot, so there is no pending wait and the
    // raiser may keep drawing
    assert!(matches!(
        service.wait_for_raise("t").await,
        Err(ServiceError::NoPendingRaise)
    ));
    assert!(service.hit("t", "a").is_ok());
}

#[tokio::test(start_paused = true)]
async fn duplicate_responses_are_declined() {
    let service = service();
    for id in ["a", "b", "c"] {
        service.join("t", "s", id).unwrap();
    }
    service.start_raise("t", "a", 1).unwrap();
    service.respond_to_raise("t", "b", RaiseResponse::Call).unwrap();
    assert!(matches!(
        service.respond_to_raise("t", "b", RaiseResponse::Fold),
        Err(ServiceError::Table(
            pontoon_engine::errors::TableError::AlreadyResponded
        ))
    ));
    // the raiser is not an invited responder
    assert!(matches!(
        service.respond_to_raise("t", "a", RaiseResponse::Call),
        Err(ServiceError::Table(
            pontoon_engine::errors::TableError::NotEligible
        ))
    ));
}

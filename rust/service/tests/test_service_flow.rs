use pontoon_engine::errors::TableError;
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

#[test]
fn join_creates_the_table_and_wallet_on_first_use() {
    let service = service();
    let outcome = service.join("channel-1", "guild-1", "alice").unwrap();
    assert_eq!(outcome.hand.len(), 2);
    assert_eq!(outcome.balance, 29, "starting balance minus the ante");
}

#[test]
fn operations_on_an_unknown_table_are_declined() {
    let service = service();
    assert!(matches!(
        service.hit("nowhere", "alice"),
        Err(ServiceError::UnknownTable(_))
    ));
    assert!(matches!(
        service.resolve("nowhere"),
        Err(ServiceError::UnknownTable(_))
    ));
}

#[test]
fn duplicate_join_at_the_same_table_is_declined() {
    let service = service();
    service.join("channel-1", "guild-1", "alice").unwrap();
    assert!(matches!(
        service.join("channel-1", "guild-1", "alice"),
        Err(ServiceError::Table(TableError::AlreadySeated))
    ));
}

#[test]
fn tables_of_one_scope_share_the_wallet() {
    let service = service();
    service.join("channel-1", "guild-1", "alice").unwrap();
    service.stand("channel-1", "alice").unwrap();
    let outcome = service.resolve("channel-1").unwrap();
    let final_balance = outcome.summaries[0].final_balance;

    // the next join at a different table of the same scope debits the
    // same wallet
    let rejoin = service.join("channel-2", "guild-1", "alice").unwrap();
    assert_eq!(rejoin.balance, final_balance - 1);
}

#[test]
fn join_is_declined_while_in_an_unfinished_round_elsewhere_in_the_scope() {
    let service = service();
    service.join("channel-1", "guild-1", "alice").unwrap();
    match service.join("channel-2", "guild-1", "alice") {
        Err(ServiceError::ActiveElsewhere { table }) => assert_eq!(table, "channel-1"),
        other => panic!("expected ActiveElsewhere, got {:?}", other.map(|_| ())),
    }

    service.stand("channel-1", "alice").unwrap();
    service.resolve("channel-1").unwrap();
    assert!(service.join("channel-2", "guild-1", "alice").is_ok());
}

#[test]
fn scopes_keep_separate_wallets() {
    let service = service();
    service.join("channel-1", "guild-1", "alice").unwrap();
    // a different scope is a different wallet and a different table
    let other = service.join("channel-9", "guild-2", "alice").unwrap();
    assert_eq!(other.balance, 29);
}

#[test]
fn show_masks_everyone_elses_first_card() {
    let service = service();
    service.join("channel-1", "guild-1", "alice").unwrap();
    service.join("channel-1", "guild-1", "bob").unwrap();

    let view = service.show("channel-1", "alice").unwrap();
    assert_eq!(view.hand.len(), 2);
    assert!(!view.rendered_hand.contains("[?]"), "own hand shown in full");
    assert_eq!(view.others.len(), 1);
    assert_eq!(view.others[0].identity, "bob");
    assert!(view.others[0].public_hand.starts_with("[?]"));
    assert_eq!(view.pot, 2);

    assert!(matches!(
        service.show("channel-1", "stranger"),
        Err(ServiceError::Table(TableError::NotSeated))
    ));
}

#[test]
fn removed_tables_are_gone_but_the_wallet_survives() {
    let service = service();
    service.join("channel-1", "guild-1", "alice").unwrap();
    service.stand("channel-1", "alice").unwrap();
    service.resolve("channel-1").unwrap();
    let balance_before = service.join("channel-1", "guild-1", "alice").unwrap().balance;
    service.stand("channel-1", "alice").unwrap();
    service.resolve("channel-1").unwrap();

    assert!(service.remove_table("channel-1").unwrap());
    assert!(!service.remove_table("channel-1").unwrap());
    assert!(matches!(
        service.hit("channel-1", "alice"),
        Err(ServiceError::UnknownTable(_))
    ));

    // the scope wallet carried over into the recreated table: the solo
    // round returned the ante (plus a bonus if the deal was a natural)
    let rejoined = service.join("channel-1", "guild-1", "alice").unwrap();
    assert!(
        rejoined.balance == balance_before || rejoined.balance == balance_before + 5,
        "wallet balance {} should continue from {}",
        rejoined.balance,
        balance_before
    );
}

#[test]
fn an_unopenable_history_file_fails_service_construction() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    // the history path's parent is a plain file, so the log file cannot
    // be created
    let result = TableService::with_history(
        ServiceConfig::default(),
        blocker.join("rounds.jsonl"),
    );
    assert!(matches!(result, Err(ServiceError::History(_))));
}

#[test]
fn resolving_appends_to_the_round_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rounds.jsonl");
    let config = ServiceConfig {
        deck_seed: Some(7),
        ..ServiceConfig::default()
    };
    let service = TableService::with_history(config, &path).unwrap();

    service.join("channel-1", "guild-1", "alice").unwrap();
    service.stand("channel-1", "alice").unwrap();
    service.resolve("channel-1").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    let record: pontoon_engine::logger::RoundRecord = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record.table, "channel-1");
    assert_eq!(record.summaries.len(), 1);
}

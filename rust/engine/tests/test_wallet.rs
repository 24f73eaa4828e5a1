use chrono::{TimeZone, Utc};
use pontoon_engine::config::TableConfig;
use pontoon_engine::wallet::WalletStore;

fn tokyo_wallet() -> WalletStore {
    WalletStore::new(&TableConfig::default())
}

#[test]
fn balances_lazily_initialize_to_the_starting_amount() {
    let mut wallet = tokyo_wallet();
    assert_eq!(wallet.balance("alice"), 30);
    assert_eq!(wallet.tracked_identities().count(), 1);
}

#[test]
fn adjust_returns_the_new_balance() {
    let mut wallet = tokyo_wallet();
    assert_eq!(wallet.adjust("alice", -3), 27);
    assert_eq!(wallet.adjust("alice", 10), 37);
    assert_eq!(wallet.balance("alice"), 37);
}

#[test]
fn first_reset_records_the_local_date() {
    let mut wallet = tokyo_wallet();
    // 20:00 UTC on the 27th is already the 28th in UTC+9
    let now = Utc.with_ymd_and_hms(2026, 8, 27, 20, 0, 0).unwrap();
    assert!(wallet.maybe_reset_daily(now));
    assert_eq!(
        wallet.last_reset(),
        Some(chrono::NaiveDate::from_ymd_opt(2026, 8, 28).unwrap())
    );
    // same local day: nothing happens again
    let later = Utc.with_ymd_and_hms(2026, 8, 28, 10, 0, 0).unwrap();
    assert!(!wallet.maybe_reset_daily(later));
}

#[test]
fn reset_fires_exactly_once_per_local_day() {
    let mut wallet = tokyo_wallet();
    let day1 = Utc.with_ymd_and_hms(2026, 8, 28, 0, 0, 0).unwrap();
    wallet.maybe_reset_daily(day1);
    wallet.adjust("alice", -12);
    wallet.adjust("bob", -5);

    // midnight in UTC+9 falls at 15:00 UTC
    let day2 = Utc.with_ymd_and_hms(2026, 8, 28, 15, 0, 0).unwrap();
    assert!(wallet.maybe_reset_daily(day2));
    assert_eq!(wallet.balance("alice"), 30);
    assert_eq!(wallet.balance("bob"), 30);

    // further operations the same day keep whatever happens next
    wallet.adjust("alice", -4);
    assert!(!wallet.maybe_reset_daily(day2));
    assert_eq!(wallet.balance("alice"), 26);
}

#[test]
fn clock_going_backwards_does_not_reset() {
    let mut wallet = tokyo_wallet();
    let day2 = Utc.with_ymd_and_hms(2026, 8, 28, 15, 0, 0).unwrap();
    wallet.maybe_reset_daily(day2);
    wallet.adjust("alice", -7);

    let day1 = Utc.with_ymd_and_hms(2026, 8, 27, 0, 0, 0).unwrap();
    assert!(!wallet.maybe_reset_daily(day1));
    assert_eq!(wallet.balance("alice"), 23);
}

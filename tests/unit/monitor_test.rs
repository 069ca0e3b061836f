//! Monitor failure handling and persistence

use store_review_monitor::core::models::Platform;
use store_review_monitor::core::ports::LoadedSnapshot;
use store_review_monitor::core::services::{
    Delivery, Monitor, Outcome, PriorState, RetentionPolicy,
};

use super::common::{
    Answer, MockNotifier, MockSnapshotStore, MockStatusSource, app, at, play, record,
};

#[test]
fn test_second_identical_run_sends_nothing() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new()
        .app_store(app("2.0.0", "200", "READY_FOR_SALE"))
        .google_play(play(200, "completed"));
    let notifier = MockNotifier::new();
    let monitor = Monitor::new(&store, &source, &notifier);

    let first = monitor.run_at(at(8));
    let second = monitor.run_at(at(9));

    assert!(first.notification_sent);
    assert!(!second.notification_sent);
    assert_eq!(notifier.count(), 2);
    assert_eq!(store.saves().len(), 2);
    assert_eq!(second.record.last_checked, at(9));
}

#[test]
fn test_delivery_failure_does_not_block_other_platform() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new()
        .app_store(app("2.0.0", "200", "READY_FOR_SALE"))
        .google_play(play(200, "completed"));
    let notifier = MockNotifier::failing_for(Platform::AppStore);

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert_eq!(notifier.count(), 2);
    assert!(report.notification_sent);
    assert!(report.persisted);

    let Some(Outcome::Evaluated(app_store)) = report.outcome(Platform::AppStore) else {
        panic!("App Store should have been evaluated");
    };
    assert!(matches!(app_store.delivery, Delivery::Failed(ref reason) if reason.contains("channel_not_found")));

    let Some(Outcome::Evaluated(google_play)) = report.outcome(Platform::GooglePlay) else {
        panic!("Google Play should have been evaluated");
    };
    assert_eq!(google_play.delivery, Delivery::Sent);
}

#[test]
fn test_failed_delivery_still_commits_snapshot() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new().app_store(app("2.0.0", "200", "READY_FOR_SALE"));
    let notifier = MockNotifier::failing_for(Platform::AppStore);

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(!report.notification_sent);
    assert!(report.persisted);
    let saved = store.last_saved().unwrap();
    assert_eq!(saved.status(Platform::AppStore), Some("READY_FOR_SALE"));
}

#[test]
fn test_persist_failure_is_reported_not_raised() {
    let store = MockSnapshotStore::new().failing_save();
    let source = MockStatusSource::new().google_play(play(3, "completed"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(!report.persisted);
    assert!(report.notification_sent);
    assert_eq!(store.saves().len(), 1);
}

#[test]
fn test_unreadable_prior_is_treated_as_cold_start() {
    let store =
        MockSnapshotStore::with_loaded(LoadedSnapshot::Unreadable("expected value".to_string()));
    let source = MockStatusSource::new().app_store(app("1.0.0", "1", "READY_FOR_SALE"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert_eq!(report.prior, PriorState::Unreadable("expected value".to_string()));
    assert!(report.notification_sent);
    assert!(notifier.attempts()[0].previous_status.is_none());
    assert!(report.persisted);
}

#[test]
fn test_outcomes_cover_every_platform() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new().answer(Platform::GooglePlay, Answer::Nothing);
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert_eq!(report.platforms.len(), 2);
    assert_eq!(report.outcome(Platform::AppStore), Some(&Outcome::NotConfigured));
    assert_eq!(report.outcome(Platform::GooglePlay), Some(&Outcome::NoData));
    assert!(report.record.is_empty());
    assert!(report.persisted);
}

#[test]
fn test_fetch_failure_carries_previous_entry_forward() {
    let store = MockSnapshotStore::with_record(record(
        Some(app("1.2.3", "100", "REJECTED")),
        Some(play(42, "completed")),
    ));
    let source = MockStatusSource::new()
        .app_store(app("1.2.3", "100", "REJECTED"))
        .answer(Platform::GooglePlay, Answer::Fail("403 Forbidden".to_string()));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(
        matches!(report.outcome(Platform::GooglePlay), Some(Outcome::FetchFailed(reason)) if reason.contains("403"))
    );
    assert_eq!(report.record.google_play, Some(play(42, "completed")));
    assert_eq!(report.record.last_checked, at(8));
}

#[test]
fn test_drop_retention_forgets_unobserved_platform() {
    let store = MockSnapshotStore::with_record(record(None, Some(play(42, "halted"))));
    let source = MockStatusSource::new()
        .app_store(app("1.0.0", "1", "IN_REVIEW"))
        .answer(Platform::GooglePlay, Answer::Fail("timeout".to_string()));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier)
        .with_retention(RetentionPolicy::Drop)
        .run_at(at(8));

    let saved = store.last_saved().unwrap();
    assert!(saved.google_play.is_none());
    assert_eq!(saved.status(Platform::AppStore), Some("IN_REVIEW"));
    assert_eq!(report.record, saved);
}

#[test]
fn test_recovery_survives_a_failed_run_with_carry_forward() {
    // The rejection recorded before an outage is still the baseline afterwards
    let store = MockSnapshotStore::with_record(record(None, Some(play(42, "halted"))));
    let notifier = MockNotifier::new();

    let outage = MockStatusSource::new()
        .answer(Platform::GooglePlay, Answer::Fail("503".to_string()));
    Monitor::new(&store, &outage, &notifier).run_at(at(8));

    let back = MockStatusSource::new().google_play(play(42, "completed"));
    let report = Monitor::new(&store, &back, &notifier).run_at(at(9));

    assert!(report.notification_sent);
    assert!(notifier.attempts()[0].recovered_from_rejection);
}

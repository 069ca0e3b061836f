//! End-to-end decision scenarios driven through the monitor

use store_review_monitor::core::models::{Platform, ReviewSnapshot, SnapshotRecord};
use store_review_monitor::core::services::{Delivery, Monitor, Outcome, PriorState};

use super::common::{MockNotifier, MockSnapshotStore, MockStatusSource, app, at, play, record};

/// Run one App Store transition and return whether a notification went out
fn app_store_transition(prior: (&str, &str, &str), current: (&str, &str, &str)) -> bool {
    let store = MockSnapshotStore::with_record(record(Some(app(prior.0, prior.1, prior.2)), None));
    let source = MockStatusSource::new().app_store(app(current.0, current.1, current.2));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));
    assert_eq!(report.notification_sent, notifier.count() == 1);
    report.notification_sent
}

#[test]
fn test_new_version_notifies() {
    assert!(app_store_transition(
        ("1.2.3", "100", "READY_FOR_SALE"),
        ("1.2.4", "101", "READY_FOR_SALE"),
    ));
}

#[test]
fn test_new_build_same_version_notifies() {
    assert!(app_store_transition(
        ("1.2.3", "100", "READY_FOR_SALE"),
        ("1.2.3", "101", "READY_FOR_SALE"),
    ));
}

#[test]
fn test_recovery_from_rejection_notifies_without_version_change() {
    let store =
        MockSnapshotStore::with_record(record(Some(app("1.2.3", "100", "REJECTED")), None));
    let source = MockStatusSource::new().app_store(app("1.2.3", "100", "READY_FOR_SALE"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    let Some(Outcome::Evaluated(evaluation)) = report.outcome(Platform::AppStore) else {
        panic!("App Store should have been evaluated");
    };
    assert!(!evaluation.verdict.changed);
    assert!(evaluation.verdict.recovered_from_rejection);
    assert_eq!(evaluation.delivery, Delivery::Sent);

    let sent = notifier.attempts();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].recovered_from_rejection);
    assert_eq!(sent[0].previous_status.as_deref(), Some("REJECTED"));
    assert_eq!(sent[0].current_status, "READY_FOR_SALE");
    assert_eq!(sent[0].version, "1.2.3 (100)");
}

#[test]
fn test_unchanged_release_stays_quiet() {
    assert!(!app_store_transition(
        ("1.2.3", "100", "READY_FOR_SALE"),
        ("1.2.3", "100", "READY_FOR_SALE"),
    ));
}

#[test]
fn test_review_progress_statuses_stay_quiet() {
    assert!(!app_store_transition(
        ("1.2.3", "100", "IN_REVIEW"),
        ("1.2.3", "100", "WAITING_FOR_REVIEW"),
    ));
}

#[test]
fn test_new_version_in_review_is_recorded_but_not_announced() {
    let store =
        MockSnapshotStore::with_record(record(Some(app("1.2.3", "100", "READY_FOR_SALE")), None));
    let source = MockStatusSource::new().app_store(app("1.3.0", "110", "WAITING_FOR_REVIEW"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    let Some(Outcome::Evaluated(evaluation)) = report.outcome(Platform::AppStore) else {
        panic!("App Store should have been evaluated");
    };
    assert!(evaluation.verdict.changed);
    assert!(!evaluation.verdict.should_notify);
    assert_eq!(notifier.count(), 0);

    let saved = store.last_saved().unwrap();
    assert_eq!(saved.app_store.unwrap().version, "1.3.0");
}

#[test]
fn test_cold_start_announces_terminal_status() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new()
        .app_store(app("1.0.0", "1", "PENDING_DEVELOPER_RELEASE"))
        .google_play(play(10, "completed"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert_eq!(report.prior, PriorState::Missing);
    assert_eq!(notifier.count(), 2);
    let sent = notifier.attempts();
    assert!(sent.iter().all(|n| n.previous_status.is_none()));
    assert!(sent.iter().all(|n| !n.recovered_from_rejection));
}

#[test]
fn test_cold_start_in_progress_stays_quiet() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new().google_play(play(10, "inProgress"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(!report.notification_sent);
    assert_eq!(report.record.status(Platform::GooglePlay), Some("inProgress"));
}

#[test]
fn test_google_play_halted_then_completed_is_recovery() {
    let store = MockSnapshotStore::with_record(record(None, Some(play(42, "halted"))));
    let source = MockStatusSource::new().google_play(play(42, "completed"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(report.notification_sent);
    assert!(notifier.attempts()[0].recovered_from_rejection);
    assert_eq!(notifier.attempts()[0].version, "42");
}

#[test]
fn test_google_play_rejection_status_is_not_announced() {
    let store = MockSnapshotStore::with_record(record(None, Some(play(41, "completed"))));
    let source = MockStatusSource::new().google_play(play(42, "halted"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(!report.notification_sent);
    assert_eq!(notifier.count(), 0);
}

#[test]
fn test_platform_histories_are_independent() {
    // App Store rejection must not make a Google Play approval look like a recovery
    let store = MockSnapshotStore::with_record(record(
        Some(app("1.2.3", "100", "REJECTED")),
        Some(play(42, "completed")),
    ));
    let source = MockStatusSource::new()
        .app_store(app("1.2.3", "100", "REJECTED"))
        .google_play(play(42, "completed"));
    let notifier = MockNotifier::new();

    let report = Monitor::new(&store, &source, &notifier).run_at(at(8));

    assert!(!report.notification_sent);
    for platform in Platform::ALL {
        let Some(Outcome::Evaluated(evaluation)) = report.outcome(platform) else {
            panic!("{platform} should have been evaluated");
        };
        assert!(!evaluation.verdict.recovered_from_rejection);
    }
}

#[test]
fn test_snapshot_record_written_with_run_timestamp() {
    let store = MockSnapshotStore::new();
    let source = MockStatusSource::new().google_play(play(7, "completed"));
    let notifier = MockNotifier::new();

    Monitor::new(&store, &source, &notifier).run_at(at(9));

    let mut expected = SnapshotRecord::new(at(9));
    expected.insert(ReviewSnapshot::GooglePlay(play(7, "completed")));
    assert_eq!(store.saves(), vec![expected]);
}

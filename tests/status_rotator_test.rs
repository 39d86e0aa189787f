//! Playback of the floating status line under paused time

mod common;
use common::{advance_ms, rotator};

#[tokio::test(start_paused = true)]
async fn test_two_entries_play_once_and_hold() {
    let rotator = rotator(&[("A", 1000), ("B", 2000)]);
    rotator.start();
    assert_eq!(rotator.current_message(), "A");

    advance_ms(999).await;
    assert_eq!(rotator.current_message(), "A");
    advance_ms(1).await;
    assert_eq!(rotator.current_message(), "B");

    advance_ms(2000).await;
    assert_eq!(rotator.current_message(), "B");
    assert!(rotator.snapshot().finished);

    advance_ms(60_000).await;
    assert_eq!(rotator.current_message(), "B");
}

#[tokio::test(start_paused = true)]
async fn test_stop_clears_message_and_icon() {
    let rotator = rotator(&[("A", 1000), ("B", 2000)]);
    rotator.start();
    advance_ms(1500).await;

    rotator.stop();
    let snapshot = rotator.snapshot();
    assert!(snapshot.is_blank());
    assert!(snapshot.icon.is_empty());
    assert_eq!(snapshot.active_index, None);

    advance_ms(5000).await;
    assert!(rotator.snapshot().is_blank());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_toggle_keeps_later_run_on_its_own_clock() {
    let rotator = rotator(&[("A", 1000), ("B", 2000), ("C", 1000)]);
    rotator.start();
    advance_ms(600).await;

    rotator.stop();
    rotator.start();
    // the first run would have advanced at t=1000
    advance_ms(400).await;
    assert_eq!(rotator.current_message(), "A");

    advance_ms(600).await;
    assert_eq!(rotator.current_message(), "B");
}

#[tokio::test(start_paused = true)]
async fn test_single_entry_holds_immediately() {
    let rotator = rotator(&[("Only", 500)]);
    rotator.start();
    advance_ms(500).await;

    let snapshot = rotator.snapshot();
    assert_eq!(snapshot.message, "Only");
    assert!(snapshot.finished);
}

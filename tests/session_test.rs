//! Host-facing session lifecycle: running flag, grace period, cancel intent

use kodegen_tools_footprint::{ProgressSession, RunOutcome, SessionEvent};

mod common;
use common::{advance_ms, advance_secs, quick_config, settle};

fn drain(events: &mut tokio::sync::mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn test_running_flag_is_edge_triggered() {
    let (session, mut events) = ProgressSession::new(&quick_config()).unwrap();

    session.set_running(true);
    let first_run = session.run_id().unwrap();
    advance_secs(3).await;
    session.set_running(true);

    assert_eq!(session.run_id(), Some(first_run));
    assert_eq!(session.progress().elapsed_secs, 3);
    assert!(session.status().running);

    let seen = drain(&mut events);
    assert_eq!(seen, vec![SessionEvent::Started { run_id: first_run }]);
}

#[tokio::test(start_paused = true)]
async fn test_stop_resets_both_engines() {
    let (session, mut events) = ProgressSession::new(&quick_config()).unwrap();
    session.set_running(true);
    advance_secs(5).await;

    session.set_running(false);
    let progress = session.progress();
    assert!(!progress.running);
    assert_eq!(progress.percent_complete, 0.0);
    assert!(session.status().is_blank());
    assert_eq!(session.outcome(), None);

    let seen = drain(&mut events);
    assert!(matches!(
        seen.last(),
        Some(SessionEvent::Stopped { outcome: None, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_completion_holds_for_grace_then_stops() {
    let (session, mut events) = ProgressSession::new(&quick_config()).unwrap();
    session.set_running(true);
    advance_secs(4).await;

    session.complete(42);
    let held = session.progress();
    assert_eq!(held.percent_complete, 100.0);
    assert_eq!(held.simulated_result_count, 42);
    assert!(session.is_running());

    advance_ms(999).await;
    assert!(session.is_running());
    advance_ms(1).await;
    assert!(!session.is_running());
    assert_eq!(
        session.outcome(),
        Some(RunOutcome::Completed { total_results: 42 })
    );

    let seen = drain(&mut events);
    assert!(seen.iter().any(|e| matches!(
        e,
        SessionEvent::Completed {
            total_results: 42,
            ..
        }
    )));
    assert!(matches!(
        seen.last(),
        Some(SessionEvent::Stopped {
            outcome: Some(RunOutcome::Completed { .. }),
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_grace_of_previous_run_does_not_stop_new_run() {
    let (session, _events) = ProgressSession::new(&quick_config()).unwrap();
    session.set_running(true);
    session.complete(3);

    advance_ms(400).await;
    session.set_running(false);
    session.set_running(true);
    let second = session.run_id();

    advance_ms(2000).await;
    assert!(session.is_running());
    assert_eq!(session.run_id(), second);
    assert_eq!(session.outcome(), None);
    assert_eq!(session.progress().elapsed_secs, 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_emits_intent_and_host_stop_records_it() {
    let (session, mut events) = ProgressSession::new(&quick_config()).unwrap();
    session.set_running(true);
    advance_secs(2).await;

    session.cancel();
    settle().await;
    assert!(session.is_running());
    let run_id = session.run_id().unwrap();
    assert!(drain(&mut events).contains(&SessionEvent::CancelRequested { run_id }));

    session.set_running(false);
    assert_eq!(session.outcome(), Some(RunOutcome::Cancelled));
    assert_eq!(
        drain(&mut events),
        vec![SessionEvent::Stopped {
            run_id,
            outcome: Some(RunOutcome::Cancelled),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_stops_below_full_progress() {
    let (session, mut events) = ProgressSession::new(&quick_config()).unwrap();
    session.set_running(true);
    advance_secs(6).await;

    session.fail("Cannot connect to search server");
    assert!(!session.is_running());
    assert_eq!(
        session.outcome(),
        Some(RunOutcome::Failed {
            message: "Cannot connect to search server".to_string()
        })
    );
    assert_eq!(session.progress().percent_complete, 0.0);

    let seen = drain(&mut events);
    assert!(
        seen.iter()
            .any(|e| matches!(e, SessionEvent::Failed { .. }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_completion_outside_a_run_is_ignored() {
    let (session, mut events) = ProgressSession::new(&quick_config()).unwrap();
    session.complete(10);
    session.cancel();
    settle().await;

    assert!(!session.is_running());
    assert_eq!(session.outcome(), None);
    assert!(drain(&mut events).is_empty());
}

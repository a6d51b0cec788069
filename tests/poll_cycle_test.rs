//! Poll cycle tests
//!
//! End-to-end cycles against an in-process fake modem: fetch, parse, apply.

mod common;

use common::{config_for, single_table_page, FakeModem, Pages, STATUS_PAGE_UPTIME};
use surfboard_exporter::collectors::PollOutcome;
use surfboard_exporter::server::AppState;
use surfboard_exporter::surfboard::types::{Task, TaskState};

#[tokio::test]
async fn test_successful_cycle_updates_everything() {
    // Given: A healthy modem
    let modem = FakeModem::spawn(Pages::default()).await;
    let state = AppState::new(modem.config()).unwrap();

    // When: Running one cycle
    let outcome = state.poll_once().await;

    // Then: Both pages were applied
    assert_eq!(outcome, PollOutcome::Success);
    let metrics = state.metrics();
    assert_eq!(
        metrics.task_state(Task::CableModemStatus),
        TaskState::Operational
    );
    assert_eq!(metrics.uptime_seconds.get() as u64, STATUS_PAGE_UPTIME);
    assert_eq!(metrics.up.get(), 1.0);

    let rendered = metrics.render().unwrap();
    assert!(rendered.contains("surfboard_downstream_power_level{channel=\"2\"} 4.9"));
    assert!(rendered.contains(
        "surfboard_signal_status_codewords_total_unerrored_codewords{channel=\"3\"} 3456789"
    ));
}

#[tokio::test]
async fn test_server_error_keeps_stale_values() {
    // Given: One successful cycle
    let modem = FakeModem::spawn(Pages::default()).await;
    let state = AppState::new(modem.config()).unwrap();
    assert!(state.poll_once().await.is_success());
    let before = state.metrics().render().unwrap();

    // When: The modem starts answering HTTP 500 with different content
    modem.update(|pages| {
        pages.status_code = 500;
        pages.status_html = pages.status_html.replace("Operational", "Offline");
    });
    let outcome = state.poll_once().await;

    // Then: The cycle reports both failures but the readings are unchanged
    match &outcome {
        PollOutcome::PartialFailure { reasons } => assert_eq!(reasons.len(), 2),
        other => panic!("Expected partial failure, got {:?}", other),
    }
    let metrics = state.metrics();
    assert_eq!(metrics.up.get(), 0.0);
    assert_eq!(
        metrics.task_state(Task::CableModemStatus),
        TaskState::Operational
    );

    let after = metrics.render().unwrap();
    let readings = |text: &str| -> Vec<String> {
        text.lines()
            .filter(|line| {
                !line.starts_with("surfboard_up ")
                    && !line.starts_with("surfboard_poll_duration_seconds ")
            })
            .map(str::to_string)
            .collect()
    };
    assert_eq!(readings(&before), readings(&after));
}

#[tokio::test]
async fn test_unreachable_modem_is_not_fatal() {
    // Given: A modem address nothing listens on
    let state = AppState::new(config_for("http://127.0.0.1:1")).unwrap();
    let names = state.metrics().metric_names().to_vec();

    // When: Running several cycles
    for _ in 0..3 {
        let outcome = state.poll_once().await;

        // Then: Each cycle fails softly
        assert!(!outcome.is_success());
    }
    assert_eq!(state.metrics().up.get(), 0.0);
    assert_eq!(state.metrics().metric_names(), names.as_slice());
}

#[tokio::test]
async fn test_inconsistent_signal_page_only_fails_signal_collection() {
    // Given: A valid status page and a signal page with a short data row
    let modem = FakeModem::spawn(Pages {
        signal_html: single_table_page(
            "<tr><th>Downstream</th></tr>\
             <tr><td>Channel ID</td><td>1</td><td>2</td></tr>\
             <tr><td>Power Level</td><td>5.1 dBmV</td></tr>",
        ),
        ..Pages::default()
    })
    .await;
    let state = AppState::new(modem.config()).unwrap();

    // When: Running a cycle
    let outcome = state.poll_once().await;

    // Then: Status metrics applied, signal metrics untouched
    match outcome {
        PollOutcome::PartialFailure { reasons } => {
            assert_eq!(reasons.len(), 1);
            assert!(reasons[0].contains("signal page"), "{}", reasons[0]);
        }
        other => panic!("Expected partial failure, got {:?}", other),
    }
    assert_eq!(
        state.metrics().task_state(Task::CableModemStatus),
        TaskState::Operational
    );
    let rendered = state.metrics().render().unwrap();
    assert!(!rendered.contains("surfboard_downstream_power_level{"));
}

#[tokio::test]
async fn test_new_channels_extend_labels_without_new_metrics() {
    // Given: A cycle against the default pages
    let modem = FakeModem::spawn(Pages::default()).await;
    let state = AppState::new(modem.config()).unwrap();
    let names = state.metrics().metric_names().to_vec();
    state.poll_once().await;

    // When: The modem bonds a new upstream channel and drops the old one
    modem.update(|pages| {
        pages.signal_html = single_table_page(
            "<tr><th>Upstream</th></tr>\
             <tr><td>Channel ID</td><td>9</td></tr>\
             <tr><td>Power Level</td><td>43 dBmV</td></tr>",
        );
    });
    assert!(state.poll_once().await.is_success());

    // Then: Both channels are exposed and the metric names are unchanged
    let rendered = state.metrics().render().unwrap();
    assert!(rendered.contains("surfboard_upstream_power_level{channel=\"4\"} 41"));
    assert!(rendered.contains("surfboard_upstream_power_level{channel=\"9\"} 43"));
    assert_eq!(state.metrics().metric_names(), names.as_slice());
}

#[tokio::test]
async fn test_status_page_with_unknown_state_still_succeeds() {
    let modem = FakeModem::spawn(Pages::default()).await;
    modem.update(|pages| {
        pages.status_html = pages
            .status_html
            .replace("<td>Operational</td>", "<td>Booting</td>");
    });
    let state = AppState::new(modem.config()).unwrap();

    let outcome = state.poll_once().await;

    assert!(outcome.is_success());
    assert_eq!(
        state.metrics().task_state(Task::CableModemStatus),
        TaskState::Other
    );
}

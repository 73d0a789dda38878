//! End-to-end check runs: host table -> probe -> reconcile -> `ts`

mod common;

use std::sync::Arc;

use common::*;
use pingpoll_core::application::CheckOptions;
use pingpoll_core::domain::{CheckWarning, ProbeOptions};
use pingpoll_core::port::probe_runner::mocks::{MockBehavior, MockProbeRunner};
use pingpoll_core::AppError;

fn keep_unresolved() -> CheckOptions {
    CheckOptions {
        keep_unresolved: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_unresolved_host_kept_as_null() {
    let store = store_with_hosts(&["a", "b", "c"]).await;

    let run = run_pipeline(
        &store,
        mock_runner("a is alive\nb is unreachable\n"),
        &keep_unresolved(),
    )
    .await;

    assert_eq!(run.result.unwrap(), 3);
    assert_eq!(
        ts_rows(&store.pool).await,
        vec![
            (BATCH_SECS, 1, Some(1), None),
            (BATCH_SECS, 2, Some(0), None),
            (BATCH_SECS, 3, None, None),
        ]
    );
    assert_eq!(
        run.reporter.warnings(),
        vec![CheckWarning::PartialResolution {
            count: 1,
            kept: true
        }]
    );
}

#[tokio::test]
async fn test_unresolved_host_dropped_with_warning() {
    let store = store_with_hosts(&["a", "b", "c"]).await;

    let run = run_pipeline(
        &store,
        mock_runner("a is alive\nb is unreachable\n"),
        &CheckOptions::default(),
    )
    .await;

    assert_eq!(run.result.unwrap(), 2);
    let rows = ts_rows(&store.pool).await;
    assert!(rows.iter().all(|(_, host_id, _, _)| *host_id != 3));
    assert_eq!(
        run.reporter.warnings()[0].to_string(),
        "fping did not return a result for 1 host"
    );
}

#[tokio::test]
async fn test_latency_round_trip() {
    let store = store_with_hosts(&["a", "b", "c"]).await;
    let options = CheckOptions {
        probe: ProbeOptions {
            capture_latency: true,
            ..Default::default()
        },
        keep_unresolved: true,
    };

    let run = run_pipeline(
        &store,
        mock_runner("a is alive (12.3 ms)\nb is alive\nc is unreachable\n"),
        &options,
    )
    .await;

    assert_eq!(run.result.unwrap(), 3);
    assert_eq!(
        ts_rows(&store.pool).await,
        vec![
            (BATCH_SECS, 1, Some(1), Some(12.3)),
            (BATCH_SECS, 2, Some(1), None),
            (BATCH_SECS, 3, Some(0), None),
        ]
    );
    assert!(run.reporter.warnings().is_empty());
}

#[tokio::test]
async fn test_system_call_failure_writes_nothing() {
    let store = store_with_hosts(&["a", "b"]).await;

    let run = run_pipeline(
        &store,
        Arc::new(MockProbeRunner::new_failing(4)),
        &keep_unresolved(),
    )
    .await;

    let err = run.result.unwrap_err();
    assert!(matches!(err, AppError::ProbeExecution { status: 4, .. }));
    assert!(err.remediation().unwrap().contains("setcap cap_net_raw+ep"));
    assert!(!ts_exists(&store.pool).await);
}

#[tokio::test]
async fn test_unavailable_prober_writes_nothing() {
    let store = store_with_hosts(&[]).await;

    let run = run_pipeline(
        &store,
        Arc::new(MockProbeRunner::new(MockBehavior::Unavailable)),
        &keep_unresolved(),
    )
    .await;

    assert!(matches!(run.result, Err(AppError::ProbeUnavailable(_))));
    assert!(!ts_exists(&store.pool).await);
}

#[cfg(unix)]
#[tokio::test]
async fn test_system_call_failure_from_process() {
    use pingpoll_core::port::time_provider::SystemTimeProvider;
    use pingpoll_infra_system::FpingRunner;

    let store = store_with_hosts(&["a"]).await;
    let runner = FpingRunner::with_command(
        "sh",
        vec![
            "-c".to_string(),
            "echo 'a is alive'; exit 4".to_string(),
            "fping".to_string(),
        ],
        Arc::new(SystemTimeProvider),
    );

    let run = run_pipeline(&store, Arc::new(runner), &keep_unresolved()).await;

    assert!(matches!(
        run.result,
        Err(AppError::ProbeExecution { status: 4, .. })
    ));
    assert!(!ts_exists(&store.pool).await);
}

#[tokio::test]
async fn test_duplicate_hostname_recorded_once() {
    // The same name registered twice resolves to the first id
    let store = store_with_hosts(&["a", "a"]).await;

    let run = run_pipeline(&store, mock_runner("a is alive\n"), &keep_unresolved()).await;

    assert_eq!(run.result.unwrap(), 1);
    assert_eq!(
        ts_rows(&store.pool).await,
        vec![(BATCH_SECS, 1, Some(1), None)]
    );
    assert_eq!(
        run.reporter.warnings(),
        vec![CheckWarning::DuplicateHosts { count: 1 }]
    );
}

#[tokio::test]
async fn test_reverse_lookup_names_are_not_persisted() {
    let store = store_with_hosts(&["10.0.0.1", "10.0.0.2"]).await;
    let options = CheckOptions {
        probe: ProbeOptions {
            reverse_lookup: true,
            ..Default::default()
        },
        keep_unresolved: true,
    };

    let run = run_pipeline(&store, mock_runner("gateway.lan is alive\n"), &options).await;

    assert_eq!(run.result.unwrap(), 0);
    assert!(ts_rows(&store.pool).await.is_empty());
    assert_eq!(
        run.reporter.warnings(),
        vec![
            CheckWarning::ConflictingOptions,
            CheckWarning::PartialResolution {
                count: 1,
                kept: false
            },
        ]
    );
}

#[tokio::test]
async fn test_consecutive_runs_append() {
    let store = store_with_hosts(&["a", "b"]).await;

    for _ in 0..2 {
        let run = run_pipeline(
            &store,
            mock_runner("a is alive\nb is unreachable\n"),
            &keep_unresolved(),
        )
        .await;
        assert_eq!(run.result.unwrap(), 2);
    }

    assert_eq!(ts_rows(&store.pool).await.len(), 4);
}

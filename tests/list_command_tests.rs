mod common;

use common::{registry, run_output, FailingQueryStorage, FixedStorage};
use mq_debug::commands::{list, CommandStatus, ListOptions};
use mq_debug::database::UnavailableStorage;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Log sink shared with a test subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn table_options() -> ListOptions {
    ListOptions::default()
}

fn json_options() -> ListOptions {
    ListOptions {
        queue_filter: None,
        json: true,
    }
}

#[tokio::test]
async fn test_table_lists_destinations_with_counts() {
    let registry = registry(vec![("default", "oro.default", vec!["processor1"])]);
    let storage = FixedStorage::with_counts(&[("oro.default", 5)]);
    let mut out = Vec::new();

    let status = list::execute(&registry, &storage, &table_options(), &mut out)
        .await
        .unwrap();

    assert_eq!(status, CommandStatus::Success);
    let output = run_output(out);
    for expected in ["Queue", "Transport Queue", "Processor", "Messages"] {
        assert!(output.contains(expected), "missing header {expected}: {output}");
    }
    assert!(output.contains("default"));
    assert!(output.contains("oro.default"));
    assert!(output.contains("processor1"));
    assert!(output.contains(" ! [NOTE] Total messages in queue: 5"));
}

#[tokio::test]
async fn test_json_output_has_one_row_per_processor() {
    let registry = registry(vec![("default", "oro.default", vec!["processor1"])]);
    let storage = FixedStorage::with_counts(&[("oro.default", 2)]);
    let mut out = Vec::new();

    list::execute(&registry, &storage, &json_options(), &mut out)
        .await
        .unwrap();

    let output = run_output(out);
    let data: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["queue"], "default");
    assert_eq!(rows[0]["transport_queue"], "oro.default");
    assert_eq!(rows[0]["processor"], "processor1");
    assert_eq!(rows[0]["messages"], 2);
    assert!(!output.contains("[NOTE]"));
}

#[tokio::test]
async fn test_json_keeps_slashes_unescaped() {
    let registry = registry(vec![("default", "oro.default", vec!["app/processor"])]);
    let mut out = Vec::new();

    list::execute(&registry, &FixedStorage::default(), &json_options(), &mut out)
        .await
        .unwrap();

    let output = run_output(out);
    assert!(output.contains("\"app/processor\""));
    assert!(!output.contains("\\/"));
}

#[tokio::test]
async fn test_filter_drops_other_destinations_entirely() {
    let registry = registry(vec![
        ("default", "oro.default", vec!["processor1"]),
        ("other", "oro.other", vec!["processor2"]),
    ]);
    let storage = FixedStorage::with_counts(&[("oro.default", 1)]);
    let options = ListOptions {
        queue_filter: Some("other".to_string()),
        json: false,
    };
    let mut out = Vec::new();

    list::execute(&registry, &storage, &options, &mut out)
        .await
        .unwrap();

    let output = run_output(out);
    assert!(output.contains("other"));
    assert!(output.contains("processor2"));
    assert!(!output.contains("processor1"));
    // oro.other has no pending messages
    assert!(!output.contains("Total messages"));
}

#[tokio::test]
async fn test_filter_is_case_insensitive_and_empty_means_all() {
    let registry = registry(vec![
        ("Default", "oro.default", vec!["p1", "p2"]),
        ("other", "oro.other", vec![]),
    ]);

    let mut out = Vec::new();
    let options = ListOptions {
        queue_filter: Some("DEF".to_string()),
        json: true,
    };
    list::execute(&registry, &FixedStorage::default(), &options, &mut out)
        .await
        .unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&run_output(out)).unwrap();
    assert_eq!(rows.len(), 2);

    let mut out = Vec::new();
    let options = ListOptions {
        queue_filter: Some(String::new()),
        json: true,
    };
    list::execute(&registry, &FixedStorage::default(), &options, &mut out)
        .await
        .unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&run_output(out)).unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_destination_without_processors_gets_none_row() {
    let registry = registry(vec![("other", "oro.other", vec![])]);
    let storage = FixedStorage::with_counts(&[("oro.other", 4)]);
    let mut out = Vec::new();

    list::execute(&registry, &storage, &json_options(), &mut out)
        .await
        .unwrap();

    let rows: Vec<serde_json::Value> = serde_json::from_str(&run_output(out)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["processor"], "(none)");
    assert_eq!(rows[0]["messages"], 4);
}

#[tokio::test]
async fn test_empty_registry_prints_note_only() {
    let registry = registry(vec![]);
    let mut out = Vec::new();

    let status = list::execute(&registry, &FixedStorage::default(), &table_options(), &mut out)
        .await
        .unwrap();

    assert_eq!(status, CommandStatus::Success);
    assert_eq!(run_output(out).trim(), "! [NOTE] No destinations found.");
}

#[tokio::test]
async fn test_empty_registry_json_is_empty_array() {
    let registry = registry(vec![]);
    let mut out = Vec::new();

    list::execute(&registry, &FixedStorage::default(), &json_options(), &mut out)
        .await
        .unwrap();

    assert_eq!(run_output(out).trim(), "[]");
}

#[tokio::test]
async fn test_storage_failures_read_as_zero() {
    let registry = registry(vec![("default", "oro.default", vec!["processor1"])]);

    let missing = FixedStorage::missing_table();
    let failing = FailingQueryStorage;
    let unavailable = UnavailableStorage::new("connection refused");
    let storages: [&dyn mq_debug::database::QueueStorageReader; 3] = [&missing, &failing, &unavailable];

    for storage in storages {
        let mut out = Vec::new();
        let status = list::execute(&registry, storage, &json_options(), &mut out)
            .await
            .unwrap();

        assert_eq!(status, CommandStatus::Success);
        let rows: Vec<serde_json::Value> = serde_json::from_str(&run_output(out)).unwrap();
        assert_eq!(rows[0]["messages"], 0);
    }
}

#[tokio::test]
async fn test_total_sums_every_row() {
    let registry = registry(vec![
        ("default", "oro.default", vec!["p1", "p2"]),
        ("other", "oro.other", vec!["p3"]),
    ]);
    let storage = FixedStorage::with_counts(&[("oro.default", 2), ("oro.other", 3)]);
    let mut out = Vec::new();

    list::execute(&registry, &storage, &table_options(), &mut out)
        .await
        .unwrap();

    assert!(run_output(out).contains("Total messages in queue: 7"));
}

#[test]
fn test_unreachable_database_keeps_json_clean_and_logs_quiet() {
    let logs = CapturedLogs::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || sink.clone())
        .finish();

    let registry = registry(vec![
        ("default", "oro.default", vec!["processor1"]),
        ("email", "oro.email", vec![]),
    ]);
    let storage = UnavailableStorage::new("pool timed out while waiting for an open connection");
    let mut out = Vec::new();

    let status = tracing::subscriber::with_default(subscriber, || {
        tokio_test::block_on(list::execute(&registry, &storage, &json_options(), &mut out))
    })
    .unwrap();

    assert_eq!(status, CommandStatus::Success);
    let output = run_output(out);
    let rows: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["messages"] == 0));
    assert!(logs.0.lock().is_empty(), "unexpected log output");
}

use socialdrive::telemetry;
use tracing::info;

// Runs in its own test binary so the global subscriber is free.
#[test]
fn log_file_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("client.log");

    telemetry::init(Some(&path)).unwrap();
    info!("socialdrive telemetry check");

    let logs = std::fs::read_to_string(&path).unwrap();
    assert!(logs.contains("socialdrive telemetry check"));
}

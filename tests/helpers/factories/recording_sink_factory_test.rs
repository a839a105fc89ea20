use crate::engine::core::{WritableRow, WritableValue, WriteSink};
use crate::test_helpers::factories::SinkCall;
use crate::test_helpers::factory::Factory;

fn row(key: u8) -> WritableRow {
    WritableRow {
        columns: vec![WritableValue::MdKey(vec![key])],
    }
}

#[test]
fn test_recording_sink_records_calls() {
    let mut sink = Factory::recording_sink().create();
    sink.initialize().unwrap();
    sink.write(row(3)).unwrap();
    sink.write(row(5)).unwrap();
    sink.finalize().unwrap();
    sink.release().unwrap();

    assert_eq!(
        sink.calls,
        vec![
            SinkCall::Initialize,
            SinkCall::Write,
            SinkCall::Write,
            SinkCall::Finalize,
            SinkCall::Release
        ]
    );
    assert_eq!(sink.leading_key_bytes(), vec![3, 5]);
    assert_eq!(sink.release_count(), 1);
}

#[test]
fn test_recording_sink_injected_failures() {
    let mut sink = Factory::recording_sink()
        .failing_write_at(1)
        .failing_release()
        .create();
    sink.initialize().unwrap();
    sink.write(row(1)).unwrap();
    assert!(sink.write(row(2)).is_err());
    assert!(sink.release().is_err());

    assert_eq!(sink.rows.len(), 1);
    assert_eq!(sink.write_count(), 2);
}

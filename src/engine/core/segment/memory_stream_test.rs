use crate::engine::core::SegmentStream;
use crate::engine::errors::StreamError;
use crate::test_helpers::factory::Factory;

#[test]
fn test_memory_stream_cursor() {
    let mut stream = Factory::segment_stream()
        .with_label("mem")
        .with_keys(&[5, 9])
        .create_memory();

    assert_eq!(stream.len(), 2);
    assert_eq!(stream.label(), "mem");
    assert_eq!(stream.schema().mdkey_len(), 1);

    assert_eq!(stream.peek_key().unwrap().dictionary, vec![5]);
    let first = stream.consume().unwrap().unwrap();
    assert_eq!(first.key.dictionary, vec![5]);
    assert_eq!(stream.peek_key().unwrap().dictionary, vec![9]);
    stream.consume().unwrap();

    assert!(stream.is_empty());
    assert!(!stream.has_more());
    assert!(matches!(stream.peek_key(), Err(StreamError::Exhausted(label)) if label == "mem"));
    assert_eq!(stream.consume().unwrap(), None);
}

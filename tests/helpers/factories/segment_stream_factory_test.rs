use crate::test_helpers::factory::Factory;

#[test]
fn test_segment_stream_factory_yields_keys_in_order() {
    let mut stream = Factory::segment_stream()
        .with_label("part-a")
        .with_keys(&[2, 4])
        .create();

    assert_eq!(stream.label(), "part-a");
    assert_eq!(stream.peek_key().unwrap().dictionary, vec![2]);
    assert_eq!(stream.consume().unwrap().unwrap().key.dictionary, vec![2]);
    assert_eq!(stream.peek_key().unwrap().dictionary, vec![4]);
    stream.consume().unwrap();
    assert!(!stream.has_more());
}

#[test]
fn test_segment_stream_factory_injects_failures() {
    let mut failing_key = Factory::segment_stream()
        .with_keys(&[1, 2, 3])
        .failing_key_at(1)
        .create();
    assert!(failing_key.peek_key().is_ok());
    failing_key.consume().unwrap();
    assert!(failing_key.peek_key().is_err());

    let mut failing_read = Factory::segment_stream()
        .with_keys(&[1, 2])
        .failing_consume_at(0)
        .create();
    assert!(failing_read.peek_key().is_ok());
    assert!(failing_read.consume().is_err());
}

#[test]
fn test_segment_stream_factory_drops_row() {
    let mut stream = Factory::segment_stream()
        .with_keys(&[1, 2])
        .dropping_row_at(1)
        .create();
    assert!(stream.consume().unwrap().is_some());
    assert!(stream.has_more());
    assert_eq!(stream.peek_key().unwrap().dictionary, vec![2]);
    assert!(stream.consume().unwrap().is_none());
    assert!(stream.has_more());
}

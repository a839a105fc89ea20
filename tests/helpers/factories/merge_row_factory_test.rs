use crate::engine::core::MeasureValue;
use crate::test_helpers::factory::Factory;

#[test]
fn test_merge_row_factory() {
    let row = Factory::merge_row()
        .with_dictionary(&[0x01, 0x02])
        .with_no_dictionary(b"berlin")
        .with_complex(b"[1,2]")
        .with_measures(vec![MeasureValue::Long(7), MeasureValue::Null])
        .create();

    assert_eq!(row.key.dictionary, vec![0x01, 0x02]);
    assert_eq!(row.key.no_dictionary_at(0), Some(&b"berlin"[..]));
    assert_eq!(row.key.complex, vec![b"[1,2]".to_vec()]);
    assert_eq!(row.measures, vec![MeasureValue::Long(7), MeasureValue::Null]);
}

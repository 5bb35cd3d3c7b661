use b2t::table::TableHost;
use b2t::{decode_text, encode_text, from_dynamic, to_dynamic, DecodeOptions, Format, Value};
use b2t_pack::json;
use proptest::prelude::*;

const SAFE: i64 = 1 << 53;

/// Documents the host represents exactly: no nulls, no empty objects,
/// integers a double holds, floats with a fractional part.
fn arb_host_safe() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-SAFE..=SAFE).prop_map(Value::Integer),
        prop::num::f64::NORMAL
            .prop_filter("fractional", |f| f.fract() != 0.0)
            .prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z_]{1,6}", inner), 1..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        (prop::num::f64::NORMAL | prop::num::f64::ZERO).prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((".{0,6}", inner), 0..6)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
        ]
    })
}

fn arb_format() -> impl Strategy<Value = Format> {
    prop::sample::select(Format::ALL.to_vec())
}

proptest! {
    #[test]
    fn host_roundtrip(v in arb_host_safe()) {
        let mut host = TableHost::new();
        let dynamic = to_dynamic(&mut host, v.clone());
        prop_assert_eq!(from_dynamic(&host, &dynamic).unwrap(), v);
    }

    #[test]
    fn text_through_each_format(v in arb_document(), format in arb_format()) {
        let text = json::serialize(&v, None);
        let bytes = encode_text(&text, format).unwrap();
        let back = decode_text(&bytes, format, DecodeOptions::compact()).unwrap();
        prop_assert_eq!(json::parse(&back).unwrap(), v);
    }

    #[test]
    fn decoded_pretty_text_is_stable(v in arb_document(), format in arb_format(), indent in 0usize..5) {
        let bytes = encode_text(&json::serialize(&v, None), format).unwrap();
        let once = decode_text(&bytes, format, DecodeOptions::pretty(indent)).unwrap();
        let twice = json::serialize(&json::parse(&once).unwrap(), Some(indent));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64), format in arb_format()) {
        let _ = decode_text(&bytes, format, DecodeOptions::compact());
    }
}

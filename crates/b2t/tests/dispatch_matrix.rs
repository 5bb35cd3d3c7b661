use b2t::table::{HostValue, Table, TableHost};
use b2t::{
    decode, encode, from_bin, from_cbor, from_msgpack, from_ubjson, to_bin, to_cbor, to_msgpack,
    to_ubjson, DataKind, DecodeOptions, Error, Format, Input, Output, Value,
};
use b2t_pack::json;

const SAMPLE: &str = r#"{
    "string":"testString",
    "number":64,
    "array": [0, 1, 2, 3],
    "bool": true
}"#;

#[test]
fn cbor_sample_back_to_text() {
    let mut host = TableHost::new();
    let bytes = encode(&host, Input::Text(SAMPLE), Format::Cbor).unwrap();
    let out = decode(&mut host, &bytes, DataKind::Text, Format::Cbor, DecodeOptions::compact())
        .unwrap()
        .into_text()
        .unwrap();
    assert_eq!(json::parse(&out).unwrap(), json::parse(SAMPLE).unwrap());
    assert_eq!(
        out,
        r#"{"string":"testString","number":64,"array":[0,1,2,3],"bool":true}"#
    );
}

#[test]
fn cbor_sample_to_host_table() {
    let mut host = TableHost::new();
    let bytes = to_cbor(SAMPLE).unwrap();
    let value = decode(
        &mut host,
        &bytes,
        DataKind::DynamicValue,
        Format::Cbor,
        DecodeOptions::default(),
    )
    .unwrap()
    .into_dynamic()
    .unwrap();
    let root = value.as_table().unwrap();
    let array = root.get("array").and_then(HostValue::as_table).unwrap();
    assert_eq!(array.len(), 4);
    assert_eq!(array.at(1), Some(&HostValue::Number(0.0)));
    assert_eq!(array.at(4), Some(&HostValue::Number(3.0)));
    assert_eq!(root.get("string").and_then(HostValue::as_str), Some("testString"));
    assert_eq!(root.get("number").and_then(HostValue::as_number), Some(64.0));
    assert_eq!(root.get("bool"), Some(&HostValue::Boolean(true)));
}

#[test]
fn every_format_roundtrips_text() {
    let mut host = TableHost::new();
    let doc = r#"{"a":[1,-2,3.5,"x",null,false],"b":{"c":{}},"d":9223372036854775807}"#;
    for format in Format::ALL {
        let bytes = encode(&host, Input::Text(doc), format).unwrap();
        let out = decode(&mut host, &bytes, DataKind::Text, format, DecodeOptions::compact())
            .unwrap();
        assert_eq!(out, Output::Text(doc.to_owned()), "{format}");
    }
}

#[test]
fn host_values_encode_through_the_bridge() {
    let mut host = TableHost::new();
    let mut t = Table::new();
    t.set("list", HostValue::Table(Table::sequence([1i64.into(), 2.5.into()])));
    t.set("name", "b2t".into());
    let input = HostValue::Table(t);
    for format in Format::ALL {
        let bytes = encode(&host, Input::Dynamic(&input), format).unwrap();
        let out = decode(&mut host, &bytes, DataKind::Text, format, DecodeOptions::compact())
            .unwrap();
        assert_eq!(
            out.into_text().unwrap(),
            r#"{"list":[1,2.5],"name":"b2t"}"#,
            "{format}"
        );
    }
}

#[test]
fn pretty_output_uses_indent() {
    let mut host = TableHost::new();
    let bytes = to_msgpack(r#"{"a":[1]}"#).unwrap();
    let pretty = decode(&mut host, &bytes, DataKind::Text, Format::MessagePack, DecodeOptions::pretty(4))
        .unwrap()
        .into_text()
        .unwrap();
    assert_eq!(pretty, "{\n    \"a\": [\n        1\n    ]\n}");
    let flat = decode(&mut host, &bytes, DataKind::Text, Format::MessagePack, DecodeOptions::pretty(0))
        .unwrap()
        .into_text()
        .unwrap();
    assert_eq!(flat, "{\n\"a\": [\n1\n]\n}");
}

#[test]
fn string_selectors() {
    let mut host = TableHost::new();
    let text = HostValue::from(r#"[true,{"k":"v"}]"#);
    let bytes = to_bin(&host, &text, "text", "ubjson").unwrap();
    assert_eq!(bytes, to_ubjson(r#"[true,{"k":"v"}]"#).unwrap());

    let back = from_bin(&mut host, &bytes, "text", "ubjson", None).unwrap();
    assert_eq!(back.as_str(), Some(r#"[true,{"k":"v"}]"#));

    let table = from_bin(&mut host, &bytes, "dynamic", "UBJSON", None).unwrap();
    assert_eq!(to_bin(&host, &table, "dynamic", "ubjson").unwrap(), bytes);
}

#[test]
fn text_source_must_be_a_string() {
    let host = TableHost::new();
    assert_eq!(
        to_bin(&host, &HostValue::from(1.0), "text", "cbor"),
        Err(Error::UnsupportedValueKind(
            "number given where text was expected".into()
        ))
    );
}

#[test]
fn unknown_format_fails_both_ways() {
    let mut host = TableHost::new();
    let text = HostValue::from("{}");
    assert_eq!(
        to_bin(&host, &text, "text", "bson"),
        Err(Error::UnsupportedFormat("bson".into()))
    );
    assert_eq!(
        from_bin(&mut host, &[0xa0], "text", "bson", None),
        Err(Error::UnsupportedFormat("bson".into()))
    );
    assert_eq!(
        from_bin(&mut host, &[0xa0], "xml", "cbor", None),
        Err(Error::UnsupportedFormat("xml".into()))
    );
}

#[test]
fn malformed_text_reports_position() {
    match to_cbor("{\"a\": [1, 2,}") {
        Err(Error::Parse { line, column, .. }) => {
            assert_eq!(line, 1);
            assert!(column > 0);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn malformed_binary_is_reported_per_format() {
    let mut host = TableHost::new();
    let cases: Vec<(Format, Vec<u8>)> = vec![
        (Format::Cbor, vec![]),
        (Format::Cbor, vec![0x82, 0x01]),
        (Format::MessagePack, vec![0x92, 0x01]),
        (Format::MessagePack, vec![0xc1]),
        (Format::Ubjson, b"[i".to_vec()),
        (Format::Ubjson, b"Tx".to_vec()),
    ];
    for (format, bytes) in cases {
        match decode(&mut host, &bytes, DataKind::DynamicValue, format, DecodeOptions::default()) {
            Err(Error::MalformedBinaryInput { format: f, .. }) => assert_eq!(f, format),
            other => panic!("{format} {bytes:?}: expected malformed input, got {other:?}"),
        }
    }
}

#[test]
fn per_format_helpers_reach_the_host() {
    let mut host = TableHost::new();
    let doc = r#"{"k":[1,2]}"#;
    let expected = Value::from(serde_json::json!({"k": [1, 2]}));
    let decoded = [
        from_cbor(&mut host, &to_cbor(doc).unwrap()).unwrap(),
        from_msgpack(&mut host, &to_msgpack(doc).unwrap()).unwrap(),
        from_ubjson(&mut host, &to_ubjson(doc).unwrap()).unwrap(),
    ];
    for value in decoded {
        assert_eq!(b2t::from_dynamic(&host, &value).unwrap(), expected);
    }
}

use std::collections::VecDeque;

use csv_record_codec::document::Decoder;
use csv_record_codec::{CodecError, CodecOptions, Dialect, decode_document, decode_from_path, record, unmarshal};

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Person {
        #[csv(rename = "Full Name")]
        pub name: String,
        income: String,
        #[csv(rename = "Age")]
        pub age: i64,
        #[csv(rename = "Address", skip)]
        pub address: String,
        #[csv(rename = "Wallet")]
        pub wallet: f32,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct P {
        #[csv(rename = "Name")]
        pub name: String,
        #[csv(rename = "Age")]
        pub age: i32,
        #[csv(rename = "Happy", true_literal = "Yes", false_literal = "No")]
        pub happy: bool,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Pair {
        pub a: String,
        pub b: String,
    }
}

#[test]
fn decodes_header_matched_rows_in_document_order() {
    let doc = b"Name,Age\nJohn,23\nJane,27\n";
    let mut out: Vec<P> = Vec::new();
    unmarshal(doc, &mut out).unwrap();

    assert_eq!(
        out,
        vec![
            P { name: "John".to_string(), age: 23, happy: false },
            P { name: "Jane".to_string(), age: 27, happy: false },
        ]
    );
}

#[test]
fn ignores_unknown_columns_and_maps_boolean_literals() {
    let doc = b"Name,Age,ignore,Happy\nJohn,23,,Yes\nJane,27,,No\nBill,28,,Maybe";
    let mut out: Vec<P> = Vec::new();
    unmarshal(doc, &mut out).unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(
        out.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["John", "Jane", "Bill"]
    );
    assert_eq!(out.iter().map(|p| p.age).collect::<Vec<_>>(), vec![23, 27, 28]);
    // "Maybe" matches neither literal and falls back to true
    assert_eq!(out.iter().map(|p| p.happy).collect::<Vec<_>>(), vec![true, false, true]);
}

#[test]
fn private_and_skipped_fields_are_never_assigned() {
    let mut people: Vec<Person> = Vec::new();
    decode_from_path("tests/fixtures/people.csv", &mut people, &CodecOptions::default()).unwrap();

    assert_eq!(people.len(), 2);
    assert_eq!(people[0].name, "John Doe");
    assert_eq!(people[0].income, "");
    assert_eq!(people[0].age, 45);
    assert_eq!(people[0].address, "");
    assert_eq!(people[0].wallet, 19.07);
    assert_eq!(people[1].name, "Roe, Jane");
    assert_eq!(people[1].wallet, 0.5);
}

#[test]
fn missing_columns_leave_fields_at_default() {
    let doc = b"Happy\nNo\n";
    let mut out: Vec<P> = Vec::new();
    unmarshal(doc, &mut out).unwrap();

    assert_eq!(out, vec![P { name: String::new(), age: 0, happy: false }]);
}

#[test]
fn header_only_document_decodes_to_nothing() {
    let mut out: Vec<P> = Vec::new();
    unmarshal(b"Name,Age", &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn empty_document_is_malformed() {
    let mut out: Vec<P> = Vec::new();
    let err = unmarshal(b"", &mut out).unwrap_err();
    assert!(matches!(err, CodecError::MalformedDocument { .. }));
    assert!(err.to_string().contains("no header row"));
}

#[test]
fn non_empty_target_is_rejected_before_reading() {
    let mut out = vec![P::default()];
    // the document itself is malformed; the target check must win
    let err = unmarshal(b"", &mut out).unwrap_err();
    assert!(matches!(err, CodecError::InvalidTarget { .. }));
    assert_eq!(out.len(), 1);
}

#[test]
fn parse_failure_aborts_and_discards_partial_results() {
    let doc = b"Name,Age\nJohn,23\nJane,twenty\nBill,28\n";
    let mut out: Vec<P> = Vec::new();
    let err = unmarshal(doc, &mut out).unwrap_err();

    match &err {
        CodecError::ParseError { row, column, raw, .. } => {
            assert_eq!(*row, 3);
            assert_eq!(column, "Age");
            assert_eq!(raw, "twenty");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("failed to parse value at row 3 column 'Age'"));
    assert!(out.is_empty());
}

#[test]
fn float_parse_failure_is_reported() {
    let doc = b"Full Name,Wallet\nJohn,lots\n";
    let mut out: Vec<Person> = Vec::new();
    let err = unmarshal(doc, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::ParseError { ref column, .. } if column == "Wallet"));
}

#[test]
fn float_overflowing_field_precision_is_a_parse_error() {
    let doc = b"Full Name,Wallet\nJohn,1e40\n";
    let mut out: Vec<Person> = Vec::new();
    let err = unmarshal(doc, &mut out).unwrap_err();
    match err {
        CodecError::ParseError { row, raw, message, .. } => {
            assert_eq!(row, 2);
            assert_eq!(raw, "1e40");
            assert_eq!(message, "value out of range");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ragged_rows_are_tokenizer_errors() {
    let doc = b"Name,Age\nJohn\n";
    let mut out: Vec<P> = Vec::new();
    let err = unmarshal(doc, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::Csv(_)));
}

#[test]
fn short_rows_from_flexible_readers_report_the_missing_cell() {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader("a,b\nx\n".as_bytes());
    let mut decoder = Decoder::<_, Pair>::new(reader).unwrap();
    let err = decoder.decode_all().unwrap_err();

    match err {
        CodecError::MissingCell { row, column, index, found } => {
            assert_eq!(row, 2);
            assert_eq!(column, "b");
            assert_eq!(index, 1);
            assert_eq!(found, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_header_names_bind_first_column() {
    let doc = b"Name,Age,Name\nJohn,23,Johnny\n";
    let mut out: Vec<P> = Vec::new();
    unmarshal(doc, &mut out).unwrap();
    assert_eq!(out[0].name, "John");
}

#[test]
fn column_matching_is_case_sensitive() {
    let doc = b"name,age\nJohn,23\n";
    let mut out: Vec<P> = Vec::new();
    unmarshal(doc, &mut out).unwrap();
    assert_eq!(out, vec![P::default()]);
}

#[test]
fn decodes_into_vecdeque() {
    let mut out: VecDeque<P> = VecDeque::new();
    unmarshal(b"Name\nA\nB\n", &mut out).unwrap();
    assert_eq!(out.pop_back().map(|p| p.name), Some("B".to_string()));
}

#[test]
fn decoder_exposes_columns_and_bindings() {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader("Age,extra,Name\n1,x,Ada\n".as_bytes());
    let mut decoder = Decoder::<_, P>::new(reader).unwrap();

    assert_eq!(decoder.columns(), &["Age", "extra", "Name"]);
    let bound: Vec<_> = decoder
        .field_map()
        .bindings()
        .iter()
        .map(|b| (b.field(), b.column()))
        .collect();
    assert_eq!(bound, vec![("name", 2), ("age", 0)]);

    let records = decoder.decode_all().unwrap();
    assert_eq!(records, vec![P { name: "Ada".to_string(), age: 1, happy: false }]);
}

#[test]
fn decoder_reads_header_from_headerless_reader() {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader("Name,Age\nAda,36\n".as_bytes());
    let mut decoder = Decoder::<_, P>::new(reader).unwrap();
    let records = decoder.decode_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].age, 36);
}

#[test]
fn decodes_with_configured_dialect() {
    let options = CodecOptions {
        dialect: Dialect::from_json_path("tests/fixtures/semicolon_dialect.json").unwrap(),
        ..Default::default()
    };
    let mut people: Vec<Person> = Vec::new();
    let text = std::fs::read("tests/fixtures/people_semicolon.csv").unwrap();
    let stats = decode_document(&text, &mut people, &options).unwrap();

    assert_eq!(people[0].name, "John Doe");
    assert_eq!(people[0].age, 45);
    assert_eq!(stats.records, 1);
    assert_eq!(stats.bound_fields, 2);
    assert_eq!(stats.ignored_columns, 0);
}

#[test]
fn concurrent_decodes_do_not_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let doc = format!("Name,Age\nworker{i},{i}\n");
                let mut out: Vec<P> = Vec::new();
                unmarshal(doc.as_bytes(), &mut out).unwrap();
                out
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap();
        assert_eq!(out[0].name, format!("worker{i}"));
        assert_eq!(out[0].age, i as i32);
    }
}

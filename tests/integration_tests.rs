//! Integration tests for tabsniff's public API.

use std::io::{Cursor, Write};
use tabsniff::{LineTerminator, Quote, SampleSize, Sniffer, SnifferError};
use tempfile::NamedTempFile;

#[test]
fn sniff_comma_with_header() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"id,name,age\n1,alice,25\n2,bob,30")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert!(metadata.dialect.header.has_header_row);
    assert_eq!(metadata.num_fields, 3);
    assert_eq!(metadata.fields, vec!["id", "name", "age"]);
}

#[test]
fn sniff_tab_delimited() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"id\tname\tage\n1\tAlice\t25\n2\tBob\t30")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b'\t');
    assert!(metadata.dialect.header.has_header_row);
    assert_eq!(metadata.num_fields, 3);
}

#[test]
fn sniff_semicolon_delimited() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"name;age;city\nAlice;30;New York\nBob;25;Los Angeles\n")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b';');
}

#[test]
fn sniff_pipe_delimited() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"name|age|city\nAlice|30|New York\nBob|25|Los Angeles\n")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b'|');
}

#[test]
fn bom_is_invisible_to_results() {
    let mut data = vec![0xEF, 0xBB, 0xBF];
    data.extend_from_slice(b"id,name\n1,Alice");

    let metadata = Sniffer::new().sniff_bytes(&data).unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.fields, vec!["id", "name"]);
}

#[test]
fn quoted_fields_with_escaped_quotes() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"id,name,description\n1,\"Alice\",\"She said, \"\"Hello\"\"\"\n2,\"Bob\",\"Normal text\"")
        .unwrap();

    assert_eq!(metadata.dialect.quote, Quote::Some(b'"'));
    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.num_fields, 3);
}

#[test]
fn single_quoted_fields() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"'name','value'\n'hello, world','123'\n'test','456'\n")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.dialect.quote, Quote::Some(b'\''));
}

#[test]
fn no_header_synthesizes_field_names() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"1,Alice,25\n2,Bob,30\n3,Charlie,35")
        .unwrap();

    assert!(!metadata.dialect.header.has_header_row);
    assert_eq!(metadata.fields, vec!["field_1", "field_2", "field_3"]);
}

#[test]
fn comment_preamble_rows_are_skipped() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"# comment\n# comment2\nid,name\n1,Alice\n2,Bob")
        .unwrap();

    assert_eq!(metadata.dialect.header.num_preamble_rows, 2);
    assert!(metadata.dialect.header.has_header_row);
    assert_eq!(metadata.fields, vec!["id", "name"]);
}

#[test]
fn report_style_preamble_is_skipped() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"Sales report Q3\nid,amount\n1,1000\n2,2400\n")
        .unwrap();

    assert!(metadata.dialect.header.num_preamble_rows >= 1);
    assert_eq!(metadata.fields, vec!["id", "amount"]);
}

#[test]
fn empty_sample_yields_zero_fields() {
    let metadata = Sniffer::new().sniff_bytes(b"").unwrap();

    assert_eq!(metadata.num_fields, 0);
    assert!(metadata.fields.is_empty());
}

#[test]
fn forced_single_quote() {
    let metadata = Sniffer::new()
        .with_quote(Quote::Some(b'\''))
        .sniff_bytes(b"id,'name','age'\n1,'Alice','25'")
        .unwrap();

    assert_eq!(metadata.dialect.quote, Quote::Some(b'\''));
    assert_eq!(metadata.dialect.delimiter, b',');
}

#[test]
fn forced_delimiter_is_honored() {
    let metadata = Sniffer::new()
        .with_delimiter(b';')
        .sniff_bytes(b"a;b;c\n1;2;3\n")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b';');
}

#[test]
fn forcing_the_natural_winner_changes_nothing() {
    let data = b"id,name,age\n1,alice,25\n2,bob,30";
    let natural = Sniffer::new().sniff_bytes(data).unwrap();
    let forced = Sniffer::new()
        .with_delimiter(natural.dialect.delimiter)
        .with_quote(natural.dialect.quote)
        .sniff_bytes(data)
        .unwrap();

    assert_eq!(natural, forced);
}

#[test]
fn crlf_terminator_is_detected() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"name,age\r\nAlice,30\r\nBob,25\r\n")
        .unwrap();

    assert_eq!(metadata.dialect.line_terminator, LineTerminator::CRLF);
    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.num_fields, 2);
}

#[test]
fn cr_terminator_is_detected() {
    let metadata = Sniffer::new().sniff_bytes(b"a,b\r1,2\r3,4").unwrap();

    assert_eq!(metadata.dialect.line_terminator, LineTerminator::CR);
    assert_eq!(metadata.num_fields, 2);
}

#[test]
fn sample_without_terminator_is_one_row() {
    let metadata = Sniffer::new().sniff_bytes(b"id,name,age").unwrap();

    assert_eq!(metadata.num_fields, 3);
    // A lone row cannot be told apart from data.
    assert!(!metadata.dialect.header.has_header_row);
    assert_eq!(metadata.avg_record_len, b"id,name,age".len());
}

#[test]
fn ragged_rows_mean_flexible() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"a,b,c\n1,2\n3,4,5,6\n7,8,9\n")
        .unwrap();

    assert!(metadata.dialect.flexible);
    assert_eq!(metadata.dialect.delimiter, b',');
}

#[test]
fn uniform_rows_are_not_flexible() {
    let metadata = Sniffer::new().sniff_bytes(b"a,b\n1,2\n3,4\n").unwrap();

    assert!(!metadata.dialect.flexible);
}

#[test]
fn avg_record_len_reflects_sample() {
    let data = b"aaaa,bbbb\ncccc,dddd\neeee,ffff\n";
    let metadata = Sniffer::new().sniff_bytes(data).unwrap();

    assert_eq!(metadata.avg_record_len, data.len() / 3);
}

#[test]
fn multibyte_utf8_content_is_fine() {
    let metadata = Sniffer::new()
        .sniff_bytes("name,city\nAlice,東京\nBob,Москва\n".as_bytes())
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.num_fields, 2);
}

#[test]
fn invalid_utf8_is_rejected() {
    let result = Sniffer::new().sniff_bytes(&[b'a', b',', 0xC3, 0x28, b'\n']);

    assert!(matches!(result, Err(SnifferError::Encoding { .. })));
}

#[test]
fn sniff_from_reader() {
    let metadata = Sniffer::new()
        .sniff_reader(Cursor::new(b"a,b,c\n1,2,3\n4,5,6\n".to_vec()))
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.num_fields, 3);
}

#[test]
fn sniff_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "name,age,city").unwrap();
    writeln!(file, "Alice,30,NYC").unwrap();
    writeln!(file, "Bob,25,LA").unwrap();
    file.flush().unwrap();

    let metadata = Sniffer::new().sniff_path(file.path()).unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.num_fields, 3);
    assert!(metadata.dialect.header.has_header_row);
}

#[test]
fn sample_size_bounds_reader_input() {
    let mut data = Vec::new();
    for i in 0..1000 {
        data.extend_from_slice(format!("{i},{},{}\n", i * 2, i * 3).as_bytes());
    }

    let metadata = Sniffer::new()
        .with_sample_size(SampleSize::Records(20))
        .sniff_reader(Cursor::new(data))
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.num_fields, 3);
}

#[test]
fn many_columns() {
    let header: Vec<String> = (0..50).map(|i| format!("col{i}")).collect();
    let row: Vec<String> = (0..50).map(|i| i.to_string()).collect();
    let data = format!("{}\n{}\n{}\n", header.join(","), row.join(","), row.join(","));

    let metadata = Sniffer::new().sniff_bytes(data.as_bytes()).unwrap();

    assert_eq!(metadata.num_fields, 50);
    assert_eq!(metadata.dialect.delimiter, b',');
    assert!(metadata.dialect.header.has_header_row);
}

#[test]
fn single_column_file() {
    let metadata = Sniffer::new().sniff_bytes(b"value\n100\n200\n300\n").unwrap();

    assert_eq!(metadata.num_fields, 1);
}

#[test]
fn embedded_newline_in_quoted_field() {
    let metadata = Sniffer::new()
        .sniff_bytes(b"id,note\n1,\"first line\nsecond line\"\n2,\"plain\"\n")
        .unwrap();

    assert_eq!(metadata.dialect.delimiter, b',');
    assert_eq!(metadata.dialect.quote, Quote::Some(b'"'));
    assert_eq!(metadata.num_fields, 2);
}

//! Trace Reader Tests.
//!
//! Token parsing, whitespace handling, fail-stop on malformed input, and
//! I/O error reporting.

use std::io::{BufReader, Cursor, Write};

use cachesim_core::common::TraceError;
use cachesim_core::sim::trace::{TraceReader, parse_address};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::hex_trace;
use crate::common::mocks::reader::FailingReader;

fn read_all(text: &str) -> Vec<u32> {
    TraceReader::new(Cursor::new(text))
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[rstest]
#[case("0", Some(0))]
#[case("1f", Some(0x1F))]
#[case("DEADBEEF", Some(0xDEAD_BEEF))]
#[case("0x10", Some(0x10))]
#[case("0X10", Some(0x10))]
#[case("ffffffff", Some(u32::MAX))]
#[case("100000000", None)]
#[case("0x", None)]
#[case("", None)]
#[case("zz", None)]
#[case("+10", None)]
#[case("12g", None)]
fn parses_tokens(#[case] token: &str, #[case] expected: Option<u32>) {
    assert_eq!(parse_address(token), expected);
}

#[test]
fn reads_across_lines_and_mixed_whitespace() {
    assert_eq!(
        read_all("0 10\n20\t 0x30\n\n   40\r\n"),
        vec![0x0, 0x10, 0x20, 0x30, 0x40]
    );
}

#[test]
fn last_token_without_newline_is_read() {
    assert_eq!(read_all("4 8"), vec![4, 8]);
}

#[test]
fn empty_input_is_an_empty_trace() {
    assert_eq!(read_all(""), Vec::<u32>::new());
    assert_eq!(read_all(" \n\n\t"), Vec::<u32>::new());
}

#[test]
fn malformed_token_ends_the_trace() {
    let mut reader = TraceReader::new(Cursor::new("10 20 xyz 30\n40\n"));
    let addresses: Vec<u32> = reader.by_ref().map(Result::unwrap).collect();
    assert_eq!(addresses, vec![0x10, 0x20]);
    assert_eq!(reader.addresses_read(), 2);
    assert!(reader.next().is_none());
}

#[test]
fn non_utf8_byte_ends_the_trace_after_earlier_tokens() {
    let mut reader = TraceReader::new(Cursor::new(&b"10 20 \xff 30\n40\n"[..]));
    assert_eq!(reader.next().unwrap().unwrap(), 0x10);
    assert_eq!(reader.next().unwrap().unwrap(), 0x20);
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
    assert_eq!(reader.addresses_read(), 2);
}

#[test]
fn non_utf8_suffix_makes_token_malformed() {
    let reader = TraceReader::new(Cursor::new(&b"8 c\xc3\n"[..]));
    let addresses: Vec<u32> = reader.map(Result::unwrap).collect();
    assert_eq!(addresses, vec![0x8]);
}

#[test]
fn read_error_is_reported_once() {
    let mut reader = TraceReader::new(BufReader::new(FailingReader::new("a b\n")));
    assert_eq!(reader.next().unwrap().unwrap(), 0xA);
    assert_eq!(reader.next().unwrap().unwrap(), 0xB);
    assert!(matches!(reader.next(), Some(Err(TraceError::Read(_)))));
    assert!(reader.next().is_none());
}

#[test]
fn open_reads_file() {
    let addresses = [0x0, 0x4, 0x8, 0xDEAD_BEEF, 0x4];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(hex_trace(&addresses).as_bytes()).unwrap();

    let read: Vec<u32> = TraceReader::open(file.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(read, addresses.to_vec());
}

#[test]
fn open_missing_file_fails() {
    let err = TraceReader::open("/nonexistent/traces.txt").unwrap_err();
    assert!(matches!(err, TraceError::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/traces.txt"));
}

use std::io::{Cursor, Write};
use std::path::Path;

use base::prelude::Symbol;
use test_strategy::proptest;

use super::super::output::write_binary;
use super::super::reader::ByteReader;
use super::super::types::ExtractionFailure;
use super::{bsym, decode_file, listing, psyq, vlink, vobj, Decoded, InputFormat};

fn path() -> &'static Path {
    Path::new("input.sym")
}

fn accepted(decoded: Decoded) -> Vec<Symbol> {
    match decoded {
        Decoded::Accepted(symbols) => symbols,
        Decoded::Rejected => panic!("decoder should have accepted the input"),
    }
}

fn sym(name: &str, value: i64) -> Symbol {
    Symbol::new(name, value)
}

fn assert_malformed(result: Result<Decoded, ExtractionFailure>, expected_line: Option<usize>) {
    match result {
        Err(ExtractionFailure::MalformedRecord { line, .. }) => {
            assert_eq!(line, expected_line);
        }
        other => panic!("expected a malformed record, got {other:?}"),
    }
}

fn psyq_record(value: i32, tag: u8, name: &str) -> Vec<u8> {
    let mut record = value.to_le_bytes().to_vec();
    record.push(tag);
    record.push(name.len() as u8);
    record.extend_from_slice(name.as_bytes());
    record
}

fn psyq_file(records: &[Vec<u8>]) -> Vec<u8> {
    let mut data = b"MND\x01\x00\x00\x00\x00".to_vec();
    for r in records {
        data.extend_from_slice(r);
    }
    data
}

#[test]
fn test_bsym() {
    let mut data = b"BSYM".to_vec();
    data.extend_from_slice(&2_u32.to_le_bytes());
    data.push(3);
    data.extend_from_slice(b"foo");
    data.extend_from_slice(&16_i64.to_le_bytes());
    data.push(3);
    data.extend_from_slice(b"bar");
    data.extend_from_slice(&(-2_i64).to_le_bytes());
    let symbols = accepted(bsym::decode_from(Cursor::new(data), path()).unwrap());
    assert_eq!(symbols, vec![sym("foo", 16), sym("bar", -2)]);
}

#[test]
fn test_bsym_rejects_other_signatures() {
    assert_eq!(
        bsym::decode_from(Cursor::new(b"BSYX\x00\x00\x00\x00".to_vec()), path()).unwrap(),
        Decoded::Rejected
    );
    assert_eq!(
        bsym::decode_from(Cursor::new(b"BS".to_vec()), path()).unwrap(),
        Decoded::Rejected
    );
}

#[test]
fn test_bsym_truncated_after_signature() {
    let mut data = b"BSYM".to_vec();
    data.extend_from_slice(&1_u32.to_le_bytes());
    data.push(3);
    data.extend_from_slice(b"fo");
    assert!(matches!(
        bsym::decode_from(Cursor::new(data), path()),
        Err(ExtractionFailure::TruncatedInput { .. })
    ));
}

#[test]
fn test_bsym_rejects_empty_names() {
    let mut data = b"BSYM".to_vec();
    data.extend_from_slice(&1_u32.to_le_bytes());
    data.push(0);
    data.extend_from_slice(&0_i64.to_le_bytes());
    assert_malformed(bsym::decode_from(Cursor::new(data), path()), None);
}

#[proptest]
fn bsym_round_trip(
    #[strategy(proptest::collection::vec(("[A-Za-z_][A-Za-z0-9_]{0,40}", proptest::num::i64::ANY), 0..20))]
    pairs: Vec<(String, i64)>,
) {
    let symbols: Vec<Symbol> = pairs.into_iter().map(|(n, v)| Symbol::new(n, v)).collect();
    let mut encoded: Vec<u8> = Vec::new();
    write_binary(&symbols, &mut encoded, path()).expect("writing to memory should succeed");
    let decoded = accepted(
        bsym::decode_from(Cursor::new(encoded), path()).expect("decoding should succeed"),
    );
    assert_eq!(decoded, symbols);
}

#[test]
fn test_psyq() {
    let data = psyq_file(&[
        psyq_record(0x10, 1, "foo"),
        psyq_record(0x20, 5, "ignored"),
        psyq_record(-8, 2, "bar"),
    ]);
    let symbols = accepted(psyq::decode_from(Cursor::new(data), path()).unwrap());
    assert_eq!(symbols, vec![sym("foo", 16), sym("bar", -8)]);
}

#[test]
fn test_psyq_header_only() {
    let symbols = accepted(psyq::decode_from(Cursor::new(psyq_file(&[])), path()).unwrap());
    assert!(symbols.is_empty());
}

#[test]
fn test_psyq_rejections() {
    for data in [
        Vec::new(),
        b"MND\x02\x00\x00\x00\x00".to_vec(),
        b"MNX\x01\x00\x00\x00\x00".to_vec(),
        b"MN".to_vec(),
    ] {
        assert_eq!(
            psyq::decode_from(Cursor::new(data.clone()), path()).unwrap(),
            Decoded::Rejected,
            "input {data:?} should be rejected"
        );
    }
}

#[test]
fn test_psyq_truncated_record() {
    let mut data = psyq_file(&[psyq_record(1, 1, "abc")]);
    data.truncate(data.len() - 1);
    assert!(matches!(
        psyq::decode_from(Cursor::new(data), path()),
        Err(ExtractionFailure::TruncatedInput {
            wanted: 3,
            got: 2,
            ..
        })
    ));
}

fn vobj_reader(data: &[u8]) -> ByteReader<Cursor<Vec<u8>>> {
    ByteReader::new(Cursor::new(data.to_vec()), path())
}

#[test]
fn test_vobj_numbers() {
    assert_eq!(vobj::read_number(&mut vobj_reader(&[0x05]), false).unwrap(), 5);
    assert_eq!(vobj::read_number(&mut vobj_reader(&[0x7F]), true).unwrap(), 0x7F);
    assert_eq!(vobj::read_number(&mut vobj_reader(&[0x80]), true).unwrap(), 0);
    assert_eq!(vobj::read_number(&mut vobj_reader(&[0x81, 0xFF]), true).unwrap(), -1);
    assert_eq!(
        vobj::read_number(&mut vobj_reader(&[0x81, 0xFF]), false).unwrap(),
        0xFF
    );
    assert_eq!(
        vobj::read_number(&mut vobj_reader(&[0x82, 0x34, 0x12]), false).unwrap(),
        0x1234
    );
    assert_eq!(
        vobj::read_number(
            &mut vobj_reader(&[0x88, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
            true
        )
        .unwrap(),
        -2
    );
}

#[test]
fn test_vobj_number_too_long() {
    assert!(matches!(
        vobj::read_number(&mut vobj_reader(&[0x89]), false),
        Err(ExtractionFailure::MalformedRecord {
            format: InputFormat::Vobj,
            ..
        })
    ));
}

#[test]
fn test_vobj_string() {
    let mut reader = vobj_reader(b"m68k\0rest");
    assert_eq!(vobj::read_string(&mut reader).unwrap(), b"m68k".to_vec());
    assert!(matches!(
        vobj::read_string(&mut reader),
        Err(ExtractionFailure::TruncatedInput { .. })
    ));
}

fn vobj_symbol(name: &str, symbol_type: u8, value: &[u8]) -> Vec<u8> {
    let mut out = name.as_bytes().to_vec();
    out.push(0);
    out.push(symbol_type);
    out.push(0); // flags
    out.push(1); // section
    out.extend_from_slice(value);
    out.push(0); // size
    out
}

#[test]
fn test_vobj() {
    let mut data = b"VOBJ".to_vec();
    data.push(0x01); // flags
    data.push(8); // bits per byte
    data.push(4); // bytes per address
    data.extend_from_slice(b"68000\0");
    data.push(1); // sections
    data.push(3); // symbols
    data.extend(vobj_symbol("start", 3, &[0x82, 0x00, 0x02]));
    data.extend(vobj_symbol("label", 1, &[0x10]));
    data.extend(vobj_symbol("minus", 3, &[0x81, 0xF0]));
    let symbols = accepted(vobj::decode_from(Cursor::new(data), path()).unwrap());
    assert_eq!(symbols, vec![sym("start", 0x200), sym("minus", -16)]);
}

#[test]
fn test_vobj_rejects_other_signatures() {
    assert_eq!(
        vobj::decode_from(Cursor::new(b"VOBX\x01".to_vec()), path()).unwrap(),
        Decoded::Rejected
    );
}

const LISTING: &str = "Sections:\n\
                       00: \"CODE\" (0-20)\n\
                       \n\
                       Symbols by value:\n\
                       00000000 start\n\
                       \n\
                       00000010 main loop\n\
                       FFFFFFFFFFFFFFFF minus_one\n";

#[test]
fn test_listing() {
    let symbols =
        accepted(listing::decode_from(Cursor::new(LISTING.as_bytes().to_vec()), path()).unwrap());
    assert_eq!(
        symbols,
        vec![sym("start", 0), sym("main loop", 16), sym("minus_one", -1)]
    );
}

#[test]
fn test_listing_rejections() {
    for text in [
        "Symbols by value:\n00000000 start\n",
        "Sections:\n00: \"CODE\" (0-20)\n",
        "",
    ] {
        assert_eq!(
            listing::decode_from(Cursor::new(text.as_bytes().to_vec()), path()).unwrap(),
            Decoded::Rejected,
            "input {text:?} should be rejected"
        );
    }
}

#[test]
fn test_listing_malformed_lines() {
    for (body, line) in [
        ("00000010\n", 3),
        (" start\n", 3),
        ("00000010 \n", 3),
        ("00000000 ok\nXYZ start\n", 4),
        ("11112222333344445 toolong\n", 3),
    ] {
        let text = format!("Sections:\nSymbols by value:\n{body}");
        assert_malformed(
            listing::decode_from(Cursor::new(text.into_bytes()), path()),
            Some(line),
        );
    }
}

#[test]
fn test_vlink() {
    let text = "0x1000:_start\n\n0b101:five\n42:answer\n-3:minus\n";
    let symbols = accepted(vlink::decode_from(Cursor::new(text.as_bytes().to_vec()), path()).unwrap());
    assert_eq!(
        symbols,
        vec![
            sym("_start", 0x1000),
            sym("five", 5),
            sym("answer", 42),
            sym("minus", -3)
        ]
    );
}

#[test]
fn test_vlink_first_line_is_the_signature() {
    for text in ["just some text\n", "", "\n\n", ":name\n"] {
        assert_eq!(
            vlink::decode_from(Cursor::new(text.as_bytes().to_vec()), path()).unwrap(),
            Decoded::Rejected,
            "input {text:?} should be rejected"
        );
    }
    assert_eq!(
        vlink::decode_from(Cursor::new(vec![0xFF, 0xFE, b':', b'x']), path()).unwrap(),
        Decoded::Rejected
    );
}

#[test]
fn test_vlink_malformed_after_first_symbol() {
    for (text, line) in [
        ("1:a\nno separator\n", 2),
        ("1:a\n2:\n", 2),
        ("1:a\n\n:b\n", 3),
        ("1:a\n0xZZ:b\n", 2),
        ("1:a\n12q:b\n", 2),
    ] {
        assert_malformed(
            vlink::decode_from(Cursor::new(text.as_bytes().to_vec()), path()),
            Some(line),
        );
    }
}

#[test]
fn test_vlink_sign_applies_to_every_base() {
    let text = "1:a\n-0x10:neg_hex\n-0b11:neg_bin\n-16:neg_dec\n";
    let symbols = accepted(vlink::decode_from(Cursor::new(text.as_bytes().to_vec()), path()).unwrap());
    assert_eq!(
        symbols,
        vec![
            sym("a", 1),
            sym("neg_hex", -16),
            sym("neg_bin", -3),
            sym("neg_dec", -16)
        ]
    );
}

#[test]
fn test_vlink_value_must_start_with_number() {
    assert_eq!(
        vlink::decode_from(Cursor::new(b"abc0x10:x\n".to_vec()), path()).unwrap(),
        Decoded::Rejected
    );
    for (text, line) in [
        ("1:a\nabc0x10:x\n", 2),
        ("1:a\n1x0x10:x\n", 2),
        ("1:a\n-:x\n", 2),
        ("1:a\n0x+5:x\n", 2),
    ] {
        assert_malformed(
            vlink::decode_from(Cursor::new(text.as_bytes().to_vec()), path()),
            Some(line),
        );
    }
}

#[test]
fn test_decode_file_uses_priority_order() {
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");

    let psyq_path = dir.path().join("game.sym");
    std::fs::write(&psyq_path, psyq_file(&[psyq_record(0x10, 1, "foo")])).unwrap();
    let (format, symbols) = decode_file(&psyq_path).expect("Psy-Q file should decode");
    assert_eq!(format, InputFormat::PsyQ);
    assert_eq!(symbols, vec![sym("foo", 16)]);

    let listing_path = dir.path().join("game.lst");
    std::fs::write(&listing_path, LISTING).unwrap();
    let (format, _) = decode_file(&listing_path).expect("listing should decode");
    assert_eq!(format, InputFormat::VasmListing);

    let vlink_path = dir.path().join("game.vsym");
    let mut f = std::fs::File::create(&vlink_path).unwrap();
    writeln!(f, "0x10:foo").unwrap();
    drop(f);
    let (format, _) = decode_file(&vlink_path).expect("vlink file should decode");
    assert_eq!(format, InputFormat::VlinkSymbols);
}

#[test]
fn test_decode_file_unrecognized() {
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    let junk = dir.path().join("junk.bin");
    std::fs::write(&junk, b"\x7fELF\x02\x01\x01").unwrap();
    assert!(matches!(
        decode_file(&junk),
        Err(ExtractionFailure::UnrecognizedFormat(p)) if p == junk
    ));

    let empty = dir.path().join("empty");
    std::fs::write(&empty, b"").unwrap();
    assert!(matches!(
        decode_file(&empty),
        Err(ExtractionFailure::UnrecognizedFormat(_))
    ));
}

#[test]
fn test_decode_file_missing() {
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    assert!(matches!(
        decode_file(&dir.path().join("absent")),
        Err(ExtractionFailure::Io(_))
    ));
}

//! End-to-end extraction tests over synthetic archives.

use std::fs;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use gdpck::prelude::*;
use gdpck::Error;

/// One directory record of a synthetic archive.
struct Record<'a> {
    path: &'a str,
    payload: &'a [u8],
    md5: [u8; 16],
    flags: u32,
}

impl<'a> Record<'a> {
    fn new(path: &'a str, payload: &'a [u8]) -> Self {
        Self {
            path,
            payload,
            md5: digest::md5(payload),
            flags: 0,
        }
    }
}

/// Build an archive with payloads laid out back to back from `files_base`.
fn build_archive(archive_flags: u32, files_base: u64, records: &[Record<'_>]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"GDPC");
    buf.write_u32::<LittleEndian>(2).unwrap();
    buf.write_u32::<LittleEndian>(4).unwrap();
    buf.write_u32::<LittleEndian>(2).unwrap();
    buf.write_u32::<LittleEndian>(0).unwrap();
    buf.write_u32::<LittleEndian>(archive_flags).unwrap();
    buf.write_u64::<LittleEndian>(files_base).unwrap();
    for _ in 0..16 {
        buf.write_u32::<LittleEndian>(0).unwrap();
    }
    buf.write_u32::<LittleEndian>(records.len() as u32).unwrap();

    let mut offset = 0u64;
    for record in records {
        buf.write_u32::<LittleEndian>(record.path.len() as u32).unwrap();
        buf.extend_from_slice(record.path.as_bytes());
        buf.resize(buf.len() + padding(4, record.path.len()), 0);
        buf.write_u64::<LittleEndian>(offset).unwrap();
        buf.write_u64::<LittleEndian>(record.payload.len() as u64).unwrap();
        buf.extend_from_slice(&record.md5);
        buf.write_u32::<LittleEndian>(record.flags).unwrap();
        offset += record.payload.len() as u64;
    }

    assert!(buf.len() as u64 <= files_base, "directory overlaps payloads");
    buf.resize(files_base as usize, 0);
    for record in records {
        buf.extend_from_slice(record.payload);
    }
    buf
}

/// Build a compiled texture container holding `mips`.
fn build_ctex(format_and_count: u32, mips: &[&[u8]]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"GST2");
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(16).unwrap();
    buf.write_u32::<LittleEndian>(16).unwrap();
    buf.resize(36, 0);
    buf.write_u32::<LittleEndian>(format_and_count).unwrap();
    buf.resize(0x34, 0);
    for mip in mips {
        buf.write_u32::<LittleEndian>(mip.len() as u32).unwrap();
        buf.extend_from_slice(mip);
    }
    buf
}

fn open(data: Vec<u8>) -> PckArchive {
    PckArchive::from_vec(data, "test.pck").unwrap()
}

fn dir_is_empty(path: &Path) -> bool {
    !path.exists() || fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn test_single_text_entry() {
    let out = tempfile::tempdir().unwrap();
    let root = out.path().join("export");
    // The header (100 bytes) and this record (52 bytes) end at 152.
    let data = build_archive(0, 160, &[Record::new("res://a.txt", b"hello")]);

    let archive = open(data);
    assert_eq!(archive.header().engine_version.to_string(), "4.2.0");
    let summary = unpack_archive(&archive, &root, |_| {}).unwrap();

    assert_eq!(fs::read(root.join("a.txt")).unwrap(), b"hello");
    assert_eq!(summary.entries, 1);
    assert_eq!(summary.bytes_written, 5);
    assert!(summary.integrity_warnings.is_empty());
    assert_eq!(summary.textures, 0);
}

#[test]
fn test_parsed_entries_match_fixture() {
    let records = [
        Record::new("res://z/last.bin", &[9; 7]),
        Record::new("res://a.txt", b"alpha"),
        Record::new("res://m/mid.dat", &[]),
    ];
    let archive = open(build_archive(0, 512, &records));

    assert_eq!(archive.header().files_base, 512);
    assert_eq!(archive.entry_count(), records.len());
    let mut offset = 0;
    for (entry, record) in archive.iter().zip(&records) {
        assert_eq!(entry.path(), record.path);
        assert_eq!(entry.offset(), offset);
        assert_eq!(entry.size(), record.payload.len() as u64);
        assert_eq!(entry.md5(), &record.md5);
        assert_eq!(archive.read(entry).unwrap(), record.payload);
        offset += record.payload.len() as u64;
    }
}

#[test]
fn test_nested_directories_and_progress_order() {
    let out = tempfile::tempdir().unwrap();
    let records = [
        Record::new("res://scenes/main.tscn", b"[gd_scene]"),
        Record::new("res://scenes/sub/level.tscn", b"[gd_scene level]"),
        Record::new("res://project.binary", &[0, 1, 2, 3]),
    ];
    let archive = open(build_archive(0, 512, &records));

    let mut seen = Vec::new();
    let summary = unpack_archive(&archive, out.path(), |progress| {
        seen.push((progress.index, progress.total, progress.entry.path().to_string()));
    })
    .unwrap();

    assert_eq!(summary.entries, 3);
    assert_eq!(
        seen,
        vec![
            (1, 3, "res://scenes/main.tscn".to_string()),
            (2, 3, "res://scenes/sub/level.tscn".to_string()),
            (3, 3, "res://project.binary".to_string()),
        ]
    );
    assert_eq!(
        fs::read(out.path().join("scenes/sub/level.tscn")).unwrap(),
        b"[gd_scene level]"
    );
    assert_eq!(
        fs::read(out.path().join("project.binary")).unwrap(),
        [0, 1, 2, 3]
    );
}

#[test]
fn test_parent_segments_stay_under_root() {
    let out = tempfile::tempdir().unwrap();
    let root = out.path().join("export");
    let records = [
        Record::new("res://../escaped.txt", b"outside"),
        Record::new("res://../../deeper/escaped.txt", b"further"),
    ];
    let archive = open(build_archive(0, 256, &records));

    let mut destinations = Vec::new();
    unpack_archive(&archive, &root, |p| {
        destinations.push(p.extracted.destination.clone())
    })
    .unwrap();

    assert!(!out.path().join("escaped.txt").exists());
    assert!(destinations.iter().all(|d| d.starts_with(&root)));
    assert_eq!(fs::read(root.join("escaped.txt")).unwrap(), b"outside");
    assert_eq!(
        fs::read(root.join("deeper/escaped.txt")).unwrap(),
        b"further"
    );
}

#[test]
fn test_digest_mismatch_is_only_a_warning() {
    let out = tempfile::tempdir().unwrap();
    let mut corrupt = Record::new("res://b.txt", b"bravo");
    corrupt.md5 = digest::md5(b"brava");
    let records = [corrupt, Record::new("res://c.txt", b"charlie")];
    let archive = open(build_archive(0, 256, &records));

    let summary = unpack_archive(&archive, out.path(), |_| {}).unwrap();

    assert_eq!(summary.entries, 2);
    assert_eq!(summary.integrity_warnings, vec![out.path().join("b.txt")]);
    assert_eq!(fs::read(out.path().join("b.txt")).unwrap(), b"bravo");
    assert_eq!(fs::read(out.path().join("c.txt")).unwrap(), b"charlie");
}

#[test]
fn test_archive_flags_abort_before_writing() {
    for flags in [1, 2, 3, 0x100] {
        let out = tempfile::tempdir().unwrap();
        let root = out.path().join("export");
        let data = build_archive(flags, 160, &[Record::new("res://a.txt", b"hello")]);

        let err = PckArchive::from_vec(data, "flags.pck").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnsupportedFlags);
        assert!(dir_is_empty(&root));
    }
}

#[test]
fn test_entry_flags_abort_before_writing() {
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("flags.pck");
    let mut encrypted = Record::new("res://secret.txt", b"secret");
    encrypted.flags = 1;
    let records = [Record::new("res://a.txt", b"hello"), encrypted];
    fs::write(&path, build_archive(0, 256, &records)).unwrap();

    let root = out.path().join("export");
    let err = unpack(&path, &root).unwrap_err();

    assert!(matches!(err, Error::Pck(_)));
    assert_eq!(err.kind(), ErrorKind::UnsupportedFlags);
    assert!(dir_is_empty(&root));
}

#[test]
fn test_payload_past_end_aborts() {
    let out = tempfile::tempdir().unwrap();
    let mut data = build_archive(0, 160, &[Record::new("res://a.txt", b"hello")]);
    data.truncate(data.len() - 2);
    let archive = open(data);

    let err = unpack_archive(&archive, out.path(), |_| {}).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!out.path().join("a.txt").exists());
}

#[test]
fn test_compiled_texture_split() {
    let out = tempfile::tempdir().unwrap();
    let mips: [&[u8]; 3] = [&[0xAA; 64], &[0xBB; 16], &[0xCC; 4]];
    let ctex = build_ctex(3, &mips);
    let archive = open(build_archive(
        0,
        256,
        &[Record::new("res://icons/icon.ctex", &ctex)],
    ));

    let mut reported = 0;
    let summary = unpack_archive(&archive, out.path(), |p| reported = p.mipmaps).unwrap();

    assert_eq!(summary.textures, 1);
    assert_eq!(summary.mipmaps, 3);
    assert_eq!(reported, 3);
    let base = out.path().join("icons/icon.ctex");
    assert_eq!(fs::read(&base).unwrap(), ctex);
    for (i, mip) in mips.iter().enumerate() {
        let sibling = out.path().join(format!("icons/icon.ctex_{i}"));
        assert_eq!(fs::read(sibling).unwrap(), *mip);
    }
    assert!(!out.path().join("icons/icon.ctex_3").exists());
}

#[test]
fn test_truncated_texture_keeps_readable_mipmaps() {
    let out = tempfile::tempdir().unwrap();
    let mut ctex = build_ctex(3, &[&[1; 8], &[2; 8], &[3; 8]]);
    // Drop the last mipmap and half of its size field.
    ctex.truncate(0x34 + 2 * (4 + 8) + 2);
    let archive = open(build_archive(0, 256, &[Record::new("res://t.ctex", &ctex)]));

    let summary = unpack_archive(&archive, out.path(), |_| {}).unwrap();

    assert_eq!(summary.mipmaps, 2);
    assert_eq!(fs::read(out.path().join("t.ctex_0")).unwrap(), [1; 8]);
    assert_eq!(fs::read(out.path().join("t.ctex_1")).unwrap(), [2; 8]);
    assert!(!out.path().join("t.ctex_2").exists());
}

#[test]
fn test_ctex_with_other_signature_is_skipped() {
    let out = tempfile::tempdir().unwrap();
    let archive = open(build_archive(
        0,
        256,
        &[Record::new("res://legacy.ctex", b"GST1 older container")],
    ));

    let summary = unpack_archive(&archive, out.path(), |_| {}).unwrap();

    assert_eq!(summary.entries, 1);
    assert_eq!(summary.textures, 0);
    assert!(out.path().join("legacy.ctex").exists());
    assert!(!out.path().join("legacy.ctex_0").exists());
}

#[test]
fn test_gst2_outside_ctex_is_not_decoded() {
    let out = tempfile::tempdir().unwrap();
    let ctex = build_ctex(1, &[&[5; 4]]);
    let archive = open(build_archive(0, 256, &[Record::new("res://raw.bin", &ctex)]));

    let summary = unpack_archive(&archive, out.path(), |_| {}).unwrap();

    assert_eq!(summary.textures, 0);
    assert!(!out.path().join("raw.bin_0").exists());
}

#[test]
fn test_unsupported_texture_version_aborts() {
    let out = tempfile::tempdir().unwrap();
    let mut ctex = build_ctex(1, &[&[5; 4]]);
    ctex[4] = 2;
    let records = [
        Record::new("res://bad.ctex", &ctex),
        Record::new("res://after.txt", b"never"),
    ];
    let archive = open(build_archive(0, 256, &records));

    let err = unpack_archive(&archive, out.path(), |_| {}).unwrap_err();

    assert!(matches!(err, Error::Texture { .. }));
    assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
    assert!(!out.path().join("after.txt").exists());
}

#[test]
fn test_bad_magic_is_format_error() {
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("bad.pck");
    let mut data = build_archive(0, 160, &[Record::new("res://a.txt", b"hello")]);
    data[..4].copy_from_slice(b"PK\x03\x04");
    fs::write(&path, data).unwrap();

    let err = unpack(&path, &out.path().join("export")).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
}

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use colossus_resources::error::Result;
use colossus_resources::extract::{
    display_name, is_garbage, resolve_output_path, COMPRESSED_SUFFIX,
};
use colossus_resources::read::ResourcesArchive;
use tracing::info;
use tracing_test::traced_test;

/// A record to lay out in the synthetic archive.
struct Entry {
    string_id: u64,
    payload: &'static [u8],
    uncompressed_size: u64,
}

/// Hand-rolls an archive byte for byte: header, name table, string-id table
/// with a leading skip region, record table, payload region.
fn build_archive(raw_names: &[&str], id_skip: u32, entries: &[Entry]) -> Vec<u8> {
    const HEADER_LEN: u64 = 120;
    const RECORD_LEN: u64 = 144;

    let names_len: u64 =
        8 + 8 * raw_names.len() as u64 + raw_names.iter().map(|n| n.len() as u64 + 1).sum::<u64>();
    let names_offset = HEADER_LEN;
    let ids_offset = names_offset + names_len;
    // One leading pair for type lookups plus one per entry for name lookups.
    let ids_len = 4 * id_skip as u64 + 8 * (entries.len() as u64 + 1);
    let info_offset = ids_offset + ids_len;
    let data_offset = info_offset + RECORD_LEN * entries.len() as u64;

    let mut out = Vec::new();

    // Header
    out.extend_from_slice(b"IDCL");
    out.extend_from_slice(&12u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 32]);
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&id_skip.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 16]);
    for offset in [names_offset, 0, info_offset, 0, ids_offset, data_offset] {
        out.extend_from_slice(&offset.to_le_bytes());
    }
    assert_eq!(out.len() as u64, HEADER_LEN);

    // Name table
    out.extend_from_slice(&(raw_names.len() as u64).to_le_bytes());
    let mut relative = 0u64;
    for name in raw_names {
        out.extend_from_slice(&relative.to_le_bytes());
        relative += name.len() as u64 + 1;
    }
    for name in raw_names {
        out.extend_from_slice(name.as_bytes());
        out.push(0);
    }

    // String-id table: skip region, then the type entry, then one name entry
    // per record (the name lookup reads pair `name_id + 1`).
    out.extend_from_slice(&vec![0xEE; 4 * id_skip as usize]);
    out.extend_from_slice(&0u64.to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.string_id.to_le_bytes());
    }

    // Record table
    let mut payload_offset = data_offset;
    for (index, entry) in entries.iter().enumerate() {
        out.extend_from_slice(&[0u8; 24]);
        out.extend_from_slice(&0u64.to_le_bytes());
        out.extend_from_slice(&(index as u64).to_le_bytes());
        out.extend_from_slice(&[0u8; 16]);
        out.extend_from_slice(&payload_offset.to_le_bytes());
        out.extend_from_slice(&(entry.payload.len() as u64).to_le_bytes());
        out.extend_from_slice(&entry.uncompressed_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 32]);
        out.extend_from_slice(&0u64.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        payload_offset += entry.payload.len() as u64;
    }

    // Payload region
    for entry in entries {
        out.extend_from_slice(entry.payload);
    }

    out
}

fn sample_archive() -> Vec<u8> {
    build_archive(
        &[
            "filetype",
            "textures/wall#01.tga_mip",
            "video/intro.bik",
            "leftover",
            "docs/readme",
        ],
        2,
        &[
            Entry {
                string_id: 1,
                payload: b"wall pixels",
                uncompressed_size: 11,
            },
            Entry {
                string_id: 2,
                payload: b"squeezed",
                uncompressed_size: 64,
            },
            Entry {
                string_id: 3,
                payload: b"junk",
                uncompressed_size: 4,
            },
            Entry {
                string_id: 4,
                payload: b"plain text",
                uncompressed_size: 10,
            },
        ],
    )
}

/// Drives the same loop the extract command runs, against a file on disk.
fn extract_all(
    archive_path: &std::path::Path,
    output_dir: &std::path::Path,
    extract_garbage: bool,
) -> Result<(usize, usize)> {
    let data = std::fs::read(archive_path)?;
    let mut archive = ResourcesArchive::new(std::io::Cursor::new(data))?;

    let mut extracted = 0;
    let mut skipped = 0;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?.clone();
        let name = display_name(index, &entry);

        if !extract_garbage && is_garbage(&name, entry.uncompressed_size) {
            skipped += 1;
            continue;
        }

        let path = resolve_output_path(output_dir, &name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let payload = archive.read_payload(index, None)?;
        let path = if payload.is_fallback() {
            let mut with_suffix = path.into_os_string();
            with_suffix.push(COMPRESSED_SUFFIX);
            PathBuf::from(with_suffix)
        } else {
            path
        };

        info!("writing {}", path.display());
        std::fs::write(&path, payload.bytes())?;
        extracted += 1;
    }

    Ok((extracted, skipped))
}

#[traced_test]
#[test]
fn extracts_a_synthetic_archive_to_disk() -> Result<()> {
    let workspace = tempfile::tempdir()?;
    let archive_path = workspace.path().join("game.resources");
    File::create(&archive_path)?.write_all(&sample_archive())?;

    let output_dir = workspace.path().join("game");
    let (extracted, skipped) = extract_all(&archive_path, &output_dir, false)?;

    assert_eq!(extracted, 3);
    assert_eq!(skipped, 1);

    // Stored record, sanitized name.
    assert_eq!(
        std::fs::read(output_dir.join("textures/wall_01.tga"))?,
        b"wall pixels"
    );

    // Compressed record without a capability keeps its compressed form.
    assert_eq!(
        std::fs::read(output_dir.join("video/intro.bik.compressed"))?,
        b"squeezed"
    );

    // Garbage record is skipped entirely.
    assert!(!output_dir.join("leftover").exists());
    assert!(!output_dir.join("leftover.file").exists());

    // Extensionless leaf gets the fallback suffix.
    assert_eq!(
        std::fs::read(output_dir.join("docs/readme.file"))?,
        b"plain text"
    );

    Ok(())
}

#[traced_test]
#[test]
fn garbage_filter_can_be_disabled() -> Result<()> {
    let workspace = tempfile::tempdir()?;
    let archive_path = workspace.path().join("game.resources");
    File::create(&archive_path)?.write_all(&sample_archive())?;

    let output_dir = workspace.path().join("game");
    let (extracted, skipped) = extract_all(&archive_path, &output_dir, true)?;

    assert_eq!(extracted, 4);
    assert_eq!(skipped, 0);
    assert_eq!(std::fs::read(output_dir.join("leftover.file"))?, b"junk");

    Ok(())
}

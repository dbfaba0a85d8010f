//! Helpers for placing extracted records in a directory tree.

use std::path::{Path, PathBuf};

use crate::read::ResourceFileData;

/// Records smaller than this with no path and no extension are assumed to be
/// build leftovers.
pub const GARBAGE_SIZE_THRESHOLD: u64 = 100;

/// Suffix appended when a record's path collides with a directory or its leaf
/// has no extension.
pub const FALLBACK_SUFFIX: &str = ".file";

/// Suffix appended to payloads persisted in their compressed form.
pub const COMPRESSED_SUFFIX: &str = ".compressed";

/// The display name for a record, with path separators normalized to forward
/// slashes.
///
/// Falls back to a name synthesized from the record's index when the archive
/// has no usable entry for it.
pub fn display_name(index: usize, file: &ResourceFileData) -> String {
    match file.name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => name.replace('\\', "/"),
        None => format!("file_{index:08}.dat"),
    }
}

/// Whether a record looks like a build leftover not worth extracting: a root
/// level name with no extension and a tiny declared size.
pub fn is_garbage(name: &str, uncompressed_size: u64) -> bool {
    !name.contains('/')
        && !name.contains('\\')
        && !name.contains('.')
        && uncompressed_size < GARBAGE_SIZE_THRESHOLD
}

/// Resolve the output path for a record under `root`.
///
/// A record whose path is already taken by a directory, or whose leaf name
/// carries no extension, gets [`FALLBACK_SUFFIX`] appended so it cannot
/// collide with the directories other records extract into.
pub fn resolve_output_path(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);

    let leaf_has_extension = name
        .rsplit('/')
        .next()
        .map_or(false, |leaf| leaf.contains('.'));

    if path.is_dir() || !leaf_has_extension {
        let mut with_suffix = path.into_os_string();
        with_suffix.push(FALLBACK_SUFFIX);
        return PathBuf::from(with_suffix);
    }

    path
}

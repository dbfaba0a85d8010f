//! Payload decompression handling.
//!
//! The LZ decompressor itself ships with the game as a native library; this
//! module only locates that library and calls through it. Decompression is
//! always an explicit capability object handed to payload reads, so callers
//! and tests can exercise both the degraded and the full path without any
//! process level state.

use libloading::{Library, Symbol};
use miette::Diagnostic;
use std::{
    ffi::c_void,
    path::{Path, PathBuf},
    ptr,
};
use thiserror::Error;
use tracing::{debug, info};

/// Candidate library names, probed newest first.
pub const OODLE_LIBRARY_NAMES: [&str; 5] = [
    "oo2core_9_win64.dll",
    "oo2core_8_win64.dll",
    "oo2core_7_win64.dll",
    "oo2core_6_win64.dll",
    "oo2core_5_win64.dll",
];

/// Error type for decompression failures
#[derive(Error, Diagnostic, Debug)]
pub enum DecompressionError {
    /// Transparent wrapper for [`libloading::Error`]
    #[error(transparent)]
    Load(#[from] libloading::Error),

    /// the decompressor reported failure
    #[error("decompressor returned {0}")]
    Failed(i32),
}

/// A synchronous decompression capability.
pub trait Decompress {
    /// Decompress `data` into a buffer of `uncompressed_size` bytes.
    fn decompress(
        &self,
        data: &[u8],
        uncompressed_size: usize,
    ) -> Result<Vec<u8>, DecompressionError>;
}

type OodleDecompressFn = unsafe extern "C" fn(
    compressed: *const u8,
    compressed_size: usize,
    raw: *mut u8,
    raw_size: usize,
    fuzz_safe: i32,
    check_crc: i32,
    verbosity: i32,
    decode_buffer_base: *mut u8,
    decode_buffer_size: usize,
    callback: *const c_void,
    callback_data: *const c_void,
    scratch: *mut u8,
    scratch_size: usize,
    thread_phase: i32,
) -> i32;

/// The Oodle decompressor loaded from the game's own native library.
pub struct OodleLibrary {
    library: Library,
}

impl OodleLibrary {
    /// Load a specific library and verify it exports the decompressor.
    pub fn open(path: &Path) -> Result<OodleLibrary, DecompressionError> {
        let library = unsafe { Library::new(path)? };
        unsafe {
            library.get::<OodleDecompressFn>(b"OodleLZ_Decompress\0")?;
        }
        Ok(OodleLibrary { library })
    }

    /// Probe `directories` for any of the known library names, in order.
    ///
    /// Absence is not an error; the archive reader degrades to persisting raw
    /// compressed payloads instead of failing the run.
    pub fn locate<P: AsRef<Path>>(directories: &[P]) -> Option<OodleLibrary> {
        for directory in directories {
            for name in OODLE_LIBRARY_NAMES {
                let candidate = directory.as_ref().join(name);
                if !candidate.is_file() {
                    continue;
                }
                match Self::open(&candidate) {
                    Ok(library) => {
                        info!("loaded decompression library {}", candidate.display());
                        return Some(library);
                    }
                    Err(e) => debug!("skipping {}: {e}", candidate.display()),
                }
            }
        }
        None
    }

    /// The directories probed for an archive at `archive_path`: the working
    /// directory, the archive's directory, and up to three of its ancestors.
    ///
    /// `archive_path` should be absolute so the ancestor walk has somewhere
    /// to go.
    pub fn search_directories(archive_path: &Path) -> Vec<PathBuf> {
        let mut directories = vec![PathBuf::from(".")];

        if let Some(archive_dir) = archive_path.parent() {
            directories.push(archive_dir.to_path_buf());

            let mut current = archive_dir;
            for _ in 0..3 {
                match current.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => {
                        directories.push(parent.to_path_buf());
                        current = parent;
                    }
                    _ => break,
                }
            }
        }

        directories
    }
}

impl Decompress for OodleLibrary {
    fn decompress(
        &self,
        data: &[u8],
        uncompressed_size: usize,
    ) -> Result<Vec<u8>, DecompressionError> {
        let mut output = vec![0u8; uncompressed_size];

        let status = unsafe {
            let decompress: Symbol<OodleDecompressFn> =
                self.library.get(b"OodleLZ_Decompress\0")?;
            decompress(
                data.as_ptr(),
                data.len(),
                output.as_mut_ptr(),
                output.len(),
                0,
                0,
                0,
                ptr::null_mut(),
                0,
                ptr::null(),
                ptr::null(),
                ptr::null_mut(),
                0,
                3,
            )
        };

        if status <= 0 {
            return Err(DecompressionError::Failed(status));
        }

        Ok(output)
    }
}

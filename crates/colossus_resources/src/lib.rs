//! This library handles reading from and extracting the **resources** archives used by
//! *Wolfenstein II: The New Colossus*.
//!
//! # Resources Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the **resources** container
//! used by id Tech titles. The format is a custom binary format that stores various game
//! assets within a single file. Archives are typically identified with the `.resources`
//! or `.pack` extension.
//!
//! ## File Structure
//!
//! A resources file consists of a header, a name table, a string-id table, a file record
//! table, and the payload data region. The header carries absolute offsets to each region,
//! so the regions may appear in any order on disk.
//!
//! ### Header
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "IDCL"                                            |
//! | 0x0004         | Version                | 4 bytes: Container format revision                         |
//! | 0x0008         | Reserved               | 32 bytes: Skipped, must be consumed to stay aligned        |
//! | 0x0028         | File Count             | 4 bytes: Number of file records in the archive             |
//! | 0x002C         | Aux Count              | 4 bytes: Entry count of the first auxiliary table          |
//! | 0x0030         | Id Skip Count          | 4 bytes: Leading 32-bit entries of the string-id table     |
//! | 0x0034         | File Count 2           | 4 bytes: Mirrors the file count in observed archives       |
//! | 0x0038         | Reserved               | 16 bytes                                                   |
//! | 0x0048         | Names Offset           | 8 bytes: Absolute offset of the name table                 |
//! | 0x0050         | Aux Offset             | 8 bytes: Absolute offset of the first auxiliary table      |
//! | 0x0058         | Info Offset            | 8 bytes: Absolute offset of the file record table          |
//! | 0x0060         | Aux 2 Offset           | 8 bytes: Absolute offset of the second auxiliary table     |
//! | 0x0068         | Ids Offset             | 8 bytes: Absolute offset of the string-id table            |
//! | 0x0070         | Data Offset            | 8 bytes: Absolute offset of the payload data region        |
//!
//! ### Name Table
//!
//! The name table starts with a 64-bit entry count followed by that many 64-bit offsets.
//! Each offset is relative to the byte immediately *after* the offset list, not to the
//! table's own start offset. Every entry is a null terminated string. Names carry
//! build-pipeline tags (`_lodgroup=`, `_streamdb=`, `_group=`) and compound extensions
//! (`.tex_medium`) that are stripped during resolution, see [`names::sanitize_name`].
//!
//! ### String-Id Table
//!
//! The string-id table opens with a skip region of `id_skip_count` 32-bit entries; the
//! id pairs referenced by file records begin at the position immediately after that
//! region. A record's `type_id` and `name_id` select 64-bit entries there — they are
//! *never* direct name-table indices. The name lookup is additionally offset by one
//! entry: the string-table index for a record's name lives at `base + (name_id + 1) * 8`.
//!
//! ### File Record Table
//!
//! Each record is 144 bytes. Reserved regions must be consumed to keep every subsequent
//! field aligned.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Reserved               | 24 bytes                                                |
//! | 0x0018         | Type Id                | 8 bytes: String-id table index of the type name         |
//! | 0x0020         | Name Id                | 8 bytes: String-id table index of the file name         |
//! | 0x0028         | Reserved               | 16 bytes                                                |
//! | 0x0038         | Data Offset            | 8 bytes: Absolute offset of the payload                 |
//! | 0x0040         | Compressed Size        | 8 bytes: Payload size as stored                         |
//! | 0x0048         | Uncompressed Size      | 8 bytes: Payload size once decompressed                 |
//! | 0x0050         | Reserved               | 32 bytes                                                |
//! | 0x0070         | Flags                  | 8 bytes: Compression flag bits                          |
//! | 0x0078         | Reserved               | 24 bytes                                                |
//!
//! A record whose compressed and uncompressed sizes are equal is stored verbatim. All
//! other payloads are Oodle compressed; when bit 2 of the flags is set and bit 0 is
//! clear, the compressed span starts with a 12 byte embedded header that is skipped
//! before decompression.
//!
//! ## Additional Information
//!
//! - **File Extensions**: `.resources`, `.pack`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression**: Oodle, via the game's own `oo2core_*_win64.dll`
//!

pub mod compression;
pub mod error;
pub mod extract;
pub mod names;
pub mod read;
pub mod types;

pub use compression::{Decompress, OodleLibrary};
pub use read::ResourcesArchive;

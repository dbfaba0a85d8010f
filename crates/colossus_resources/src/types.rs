//! Base types for the structure of a resources archive.

use binrw::{BinRead, BinWrite};

/// Resources archive header
///
/// Defines the header of the archive which always starts with "IDCL". All data is
/// stored in little endian format. The reserved regions are skipped on read and
/// written back as zeroes; consuming them is what keeps every later field aligned.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"IDCL", little)]
pub struct ResourcesHeader {
    /// Container format revision
    pub version: u32,

    /// The number of file records stored in the archive
    #[brw(pad_before = 32)]
    pub file_count: u32,

    /// Entry count of the first auxiliary table
    pub aux_count: u32,

    /// Number of leading 32-bit entries in the string-id table
    pub id_skip_count: u32,

    /// Secondary file count, mirrors `file_count` in observed archives
    pub file_count2: u32,

    /// Absolute offset of the name table
    #[brw(pad_before = 16)]
    pub names_offset: u64,

    /// Absolute offset of the first auxiliary table
    pub aux_offset: u64,

    /// Absolute offset of the file record table
    pub info_offset: u64,

    /// Absolute offset of the second auxiliary table
    pub aux2_offset: u64,

    /// Absolute offset of the string-id table
    pub ids_offset: u64,

    /// Absolute offset of the payload data region
    pub data_offset: u64,
}

/// Resources file record
///
/// Defines one file entry in the archive. `type_id` and `name_id` index the
/// string-id table, not the name table; see [`crate::read::ResourcesArchive`]
/// for the resolution chain.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct ResourceRecord {
    /// String-id table index of this record's type name
    #[brw(pad_before = 24)]
    pub type_id: u64,

    /// String-id table index of this record's file name
    pub name_id: u64,

    /// Absolute offset of this record's payload
    #[brw(pad_before = 16)]
    pub data_offset: u64,

    /// The size of this record's payload as stored in the archive
    pub size_compressed: u64,

    /// The size of this record's payload once decompressed
    pub size_uncompressed: u64,

    /// Compression flag bits
    #[brw(pad_before = 32, pad_after = 24)]
    pub flags: u64,
}

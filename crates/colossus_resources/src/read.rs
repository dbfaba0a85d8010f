//! Types for reading resources archives
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::{
    io::{Read, Seek, SeekFrom},
    sync::Arc,
};
use tracing::{debug, warn};

use crate::{
    compression::Decompress,
    error::{Error, FileNotFoundError, Result},
    names::NameTable,
    types::{ResourceRecord, ResourcesHeader},
};

/// Size of the header embedded at the start of some compressed payloads.
pub const EMBEDDED_HEADER_SIZE: u64 = 12;

/// Structure representing one archive entry with its name fully resolved.
#[derive(Debug, Clone, Default)]
pub struct ResourceFileData {
    /// Display name resolved through the string-id table, if the record's
    /// name id led to a valid name-table entry
    pub name: Option<String>,
    /// Type name resolved through the string-id table
    pub type_name: Option<String>,
    /// Absolute offset of the payload
    pub data_offset: u64,
    /// Size of the payload as stored in the archive
    pub compressed_size: u64,
    /// Size of the payload once decompressed
    pub uncompressed_size: u64,
    /// Compression flag bits
    pub flags: u64,
}

impl ResourceFileData {
    /// Whether the payload is stored without compression
    pub fn is_stored(&self) -> bool {
        self.compressed_size == self.uncompressed_size
    }

    /// Whether the compressed payload starts with an embedded header that is
    /// skipped before decompression
    pub fn skips_embedded_header(&self) -> bool {
        self.flags & 0x4 != 0 && self.flags & 0x1 == 0
    }
}

/// The result of reading one record's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The record was stored uncompressed and copied verbatim
    Stored(Vec<u8>),
    /// The record was decompressed to its declared uncompressed size
    Decompressed(Vec<u8>),
    /// The record is compressed but could not be decompressed; the bytes are
    /// the record's raw compressed span, embedded header included
    RawCompressed(Vec<u8>),
}

impl Payload {
    /// The bytes to persist for this payload
    pub fn bytes(&self) -> &[u8] {
        match self {
            Payload::Stored(data) | Payload::Decompressed(data) | Payload::RawCompressed(data) => {
                data
            }
        }
    }

    /// Whether extraction fell back to the raw compressed bytes
    pub fn is_fallback(&self) -> bool {
        matches!(self, Payload::RawCompressed(_))
    }
}

#[derive(Debug)]
pub(crate) struct Shared {
    header: ResourcesHeader,
    files: Vec<ResourceFileData>,
    stream_len: u64,
}

/// Resources archive reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_archive_contents(reader: impl Read + Seek) -> colossus_resources::error::Result<()> {
///     let archive = colossus_resources::ResourcesArchive::new(reader)?;
///
///     for i in 0..archive.len() {
///         let file = archive.by_index(i)?;
///         println!("{:?}: {} bytes", file.name, file.uncompressed_size);
///     }
///
///     Ok(())
/// }
/// ```
pub struct ResourcesArchive<R> {
    reader: R,
    shared: Arc<Shared>,
}

impl<R> ResourcesArchive<R> {
    /// Total size of the files in the archive once decompressed, if it can be
    /// known. Doesn't include metadata.
    pub fn decompressed_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in &self.shared.files {
            total = total.checked_add(file.uncompressed_size as u128)?;
        }
        Some(total)
    }

    /// Container format revision declared by the header.
    pub fn version(&self) -> u32 {
        self.shared.header.version
    }

    /// Number of entries contained in this archive.
    pub fn len(&self) -> usize {
        self.shared.files.len()
    }

    /// Whether this archive contains no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the resolved names in this archive.
    pub fn file_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.shared.files.iter().map(|f| f.name.as_deref())
    }

    /// Get a contained file's metadata by index
    pub fn by_index(&self, file_number: usize) -> Result<&ResourceFileData> {
        self.shared
            .files
            .get(file_number)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> ResourcesArchive<R> {
    /// Read a resources archive, resolving every record's display name.
    ///
    /// A magic mismatch fails with [`Error::InvalidArchive`]; this is fatal
    /// for the whole run, unlike the per-record conditions surfaced later by
    /// [`ResourcesArchive::read_payload`].
    pub fn new(mut reader: R) -> Result<ResourcesArchive<R>> {
        let shared = Self::get_metadata(&mut reader)?;
        Ok(ResourcesArchive {
            reader,
            shared: shared.into(),
        })
    }

    /// Read one record's payload, decompressing when possible.
    ///
    /// A stored record is copied verbatim, with no decompression attempted.
    /// For a compressed record the embedded header is skipped when the flags
    /// call for it, and the span is handed to `decompressor`. Decompression
    /// failure is not fatal: the record degrades to
    /// [`Payload::RawCompressed`] carrying the span at its original,
    /// unadjusted offset, and later records are unaffected. With no
    /// decompressor available every compressed record takes that path without
    /// an attempt being made.
    pub fn read_payload(
        &mut self,
        file_number: usize,
        decompressor: Option<&dyn Decompress>,
    ) -> Result<Payload> {
        let file = self.by_index(file_number)?.clone();

        if file.is_stored() {
            let data = self.read_span(file.data_offset, file.compressed_size)?;
            return Ok(Payload::Stored(data));
        }

        let (offset, size) = if file.skips_embedded_header() {
            let Some(size) = file.compressed_size.checked_sub(EMBEDDED_HEADER_SIZE) else {
                return Err(Error::OutOfBounds {
                    offset: file.data_offset,
                    len: file.compressed_size,
                });
            };
            (file.data_offset + EMBEDDED_HEADER_SIZE, size)
        } else {
            (file.data_offset, file.compressed_size)
        };

        if let Some(decompressor) = decompressor {
            let compressed = self.read_span(offset, size)?;
            match decompressor.decompress(&compressed, file.uncompressed_size as usize) {
                Ok(data) => return Ok(Payload::Decompressed(data)),
                Err(e) => warn!("failed to decompress record {file_number}: {e}"),
            }
        }

        // The fallback keeps the unadjusted span so the embedded header
        // survives for an offline decompression attempt.
        let raw = self.read_span(file.data_offset, file.compressed_size)?;
        Ok(Payload::RawCompressed(raw))
    }

    fn read_span(&mut self, offset: u64, len: u64) -> Result<Vec<u8>> {
        let end = offset.checked_add(len);
        if end.map_or(true, |end| end > self.shared.stream_len) {
            return Err(Error::OutOfBounds { offset, len });
        }

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; len as usize];
        self.reader.read_exact(&mut data)?;
        Ok(data)
    }

    fn get_metadata(reader: &mut R) -> Result<Shared> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let header = ResourcesHeader::read(reader).map_err(|e| match e {
            binrw::Error::BadMagic { .. } => Error::InvalidArchive,
            e => Error::BinRWError(e),
        })?;
        debug!("version {}, {} records", header.version, header.file_count);

        let names = NameTable::read(reader, header.names_offset)?;
        let ids_base = Self::skip_id_preamble(reader, &header)?;
        let files = Self::get_records(reader, &header, &names, ids_base)?;

        Ok(Shared {
            header,
            files,
            stream_len,
        })
    }

    /// Walk past the leading skip region of the string-id table.
    ///
    /// The header's declared offset is not where lookups start: the table
    /// opens with `id_skip_count` 32-bit entries, and the id pairs used by
    /// the records begin at the position immediately after them. Every later
    /// indirection uses this recomputed base, never the declared offset.
    fn skip_id_preamble(reader: &mut R, header: &ResourcesHeader) -> Result<u64> {
        reader.seek(SeekFrom::Start(header.ids_offset))?;
        for _ in 0..header.id_skip_count {
            reader.read_u32::<LittleEndian>()?;
        }
        Ok(reader.stream_position()?)
    }

    fn get_records(
        reader: &mut R,
        header: &ResourcesHeader,
        names: &NameTable,
        ids_base: u64,
    ) -> Result<Vec<ResourceFileData>> {
        reader.seek(SeekFrom::Start(header.info_offset))?;

        let mut files = Vec::with_capacity(header.file_count as usize);
        for _ in 0..header.file_count {
            let record = ResourceRecord::read(reader)?;
            let restore = reader.stream_position()?;

            // A record's ids select entries past the skip region, and the
            // name lookup is offset by one entry. Saturating arithmetic turns
            // a hostile id into a read past the end instead of an overflow.
            let type_entry = ids_base.saturating_add(record.type_id.saturating_mul(8));
            reader.seek(SeekFrom::Start(type_entry))?;
            let type_str_id = reader.read_u64::<LittleEndian>()?;

            let name_entry =
                ids_base.saturating_add(record.name_id.saturating_add(1).saturating_mul(8));
            reader.seek(SeekFrom::Start(name_entry))?;
            let name_str_id = reader.read_u64::<LittleEndian>()?;

            reader.seek(SeekFrom::Start(restore))?;

            files.push(ResourceFileData {
                name: names.get(name_str_id).map(str::to_owned),
                type_name: names.get(type_str_id).map(str::to_owned),
                data_offset: record.data_offset,
                compressed_size: record.size_compressed,
                uncompressed_size: record.size_uncompressed,
                flags: record.flags,
            });
        }

        Ok(files)
    }
}

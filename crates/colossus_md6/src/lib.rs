//! This library handles decoding the **MD6** binary model containers used by
//! *Wolfenstein II: The New Colossus* and converting them to Wavefront OBJ.
//!
//! # MD6 Model Container Documentation
//!
//! A `.bmd6model` file carries a 64 byte file header followed by zero or more mesh
//! parts. Parts are not indexed anywhere; they are discovered by scanning for one of
//! two equivalent 8 byte marker patterns:
//!
//! ```text
//! 01 01 00 00 00 00 00 00
//! 01 01 00 00 00 10 00 00
//! ```
//!
//! ## Part Structure
//!
//! All offsets are relative to the end of the marker; all integers are little endian.
//!
//! | Offset (bytes) | Field                  | Description                                         |
//! |----------------|------------------------|-----------------------------------------------------|
//! | 0x0000         | Reserved               | 13 bytes: Skipped                                   |
//! | 0x000D         | Vertex Count           | 2 bytes: Number of vertex records                   |
//! | 0x000F         | Reserved               | 2 bytes: Skipped                                    |
//! | 0x0011         | Face Count             | 2 bytes: Number of face records                     |
//! | 0x0013         | Reserved               | 26 bytes: Skipped                                   |
//! | 0x002D         | Vertex Records         | 48 bytes each                                       |
//! | —              | Face Records           | 6 bytes each, immediately after the vertex records  |
//!
//! ### Vertex Record
//!
//! | Offset (bytes) | Field                  | Description                                         |
//! |----------------|------------------------|-----------------------------------------------------|
//! | 0x0000         | Position               | 3 x f32: x, y, z in model space                     |
//! | 0x000C         | Texture Coordinate     | 2 x f32: u, v                                       |
//! | 0x0014         | Reserved               | 28 bytes: Skipped, never interpreted                |
//!
//! ### Face Record
//!
//! Three consecutive 16 bit vertex indices, no padding. Indices are 0-based in the
//! container and 1-based in the OBJ output.
//!
//! The search for a part begins strictly after the previous part's face records, so
//! consumed bytes are never re-scanned. "No marker found" is how the discovery loop
//! terminates; it is not an error.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.bmd6model`
//! - **Endianness**: Little-endian for all multi-byte values
//!

pub mod cursor;
pub mod error;
pub mod read;
pub mod transform;
pub mod types;
pub mod write;

pub use read::{next_part, parts};
pub use types::ModelPart;

//! ICC Profile Parsing
//!
//! Binary decoding according to ICC.1:2022.
//!
//! # Structure
//!
//! An ICC profile consists of:
//! 1. A 128-byte header ([`Header`])
//! 2. A tag table listing all tags ([`TagTable`])
//! 3. Tag data (may overlap)
//!
//! Header and tag table are decoded eagerly. Tag payloads are decoded on
//! demand by the [`tags`] parsers.

pub mod header;
pub mod tag_table;
pub mod tags;
pub mod types;

mod error;

pub use error::DecodeError;
pub use header::{ColorSpace, Header, ProfileClass, ProfileVersion};
pub use tag_table::{TagEntry, TagTable};
pub use tags::{LutTag, TextData, XyzTagData};
pub use types::{DateTimeNumber, S15Fixed16, TagSignature, TypeSignature, XyzNumber};

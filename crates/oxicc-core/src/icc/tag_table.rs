//! ICC Tag Table
//!
//! The tag table follows the header: a u32 tag count at offset 128, then
//! `count` entries of (signature, offset, size), 12 bytes each.
//! See ICC.1:2022 Section 7.3.

use std::collections::HashMap;

use super::header::HEADER_SIZE;
use super::types::{TagSignature, TypeSignature, read_signature, read_u32};
use crate::error::{IccError, Result};

/// Offset of the first tag table entry
pub const TAG_TABLE_START: usize = HEADER_SIZE + 4;

/// Size of one tag table entry
pub const TAG_ENTRY_SIZE: usize = 12;

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagEntry {
    /// Tag signature
    pub signature: TagSignature,
    /// Offset from start of profile
    pub offset: u32,
    /// Size of tag data
    pub size: u32,
}

impl TagEntry {
    /// Byte range of this tag within the profile buffer
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.size as usize
    }
}

/// Ordered tag directory with signature lookup
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    entries: Vec<TagEntry>,
    index: HashMap<TagSignature, usize>,
}

impl TagTable {
    /// Parse the tag table from the full profile buffer
    ///
    /// Every entry is bounds-checked against `data`. When a signature
    /// appears more than once the first entry is used for lookups.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < TAG_TABLE_START {
            return Err(IccError::NotEnoughBytes {
                expected: TAG_TABLE_START,
                actual: data.len(),
            });
        }

        let count = read_u32(data, HEADER_SIZE).map_err(|e| e.into_not_enough_bytes())? as usize;
        let required = count
            .checked_mul(TAG_ENTRY_SIZE)
            .and_then(|n| n.checked_add(TAG_TABLE_START));
        match required {
            Some(required) if required <= data.len() => {}
            _ => {
                return Err(IccError::not_parseable(format!(
                    "tag count {} does not fit in {} bytes",
                    count,
                    data.len()
                )));
            }
        }

        let mut entries = Vec::with_capacity(count);
        let mut index = HashMap::with_capacity(count);

        for i in 0..count {
            let at = TAG_TABLE_START + i * TAG_ENTRY_SIZE;
            let entry = TagEntry {
                signature: TagSignature(
                    read_signature(data, at).map_err(|e| e.into_not_enough_bytes())?,
                ),
                offset: read_u32(data, at + 4).map_err(|e| e.into_not_enough_bytes())?,
                size: read_u32(data, at + 8).map_err(|e| e.into_not_enough_bytes())?,
            };

            let end = (entry.offset as u64) + (entry.size as u64);
            if end > data.len() as u64 {
                return Err(IccError::not_parseable(format!(
                    "tag '{}' at offset {} with size {} exceeds profile length {}",
                    entry.signature,
                    entry.offset,
                    entry.size,
                    data.len()
                )));
            }

            index.entry(entry.signature).or_insert(i);
            entries.push(entry);
        }

        let table = Self { entries, index };
        table.check_tag_types(data)?;
        Ok(table)
    }

    /// Shallow type checks done at construction
    ///
    /// LUT slots must carry a LUT container type and `wtpt` must be XYZ.
    fn check_tag_types(&self, data: &[u8]) -> Result<()> {
        for sig in TagSignature::LUT_SLOTS {
            if let Some(type_sig) = self.type_signature(data, sig)? {
                if !type_sig.is_lut_container() {
                    return Err(IccError::not_parseable(format!(
                        "tag '{sig}' has non-LUT type '{type_sig}'"
                    )));
                }
            }
        }

        if let Some(type_sig) = self.type_signature(data, TagSignature::MEDIA_WHITE)? {
            if type_sig != TypeSignature::XYZ {
                return Err(IccError::not_parseable(format!(
                    "media white point has type '{type_sig}'"
                )));
            }
        }
        Ok(())
    }

    /// Type signature at the start of a tag, if the tag is present
    pub fn type_signature(&self, data: &[u8], sig: TagSignature) -> Result<Option<TypeSignature>> {
        match self.bytes(data, sig) {
            None => Ok(None),
            Some(bytes) => read_signature(bytes, 0)
                .map(|t| Some(TypeSignature(t)))
                .map_err(|e| e.into_not_parseable(&format!("tag '{sig}'"))),
        }
    }

    /// Look up a tag entry by signature
    pub fn get(&self, sig: TagSignature) -> Option<&TagEntry> {
        self.index.get(&sig).map(|&i| &self.entries[i])
    }

    /// Whether a tag is present
    pub fn contains(&self, sig: TagSignature) -> bool {
        self.index.contains_key(&sig)
    }

    /// Slice of `data` covered by a tag
    pub fn bytes<'a>(&self, data: &'a [u8], sig: TagSignature) -> Option<&'a [u8]> {
        self.get(sig).and_then(|entry| data.get(entry.range()))
    }

    /// Entries in file order, duplicates included
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    /// Number of entries in file order
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tag signatures in file order
    pub fn signatures(&self) -> impl Iterator<Item = TagSignature> + '_ {
        self.entries.iter().map(|e| e.signature)
    }
}

//! Text Tag Types
//!
//! - text: ASCII text
//! - desc: v2 profile description
//! - mluc: v4 multi-localized Unicode
//!
//! See ICC.1:2022 Sections 10.24 (text), 10.15 (mluc); ICC.1:2001-04 6.5.17 (desc)

use super::element_err;
use crate::error::{IccError, Result};
use crate::icc::types::{TypeSignature, read_signature, read_u16, read_u32};

/// Decoded text tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextData {
    /// Primary text (first mluc record, or the ASCII text)
    pub text: String,
    /// Localized versions as ("ll-CC", text)
    pub localized: Vec<(String, String)>,
}

impl TextData {
    pub fn new(text: String) -> Self {
        Self {
            text,
            localized: Vec::new(),
        }
    }

    /// Parse a full text-like tag, dispatching on its type signature
    pub fn parse(tag: &[u8]) -> Result<Self> {
        let type_sig = TypeSignature(read_signature(tag, 0).map_err(element_err("text type"))?);
        let body = tag.get(8..).unwrap_or_default();
        match type_sig {
            TypeSignature::TEXT => Ok(Self::new(ascii_until_nul(body))),
            TypeSignature::DESC => Self::parse_desc(tag),
            TypeSignature::MLUC => Self::parse_mluc(tag),
            other => Err(IccError::not_parseable(format!(
                "'{other}' is not a text type"
            ))),
        }
    }

    fn parse_desc(tag: &[u8]) -> Result<Self> {
        let count = read_u32(tag, 8).map_err(element_err("desc length"))? as usize;
        let ascii = 12usize
            .checked_add(count)
            .and_then(|end| tag.get(12..end))
            .ok_or_else(|| IccError::not_parseable("desc ASCII data truncated"))?;
        Ok(Self::new(ascii_until_nul(ascii)))
    }

    fn parse_mluc(tag: &[u8]) -> Result<Self> {
        let record_count = read_u32(tag, 8).map_err(element_err("mluc count"))? as usize;
        let record_size = read_u32(tag, 12).map_err(element_err("mluc record size"))? as usize;
        if record_size < 12 {
            return Err(IccError::not_parseable("mluc record size too small"));
        }

        let mut localized = Vec::new();
        for i in 0..record_count {
            let Some(at) = i.checked_mul(record_size).and_then(|n| n.checked_add(16)) else {
                break;
            };
            let (Ok(lang), Ok(country)) = (read_u16(tag, at), read_u16(tag, at + 2)) else {
                break;
            };
            let len = read_u32(tag, at + 4).map_err(element_err("mluc record"))? as usize;
            let offset = read_u32(tag, at + 8).map_err(element_err("mluc record"))? as usize;

            // String offsets are relative to the start of the tag
            let Some(bytes) = offset.checked_add(len).and_then(|end| tag.get(offset..end)) else {
                continue;
            };
            if let Some(text) = decode_utf16be(bytes) {
                let [l0, l1] = lang.to_be_bytes();
                let [c0, c1] = country.to_be_bytes();
                let locale = format!(
                    "{}{}-{}{}",
                    l0 as char, l1 as char, c0 as char, c1 as char
                );
                localized.push((locale, text));
            }
        }

        Ok(Self {
            text: localized
                .first()
                .map(|(_, t)| t.clone())
                .unwrap_or_default(),
            localized,
        })
    }

    /// Text for a language prefix such as "en" or "de-DE"
    pub fn get_locale(&self, lang: &str) -> Option<&str> {
        self.localized
            .iter()
            .find(|(locale, _)| locale.starts_with(lang))
            .map(|(_, text)| text.as_str())
    }
}

fn ascii_until_nul(data: &[u8]) -> String {
    data.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }
    let utf16: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();
    String::from_utf16(&utf16).ok()
}

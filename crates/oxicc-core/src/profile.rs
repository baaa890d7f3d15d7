//! ICC Profile
//!
//! [`Profile`] owns the raw profile bytes together with the eagerly parsed
//! header and tag table. LUT pipelines are assembled on first use, one per
//! (direction, intent slot), and memoized for the lifetime of the profile.
//! A failed build is memoized as well, so a broken tag is decoded once.
//!
//! After construction a profile is immutable and can be shared across
//! threads; concurrent first requests for a slot all observe the same
//! pipeline.
//!
//! # Example
//!
//! ```no_run
//! use oxicc_core::{Intent, Profile};
//!
//! let profile = Profile::from_path("press.icc")?;
//! let xyz = profile.to_xyz_d50(&[0.2, 0.4, 0.1, 0.0], Intent::Perceptual)?;
//! let cmyk = profile.from_xyz_d50(xyz, Intent::Perceptual)?;
//! # Ok::<(), oxicc_core::IccError>(())
//! ```

use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::channels::DeviceSpace;
use crate::color::{D50, Xyz};
use crate::error::{IccError, Result};
use crate::icc::tags::parse_s15_matrix;
use crate::icc::{ColorSpace, Header, LutTag, TagSignature, TagTable, TextData, XyzTagData};
use crate::math::Matrix3x3;
use crate::pipeline::{Direction, Intent, MAX_CHANNELS, Pcs, Pipeline, assemble};

/// A parsed ICC profile
#[derive(Debug)]
pub struct Profile {
    header: Header,
    tags: TagTable,
    data: Vec<u8>,
    media_white: Option<Xyz>,
    pipelines: [[OnceCell<Result<Pipeline>>; 3]; 2],
}

impl Profile {
    /// Read and parse a profile file
    ///
    /// Any failure to read the file is reported as
    /// [`IccError::FileNotFound`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|_| IccError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_vec(data)
    }

    /// Parse a profile from a byte slice
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Parse a profile, taking ownership of the buffer
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        let header = Header::parse(&data)?;
        let tags = TagTable::parse(&data)?;

        let media_white = tags
            .bytes(&data, TagSignature::MEDIA_WHITE)
            .map(XyzTagData::parse)
            .transpose()?
            .and_then(|t| t.to_xyz());

        debug!(
            class = ?header.device_class,
            color_space = ?header.color_space,
            pcs = ?header.pcs,
            version = ?header.version_tuple(),
            tags = tags.len(),
            "parsed ICC profile"
        );

        Ok(Self {
            header,
            tags,
            data,
            media_white,
            pipelines: Default::default(),
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn tag_table(&self) -> &TagTable {
        &self.tags
    }

    /// The raw profile bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes of one tag, type signature included
    pub fn tag_bytes(&self, sig: TagSignature) -> Option<&[u8]> {
        self.tags.bytes(&self.data, sig)
    }

    /// Media white point (`wtpt`), if the profile has one
    pub fn media_white_point(&self) -> Option<Xyz> {
        self.media_white
    }

    /// Media black point (`bkpt`); informational, unreadable tags are ignored
    pub fn media_black_point(&self) -> Option<Xyz> {
        self.tag_bytes(TagSignature::MEDIA_BLACK)
            .and_then(|b| XyzTagData::parse(b).ok())
            .and_then(|t| t.to_xyz())
    }

    /// Profile description (`desc`)
    pub fn description(&self) -> Option<String> {
        self.text_tag(TagSignature::DESC)
    }

    /// Copyright notice (`cprt`)
    pub fn copyright(&self) -> Option<String> {
        self.text_tag(TagSignature::COPYRIGHT)
    }

    fn text_tag(&self, sig: TagSignature) -> Option<String> {
        self.tag_bytes(sig)
            .and_then(|b| TextData::parse(b).ok())
            .map(|t| t.text)
    }

    /// Chromatic adaptation matrix (`chad`) used when the profile was built
    pub fn chromatic_adaptation(&self) -> Option<Matrix3x3> {
        self.tag_bytes(TagSignature::CHROMATIC_ADAPTATION)
            .and_then(|b| parse_s15_matrix(b).ok())
            .map(|m| m.matrix)
    }

    /// Data colour space from the header
    pub fn color_space(&self) -> ColorSpace {
        self.header.color_space
    }

    /// Connection space from the header
    pub fn pcs(&self) -> ColorSpace {
        self.header.pcs
    }

    /// Number of device channels, 0 if the colour space is unknown
    pub fn device_channels(&self) -> usize {
        self.header.color_space.channels()
    }

    pub fn device_space(&self) -> Option<DeviceSpace> {
        DeviceSpace::from_color_space(self.header.color_space)
    }

    /// Replace `Intent::Unspecified` with the header's default intent
    pub fn resolve_intent(&self, intent: Intent) -> Intent {
        intent.resolve(self.header.rendering_intent)
    }

    /// The memoized pipeline serving `intent` in `direction`
    ///
    /// Absolute colorimetric shares the relative colorimetric pipeline and
    /// additionally requires a media white point.
    pub fn pipeline(&self, direction: Direction, intent: Intent) -> Result<&Pipeline> {
        let intent = self.resolve_intent(intent);
        let slot = intent.slot();
        let tag = direction.tag(slot);

        if !self.tags.contains(tag) {
            return Err(IccError::UnsupportedIntent {
                intent,
                reason: format!("profile has no {tag} tag"),
            });
        }
        if intent.is_absolute() && self.media_white.is_none() {
            return Err(IccError::UnsupportedIntent {
                intent,
                reason: "profile has no media white point".to_string(),
            });
        }

        self.pipelines[direction.index()][slot]
            .get_or_init(|| self.build_pipeline(direction, tag))
            .as_ref()
            .map_err(Clone::clone)
    }

    fn build_pipeline(&self, direction: Direction, tag: TagSignature) -> Result<Pipeline> {
        let bytes = self
            .tag_bytes(tag)
            .ok_or_else(|| IccError::not_parseable(format!("missing {tag} tag")))?;
        let lut = LutTag::parse(bytes)?;
        let pipeline = assemble(&lut, tag, direction, self.header.pcs)?;

        let device = self.device_channels();
        let (side, found) = match direction {
            Direction::DeviceToPcs => ("input", pipeline.input_channels()),
            Direction::PcsToDevice => ("output", pipeline.output_channels()),
        };
        if found != device {
            return Err(IccError::unsupported_lut(format!(
                "{tag} has {found} {side} channels, header colour space has {device}"
            )));
        }
        Ok(pipeline)
    }

    /// Device values → raw PCS value, before any white point scaling
    ///
    /// `device` is zero-padded or truncated to the pipeline's input width.
    pub fn to_pcs(&self, device: &[f64], intent: Intent) -> Result<Pcs> {
        let pipeline = self.pipeline(Direction::DeviceToPcs, intent)?;
        let mut input = [0.0; MAX_CHANNELS];
        let n = pipeline.input_channels();
        for (dst, src) in input[..n].iter_mut().zip(device) {
            *dst = *src;
        }

        let pcs = pipeline.eval_triplet(&input[..n])?;
        Ok(pipeline.pcs_encoding().decode(pcs))
    }

    /// Device values → XYZ relative to D50
    ///
    /// For absolute colorimetric the relative result is scaled by
    /// `media white / D50`.
    pub fn to_xyz_d50(&self, device: &[f64], intent: Intent) -> Result<Xyz> {
        let xyz = self.to_pcs(device, intent)?.to_xyz();
        match self.absolute_white(intent) {
            Some(white) => Ok(xyz.mul_components(&white.div_components(&D50.xyz))),
            None => Ok(xyz),
        }
    }

    /// XYZ relative to D50 → device values, clamped to [0, 1]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_xyz_d50(&self, xyz: Xyz, intent: Intent) -> Result<Vec<f64>> {
        let pipeline = self.pipeline(Direction::PcsToDevice, intent)?;
        let xyz = match self.absolute_white(intent) {
            Some(white) => xyz.mul_components(&D50.xyz.div_components(&white)),
            None => xyz,
        };

        let encoded = pipeline.pcs_encoding().encode(xyz);
        let mut out = [0.0; MAX_CHANNELS];
        let n = pipeline.eval_into(&encoded, &mut out)?;
        Ok(out[..n].iter().map(|v| v.clamp(0.0, 1.0)).collect())
    }

    /// Media white point when `intent` resolves to absolute colorimetric
    fn absolute_white(&self, intent: Intent) -> Option<Xyz> {
        if self.resolve_intent(intent).is_absolute() {
            self.media_white
        } else {
            None
        }
    }
}

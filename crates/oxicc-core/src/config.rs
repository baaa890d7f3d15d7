//! Tolerant profile configuration
//!
//! [`IccConfiguration`] is what a colour-management layer holds on to. It
//! never fails: a missing, corrupt or unsupported profile is recorded as an
//! error string and every conversion goes through the uncalibrated
//! fallback instead.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::channels::{Channels, DeviceSpace};
use crate::color::Xyz;
use crate::error::{IccError, IccErrorKind};
use crate::pipeline::Intent;
use crate::profile::Profile;
use crate::simd::{active_features, device8_to_xyz_batch};
use crate::uncalibrated;

/// Where a configuration gets its profile from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    #[default]
    None,
}

impl From<PathBuf> for ProfileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for ProfileSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Conversion settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationOptions {
    /// Rendering intent for every conversion
    pub intent: Intent,
    /// Device space the caller supplies and expects back
    pub expected_space: DeviceSpace,
    /// Clamp negative XYZ components to zero
    pub clamp_output: bool,
}

impl Default for ConfigurationOptions {
    fn default() -> Self {
        Self {
            intent: Intent::Perceptual,
            expected_space: DeviceSpace::Cmyk,
            clamp_output: true,
        }
    }
}

impl ConfigurationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering intent
    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = intent;
        self
    }

    /// Set the device space of caller values
    pub fn with_expected_space(mut self, space: DeviceSpace) -> Self {
        self.expected_space = space;
        self
    }

    /// Pass XYZ results through unclamped
    pub fn without_clamping(mut self) -> Self {
        self.clamp_output = false;
        self
    }
}

/// A profile that may or may not be usable, plus the settings to use it with
#[derive(Debug, Clone)]
pub struct IccConfiguration {
    profile: Option<Arc<Profile>>,
    options: ConfigurationOptions,
    error: Option<String>,
    error_kind: Option<IccErrorKind>,
}

impl IccConfiguration {
    /// Load and validate a profile; failures are recorded, not returned
    pub fn open(source: ProfileSource, options: ConfigurationOptions) -> Self {
        let loaded = match source {
            ProfileSource::Path(path) => Profile::from_path(path),
            ProfileSource::Bytes(bytes) => Profile::from_vec(bytes),
            ProfileSource::None => return Self::uncalibrated(options),
        };
        match loaded {
            Ok(profile) => Self::from_profile(Arc::new(profile), options),
            Err(err) => Self::failed(err, options),
        }
    }

    /// Validate an already parsed profile
    pub fn from_profile(profile: Arc<Profile>, options: ConfigurationOptions) -> Self {
        match profile.error_if_unsupported_for(options.intent, options.expected_space) {
            Ok(()) => {
                debug!(
                    intent = ?options.intent,
                    space = ?options.expected_space,
                    batch = active_features(),
                    "ICC profile accepted"
                );
                Self {
                    profile: Some(profile),
                    options,
                    error: None,
                    error_kind: None,
                }
            }
            Err(err) => Self::failed(err, options),
        }
    }

    /// No profile at all; not an error
    pub fn uncalibrated(options: ConfigurationOptions) -> Self {
        Self {
            profile: None,
            options,
            error: None,
            error_kind: None,
        }
    }

    fn failed(err: IccError, options: ConfigurationOptions) -> Self {
        warn!(error = %err, "ICC profile unusable, falling back to uncalibrated CMYK");
        Self {
            profile: None,
            options,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }

    pub fn profile(&self) -> Option<&Arc<Profile>> {
        self.profile.as_ref()
    }

    pub fn options(&self) -> &ConfigurationOptions {
        &self.options
    }

    pub fn intent(&self) -> Intent {
        self.options.intent
    }

    /// Why the profile was rejected, if it was
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_kind(&self) -> Option<IccErrorKind> {
        self.error_kind
    }

    pub fn is_calibrated(&self) -> bool {
        self.profile.is_some()
    }

    /// Device space conversions actually use
    pub fn effective_space(&self) -> DeviceSpace {
        if self.profile.is_some() {
            self.options.expected_space
        } else {
            DeviceSpace::UncalibratedCmyk
        }
    }

    /// Device values → XYZ (D50); never fails
    pub fn to_xyz_d50(&self, values: &[f64]) -> Xyz {
        let channels = Channels::new(self.effective_space(), values);
        let xyz = match &self.profile {
            Some(profile) => profile
                .to_xyz_d50(channels.values(), self.options.intent)
                .unwrap_or_else(|err| {
                    warn!(error = %err, "profile conversion failed, using fallback");
                    uncalibrated::to_xyz_d50(channels.values())
                }),
            None => uncalibrated::to_xyz_d50(channels.values()),
        };

        if self.options.clamp_output {
            Xyz::new(xyz.x.max(0.0), xyz.y.max(0.0), xyz.z.max(0.0))
        } else {
            xyz
        }
    }

    /// XYZ (D50) → device values in [`IccConfiguration::effective_space`]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_xyz_d50(&self, xyz: Xyz) -> Channels {
        if let Some(profile) = &self.profile {
            match profile.from_xyz_d50(xyz, self.options.intent) {
                Ok(values) => return Channels::new(self.options.expected_space, &values),
                Err(err) => warn!(error = %err, "profile conversion failed, using fallback"),
            }
        }
        Channels::new(
            DeviceSpace::UncalibratedCmyk,
            &uncalibrated::from_xyz_d50(xyz),
        )
    }

    /// Interleaved device values → one XYZ per pixel
    ///
    /// Pixels are `effective_space().channels()` values wide; a trailing
    /// partial pixel is zero-padded.
    pub fn to_xyz_d50_batch(&self, values: &[f64]) -> Vec<Xyz> {
        let width = self.effective_space().channels().max(1);
        values
            .chunks(width)
            .map(|pixel| self.to_xyz_d50(pixel))
            .collect()
    }

    /// Interleaved 8-bit device pixels → one XYZ per whole pixel
    pub fn to_xyz_d50_u8(&self, src: &[u8]) -> Vec<Xyz> {
        let width = self.effective_space().channels().max(1);
        let mut out = vec![Xyz::default(); src.len() / width];
        device8_to_xyz_batch(src, width, &mut out, |pixel| self.to_xyz_d50(pixel));
        out
    }
}

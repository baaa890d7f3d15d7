//! # oxicc - ICC profile pipelines for device colour
//!
//! Parses ICC profiles, assembles their device <-> PCS LUT pipelines and
//! evaluates them on channel vectors of any width (gray, RGB, CMYK, n-colour).
//!
//! ## Layers
//!
//! - [`icc`]: header, tag table and tag element decoding
//! - [`pipeline`]: stage model, intent → tag slot resolution, LUT assembly
//! - [`Profile`]: memoized pipelines plus XYZ (D50) conversions
//! - [`IccConfiguration`]: never-failing wrapper that records why a profile
//!   is unusable and falls back to uncalibrated CMYK
//!
//! ## Quick Start
//!
//! ```no_run
//! use oxicc_core::{ConfigurationOptions, IccConfiguration, Intent, ProfileSource};
//!
//! let config = IccConfiguration::open(
//!     ProfileSource::Path("coated.icc".into()),
//!     ConfigurationOptions::new().with_intent(Intent::RelativeColorimetric),
//! );
//! if let Some(reason) = config.error() {
//!     eprintln!("using uncalibrated CMYK: {reason}");
//! }
//!
//! let xyz = config.to_xyz_d50(&[0.1, 0.7, 0.3, 0.0]);
//! let cmyk = config.from_xyz_d50(xyz);
//! ```

pub mod channels;
pub mod color;
pub mod config;
pub mod error;
pub mod icc;
pub mod math;
pub mod pipeline;
pub mod profile;
pub mod simd;
pub mod transform;
pub mod uncalibrated;
pub mod validate;

pub use channels::{Channels, DeviceSpace};
pub use color::{D50, Lab, WhitePoint, Xyz};
pub use config::{ConfigurationOptions, IccConfiguration, ProfileSource};
pub use error::{IccError, IccErrorKind, Result};
pub use icc::{ColorSpace, Header, ProfileClass, ProfileVersion, TagSignature};
pub use pipeline::{Direction, Intent, LutKind, Pcs, PcsEncoding, Pipeline, Stage};
pub use profile::Profile;

/// Version of oxicc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

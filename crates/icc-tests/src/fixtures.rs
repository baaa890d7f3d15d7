//! Expected values for the synthetic profiles
//!
//! `testdata/fixtures.json` records what parsing each profile from
//! [`crate::synthetic`] must produce. Enum values are stored as their
//! `Debug` names so the manifest stays readable.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use oxicc_core::Profile;

use crate::synthetic;

const MANIFEST: &str = include_str!("../testdata/fixtures.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub profiles: Vec<FixtureProfile>,
}

/// Expectations for one synthetic profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureProfile {
    pub name: String,
    pub version: [u8; 3],
    pub class: String,
    pub color_space: String,
    pub pcs: String,
    pub rendering_intent: String,
    #[serde(default)]
    pub flags: u32,
    /// Hex string, all zero when the profile has no id
    pub profile_id: String,
    pub tag_count: usize,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub luts: Vec<FixtureLut>,
    pub supported_intents: Vec<String>,
    /// Round-trip tolerance per intent, in device units
    #[serde(default)]
    pub round_trip: Vec<RoundTripTolerance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureLut {
    pub tag: String,
    pub kind: String,
    pub encoding: String,
    pub inputs: usize,
    pub outputs: usize,
    pub stages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTripTolerance {
    pub intent: String,
    pub tolerance: f64,
}

impl Manifest {
    pub fn load() -> Result<Self> {
        serde_json::from_str(MANIFEST).context("parsing testdata/fixtures.json")
    }

    pub fn get(&self, name: &str) -> Result<&FixtureProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| anyhow!("no fixture named {name}"))
    }
}

/// Build and parse the synthetic profile a fixture describes
pub fn load_profile(name: &str) -> Result<Profile> {
    let (_, builder) = synthetic::all()
        .into_iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| anyhow!("no synthetic profile named {name}"))?;
    Profile::from_vec(builder.build()).with_context(|| format!("parsing {name}"))
}

pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

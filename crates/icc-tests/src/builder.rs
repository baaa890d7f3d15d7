//! Synthetic ICC profile construction
//!
//! Writes the binary layout by hand: 128-byte header, tag table, then
//! 4-byte aligned tag data. Used to produce profiles with exactly known
//! contents, including deliberately broken ones.

/// Encode an s15Fixed16Number
pub fn s15(v: f64) -> [u8; 4] {
    ((v * 65536.0).round() as i32).to_be_bytes()
}

fn pad4(data: &mut Vec<u8>) {
    while data.len() % 4 != 0 {
        data.push(0);
    }
}

fn quantize16(v: f64) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// `XYZ ` tag with one value
pub fn xyz_tag(xyz: [f64; 3]) -> Vec<u8> {
    let mut tag = b"XYZ \0\0\0\0".to_vec();
    for v in xyz {
        tag.extend_from_slice(&s15(v));
    }
    tag
}

/// `text` tag
pub fn text_tag(text: &str) -> Vec<u8> {
    let mut tag = b"text\0\0\0\0".to_vec();
    tag.extend_from_slice(text.as_bytes());
    tag.push(0);
    tag
}

/// v2 `desc` tag with empty Unicode and ScriptCode parts
pub fn desc_tag(text: &str) -> Vec<u8> {
    let mut tag = b"desc\0\0\0\0".to_vec();
    tag.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
    tag.extend_from_slice(text.as_bytes());
    tag.push(0);
    tag.extend_from_slice(&[0u8; 8]);
    tag.extend_from_slice(&[0u8; 3 + 67]);
    tag
}

/// v4 `mluc` tag with a single en-US record
pub fn mluc_tag(text: &str) -> Vec<u8> {
    let utf16: Vec<u8> = text.encode_utf16().flat_map(|c| c.to_be_bytes()).collect();
    let mut tag = b"mluc\0\0\0\0".to_vec();
    tag.extend_from_slice(&1u32.to_be_bytes());
    tag.extend_from_slice(&12u32.to_be_bytes());
    tag.extend_from_slice(b"enUS");
    tag.extend_from_slice(&(utf16.len() as u32).to_be_bytes());
    tag.extend_from_slice(&28u32.to_be_bytes());
    tag.extend_from_slice(&utf16);
    tag
}

/// `sf32` tag
pub fn sf32_tag(values: &[f64]) -> Vec<u8> {
    let mut tag = b"sf32\0\0\0\0".to_vec();
    for &v in values {
        tag.extend_from_slice(&s15(v));
    }
    tag
}

/// `curv` with no entries
pub fn curv_identity() -> Vec<u8> {
    b"curv\0\0\0\0\0\0\0\0".to_vec()
}

/// `para` function type 0, `Y = X^g`
pub fn para_gamma(g: f64) -> Vec<u8> {
    let mut tag = b"para\0\0\0\0\0\0\0\0".to_vec();
    tag.extend_from_slice(&s15(g));
    tag
}

/// `mpet` header with no processing elements
pub fn mpet_tag(inputs: u16, outputs: u16) -> Vec<u8> {
    let mut tag = b"mpet\0\0\0\0".to_vec();
    tag.extend_from_slice(&inputs.to_be_bytes());
    tag.extend_from_slice(&outputs.to_be_bytes());
    tag.extend_from_slice(&0u32.to_be_bytes());
    tag
}

/// CLUT contents sampled from a function of node coordinates
#[derive(Debug, Clone)]
pub struct ClutSamples {
    pub grid: Vec<u8>,
    pub outputs: usize,
    /// Normalized samples, first input axis varying slowest
    pub samples: Vec<f64>,
}

impl ClutSamples {
    /// Sample `f` at every grid node; outputs are clamped to [0, 1]
    pub fn sample(grid: Vec<u8>, outputs: usize, f: impl Fn(&[f64]) -> Vec<f64>) -> Self {
        let nodes: usize = grid.iter().map(|&g| g as usize).product();
        let mut samples = Vec::with_capacity(nodes * outputs);
        let mut coords = vec![0.0; grid.len()];

        for node in 0..nodes {
            let mut rest = node;
            for axis in (0..grid.len()).rev() {
                let g = grid[axis] as usize;
                coords[axis] = (rest % g) as f64 / (g - 1).max(1) as f64;
                rest /= g;
            }
            let values = f(&coords);
            samples.extend((0..outputs).map(|o| values.get(o).copied().unwrap_or(0.0).clamp(0.0, 1.0)));
        }

        Self {
            grid,
            outputs,
            samples,
        }
    }

    fn write_u16(&self, out: &mut Vec<u8>) {
        for &v in &self.samples {
            out.extend_from_slice(&quantize16(v).to_be_bytes());
        }
    }

    fn write_u8(&self, out: &mut Vec<u8>) {
        out.extend(self.samples.iter().map(|&v| (v * 255.0).round() as u8));
    }
}

/// `mft1` tag with identity 256-entry tables
pub fn lut8_tag(inputs: usize, outputs: usize, matrix: [[f64; 3]; 3], clut: &ClutSamples) -> Vec<u8> {
    let mut tag = b"mft1\0\0\0\0".to_vec();
    tag.extend_from_slice(&[inputs as u8, outputs as u8, clut.grid[0], 0]);
    for v in matrix.iter().flatten() {
        tag.extend_from_slice(&s15(*v));
    }
    for _ in 0..inputs {
        tag.extend(0..=255u8);
    }
    clut.write_u8(&mut tag);
    for _ in 0..outputs {
        tag.extend(0..=255u8);
    }
    tag
}

/// `mft2` tag with identity 2-entry tables
pub fn lut16_tag(inputs: usize, outputs: usize, matrix: [[f64; 3]; 3], clut: &ClutSamples) -> Vec<u8> {
    let mut tag = b"mft2\0\0\0\0".to_vec();
    tag.extend_from_slice(&[inputs as u8, outputs as u8, clut.grid[0], 0]);
    for v in matrix.iter().flatten() {
        tag.extend_from_slice(&s15(*v));
    }
    tag.extend_from_slice(&2u16.to_be_bytes());
    tag.extend_from_slice(&2u16.to_be_bytes());
    for _ in 0..inputs {
        tag.extend_from_slice(&[0x00, 0x00, 0xFF, 0xFF]);
    }
    clut.write_u16(&mut tag);
    for _ in 0..outputs {
        tag.extend_from_slice(&[0x00, 0x00, 0xFF, 0xFF]);
    }
    tag
}

/// Elements of a lutAToB / lutBToA tag
#[derive(Debug, Clone, Default)]
pub struct AbElements {
    /// One encoded curve per channel
    pub b: Option<Vec<Vec<u8>>>,
    /// 3x3 row-major followed by the offset
    pub matrix: Option<[f64; 12]>,
    pub m: Option<Vec<Vec<u8>>>,
    pub clut: Option<ClutSamples>,
    pub a: Option<Vec<Vec<u8>>>,
}

/// `mAB ` (`a_to_b`) or `mBA ` tag; element offsets are relative to the tag start
pub fn lut_ab_tag(a_to_b: bool, inputs: usize, outputs: usize, elements: &AbElements) -> Vec<u8> {
    let mut tag = if a_to_b {
        b"mAB \0\0\0\0".to_vec()
    } else {
        b"mBA \0\0\0\0".to_vec()
    };
    tag.extend_from_slice(&[inputs as u8, outputs as u8, 0, 0]);
    tag.extend_from_slice(&[0u8; 20]);

    let mut offsets = [0u32; 5];

    let write_curves = |tag: &mut Vec<u8>, curves: &[Vec<u8>]| -> u32 {
        let at = tag.len() as u32;
        for curve in curves {
            tag.extend_from_slice(curve);
            pad4(tag);
        }
        at
    };

    if let Some(b) = &elements.b {
        offsets[0] = write_curves(&mut tag, b);
    }
    if let Some(matrix) = &elements.matrix {
        offsets[1] = tag.len() as u32;
        for &v in matrix {
            tag.extend_from_slice(&s15(v));
        }
    }
    if let Some(m) = &elements.m {
        offsets[2] = write_curves(&mut tag, m);
    }
    if let Some(clut) = &elements.clut {
        offsets[3] = tag.len() as u32;
        let mut grid = [0u8; 16];
        grid[..clut.grid.len()].copy_from_slice(&clut.grid);
        tag.extend_from_slice(&grid);
        tag.extend_from_slice(&[2, 0, 0, 0]);
        clut.write_u16(&mut tag);
        pad4(&mut tag);
    }
    if let Some(a) = &elements.a {
        offsets[4] = write_curves(&mut tag, a);
    }

    for (i, off) in offsets.iter().enumerate() {
        tag[12 + i * 4..16 + i * 4].copy_from_slice(&off.to_be_bytes());
    }
    tag
}

/// Builds a complete profile
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    pub version: [u8; 3],
    pub class: [u8; 4],
    pub color_space: [u8; 4],
    pub pcs: [u8; 4],
    pub signature: [u8; 4],
    pub rendering_intent: u32,
    pub flags: u32,
    pub illuminant: [f64; 3],
    pub profile_id: [u8; 16],
    tags: Vec<([u8; 4], Vec<u8>)>,
}

/// ICC D50 as stored in profile headers
pub const D50_ILLUMINANT: [f64; 3] = [63190.0 / 65536.0, 1.0, 54061.0 / 65536.0];

impl ProfileBuilder {
    pub fn new(class: &[u8; 4], color_space: &[u8; 4], pcs: &[u8; 4]) -> Self {
        Self {
            version: [4, 3, 0],
            class: *class,
            color_space: *color_space,
            pcs: *pcs,
            signature: *b"acsp",
            rendering_intent: 0,
            flags: 0,
            illuminant: D50_ILLUMINANT,
            profile_id: [0; 16],
            tags: Vec::new(),
        }
    }

    pub fn version(mut self, major: u8, minor: u8, patch: u8) -> Self {
        self.version = [major, minor, patch];
        self
    }

    pub fn rendering_intent(mut self, intent: u32) -> Self {
        self.rendering_intent = intent;
        self
    }

    pub fn signature(mut self, signature: &[u8; 4]) -> Self {
        self.signature = *signature;
        self
    }

    pub fn profile_id(mut self, id: [u8; 16]) -> Self {
        self.profile_id = id;
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Add or replace a tag
    pub fn tag(mut self, sig: &[u8; 4], data: Vec<u8>) -> Self {
        self.tags.retain(|(s, _)| s != sig);
        self.tags.push((*sig, data));
        self
    }

    pub fn without_tag(mut self, sig: &[u8; 4]) -> Self {
        self.tags.retain(|(s, _)| s != sig);
        self
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn build(&self) -> Vec<u8> {
        let table_len = 4 + 12 * self.tags.len();
        let mut data_area = Vec::new();
        let mut entries = Vec::with_capacity(self.tags.len());
        for (sig, tag) in &self.tags {
            let offset = 128 + table_len + data_area.len();
            entries.push((*sig, offset as u32, tag.len() as u32));
            data_area.extend_from_slice(tag);
            pad4(&mut data_area);
        }

        let size = 128 + table_len + data_area.len();
        let mut out = Vec::with_capacity(size);

        out.extend_from_slice(&(size as u32).to_be_bytes());
        out.extend_from_slice(b"oxic");
        out.extend_from_slice(&[
            self.version[0],
            (self.version[1] << 4) | (self.version[2] & 0x0F),
            0,
            0,
        ]);
        out.extend_from_slice(&self.class);
        out.extend_from_slice(&self.color_space);
        out.extend_from_slice(&self.pcs);
        for v in [2024u16, 3, 15, 12, 30, 45] {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(b"APPL");
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(b"OXIC");
        out.extend_from_slice(b"TEST");
        out.extend_from_slice(&0u64.to_be_bytes());
        out.extend_from_slice(&self.rendering_intent.to_be_bytes());
        for v in self.illuminant {
            out.extend_from_slice(&s15(v));
        }
        out.extend_from_slice(b"oxic");
        out.extend_from_slice(&self.profile_id);
        out.resize(128, 0);

        out.extend_from_slice(&(self.tags.len() as u32).to_be_bytes());
        for (sig, offset, len) in entries {
            out.extend_from_slice(&sig);
            out.extend_from_slice(&offset.to_be_bytes());
            out.extend_from_slice(&len.to_be_bytes());
        }
        out.extend_from_slice(&data_area);
        out
    }
}

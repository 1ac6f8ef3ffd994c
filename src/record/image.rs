// src/record/image.rs
use bytes::Bytes;

use crate::security::SecurityGroup;
use crate::tre::Extensions;
use crate::types::Version;

/// Per-band information block of an image subheader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandInfo {
    pub representation: String,
    pub subcategory: String,
    pub filter_condition: String,
    pub filter_code: String,
    pub num_luts: u32,
    /// NELUT, only present when `num_luts` is non-zero
    pub lut_entries: u32,
    /// `num_luts * lut_entries` bytes
    pub lut: Bytes,
}

impl BandInfo {
    pub fn new(representation: impl Into<String>) -> Self {
        BandInfo {
            representation: representation.into(),
            subcategory: String::new(),
            filter_condition: "N".to_string(),
            filter_code: String::new(),
            num_luts: 0,
            lut_entries: 0,
            lut: Bytes::new(),
        }
    }

    pub fn with_lut(mut self, num_luts: u32, lut_entries: u32, lut: impl Into<Bytes>) -> Self {
        self.num_luts = num_luts;
        self.lut_entries = lut_entries;
        self.lut = lut.into();
        self
    }

    /// Byte size the lookup tables must have
    pub fn lut_len(&self) -> usize {
        self.num_luts as usize * self.lut_entries as usize
    }
}

#[derive(Debug)]
pub struct ImageSubheader {
    pub image_id: String,
    pub image_datetime: String,
    pub target_id: String,
    pub title: String,
    pub classification: String,
    pub security: SecurityGroup,
    pub encrypted: u32,
    pub source: String,
    pub num_rows: u32,
    pub num_cols: u32,
    pub pixel_value_type: String,
    pub representation: String,
    pub category: String,
    pub actual_bits_per_pixel: u32,
    pub justification: String,
    pub coordinate_system: String,
    pub corner_coordinates: String,
    /// NICOM as declared; `comments` is written up to this count
    pub num_comments: u32,
    pub comments: Vec<String>,
    pub compression: String,
    pub compression_rate: String,
    /// NBANDS; zero on 2.1 switches to `num_multispectral_bands`
    pub num_bands: u32,
    pub num_multispectral_bands: u32,
    pub bands: Vec<BandInfo>,
    pub sync_code: u32,
    pub mode: String,
    pub blocks_per_row: u32,
    pub blocks_per_col: u32,
    pub pixels_per_block_horizontal: u32,
    pub pixels_per_block_vertical: u32,
    pub bits_per_pixel: u32,
    pub display_level: u32,
    pub attachment_level: u32,
    pub location: String,
    pub magnification: String,
    pub user_defined: Extensions,
    pub extended: Extensions,
}

impl ImageSubheader {
    /// Single-block, single-band image
    pub fn mono(num_rows: u32, num_cols: u32, bits_per_pixel: u32) -> Self {
        let mut subheader = ImageSubheader {
            num_rows,
            num_cols,
            actual_bits_per_pixel: bits_per_pixel,
            bits_per_pixel,
            pixels_per_block_horizontal: if num_cols > 8192 { 0 } else { num_cols },
            pixels_per_block_vertical: if num_rows > 8192 { 0 } else { num_rows },
            ..ImageSubheader::default()
        };
        subheader.set_bands(vec![BandInfo::new("M")]);
        subheader
    }

    /// Replace the band list and keep NBANDS/XBANDS consistent with it
    pub fn set_bands(&mut self, bands: Vec<BandInfo>) {
        if bands.len() > 9 {
            self.num_bands = 0;
            self.num_multispectral_bands = bands.len() as u32;
        } else {
            self.num_bands = bands.len() as u32;
            self.num_multispectral_bands = 0;
        }
        self.bands = bands;
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
        self.num_comments = self.comments.len() as u32;
    }

    /// Band count in effect: XBANDS when NBANDS is zero on 2.1
    pub fn band_count(&self, version: Version) -> u32 {
        if self.num_bands == 0 && version.is_v21() {
            self.num_multispectral_bands
        } else {
            self.num_bands
        }
    }

    pub fn has_corner_coordinates(&self, version: Version) -> bool {
        match (version, self.coordinate_system.as_str()) {
            (Version::V21, "U" | "G" | "N" | "S" | "D") => true,
            (Version::V21, _) => false,
            (Version::V20, code) => code != "N",
        }
    }

    pub fn has_compression_rate(&self) -> bool {
        !matches!(self.compression.as_str(), "NC" | "NM")
    }
}

impl Default for ImageSubheader {
    fn default() -> Self {
        ImageSubheader {
            image_id: String::new(),
            image_datetime: "00000000000000".to_string(),
            target_id: String::new(),
            title: String::new(),
            classification: "U".to_string(),
            security: SecurityGroup::new(),
            encrypted: 0,
            source: String::new(),
            num_rows: 0,
            num_cols: 0,
            pixel_value_type: "INT".to_string(),
            representation: "MONO".to_string(),
            category: "VIS".to_string(),
            actual_bits_per_pixel: 8,
            justification: "R".to_string(),
            coordinate_system: String::new(),
            corner_coordinates: String::new(),
            num_comments: 0,
            comments: Vec::new(),
            compression: "NC".to_string(),
            compression_rate: String::new(),
            num_bands: 0,
            num_multispectral_bands: 0,
            bands: Vec::new(),
            sync_code: 0,
            mode: "B".to_string(),
            blocks_per_row: 1,
            blocks_per_col: 1,
            pixels_per_block_horizontal: 0,
            pixels_per_block_vertical: 0,
            bits_per_pixel: 8,
            display_level: 1,
            attachment_level: 0,
            location: "0000000000".to_string(),
            magnification: "1.0".to_string(),
            user_defined: Extensions::new(),
            extended: Extensions::new(),
        }
    }
}

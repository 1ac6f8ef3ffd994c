// src/record/overflow.rs
//! Redirection of oversized TRE sections into `TRE_OVERFLOW` segments.

use tracing::debug;

use crate::error::{NitfError, Result};
use crate::field::widths::image::UDOFL;
use crate::record::{DataExtensionSubheader, Record};
use crate::security::SecurityGroup;
use crate::tre::{Extensions, Tre};
use crate::types::SegmentKind;

/// A TRE section that can overflow, with its owning segment index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowSource {
    UserDefinedHeader,
    ExtendedHeader,
    UserDefinedImage(usize),
    ExtendedImage(usize),
    Graphic(usize),
    Label(usize),
    Text(usize),
}

impl OverflowSource {
    /// DESOFLW value naming the section
    pub fn header_type(&self) -> &'static str {
        match self {
            OverflowSource::UserDefinedHeader => "UDHD",
            OverflowSource::ExtendedHeader => "XHD",
            OverflowSource::UserDefinedImage(_) => "UDID",
            OverflowSource::ExtendedImage(_) => "IXSHD",
            OverflowSource::Graphic(_) => "SXSHD",
            OverflowSource::Label(_) => "LXSHD",
            OverflowSource::Text(_) => "TXSHD",
        }
    }

    /// DESITEM value: zero for the file header, one-based segment number otherwise
    pub fn item(&self) -> u32 {
        match self {
            OverflowSource::UserDefinedHeader | OverflowSource::ExtendedHeader => 0,
            OverflowSource::UserDefinedImage(i)
            | OverflowSource::ExtendedImage(i)
            | OverflowSource::Graphic(i)
            | OverflowSource::Label(i)
            | OverflowSource::Text(i) => *i as u32 + 1,
        }
    }

    /// Largest section length, overflow field included, the section may keep
    pub fn limit(&self) -> u64 {
        match self {
            OverflowSource::UserDefinedHeader
            | OverflowSource::ExtendedHeader
            | OverflowSource::UserDefinedImage(_)
            | OverflowSource::ExtendedImage(_) => 99_999,
            OverflowSource::Graphic(_) => 9_741,
            OverflowSource::Label(_) => 9_747,
            OverflowSource::Text(_) => 9_717,
        }
    }

    /// Inverse of `header_type`/`item`
    pub fn from_des(header_type: &str, item: u32) -> Option<Self> {
        let index = (item as usize).checked_sub(1);
        match header_type.trim_end() {
            "UDHD" => Some(OverflowSource::UserDefinedHeader),
            "XHD" => Some(OverflowSource::ExtendedHeader),
            "UDID" => index.map(OverflowSource::UserDefinedImage),
            "IXSHD" => index.map(OverflowSource::ExtendedImage),
            "SXSHD" => index.map(OverflowSource::Graphic),
            "LXSHD" => index.map(OverflowSource::Label),
            "TXSHD" => index.map(OverflowSource::Text),
            _ => None,
        }
    }
}

/// Split point of `tres`: every TRE from the returned index on must move
fn overflow_point(tres: &Extensions, limit: u64) -> Result<Option<usize>> {
    let mut kept = UDOFL.width as u64;
    for (i, tre) in tres.iter().enumerate() {
        kept += tre.encoded_len()?;
        if kept > limit {
            return Ok(Some(i));
        }
    }
    Ok(None)
}

impl Record {
    /// Move TREs that do not fit their section into `TRE_OVERFLOW` data
    /// extension segments. Returns the number of TREs moved.
    pub fn unmerge_tres(&mut self) -> Result<usize> {
        let mut sources = vec![OverflowSource::UserDefinedHeader, OverflowSource::ExtendedHeader];
        for i in 0..self.images.len() {
            sources.push(OverflowSource::UserDefinedImage(i));
            sources.push(OverflowSource::ExtendedImage(i));
        }
        sources.extend((0..self.graphics.len()).map(OverflowSource::Graphic));
        sources.extend((0..self.labels.len()).map(OverflowSource::Label));
        sources.extend((0..self.texts.len()).map(OverflowSource::Text));

        let mut moved = 0;
        for source in sources {
            moved += self.unmerge_section(source)?;
        }
        Ok(moved)
    }

    fn unmerge_section(&mut self, source: OverflowSource) -> Result<usize> {
        let (tres, classification, security) = {
            let (extensions, classification, security) = self.section_mut(source)?;
            let Some(split) = overflow_point(extensions, source.limit())? else {
                return Ok(0);
            };
            (extensions.split_off(split), classification, security)
        };
        let count = tres.len();

        let header_type = source.header_type();
        let item = source.item();
        let existing = self.data_extensions.iter().position(|des| {
            des.is_overflow()
                && des.overflowed_header_type.trim_end() == header_type
                && des.data_item_overflowed == item
        });
        let index = match existing {
            Some(index) => index,
            None => self.add_data_extension(DataExtensionSubheader::overflow(
                header_type,
                item,
                &classification,
                security,
            )),
        };
        self.data_extensions[index].user_defined.extend(tres);

        debug!(header_type, item, count, des_index = index, "moved TREs into overflow segment");
        Ok(count)
    }

    fn section_mut(&mut self, source: OverflowSource) -> Result<(&mut Extensions, String, SecurityGroup)> {
        fn out_of_range(kind: SegmentKind, index: usize, count: usize) -> NitfError {
            NitfError::SegmentIndexOutOfRange { kind, index, count }
        }

        let section = match source {
            OverflowSource::UserDefinedHeader => {
                let h = &mut self.header;
                (&mut h.user_defined, h.classification.clone(), h.security.clone())
            }
            OverflowSource::ExtendedHeader => {
                let h = &mut self.header;
                (&mut h.extended, h.classification.clone(), h.security.clone())
            }
            OverflowSource::UserDefinedImage(i) | OverflowSource::ExtendedImage(i) => {
                let count = self.images.len();
                let image = self
                    .images
                    .get_mut(i)
                    .ok_or_else(|| out_of_range(SegmentKind::Image, i, count))?;
                let (classification, security) = (image.classification.clone(), image.security.clone());
                let extensions = match source {
                    OverflowSource::UserDefinedImage(_) => &mut image.user_defined,
                    _ => &mut image.extended,
                };
                (extensions, classification, security)
            }
            OverflowSource::Graphic(i) => {
                let count = self.graphics.len();
                let graphic = self
                    .graphics
                    .get_mut(i)
                    .ok_or_else(|| out_of_range(SegmentKind::Graphic, i, count))?;
                (&mut graphic.extended, graphic.classification.clone(), graphic.security.clone())
            }
            OverflowSource::Label(i) => {
                let count = self.labels.len();
                let label = self
                    .labels
                    .get_mut(i)
                    .ok_or_else(|| out_of_range(SegmentKind::Label, i, count))?;
                (&mut label.extended, label.classification.clone(), label.security.clone())
            }
            OverflowSource::Text(i) => {
                let count = self.texts.len();
                let text = self
                    .texts
                    .get_mut(i)
                    .ok_or_else(|| out_of_range(SegmentKind::Text, i, count))?;
                (&mut text.extended, text.classification.clone(), text.security.clone())
            }
        };
        Ok(section)
    }

    /// TREs of `source` followed by those redirected from it, in order
    pub fn merged_tres(&self, source: OverflowSource) -> Vec<&Tre> {
        let own: Option<&Extensions> = match source {
            OverflowSource::UserDefinedHeader => Some(&self.header.user_defined),
            OverflowSource::ExtendedHeader => Some(&self.header.extended),
            OverflowSource::UserDefinedImage(i) => self.images.get(i).map(|s| &s.user_defined),
            OverflowSource::ExtendedImage(i) => self.images.get(i).map(|s| &s.extended),
            OverflowSource::Graphic(i) => self.graphics.get(i).map(|s| &s.extended),
            OverflowSource::Label(i) => self.labels.get(i).map(|s| &s.extended),
            OverflowSource::Text(i) => self.texts.get(i).map(|s| &s.extended),
        };
        let redirected = self.data_extensions.iter().filter(|des| {
            des.is_overflow()
                && OverflowSource::from_des(&des.overflowed_header_type, des.data_item_overflowed)
                    == Some(source)
        });

        own.into_iter()
            .flat_map(|ext| ext.iter())
            .chain(redirected.flat_map(|des| des.user_defined.iter()))
            .collect()
    }
}

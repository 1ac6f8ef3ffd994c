// src/security.rs
//! Classification/security field group shared by the file header and every
//! subheader.
//!
//! NITF 2.1 carries fifteen fields; NITF 2.0 carries six wider ones plus a
//! classification text that is only present when the downgrade date holds
//! the `999998` sentinel.

use std::io::{Read, Write};

use crate::error::Result;
use crate::field::widths::{security20, security21};
use crate::field::{FieldReader, FieldWriter};
use crate::types::Version;

/// Security group values. Fields a version does not carry are ignored when
/// writing that version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityGroup {
    pub classification_system: String,
    pub codewords: String,
    pub control_and_handling: String,
    pub releasing_instructions: String,
    pub declassification_type: String,
    pub declassification_date: String,
    pub declassification_exemption: String,
    pub downgrade: String,
    pub downgrade_date: String,
    pub classification_text: String,
    pub classification_authority_type: String,
    pub classification_authority: String,
    pub classification_reason: String,
    pub security_source_date: String,
    pub security_control_number: String,
}

impl SecurityGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a NITF 2.0 group carries the classification text field
    pub fn has_v20_classification_text(&self) -> bool {
        self.downgrade_date.starts_with(security20::DOWNGRADE_BY_TEXT)
    }

    /// Encoded size for the given version
    pub fn encoded_len(&self, version: Version) -> usize {
        match version {
            Version::V21 => {
                use security21::*;
                [CLSY, CODE, CTLH, REL, DCTP, DCDT, DCXM, DG, DGDT, CLTX, CATP, CAUT, CRSN, RDT, CTLN]
                    .iter()
                    .map(|def| def.width)
                    .sum()
            }
            Version::V20 => {
                use security20::*;
                let base: usize = [CODE, CTLH, REL, CAUT, CTLN, DGDT].iter().map(|def| def.width).sum();
                if self.has_v20_classification_text() {
                    base + CLTX.width
                } else {
                    base
                }
            }
        }
    }

    pub fn write_to<W: Write + ?Sized>(&self, w: &mut FieldWriter<'_, W>, version: Version) -> Result<()> {
        match version {
            Version::V21 => self.write_v21(w),
            Version::V20 => self.write_v20(w),
        }
    }

    fn write_v21<W: Write + ?Sized>(&self, w: &mut FieldWriter<'_, W>) -> Result<()> {
        use security21::*;
        w.text(CLSY, &self.classification_system)?;
        w.text(CODE, &self.codewords)?;
        w.text(CTLH, &self.control_and_handling)?;
        w.text(REL, &self.releasing_instructions)?;
        w.text(DCTP, &self.declassification_type)?;
        w.text(DCDT, &self.declassification_date)?;
        w.text(DCXM, &self.declassification_exemption)?;
        w.text(DG, &self.downgrade)?;
        w.text(DGDT, &self.downgrade_date)?;
        w.text(CLTX, &self.classification_text)?;
        w.text(CATP, &self.classification_authority_type)?;
        w.text(CAUT, &self.classification_authority)?;
        w.text(CRSN, &self.classification_reason)?;
        w.text(RDT, &self.security_source_date)?;
        w.text(CTLN, &self.security_control_number)?;
        Ok(())
    }

    fn write_v20<W: Write + ?Sized>(&self, w: &mut FieldWriter<'_, W>) -> Result<()> {
        use security20::*;
        w.text(CODE, &self.codewords)?;
        w.text(CTLH, &self.control_and_handling)?;
        w.text(REL, &self.releasing_instructions)?;
        w.text(CAUT, &self.classification_authority)?;
        w.text(CTLN, &self.security_control_number)?;
        w.text(DGDT, &self.downgrade_date)?;
        if self.has_v20_classification_text() {
            w.text(CLTX, &self.classification_text)?;
        }
        Ok(())
    }

    pub fn read_from<R: Read + ?Sized>(r: &mut FieldReader<'_, R>, version: Version) -> Result<Self> {
        let mut group = SecurityGroup::new();
        match version {
            Version::V21 => {
                use security21::*;
                group.classification_system = r.text(CLSY)?;
                group.codewords = r.text(CODE)?;
                group.control_and_handling = r.text(CTLH)?;
                group.releasing_instructions = r.text(REL)?;
                group.declassification_type = r.text(DCTP)?;
                group.declassification_date = r.text(DCDT)?;
                group.declassification_exemption = r.text(DCXM)?;
                group.downgrade = r.text(DG)?;
                group.downgrade_date = r.text(DGDT)?;
                group.classification_text = r.text(CLTX)?;
                group.classification_authority_type = r.text(CATP)?;
                group.classification_authority = r.text(CAUT)?;
                group.classification_reason = r.text(CRSN)?;
                group.security_source_date = r.text(RDT)?;
                group.security_control_number = r.text(CTLN)?;
            }
            Version::V20 => {
                use security20::*;
                group.codewords = r.text(CODE)?;
                group.control_and_handling = r.text(CTLH)?;
                group.releasing_instructions = r.text(REL)?;
                group.classification_authority = r.text(CAUT)?;
                group.security_control_number = r.text(CTLN)?;
                group.downgrade_date = r.text(DGDT)?;
                if group.has_v20_classification_text() {
                    group.classification_text = r.text(CLTX)?;
                }
            }
        }
        Ok(group)
    }
}

//! Fixed field widths, grouped by the header or subheader that owns them.
//!
//! Every NITF field has a width fixed by the format tables; nothing here is
//! derived from content.

/// Name and fixed byte width of one NITF field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub width: usize,
}

impl FieldDef {
    pub const fn new(name: &'static str, width: usize) -> Self {
        FieldDef { name, width }
    }

    /// Largest decimal value the field can hold
    pub const fn max_value(&self) -> u64 {
        let mut max = 1u64;
        let mut i = 0;
        while i < self.width {
            max *= 10;
            i += 1;
        }
        max - 1
    }
}

macro_rules! fields {
    ($($id:ident = $width:expr;)*) => {
        $(pub const $id: FieldDef = FieldDef::new(stringify!($id), $width);)*
    };
}

// File header
fields! {
    FHDR = 4; FVER = 5; CLEVEL = 2; STYPE = 4; OSTAID = 10; FDT = 14;
    FTITLE = 80; FSCLAS = 1; FSCOP = 5; FSCPYS = 5; ENCRYP = 1; FBKGC = 3;
    ONAME = 24; OPHONE = 18; FL = 12; HL = 6;
    // 2.0 has no FBKGC; its ONAME spans both fields
    ONAME20 = 27;
    NUMI = 3; LISH = 6; LI = 10;
    NUMS = 3; LSSH = 4; LS = 6;
    NUMX = 3; LLSH = 4; LL = 3;
    NUMT = 3; LTSH = 4; LT = 5;
    NUMDES = 3; LDSH = 4; LD = 9;
    NUMRES = 3; LRESH = 4; LRE = 7;
    UDHDL = 5; UDHOFL = 3; XHDL = 5; XHDLOFL = 3;
}

/// NITF 2.1 security group
pub mod security21 {
    use super::FieldDef;

    fields! {
        CLSY = 2; CODE = 11; CTLH = 2; REL = 20; DCTP = 2; DCDT = 8; DCXM = 4;
        DG = 1; DGDT = 8; CLTX = 43; CATP = 1; CAUT = 40; CRSN = 1; RDT = 8;
        CTLN = 15;
    }
}

/// NITF 2.0 security group
pub mod security20 {
    use super::FieldDef;

    fields! {
        CODE = 40; CTLH = 40; REL = 40; CAUT = 20; CTLN = 20; DGDT = 6; CLTX = 40;
    }

    /// Downgrade date sentinel that makes CLTX present
    pub const DOWNGRADE_BY_TEXT: &str = "999998";
}

/// Image subheader
pub mod image {
    use super::FieldDef;

    fields! {
        IM = 2; IID1 = 10; IDATIM = 14; TGTID = 17; IID2 = 80; ISCLAS = 1;
        ENCRYP = 1; ISORCE = 42; NROWS = 8; NCOLS = 8; PVTYPE = 3; IREP = 8;
        ICAT = 8; ABPP = 2; PJUST = 1; ICORDS = 1; IGEOLO = 60; NICOM = 1;
        ICOM = 80; IC = 2; COMRAT = 4; NBANDS = 1; XBANDS = 5;
        IREPBAND = 2; ISUBCAT = 6; IFC = 1; IMFLT = 3; NLUTS = 1; NELUT = 5;
        ISYNC = 1; IMODE = 1; NBPR = 4; NBPC = 4; NPPBH = 4; NPPBV = 4;
        NBPP = 2; IDLVL = 3; IALVL = 3; ILOC = 10; IMAG = 4;
        UDIDL = 5; UDOFL = 3; IXSHDL = 5; IXSOFL = 3;
    }
}

/// Graphic (symbol) subheader
pub mod graphic {
    use super::FieldDef;

    fields! {
        SY = 2; SID = 10; SNAME = 20; SSCLAS = 1; ENCRYP = 1; SFMT = 1;
        SSTRUCT = 13; SDLVL = 3; SALVL = 3; SLOC = 10; SBND1 = 10; SCOLOR = 1;
        SBND2 = 10; SRES2 = 2; SXSHDL = 5; SXSOFL = 3;
    }
}

/// Label subheader (NITF 2.0 only)
pub mod label {
    use super::FieldDef;

    fields! {
        LA = 2; LID = 10; LSCLAS = 1; ENCRYP = 1; LFS = 1; LCW = 2; LCH = 2;
        LDLVL = 3; LALVL = 3; LLOCR = 5; LLOCC = 5; LTC = 3; LBC = 3;
        LXSHDL = 5; LXSOFL = 3;
    }
}

/// Text subheader
pub mod text {
    use super::FieldDef;

    fields! {
        TE = 2; TEXTID = 7; TXTALVL = 3; TXTDT = 14; TXTITL = 80; TSCLAS = 1;
        ENCRYP = 1; TXTFMT = 3; TXSHDL = 5; TXSOFL = 3;
    }
}

/// Data extension subheader
pub mod des {
    use super::FieldDef;

    fields! {
        DE = 2; DESTAG = 25; DESVER = 2; DESCLAS = 1; DESOFLW = 6; DESITEM = 3;
        DESSHL = 4;
    }
}

/// Reserved extension subheader
pub mod res {
    use super::FieldDef;

    fields! {
        RE = 2; RESTAG = 25; RESVER = 2; RESCLAS = 1; RESSHL = 4;
    }
}

/// Tagged record extension framing
pub mod tre {
    use super::FieldDef;

    fields! {
        CETAG = 6; CEL = 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_values_follow_width() {
        assert_eq!(NUMI.max_value(), 999);
        assert_eq!(LISH.max_value(), 999_999);
        assert_eq!(FL.max_value(), 999_999_999_999);
        assert_eq!(tre::CEL.max_value(), 99_999);
    }

    #[test]
    fn names_match_identifiers() {
        assert_eq!(image::IGEOLO.name, "IGEOLO");
        assert_eq!(des::DESOFLW.width, 6);
        assert_eq!(security21::CLTX.width, 43);
        assert_eq!(security20::CLTX.width, 40);
    }
}

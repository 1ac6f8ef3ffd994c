// src/error.rs
use std::io;
use thiserror::Error;

use crate::types::SegmentKind;

#[derive(Error, Debug)]
pub enum NitfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{field} must be in 0..=999, found {value}")]
    CountOutOfRange { field: &'static str, value: usize },

    #[error("{kind} index {index} out of range (segment count {count})")]
    SegmentIndexOutOfRange { kind: SegmentKind, index: usize, count: usize },

    #[error("Unsupported NITF version: FHDR={fhdr:?} FVER={fver:?}")]
    UnsupportedVersion { fhdr: String, fver: String },

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("No payload writer attached for {kind} segment {index}")]
    MissingPayloadWriter { kind: SegmentKind, index: usize },

    #[error("Field {field} overflow: {len} bytes do not fit in {width}")]
    FieldOverflow { field: &'static str, width: usize, len: usize },

    #[error("TRE {tag}: {message}")]
    Tre { tag: String, message: String },

    #[error("Invalid writer state: expected {expected}, found {found}")]
    InvalidState { expected: &'static str, found: String },

    #[error("Cannot parse field {field} from {value:?}")]
    Parse { field: &'static str, value: String },

    #[error("Invalid NITF header: {0}")]
    InvalidHeader(String),
}

pub type Result<T> = std::result::Result<T, NitfError>;

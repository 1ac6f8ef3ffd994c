// src/segment/mod.rs
mod info;
mod table;

pub use info::ComponentInfo;
pub use table::{
    ComponentTable, DATA_EXTENSION_TABLE, GRAPHIC_TABLE, IMAGE_TABLE, LABEL_TABLE,
    RESERVED_EXTENSION_TABLE, TEXT_TABLE,
};

// src/reader/mod.rs
mod subheaders;
mod sync_reader;

pub use subheaders::{
    read_des_subheader, read_extensions, read_graphic_subheader, read_image_subheader,
    read_label_subheader, read_res_subheader, read_text_subheader, read_tres,
};
pub use sync_reader::{NitfReader, ReadSeek, SegmentLocation};

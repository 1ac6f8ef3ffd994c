// src/writer/mod.rs
mod extensions;
mod payload;
mod report;
mod subheaders;
mod sync_writer;

pub use extensions::{write_extensions, write_tres};
pub use payload::{
    BufferImageWriter, BufferSegmentWriter, ImagePayloadWriter, ImageWriteParams, SegmentPayloadWriter,
};
pub use report::WriteReport;
pub use subheaders::{
    write_des_subheader, write_graphic_subheader, write_image_subheader, write_label_subheader,
    write_res_subheader, write_text_subheader,
};
pub use sync_writer::{NitfWriter, WriteState};

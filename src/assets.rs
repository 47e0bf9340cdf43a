pub mod cache;
pub mod decode;

pub use cache::FrameCache;
pub use decode::{decode_image, load_image, write_png};

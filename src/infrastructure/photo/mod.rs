//! Photo loading adapters

mod jpeg;

pub use jpeg::{fingerprint_bytes, to_jpeg, JpegImageSource, JPEG_QUALITY, MAX_SIDE};

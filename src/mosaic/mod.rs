pub mod builder;
pub mod error;

pub use builder::{BuildOptions, build_zone_mosaic};
pub use error::MosaicError;

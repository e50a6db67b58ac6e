pub mod chain;
pub mod error;
pub mod image;
pub mod normalize;
pub mod ocr;
pub mod providers;
pub mod retry;

#[cfg(test)]
mod image_tests;
#[cfg(test)]
mod normalize_tests;
#[cfg(test)]
mod ocr_tests;
#[cfg(test)]
mod providers_tests;

pub use chain::VisionChain;
pub use error::{Result, VisionError};
pub use image::ImagePayload;
pub use normalize::{normalize, normalize_objects, RawLabel, OBJECT_SCORE_DISCOUNT};
pub use ocr::{lookup_material_code, MaterialCodeExtractor, MATERIAL_CODE_TABLE};
pub use providers::VisionProvider;

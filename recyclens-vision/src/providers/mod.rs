pub mod adapter;
pub mod clarifai;
pub mod google;
pub mod openai;

pub use adapter::VisionProvider;

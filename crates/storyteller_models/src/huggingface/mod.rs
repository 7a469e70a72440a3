//! HuggingFace Inference API image captioning.

mod captioner;
mod dto;

pub use captioner::{HuggingFaceCaptioner, HuggingFaceConfig};

//! Google Translate text-to-speech.

mod chunking;
mod speaker;

pub use chunking::{MAX_CHUNK_CHARS, split_text};
pub use speaker::{GoogleTranslateSpeaker, GoogleTtsConfig};

//! Handler modules for debrief-api.
//!
//! One module per endpoint group: audio processing, chat, meeting retrieval.

pub mod audio;
pub mod chat;
pub mod meetings;

pub use audio::process_audio;
pub use chat::chat_message;
pub use meetings::{get_meeting, list_meetings};

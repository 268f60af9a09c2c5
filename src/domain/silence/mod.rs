//! Silence analysis domain - audio stream choice and gap coalescing

mod audio_stream;
mod coalesce;

pub use audio_stream::{select_audio_stream, AudioStream, SUPPORTED_AUDIO_CODECS};
pub use coalesce::{SilenceCoalescer, DEFAULT_MAX_COMM_BREAK_SECS, FRAMES_PER_SECOND};

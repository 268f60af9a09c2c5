//! Audio stream selection for silence analysis

/// Compressed broadcast audio codecs the silence splitter accepts
pub const SUPPORTED_AUDIO_CODECS: &[&str] = &["mp2", "mp3", "ac3", "eac3", "aac"];

/// Title/tag fragments marking an audio description track
const DESCRIPTIVE_MARKERS: &[&str] = &["visual impaired", "visually impaired", "audio description"];

/// Audio stream as reported by ffprobe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioStream {
    /// Absolute stream index within the container
    pub index: u32,
    pub codec: String,
    /// Stream flagged for visually impaired viewers
    pub visual_impaired: bool,
    /// Stream title or description tag, if any
    pub title: Option<String>,
}

impl AudioStream {
    /// Whether this is a descriptive (narrated) audio track
    pub fn is_descriptive(&self) -> bool {
        self.visual_impaired
            || self.title.as_deref().is_some_and(|title| {
                let title = title.to_lowercase();
                DESCRIPTIVE_MARKERS.iter().any(|m| title.contains(m))
            })
    }

    /// Whether the codec is one the splitter can read
    pub fn has_supported_codec(&self) -> bool {
        let codec = self.codec.to_lowercase();
        SUPPORTED_AUDIO_CODECS.contains(&codec.as_str())
    }
}

/// Pick the first main-audio stream with a supported codec
pub fn select_audio_stream(streams: &[AudioStream]) -> Option<&AudioStream> {
    streams
        .iter()
        .find(|s| s.has_supported_codec() && !s.is_descriptive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(index: u32, codec: &str) -> AudioStream {
        AudioStream {
            index,
            codec: codec.to_string(),
            visual_impaired: false,
            title: None,
        }
    }

    #[test]
    fn selects_first_supported_stream() {
        let streams = vec![stream(1, "pcm_s16le"), stream(2, "mp2"), stream(3, "ac3")];
        assert_eq!(select_audio_stream(&streams).map(|s| s.index), Some(2));
    }

    #[test]
    fn skips_visual_impaired_disposition() {
        let mut described = stream(1, "mp2");
        described.visual_impaired = true;
        let streams = vec![described, stream(2, "mp2")];
        assert_eq!(select_audio_stream(&streams).map(|s| s.index), Some(2));
    }

    #[test]
    fn skips_descriptive_title() {
        let mut described = stream(1, "aac");
        described.title = Some("English (Audio Description)".to_string());
        let streams = vec![described, stream(4, "eac3")];
        assert_eq!(select_audio_stream(&streams).map(|s| s.index), Some(4));
    }

    #[test]
    fn codec_match_is_case_insensitive() {
        assert!(stream(1, "AC3").has_supported_codec());
    }

    #[test]
    fn none_when_no_stream_qualifies() {
        let mut described = stream(1, "mp2");
        described.visual_impaired = true;
        assert!(select_audio_stream(&[described, stream(2, "flac")]).is_none());
        assert!(select_audio_stream(&[]).is_none());
    }
}

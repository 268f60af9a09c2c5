//! Cutlist builder and detection result

use std::fmt;

use super::segment::FrameSegment;

/// Separator written after every skip list entry
const ENTRY_TERMINATOR: char = ',';

/// Serialized skip list in the recorder's `start-end,` grammar.
///
/// Segments are kept in the order the detector produced them; the builder
/// never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cutlist {
    segments: Vec<FrameSegment>,
    text: String,
}

impl Cutlist {
    /// Build the skip list from detector output
    pub fn build(segments: Vec<FrameSegment>) -> Self {
        let mut text = String::new();
        for segment in &segments {
            text.push_str(&segment.to_string());
            text.push(ENTRY_TERMINATOR);
        }
        Self { segments, text }
    }

    /// Skip list text, e.g. `26-374,1000-9999999,`
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[FrameSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of internal cut points.
    ///
    /// Counted from the serialized text: every entry carries a terminator,
    /// and the last one closes the list rather than separating two breaks.
    pub fn break_count(&self) -> usize {
        self.text
            .matches(ENTRY_TERMINATOR)
            .count()
            .saturating_sub(1)
    }
}

impl fmt::Display for Cutlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Output of a detection strategy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetectionResult {
    pub cutlist: Cutlist,
    pub break_count: usize,
}

impl DetectionResult {
    /// Result for a detector run that found no breaks
    pub fn empty() -> Self {
        Self::default()
    }
}

impl From<Cutlist> for DetectionResult {
    fn from(cutlist: Cutlist) -> Self {
        let break_count = cutlist.break_count();
        Self {
            cutlist,
            break_count,
        }
    }
}

impl From<Vec<FrameSegment>> for DetectionResult {
    fn from(segments: Vec<FrameSegment>) -> Self {
        Cutlist::build(segments).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_joins_with_trailing_terminator() {
        let cutlist = Cutlist::build(vec![
            FrameSegment::closed(26, 374).unwrap(),
            FrameSegment::open(1000),
        ]);
        assert_eq!(cutlist.as_str(), "26-374,1000-9999999,");
        assert_eq!(cutlist.break_count(), 1);
    }

    #[test]
    fn single_segment_has_no_breaks() {
        let cutlist = Cutlist::build(vec![FrameSegment::open(1)]);
        assert_eq!(cutlist.as_str(), "1-9999999,");
        assert_eq!(cutlist.break_count(), 0);
    }

    #[test]
    fn empty_cutlist() {
        let cutlist = Cutlist::build(Vec::new());
        assert!(cutlist.is_empty());
        assert_eq!(cutlist.as_str(), "");
        assert_eq!(cutlist.break_count(), 0);
    }

    #[test]
    fn build_keeps_input_order() {
        let cutlist = Cutlist::build(vec![
            FrameSegment::closed(500, 600).unwrap(),
            FrameSegment::closed(100, 200).unwrap(),
        ]);
        assert_eq!(cutlist.as_str(), "500-600,100-200,");
    }

    #[test]
    fn detection_result_carries_break_count() {
        let result = DetectionResult::from(vec![
            FrameSegment::closed(2501, 2600).unwrap(),
            FrameSegment::closed(30001, 32000).unwrap(),
            FrameSegment::open(45001),
        ]);
        assert_eq!(result.break_count, 2);
        assert_eq!(result.cutlist.segments().len(), 3);
        assert_eq!(result.cutlist.to_string(), "2501-2600,30001-32000,45001-9999999,");
    }

    #[test]
    fn empty_result() {
        let result = DetectionResult::empty();
        assert!(result.cutlist.is_empty());
        assert_eq!(result.break_count, 0);
    }
}

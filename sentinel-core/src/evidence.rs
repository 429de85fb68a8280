//! Per-context evidence accumulated by the interceptor.
//!
//! One recorder belongs to exactly one drawing context for the lifetime of
//! the instrumentation. It is mutated only by the interceptor's wrapped
//! operations and read only at export-classification time. Nothing is
//! deduplicated at write time; distinct counts are computed on demand.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

/// Evidence about the drawing operations performed on a single 2D context.
///
/// Invariant: `used_fill_styles.len()` equals the number of text-drawing
/// calls made on the context. Save/restore never appends a style entry; it
/// only latches [`called_forbidden_function`](Self::called_forbidden_function).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceRecorder {
    written_text: String,
    used_fill_styles: Vec<String>,
    called_forbidden_function: bool,
}

impl EvidenceRecorder {
    /// Record one text-drawing call: the drawn string and the serialized
    /// fill style in effect immediately before the draw.
    pub fn record_text_draw(&mut self, text: &str, fill_style: String) {
        self.written_text.push_str(text);
        self.used_fill_styles.push(fill_style);
    }

    /// Latch the save/restore flag. Permanent once set.
    pub fn mark_forbidden(&mut self) {
        self.called_forbidden_function = true;
    }

    /// Concatenation of all drawn strings, in call order.
    pub fn written_text(&self) -> &str {
        &self.written_text
    }

    /// Serialized fill styles, one entry per text draw, in call order.
    pub fn used_fill_styles(&self) -> &[String] {
        &self.used_fill_styles
    }

    /// Whether save or restore was ever invoked on the context.
    pub fn called_forbidden_function(&self) -> bool {
        self.called_forbidden_function
    }

    /// Number of text-drawing calls observed.
    pub fn text_draw_count(&self) -> usize {
        self.used_fill_styles.len()
    }

    /// Count of distinct characters across all drawn text.
    pub fn distinct_glyphs(&self) -> usize {
        self.written_text.chars().collect::<BTreeSet<char>>().len()
    }

    /// Count of distinct serialized fill-style values.
    pub fn distinct_fill_styles(&self) -> usize {
        self.used_fill_styles
            .iter()
            .map(String::as_str)
            .collect::<BTreeSet<&str>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn text_accumulates_in_call_order() {
        let mut ev = EvidenceRecorder::default();
        ev.record_text_draw("abc", "\"#000\"".to_string());
        ev.record_text_draw("def", "\"#000\"".to_string());
        assert_eq!(ev.written_text(), "abcdef");
        assert_eq!(ev.text_draw_count(), 2);
    }

    #[test]
    fn distinct_glyphs_deduplicate_characters_not_strings() {
        let mut ev = EvidenceRecorder::default();
        ev.record_text_draw("aabb", "\"#000\"".to_string());
        ev.record_text_draw("abab", "\"#000\"".to_string());
        assert_eq!(ev.distinct_glyphs(), 2);
    }

    #[test]
    fn distinct_styles_deduplicate_values() {
        let mut ev = EvidenceRecorder::default();
        ev.record_text_draw("a", "\"#f00\"".to_string());
        ev.record_text_draw("b", "\"#0f0\"".to_string());
        ev.record_text_draw("c", "\"#f00\"".to_string());
        assert_eq!(ev.used_fill_styles().len(), 3);
        assert_eq!(ev.distinct_fill_styles(), 2);
    }

    #[test]
    fn forbidden_flag_latches() {
        let mut ev = EvidenceRecorder::default();
        assert!(!ev.called_forbidden_function());
        ev.mark_forbidden();
        ev.mark_forbidden();
        assert!(ev.called_forbidden_function());
    }

    #[test]
    fn one_style_entry_per_draw() {
        let mut ev = EvidenceRecorder::default();
        ev.record_text_draw("x", "\"#000\"".to_string());
        ev.mark_forbidden();
        ev.record_text_draw("y", "\"#000\"".to_string());
        assert_eq!(ev.used_fill_styles().len(), 2);
    }
}

//! The fingerprint-probe classifier.
//!
//! A pure decision function evaluated once per export. The rules run in a
//! fixed short-circuit order, each progressively more expensive and each a
//! necessary condition on its own:
//!
//! 1. Surfaces under 16px on either edge pass: too small to carry a useful
//!    pixel signature.
//! 2. Fewer than 10 distinct drawn characters AND fewer than 2 distinct fill
//!    styles pass: fingerprint probes draw varied glyphs across multiple
//!    colors to maximize rendering entropy, legitimate captions do not.
//! 3. Contexts that ever called save/restore pass.
//! 4. Everything else is flagged.
//!
//! Note on rule 3: treating save/restore as *suppressing* the flag is the
//! inverse of most published heuristics, which read state isolation per probe
//! as a fingerprinting tell. The polarity here is intentional and must not be
//! flipped without a product decision (see DESIGN.md).

use crate::evidence::EvidenceRecorder;

/// Surfaces narrower or shorter than this are never classified.
pub const MIN_SURFACE_EDGE: u32 = 16;

/// Distinct drawn characters at or above this count look probe-like.
pub const GLYPH_DIVERSITY_THRESHOLD: usize = 10;

/// Distinct fill styles at or above this count look probe-like.
pub const STYLE_DIVERSITY_THRESHOLD: usize = 2;

/// Outcome of classifying a single export event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Legitimate-looking canvas usage.
    Pass,
    /// Operation sequence matches a fingerprint-extraction pattern.
    Flag,
}

/// Classify one export of a `width` x `height` surface given the evidence
/// accumulated on its 2D context.
pub fn classify(width: u32, height: u32, evidence: &EvidenceRecorder) -> Verdict {
    if width < MIN_SURFACE_EDGE || height < MIN_SURFACE_EDGE {
        return Verdict::Pass;
    }

    if evidence.distinct_glyphs() < GLYPH_DIVERSITY_THRESHOLD
        && evidence.distinct_fill_styles() < STYLE_DIVERSITY_THRESHOLD
    {
        return Verdict::Pass;
    }

    if evidence.called_forbidden_function() {
        return Verdict::Pass;
    }

    Verdict::Flag
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::string::ToString;

    fn evidence(text: &str, styles: &[&str], forbidden: bool) -> EvidenceRecorder {
        let mut ev = EvidenceRecorder::default();
        let mut styles = styles.iter().cycle();
        // one style entry per draw, matching the recorder invariant
        for ch in text.chars() {
            let style = styles.next().map(|s| s.to_string()).unwrap_or_default();
            let mut buf = [0u8; 4];
            ev.record_text_draw(ch.encode_utf8(&mut buf), style);
        }
        if forbidden {
            ev.mark_forbidden();
        }
        ev
    }

    fn probe_evidence() -> EvidenceRecorder {
        evidence("abcdefghijkl", &["\"#f00\"", "\"#0f0\"", "\"#00f\""], false)
    }

    #[test]
    fn small_surfaces_always_pass() {
        let ev = probe_evidence();
        assert_eq!(classify(10, 50, &ev), Verdict::Pass);
        assert_eq!(classify(200, 10, &ev), Verdict::Pass);
        assert_eq!(classify(15, 15, &ev), Verdict::Pass);
    }

    #[test]
    fn sixteen_square_is_large_enough() {
        assert_eq!(classify(16, 16, &probe_evidence()), Verdict::Flag);
    }

    #[test]
    fn low_diversity_passes() {
        let ev = evidence("aaaaa", &["\"#000\""], false);
        assert_eq!(classify(200, 50, &ev), Verdict::Pass);
    }

    #[test]
    fn empty_evidence_passes() {
        assert_eq!(classify(200, 50, &EvidenceRecorder::default()), Verdict::Pass);
    }

    #[test]
    fn glyph_diversity_alone_is_enough() {
        // 10 distinct characters, single style: rule 2 no longer passes
        let ev = evidence("abcdefghij", &["\"#000\""], false);
        assert_eq!(classify(200, 50, &ev), Verdict::Flag);
    }

    #[test]
    fn style_diversity_alone_is_enough() {
        // 2 distinct styles, few glyphs: rule 2 no longer passes
        let ev = evidence("ab", &["\"#f00\"", "\"#0f0\""], false);
        assert_eq!(classify(200, 50, &ev), Verdict::Flag);
    }

    #[test]
    fn nine_glyphs_one_style_passes() {
        let ev = evidence("abcdefghi", &["\"#000\""], false);
        assert_eq!(classify(200, 50, &ev), Verdict::Pass);
    }

    #[test]
    fn save_restore_suppresses_the_flag() {
        let mut ev = probe_evidence();
        assert_eq!(classify(200, 50, &ev), Verdict::Flag);
        ev.mark_forbidden();
        assert_eq!(classify(200, 50, &ev), Verdict::Pass);
    }

    #[test]
    fn repeated_characters_do_not_add_diversity() {
        let mut ev = EvidenceRecorder::default();
        for _ in 0..50 {
            ev.record_text_draw("abc", String::from("\"#000\""));
        }
        assert_eq!(classify(200, 50, &ev), Verdict::Pass);
    }
}

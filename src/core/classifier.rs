//! Semantic classifier: maps an utterance onto a word spawn config
//!
//! Rules are tried in priority order and the first hit wins. Keyword sets
//! overlap (違う is both an impact word and a color-inversion cue, 逆 is part
//! of 逆に), so the order is part of the contract.

use std::f64::consts::PI;
use lazy_static::lazy_static;
use regex::Regex;
use crate::types::{ColorTag, WordSpawnConfig, WordStyle};

lazy_static! {
    // =========================================================================
    // Rule 1: Impact
    // =========================================================================
    static ref RE_IMPACT: Regex = Regex::new(r"絶対|嘘|違う|矛盾|変|おかしい").unwrap();

    // =========================================================================
    // Rules 2-4: Inversion (cue + inversion verb)
    // =========================================================================
    static ref RE_VERTICAL: Regex = Regex::new(r"上下|天井|逆さま").unwrap();
    static ref RE_HORIZONTAL: Regex = Regex::new(r"左右|鏡").unwrap();
    static ref RE_COLOR: Regex = Regex::new(r"色|カラー").unwrap();
    static ref RE_INVERT: Regex = Regex::new(r"反転|逆").unwrap();
    static ref RE_COLOR_INVERT: Regex = Regex::new(r"反転|違う").unwrap();

    // =========================================================================
    // Rule 5: Conjunctions (turn-taking cue)
    // =========================================================================
    static ref RE_CONJUNCTION: Regex = Regex::new(r"でも|しかし|だが|逆に|とは言え|けど|反対に").unwrap();

    // =========================================================================
    // Rule 6: Hesitation
    // =========================================================================
    static ref RE_HESITATION: Regex = Regex::new(r"えっと|うーん|あの|多分|かな|なんか|えー").unwrap();
}

/// Ordered keyword-rule engine
#[derive(Debug, Default)]
pub struct SemanticClassifier;

impl SemanticClassifier {
    /// Create new classifier
    pub fn new() -> Self {
        Self
    }

    /// Classify text into a fully populated spawn config
    pub fn classify(&self, text: &str) -> WordSpawnConfig {
        let mut cfg = WordSpawnConfig::new(text);

        if RE_IMPACT.is_match(text) {
            cfg.style = WordStyle::Impact;
            cfg.flash = true;
            cfg.shake = 20.0;
            cfg.color = Some(ColorTag::Red);
            cfg.scale = Some(2.5);
        } else if RE_VERTICAL.is_match(text) && RE_INVERT.is_match(text) {
            cfg.style = WordStyle::InvertV;
            cfg.rotation = PI;
            cfg.vy_mult = -1.0;
            cfg.color = Some(ColorTag::Cyan);
        } else if RE_HORIZONTAL.is_match(text) && RE_INVERT.is_match(text) {
            cfg.style = WordStyle::InvertH;
            cfg.scale_x = -1.0;
            cfg.color = Some(ColorTag::Cyan);
        } else if RE_COLOR.is_match(text) && RE_COLOR_INVERT.is_match(text) {
            cfg.style = WordStyle::InvertC;
            cfg.color = Some(ColorTag::Cyan);
        } else if RE_CONJUNCTION.is_match(text) {
            cfg.style = WordStyle::Conjunction;
            cfg.scale_x = -1.0;
            cfg.rotation = PI;
            cfg.color = Some(ColorTag::Yellow);
        } else if RE_HESITATION.is_match(text) {
            cfg.style = WordStyle::Hesitation;
            cfg.color = Some(ColorTag::Grey);
        }

        cfg
    }

    /// Quick classify - just the style
    pub fn style_of(&self, text: &str) -> WordStyle {
        self.classify(text).style
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_white() {
        let cfg = SemanticClassifier::new().classify("今日は晴れ");
        assert_eq!(cfg.style, WordStyle::Normal);
        assert_eq!(cfg.color, None);
        assert_eq!(cfg.scale_x, 1.0);
        assert_eq!(cfg.rotation, 0.0);
        assert_eq!(cfg.vy_mult, 1.0);
        assert!(!cfg.flash);
    }

    #[test]
    fn test_impact() {
        let cfg = SemanticClassifier::new().classify("絶対におかしい");
        assert_eq!(cfg.style, WordStyle::Impact);
        assert!(cfg.flash);
        assert_eq!(cfg.shake, 20.0);
        assert_eq!(cfg.scale, Some(2.5));
        assert_eq!(cfg.color, Some(ColorTag::Red));
    }

    #[test]
    fn test_impact_beats_conjunction() {
        let classifier = SemanticClassifier::new();
        assert_eq!(classifier.style_of("でもそれは嘘だ"), WordStyle::Impact);
    }

    #[test]
    fn test_vertical_inversion_needs_both_cues() {
        let classifier = SemanticClassifier::new();
        let cfg = classifier.classify("天井が反転した");
        assert_eq!(cfg.style, WordStyle::InvertV);
        assert_eq!(cfg.rotation, PI);
        assert_eq!(cfg.vy_mult, -1.0);
        assert_eq!(cfg.color, Some(ColorTag::Cyan));

        // Cue alone is ordinary speech
        assert_eq!(classifier.style_of("天井が高い"), WordStyle::Normal);
    }

    #[test]
    fn test_horizontal_inversion() {
        let cfg = SemanticClassifier::new().classify("鏡みたいに左右反転");
        assert_eq!(cfg.style, WordStyle::InvertH);
        assert_eq!(cfg.scale_x, -1.0);
    }

    #[test]
    fn test_vertical_precedes_horizontal() {
        let classifier = SemanticClassifier::new();
        assert_eq!(classifier.style_of("上下も左右も反転"), WordStyle::InvertV);
    }

    #[test]
    fn test_color_inversion() {
        let classifier = SemanticClassifier::new();
        assert_eq!(classifier.style_of("色を反転して"), WordStyle::InvertC);
        // 違う is an impact word, which outranks the color rule
        assert_eq!(classifier.style_of("色が違う"), WordStyle::Impact);
    }

    #[test]
    fn test_conjunction() {
        let cfg = SemanticClassifier::new().classify("しかしそれは");
        assert_eq!(cfg.style, WordStyle::Conjunction);
        assert_eq!(cfg.scale_x, -1.0);
        assert_eq!(cfg.rotation, PI);
        assert_eq!(cfg.color, Some(ColorTag::Yellow));
    }

    #[test]
    fn test_hesitation() {
        let cfg = SemanticClassifier::new().classify("えっと");
        assert_eq!(cfg.style, WordStyle::Hesitation);
        assert_eq!(cfg.color, Some(ColorTag::Grey));
    }

    #[test]
    fn test_conjunction_beats_hesitation() {
        assert_eq!(SemanticClassifier::new().style_of("うーん、でも"), WordStyle::Conjunction);
    }

    #[test]
    fn test_text_is_carried() {
        assert_eq!(SemanticClassifier::new().classify("なるほど").text, "なるほど");
    }
}

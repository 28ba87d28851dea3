//! Normalization of raw model payloads into flat score lists.

use serde::Deserialize;

use crate::types::LabelScore;

/// Emotion labels that mark a record as negative when scored strictly
/// above [`NEGATIVE_THRESHOLD`].
pub(crate) const NEGATIVE_LABELS: [&str; 3] = ["sadness", "anger", "fear"];

pub(crate) const NEGATIVE_THRESHOLD: f64 = 0.5;

/// Raw response of a text-classification model.
///
/// Deployments of the same model disagree on shape: some return a flat
/// list of label/score pairs, others wrap that list in a single-element
/// outer list. Both decode here; [`ScorePayload::into_flat`] collapses
/// them into one flat list before any inspection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScorePayload {
    Flat(Vec<LabelScore>),
    Nested(Vec<Vec<LabelScore>>),
}

impl ScorePayload {
    #[must_use]
    pub fn into_flat(self) -> Vec<LabelScore> {
        match self {
            ScorePayload::Flat(scores) => scores,
            ScorePayload::Nested(nested) => nested.into_iter().flatten().collect(),
        }
    }
}

/// True iff any negative emotion label scores strictly above the
/// threshold. Label matching is case-insensitive; a score of exactly 0.5
/// does not flag.
#[must_use]
pub fn is_negative(scores: &[LabelScore]) -> bool {
    scores.iter().any(|s| {
        s.score > NEGATIVE_THRESHOLD
            && NEGATIVE_LABELS
                .iter()
                .any(|label| s.label.eq_ignore_ascii_case(label))
    })
}

/// Reduce a toxicity label distribution to a single probability: the
/// `toxic` label's score when present, else the highest score. Empty
/// distributions score 0.0.
#[must_use]
pub fn toxicity_from_scores(scores: &[LabelScore]) -> f64 {
    scores
        .iter()
        .find(|s| s.label.eq_ignore_ascii_case("toxic"))
        .map(|s| s.score)
        .or_else(|| scores.iter().map(|s| s.score).reduce(f64::max))
        .unwrap_or(0.0)
}

/// Prefix of `text` with at most `limit` chars, sliced at a char
/// boundary so multi-byte text cannot panic.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, value: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score: value,
        }
    }

    #[test]
    fn flat_payload_decodes() {
        let payload: ScorePayload = serde_json::from_str(
            r#"[{"label": "joy", "score": 0.8}, {"label": "sadness", "score": 0.1}]"#,
        )
        .unwrap();
        let flat = payload.into_flat();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].label, "joy");
    }

    #[test]
    fn nested_payload_decodes_and_flattens() {
        let payload: ScorePayload = serde_json::from_str(
            r#"[[{"label": "joy", "score": 0.8}, {"label": "sadness", "score": 0.1}]]"#,
        )
        .unwrap();
        let flat = payload.into_flat();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[1].label, "sadness");
    }

    #[test]
    fn flat_and_nested_shapes_agree_on_negative_flag() {
        let raw_flat = r#"[{"label": "anger", "score": 0.9}]"#;
        let raw_nested = r#"[[{"label": "anger", "score": 0.9}]]"#;

        let flat: ScorePayload = serde_json::from_str(raw_flat).unwrap();
        let nested: ScorePayload = serde_json::from_str(raw_nested).unwrap();

        assert_eq!(
            is_negative(&flat.into_flat()),
            is_negative(&nested.into_flat())
        );
    }

    #[test]
    fn negative_requires_strictly_above_threshold() {
        assert!(!is_negative(&[score("sadness", 0.5)]));
        assert!(is_negative(&[score("sadness", 0.500_1)]));
    }

    #[test]
    fn negative_label_match_is_case_insensitive() {
        assert!(is_negative(&[score("Fear", 0.7)]));
        assert!(is_negative(&[score("ANGER", 0.7)]));
    }

    #[test]
    fn positive_labels_never_flag() {
        assert!(!is_negative(&[score("joy", 0.99), score("surprise", 0.9)]));
    }

    #[test]
    fn empty_scores_are_not_negative() {
        assert!(!is_negative(&[]));
    }

    #[test]
    fn toxicity_prefers_toxic_label() {
        let scores = [score("severe_toxic", 0.9), score("toxic", 0.4)];
        assert!((toxicity_from_scores(&scores) - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn toxicity_falls_back_to_max_score() {
        let scores = [score("insult", 0.2), score("threat", 0.6)];
        assert!((toxicity_from_scores(&scores) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn toxicity_of_empty_distribution_is_zero() {
        assert!((toxicity_from_scores(&[]) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn truncate_shorter_text_is_untouched() {
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn truncate_cuts_at_limit() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        let text = "héllo wörld";
        let cut = truncate_chars(text, 4);
        assert_eq!(cut, "héll");
        assert_eq!(cut.chars().count(), 4);
    }
}

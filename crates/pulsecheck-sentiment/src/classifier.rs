//! Lexicon/valence sentiment classifier.

use crate::types::Sentiment;

/// Valence weights for general-domain sentiment words.
///
/// Keys are lowercase single words. Magnitudes follow the usual valence-model
/// scale of roughly `[-4.0, 4.0]`; the compound score normalizes the sum back
/// into `[-1.0, 1.0]`.
const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("like", 1.5),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("victory", 2.9),
    ("success", 2.7),
    ("successful", 2.6),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("innovative", 2.0),
    ("breakthrough", 2.1),
    ("promising", 1.8),
    ("popular", 1.7),
    ("safe", 1.9),
    ("strong", 2.3),
    ("happy", 2.7),
    ("excited", 2.4),
    ("exciting", 2.2),
    ("thriving", 2.6),
    ("growth", 1.9),
    ("growing", 1.6),
    ("approved", 1.8),
    ("positive", 2.3),
    ("benefit", 1.9),
    ("beneficial", 1.9),
    ("recommend", 1.7),
    ("recommended", 1.8),
    ("quality", 1.6),
    ("impressive", 2.3),
    ("helpful", 1.9),
    ("useful", 1.8),
    // Negative signals
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("hate", -2.7),
    ("hated", -2.6),
    ("fail", -2.3),
    ("failed", -2.3),
    ("failure", -2.4),
    ("fails", -2.2),
    ("problem", -1.7),
    ("problems", -1.7),
    ("concern", -1.4),
    ("concerns", -1.4),
    ("concerned", -1.4),
    ("warning", -1.4),
    ("risk", -1.1),
    ("risky", -1.3),
    ("dangerous", -2.2),
    ("harmful", -2.2),
    ("damage", -1.8),
    ("crisis", -2.3),
    ("scandal", -2.2),
    ("lawsuit", -1.6),
    ("ban", -2.1),
    ("banned", -2.1),
    ("illegal", -2.4),
    ("fraud", -2.8),
    ("scam", -2.6),
    ("decline", -1.6),
    ("declining", -1.6),
    ("loss", -1.9),
    ("losses", -1.9),
    ("lost", -1.6),
    ("broken", -1.6),
    ("threat", -1.8),
    ("fear", -1.9),
    ("angry", -2.3),
    ("disappointing", -2.1),
    ("disappointed", -2.2),
    ("poor", -2.1),
    ("weak", -1.6),
    ("crash", -2.0),
    ("collapse", -2.2),
    ("controversy", -1.6),
    ("controversial", -1.3),
    ("wrong", -2.1),
    ("sad", -2.1),
];

/// Words that flip the valence of a nearby sentiment word.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "neither", "nor", "cannot", "hardly", "barely", "isn't",
    "wasn't", "aren't", "weren't", "don't", "doesn't", "didn't", "won't", "can't", "couldn't",
    "shouldn't", "wouldn't", "ain't", "without",
];

/// Dampening applied to a valence hit preceded by a negation.
const NEGATION_SCALAR: f32 = -0.74;

/// Normalization constant: compound = sum / sqrt(sum^2 + ALPHA).
const ALPHA: f32 = 15.0;

/// How many preceding tokens are scanned for a negation.
const NEGATION_WINDOW: usize = 2;

fn normalize_token(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

fn valence_of(token: &str) -> Option<f32> {
    LEXICON
        .iter()
        .find(|&&(word, _)| word == token)
        .map(|&(_, valence)| valence)
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token)
}

/// Compound polarity score for a text, in `[-1.0, 1.0]`.
///
/// Tokenizes on whitespace, strips punctuation, sums lexicon valences (a hit
/// within [`NEGATION_WINDOW`] tokens of a negation is flipped and dampened by
/// [`NEGATION_SCALAR`]), and normalizes the sum with `x / sqrt(x^2 + ALPHA)`.
/// Empty or unknown text scores `0.0`.
#[must_use]
pub fn compound_score(text: &str) -> f32 {
    let tokens: Vec<String> = text.split_whitespace().map(normalize_token).collect();

    let mut sum = 0.0_f32;
    for (i, token) in tokens.iter().enumerate() {
        let Some(mut valence) = valence_of(token) else {
            continue;
        };
        let window_start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..i].iter().any(|t| is_negation(t)) {
            valence *= NEGATION_SCALAR;
        }
        sum += valence;
    }

    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Classify a text into a three-way sentiment label.
///
/// Thresholds on the compound score: `>= 0.05` Positive, `<= -0.05` Negative,
/// otherwise Neutral. Deterministic and stateless; empty or whitespace-only
/// text is Neutral.
#[must_use]
pub fn classify(text: &str) -> Sentiment {
    let compound = compound_score(text);
    if compound >= 0.05 {
        Sentiment::Positive
    } else if compound <= -0.05 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_neutral() {
        assert_eq!(classify(""), Sentiment::Neutral);
    }

    #[test]
    fn whitespace_only_is_neutral() {
        assert_eq!(classify("   \t  "), Sentiment::Neutral);
    }

    #[test]
    fn unknown_text_is_neutral() {
        assert_eq!(classify("the quick brown fox jumps over it"), Sentiment::Neutral);
    }

    #[test]
    fn positive_keyword_classifies_positive() {
        assert_eq!(classify("this launch looks great"), Sentiment::Positive);
    }

    #[test]
    fn negative_keyword_classifies_negative() {
        assert_eq!(classify("the rollout was a failure"), Sentiment::Negative);
    }

    #[test]
    fn negation_flips_positive_to_negative() {
        assert_eq!(classify("the update is not good"), Sentiment::Negative);
    }

    #[test]
    fn negation_flips_negative_to_positive() {
        assert_eq!(classify("honestly not bad at all"), Sentiment::Positive);
    }

    #[test]
    fn punctuation_stripped_from_words() {
        let score = compound_score("great!");
        assert!(score > 0.0, "expected positive score for 'great!', got {score}");
    }

    #[test]
    fn compound_stays_within_unit_range() {
        let stacked = "best great excellent love awesome win victory amazing impressive";
        let score = compound_score(stacked);
        assert!(score > 0.9 && score <= 1.0, "got {score}");

        let stacked = "worst hate fraud terrible awful dangerous crisis scandal collapse";
        let score = compound_score(stacked);
        assert!(score < -0.9 && score >= -1.0, "got {score}");
    }

    #[test]
    fn classify_is_deterministic() {
        let text = "great product but a lawsuit is a concern";
        let first = classify(text);
        for _ in 0..10 {
            assert_eq!(classify(text), first);
        }
    }

    #[test]
    fn mixed_text_lands_between_extremes() {
        let score = compound_score("great product but there was a lawsuit");
        assert!(score > -1.0 && score < 1.0, "got {score}");
    }
}

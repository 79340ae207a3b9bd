//! Contextual rules engine.
//!
//! Every token whose `value` is a lexicon key starts from its lexicon score and
//! goes through the per-token rules in a fixed order, each one consuming the
//! previous result:
//!
//! 1. negation     (words only)  nearest negator in the 3 preceding tokens
//! 2. booster      preceding booster word, else following intensifier (x1.1)
//! 3. caps         (words only)  fully uppercase surface, len > 1 (x1.2)
//! 4. punctuation  (words only)  `!` / `?` attached to the token
//! 5. modifier     hedge word in the 2 preceding tokens
//! 6. contrast     contrast conjunction in the 5 preceding tokens (x1.3)
//!
//! After the loop two global rules reshape the running total: emoji polarity
//! counts and text-wide `!`/`?` counts.
//!
//! Window rules only look at non-emoji neighbours.

use crate::lexicon::Lexicon;
use crate::tables::{booster_multiplier, is_contrast, is_intensifier, is_negator, modifier_factor};
use crate::tokenizer::Token;

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.74;
const NEGATION_DECAY: f64 = 0.1;
const INTENSIFIER_BOOST: f64 = 1.1;
const CAPS_BOOST: f64 = 1.2;
const MODIFIER_WINDOW: usize = 2;
const CONTRAST_WINDOW: usize = 5;
const CONTRAST_BOOST: f64 = 1.3;

/// Apply all rules over `tokens` (in textual order).
/// Returns `(raw_score, word_count)` where `word_count` counts lexicon hits.
pub fn apply_rules(tokens: &[Token], lexicon: &Lexicon) -> (f64, usize) {
    let mut score = 0.0;
    let mut word_count = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(base) = lexicon.score(&token.value) else {
            continue;
        };
        score += score_token(tokens, i, base);
        word_count += 1;
    }

    (apply_global_rules(tokens, lexicon, score), word_count)
}

/// Contextual score of the lexicon hit at `index`, starting from `base`.
pub fn score_token(tokens: &[Token], index: usize, base: f64) -> f64 {
    let token = &tokens[index];
    let mut s = base;

    if !token.is_emoji {
        s = negation(tokens, index, s);
    }
    s = booster(tokens, index, s);
    if !token.is_emoji {
        s = caps(token, s);
    }
    s = punctuation(token, s);
    s = modifier(tokens, index, s);
    contrast(tokens, index, s)
}

fn negation(tokens: &[Token], index: usize, score: f64) -> f64 {
    let nearest = (1..=NEGATION_WINDOW.min(index)).find(|&d| {
        let prev = &tokens[index - d];
        !prev.is_emoji && is_negator(&prev.value)
    });
    match nearest {
        Some(d) => score * NEGATION_FACTOR * (1.0 - (d - 1) as f64 * NEGATION_DECAY),
        None => score,
    }
}

fn booster(tokens: &[Token], index: usize, score: f64) -> f64 {
    if index > 0 {
        let prev = &tokens[index - 1];
        if !prev.is_emoji {
            if let Some(m) = booster_multiplier(&prev.value) {
                return score * m;
            }
        }
    }
    match tokens.get(index + 1) {
        Some(next) if !next.is_emoji && is_intensifier(&next.value) => score * INTENSIFIER_BOOST,
        _ => score,
    }
}

fn caps(token: &Token, score: f64) -> f64 {
    let surface = token.surface();
    if surface.chars().count() > 1 && is_all_caps(surface) {
        score * CAPS_BOOST
    } else {
        score
    }
}

/// At least one cased letter and no lowercase ones.
fn is_all_caps(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

fn punctuation(token: &Token, score: f64) -> f64 {
    if token.is_emoji {
        return score;
    }
    let excl = token.exclamations();
    if excl > 0 {
        return score * (1.0 + excl as f64 * 0.1);
    }
    let quest = token.questions();
    if quest > 0 {
        return score * (1.0 - quest as f64 * 0.05);
    }
    score
}

fn modifier(tokens: &[Token], index: usize, score: f64) -> f64 {
    let start = index.saturating_sub(MODIFIER_WINDOW);
    tokens[start..index]
        .iter()
        .filter(|t| !t.is_emoji)
        .find_map(|t| modifier_factor(&t.value))
        .map_or(score, |f| score * f)
}

fn contrast(tokens: &[Token], index: usize, score: f64) -> f64 {
    let start = index.saturating_sub(CONTRAST_WINDOW);
    let hit = tokens[start..index]
        .iter()
        .any(|t| !t.is_emoji && is_contrast(&t.value));
    if hit {
        score * CONTRAST_BOOST
    } else {
        score
    }
}

/// Text-wide adjustments: emoji polarity counts, then `!`/`?` totals.
pub fn apply_global_rules(tokens: &[Token], lexicon: &Lexicon, mut score: f64) -> f64 {
    let (mut positive, mut negative) = (0usize, 0usize);
    for t in tokens.iter().filter(|t| t.is_emoji) {
        match lexicon.score(&t.value) {
            Some(s) if s > 0.0 => positive += 1,
            Some(s) if s < 0.0 => negative += 1,
            _ => {}
        }
    }
    if positive > 1 {
        score *= 1.0 + positive as f64 * 0.05;
    }
    if negative > 1 {
        score *= 1.0 - negative as f64 * 0.05;
    }

    let exclamations: usize = tokens.iter().map(Token::exclamations).sum();
    let questions: usize = tokens.iter().map(Token::questions).sum();
    if exclamations > 0 {
        score *= 1.0 + exclamations.min(10) as f64 * 0.05;
    }
    if questions > 3 {
        score *= 1.0 - (questions - 3).min(5) as f64 * 0.03;
    }
    score
}

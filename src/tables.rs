// src/tables.rs
//! Closed lookup tables of Russian function words used by the contextual rules.
//! Built once on first use, read-only afterwards.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Words that scale the next scored word. Multipliers can zero out or invert polarity.
static BOOSTERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("прекрасно", 4.0),
        ("идеально", 4.0),
        ("восхитительно", 4.0),
        ("блестяще", 4.0),
        ("великолепно", 4.0),
        ("потрясающе", 3.0),
        ("изумительно", 3.0),
        ("невероятно", 3.0),
        ("очень", 2.0),
        ("чрезвычайно", 2.0),
        ("исключительно", 2.0),
        ("необычайно", 2.0),
        ("довольно", 1.0),
        ("весьма", 1.0),
        ("достаточно", 1.0),
        ("абсолютно", 0.0),
        ("совершенно", 0.0),
        ("полностью", 0.0),
        ("целиком", 0.0),
        ("прямо", 0.0),
        ("просто", 0.0),
        ("прямо-таки", 0.0),
        ("даже", 0.0),
        ("вот", 0.0),
        ("же", 0.0),
        ("слишком", -1.0),
        ("чрезмерно", -1.0),
        ("катастрофически", -2.0),
        ("критически", -2.0),
        ("ужасно", -2.0),
        ("кошмарно", -2.0),
        ("отвратительно", -4.0),
        ("омерзительно", -4.0),
        ("ужасающе", -3.0),
        ("невыносимо", -3.0),
        ("нестерпимо", -3.0),
    ])
});

/// Hedge words and their damping factors.
// Multi-word entries cannot match a single token.
static MODIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("вроде", 0.7),
        ("как бы", 0.6),
        ("типа", 0.7),
        ("почти", 0.8),
        ("слегка", 0.8),
        ("немного", 0.8),
        ("отчасти", 0.9),
        ("частично", 0.9),
        ("не совсем", 0.5),
        ("в некоторой степени", 0.8),
    ])
});

pub fn booster_multiplier(word: &str) -> Option<f64> {
    BOOSTERS.get(word).copied()
}

pub fn modifier_factor(word: &str) -> Option<f64> {
    MODIFIERS.get(word).copied()
}

pub fn is_negator(word: &str) -> bool {
    matches!(
        word,
        "не" | "нет"
            | "ни"
            | "никогда"
            | "нисколько"
            | "никак"
            | "ничуть"
            | "ничего"
            | "никуда"
            | "нигде"
            | "никто"
            | "ничто"
    )
}

/// Words that strengthen the *preceding* scored word.
pub fn is_intensifier(word: &str) -> bool {
    matches!(
        word,
        "же" | "ведь" | "вот" | "прямо" | "просто" | "действительно" | "именно" | "точно" | "ровно"
    )
}

pub fn is_contrast(word: &str) -> bool {
    matches!(word, "но" | "однако" | "тем не менее" | "впрочем")
}

// src/encoding.rs
//! Single-byte Cyrillic code pages (windows-1251, cp866, koi8-r).
//!
//! Only the Cyrillic letters, ASCII and a handful of common punctuation bytes
//! are mapped; any other high byte makes the decode fail so the caller can try
//! the next code page.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePage {
    Windows1251,
    Cp866,
    Koi8R,
}

impl CodePage {
    pub const ALL: [CodePage; 3] = [CodePage::Windows1251, CodePage::Cp866, CodePage::Koi8R];

    fn decode_byte(self, b: u8) -> Option<char> {
        if b < 0x80 {
            return Some(b as char);
        }
        match self {
            CodePage::Windows1251 => match b {
                0xC0..=0xFF => char::from_u32(0x0410 + u32::from(b - 0xC0)),
                0xA8 => Some('Ё'),
                0xB8 => Some('ё'),
                0xA0 => Some('\u{00A0}'),
                0x85 => Some('…'),
                0x91 => Some('‘'),
                0x92 => Some('’'),
                0x93 => Some('“'),
                0x94 => Some('”'),
                0x96 => Some('–'),
                0x97 => Some('—'),
                0xAB => Some('«'),
                0xB9 => Some('№'),
                0xBB => Some('»'),
                _ => None,
            },
            CodePage::Cp866 => match b {
                0x80..=0xAF => char::from_u32(0x0410 + u32::from(b - 0x80)),
                0xE0..=0xEF => char::from_u32(0x0440 + u32::from(b - 0xE0)),
                0xF0 => Some('Ё'),
                0xF1 => Some('ё'),
                0xFC => Some('№'),
                0xFF => Some('\u{00A0}'),
                _ => None,
            },
            CodePage::Koi8R => match b {
                0xC0..=0xDF => KOI8_LOWER.chars().nth(usize::from(b - 0xC0)),
                0xE0..=0xFF => KOI8_UPPER.chars().nth(usize::from(b - 0xE0)),
                0xA3 => Some('ё'),
                0xB3 => Some('Ё'),
                0x9A => Some('\u{00A0}'),
                _ => None,
            },
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        bytes.iter().map(|&b| self.decode_byte(b)).collect()
    }
}

const KOI8_LOWER: &str = "юабцдефгхийклмнопярстужвьызшэщчъ";
const KOI8_UPPER: &str = "ЮАБЦДЕФГХИЙКЛМНОПЯРСТУЖВЬЫЗШЭЩЧЪ";

/// Only Russian letters, whitespace and hyphens.
pub fn is_valid_russian(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё' | '-') || c.is_whitespace())
}

/// Undo mojibake produced by reading single-byte Cyrillic as Latin-1.
/// Returns the input unchanged when no code page yields valid Russian.
pub fn repair_mojibake(text: &str) -> String {
    if text.is_empty() || is_valid_russian(text) {
        return text.to_string();
    }
    let Some(latin1) = to_latin1(text) else {
        return text.to_string();
    };
    CodePage::ALL
        .iter()
        .filter_map(|cp| cp.decode(&latin1))
        .find(|s| is_valid_russian(s))
        .unwrap_or_else(|| text.to_string())
}

fn to_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect()
}

/// Decode file bytes: UTF-8 first, then the Cyrillic code pages in order.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Some(s.strip_prefix('\u{feff}').unwrap_or(s).to_string());
    }
    [CodePage::Windows1251, CodePage::Koi8R]
        .iter()
        .find_map(|cp| cp.decode(bytes))
}

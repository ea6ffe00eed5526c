//! Title collation following Ukrainian ("uk") ordering rules.
//!
//! Comparison is done in four passes: primary weights (script group, then
//! base letter position, case-insensitive), then accents, then case
//! (lowercase first), then raw code points so that distinct strings never
//! compare equal.
//!
//! Letters outside the Ukrainian alphabet are decomposed (NFD) so that `é`
//! and `ё` share the primary weight of `e` and `е`. Ukrainian `й` and `ї`
//! are letters of their own and are never decomposed.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Ukrainian alphabet in collation order
const UK_ALPHABET: [char; 33] = [
    'а', 'б', 'в', 'г', 'ґ', 'д', 'е', 'є', 'ж', 'з', 'и', 'і', 'ї', 'й', 'к', 'л', 'м', 'н', 'о',
    'п', 'р', 'с', 'т', 'у', 'ф', 'х', 'ц', 'ч', 'ш', 'щ', 'ь', 'ю', 'я',
];

/// Script groups in sort order. Cyrillic is reordered ahead of Latin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Space,
    Punct,
    Digit,
    Cyrillic,
    Latin,
    Other,
}

fn primary_weight(c: char) -> (Group, u32) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    if lower.is_whitespace() {
        return (Group::Space, 0);
    }
    if let Some(d) = lower.to_digit(10) {
        return (Group::Digit, d);
    }
    if let Some(pos) = UK_ALPHABET.iter().position(|&l| l == lower) {
        return (Group::Cyrillic, pos as u32);
    }
    if ('\u{0400}'..='\u{04FF}').contains(&lower) {
        // Non-Ukrainian Cyrillic letters follow the Ukrainian alphabet
        return (Group::Cyrillic, UK_ALPHABET.len() as u32 + lower as u32);
    }
    if lower.is_ascii_lowercase() {
        return (Group::Latin, lower as u32 - 'a' as u32);
    }
    if lower.is_alphabetic() {
        return (Group::Other, lower as u32);
    }
    (Group::Punct, lower as u32)
}

fn case_weight(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

/// Per-letter weights of one string
#[derive(Debug, Default)]
struct SortKey {
    primary: Vec<(Group, u32)>,
    accents: Vec<Vec<char>>,
    case: Vec<u8>,
}

impl SortKey {
    fn new(s: &str) -> Self {
        let mut key = SortKey::default();
        for c in s.chars() {
            if is_combining_mark(c) {
                // Stray mark: belongs to the preceding letter
                if let Some(last) = key.accents.last_mut() {
                    last.push(c);
                }
                continue;
            }
            let lower = c.to_lowercase().next().unwrap_or(c);
            let (base, marks) = if UK_ALPHABET.contains(&lower) {
                (c, Vec::new())
            } else {
                let mut parts = std::iter::once(c).nfd();
                let base = parts.next().unwrap_or(c);
                (base, parts.filter(|&m| is_combining_mark(m)).collect())
            };
            key.primary.push(primary_weight(base));
            key.accents.push(marks);
            key.case.push(case_weight(c));
        }
        key
    }
}

/// Compare two strings using Ukrainian collation. Total order.
pub fn compare(a: &str, b: &str) -> Ordering {
    let (ka, kb) = (SortKey::new(a), SortKey::new(b));
    ka.primary
        .cmp(&kb.primary)
        .then_with(|| ka.accents.cmp(&kb.accents))
        .then_with(|| ka.case.cmp(&kb.case))
        .then_with(|| a.cmp(b))
}

//! Text normalization shared by slug derivation, keyword matching, and the
//! Czech product sort.
//!
//! All matching in this codebase is case- and diacritic-insensitive: text is
//! lowercased, decomposed to NFD, and combining marks are dropped before any
//! substring comparison. `"Letecké zážitky"` and `"letecke zazitky"` fold to
//! the same string.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds text for comparison: lowercase, NFD decompose, strip combining marks.
#[must_use]
pub fn fold_text(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Derives a URL slug from a product name and its upstream id.
///
/// The name is folded, every run of non-`[a-z0-9]` characters becomes a
/// single hyphen, leading/trailing hyphens are trimmed, and `-<id>` is
/// appended. A name that normalizes to nothing (punctuation-only) falls back
/// to `item-<id>` so slugs never start with a hyphen.
#[must_use]
pub fn slugify(name: &str, id: &str) -> String {
    let folded = fold_text(name);
    let mut base = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !base.is_empty() {
                base.push('-');
            }
            base.push(c);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }
    if base.is_empty() {
        format!("item-{id}")
    } else {
        format!("{base}-{id}")
    }
}

/// Extracts the upstream id embedded at the end of a slug: the substring
/// after the last hyphen. Returns the whole slug if it has no hyphen.
#[must_use]
pub fn id_from_slug(slug: &str) -> &str {
    slug.rsplit('-').next().unwrap_or(slug)
}

/// Compares two strings in Czech alphabetical order.
///
/// Primary-strength collation only: the distinct Czech letters č, ř, š, ž
/// sort after their base letters, the `ch` digraph sorts after `h`, and all
/// other accents (á, é, í, ů, ý, ď, ť, ň...) fold to their base letter. Ties
/// at the primary level fall back to a plain string compare, which keeps the
/// ordering total and deterministic. Not full UCA, but correct for the
/// product names this site sorts.
#[must_use]
pub fn czech_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    czech_sort_key(a)
        .cmp(&czech_sort_key(b))
        .then_with(|| a.cmp(b))
}

/// Builds the primary-strength collation key used by [`czech_cmp`].
#[must_use]
pub fn czech_sort_key(value: &str) -> Vec<u8> {
    const CARON: char = '\u{030c}';

    let mut key = Vec::with_capacity(value.len());
    let lowered = value.to_lowercase();
    let mut chars = lowered.nfd().peekable();
    while let Some(c) = chars.next() {
        if is_combining_mark(c) {
            continue;
        }
        // Collect combining marks attached to this base character; only the
        // caron is primary-significant in Czech.
        let mut caron = false;
        while let Some(&mark) = chars.peek() {
            if !is_combining_mark(mark) {
                break;
            }
            if mark == CARON {
                caron = true;
            }
            chars.next();
        }
        if c == 'c' && !caron && chars.peek() == Some(&'h') {
            chars.next();
            key.push(CH_RANK);
            continue;
        }
        if let Some(rank) = letter_rank(c, caron) {
            key.push(rank);
        } else if c.is_ascii_digit() {
            // Digits sort before letters, in numeric order.
            key.push(1 + (c as u8 - b'0'));
        }
        // Whitespace and punctuation are ignored at the primary level.
    }
    key
}

const CH_RANK: u8 = 29;

fn letter_rank(c: char, caron: bool) -> Option<u8> {
    let rank = match (c, caron) {
        ('a', _) => 20,
        ('b', _) => 21,
        ('c', false) => 22,
        ('c', true) => 23,
        ('d', _) => 24,
        ('e', _) => 25,
        ('f', _) => 26,
        ('g', _) => 27,
        ('h', _) => 28,
        // 29 is reserved for the "ch" digraph.
        ('i', _) => 30,
        ('j', _) => 31,
        ('k', _) => 32,
        ('l', _) => 33,
        ('m', _) => 34,
        ('n', _) => 35,
        ('o', _) => 36,
        ('p', _) => 37,
        ('q', _) => 38,
        ('r', false) => 39,
        ('r', true) => 40,
        ('s', false) => 41,
        ('s', true) => 42,
        ('t', _) => 43,
        ('u', _) => 44,
        ('v', _) => 45,
        ('w', _) => 46,
        ('x', _) => 47,
        ('y', _) => 48,
        ('z', false) => 49,
        ('z', true) => 50,
        _ => return None,
    };
    Some(rank)
}

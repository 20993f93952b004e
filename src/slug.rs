//! Slug generation: transliteration and sibling disambiguation.
//!
//! Titles are arbitrary text; slugs are the filesystem-safe identity derived
//! from them. Non-ASCII text is approximated in ASCII by NFKD decomposition
//! (dropping combining marks, which flattens accented Latin) plus a Cyrillic
//! transliteration table. Runs of anything else collapse to a single hyphen.

use crate::address::NodeHandle;
use crate::storage::Storage;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Placeholder used when a title yields no usable characters.
pub const FALLBACK_SLUG: &str = "item";

/// Derive a candidate slug from a human title. The output always matches
/// `^[a-z0-9]+(-[a-z0-9]+)*$` or is the fallback placeholder.
pub fn slugify(title: &str) -> String {
    let mut out = String::new();
    let mut pending_hyphen = false;
    for ch in title.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        match map_char(ch) {
            // Empty transliterations (hard/soft signs) vanish without
            // flushing a pending separator.
            Some(s) if s.is_empty() => {}
            Some(s) => {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                out.push_str(&s);
                pending_hyphen = false;
            }
            None => pending_hyphen = true,
        }
    }
    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}

/// Append `-2`, `-3`, ... until no sibling directory occupies the slug.
/// Check-then-create is not atomic; the repository serializes writers.
pub fn unique_slug(storage: &dyn Storage, parent: &NodeHandle, base: &str) -> String {
    let mut candidate = base.to_string();
    let mut counter = 2u32;
    while storage.exists(&parent.child(&candidate).rel_path()) {
        candidate = format!("{}-{}", base, counter);
        counter += 1;
    }
    candidate
}

fn map_char(ch: char) -> Option<String> {
    if ch.is_ascii_alphanumeric() {
        return Some(ch.to_ascii_lowercase().to_string());
    }
    let mut out = String::new();
    let mut matched = false;
    for lower in ch.to_lowercase() {
        if let Some(t) = transliterate_cyrillic(lower) {
            out.push_str(t);
            matched = true;
        }
    }
    matched.then_some(out)
}

// NFKD has already split off combining marks, so the soft-vowel variants
// (й, ё) arrive here as their base letters.
fn transliterate_cyrillic(ch: char) -> Option<&'static str> {
    Some(match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    })
}

//! Arabic-aware string ordering for school names
//!
//! Names are compared on a folded key: harakat and tatweel are dropped, the
//! alef/yeh/waw hamza carriers collapse onto their base letters and ta marbuta
//! sorts with heh. Latin text is lowercased. Equal keys fall back to the raw
//! strings so the order stays total.

use std::cmp::Ordering;

const TATWEEL: char = '\u{0640}';

fn is_arabic_mark(c: char) -> bool {
    matches!(c, '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}')
}

fn fold_char(c: char) -> char {
    match c {
        'آ' | 'أ' | 'إ' | 'ٱ' => 'ا',
        'ى' | 'ئ' => 'ي',
        'ؤ' => 'و',
        'ة' => 'ه',
        _ => c,
    }
}

/// Folded comparison key for a name
pub fn collation_key(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|&c| c != TATWEEL && !is_arabic_mark(c))
        .map(fold_char)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two names in directory order
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diacritics_and_tatweel_are_ignored() {
        assert_eq!(collation_key("مَدْرَسَة"), collation_key("مدرسة"));
        assert_eq!(collation_key("مـدرسة"), collation_key("مدرسة"));
    }

    #[test]
    fn test_alef_variants_sort_together() {
        assert_eq!(collation_key("أحمد"), collation_key("احمد"));
        assert_eq!(collation_key("إبراهيم"), collation_key("ابراهيم"));
        assert_eq!(compare_names("أريحا", "بيت لحم"), Ordering::Less);
    }

    #[test]
    fn test_latin_is_case_insensitive_with_raw_tiebreak() {
        assert_eq!(collation_key("Al Quds"), collation_key("al quds"));
        assert_ne!(compare_names("Al Quds", "al quds"), Ordering::Equal);
        assert_eq!(compare_names("alpha", "Beta"), Ordering::Less);
    }

    #[test]
    fn test_identical_names_compare_equal() {
        assert_eq!(compare_names("مدرسة الأمل", "مدرسة الأمل"), Ordering::Equal);
    }
}

use std::cmp::Ordering;

/// A customer derived from order history. Not stored on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
}

const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvwxyz";

fn fold_turkish(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

fn collation_weight(c: char) -> (u8, u32) {
    let folded = fold_turkish(c);
    match TURKISH_ALPHABET.chars().position(|a| a == folded) {
        Some(pos) => (1, pos as u32),
        None if folded.is_ascii_digit() => (0, folded as u32),
        None => (2, folded as u32),
    }
}

/// Compares names using Turkish alphabet order, case-insensitively
/// (`ç` after `c`, dotless `ı` before `i`). Digits sort before letters.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let left = a.chars().map(collation_weight);
    let right = b.chars().map(collation_weight);
    left.cmp(right).then_with(|| a.cmp(b))
}

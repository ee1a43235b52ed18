//! Cell address resolution.
//!
//! Worksheet cells carry an A1-style reference (`"C4"`, `"AB12"`). Only the
//! column part matters for table extraction: rows are taken in document order.

/// Zero-based index of the last worksheet column (XFD).
pub const MAX_COLUMN_INDEX: usize = 16_383;

/// Resolve an A1-style reference to a zero-based column index.
///
/// Digits are stripped and the remaining letters are read as a base-26 number
/// (A=1 .. Z=26, most significant first). An empty reference, or one without
/// any letters, resolves to column 0 rather than failing.
pub fn column_index(reference: &str) -> usize {
    try_column_index(reference).unwrap_or(0)
}

/// Strict variant of [`column_index`]: `None` when the reference has no letters.
///
/// Lowercase letters are accepted; `$` anchors and digits are ignored.
pub fn try_column_index(reference: &str) -> Option<usize> {
    let mut number: usize = 0;
    let mut seen = false;

    for ch in reference.chars() {
        if ch.is_ascii_alphabetic() {
            let digit = (ch.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
            number = number.saturating_mul(26).saturating_add(digit);
            seen = true;
        }
    }

    if seen {
        Some(number - 1)
    } else {
        None
    }
}

/// Convert a zero-based column index to its letters (0 = A, 25 = Z, 26 = AA).
pub fn column_letters(index: usize) -> String {
    let mut result = String::new();
    let mut n = index;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

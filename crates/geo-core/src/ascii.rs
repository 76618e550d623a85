//! ASCII classification over byte code units. Nothing here is locale-aware.

pub const fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

pub const fn is_uppercase(ch: u8) -> bool {
    matches!(ch, b'A'..=b'Z')
}

pub const fn is_lowercase(ch: u8) -> bool {
    matches!(ch, b'a'..=b'z')
}

pub const fn is_alphabetic(ch: u8) -> bool {
    is_uppercase(ch) || is_lowercase(ch)
}

pub const fn is_alphanumeric(ch: u8) -> bool {
    is_digit(ch) || is_alphabetic(ch)
}

/// Decodes an alphanumeric digit: `0-9` map to 0-9 and letters of either case map to 10-35.
pub const fn digit_value(ch: u8) -> Option<u32> {
    if is_digit(ch) {
        Some((ch - b'0') as u32)
    } else if is_uppercase(ch) {
        Some((ch - b'A') as u32 + 10)
    } else if is_lowercase(ch) {
        Some((ch - b'a') as u32 + 10)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn digit_values() {
        assert_eq!(digit_value(b'0'), Some(0));
        assert_eq!(digit_value(b'9'), Some(9));
        assert_eq!(digit_value(b'A'), Some(10));
        assert_eq!(digit_value(b'z'), Some(35));
        assert_eq!(digit_value(b'Z'), Some(35));
        assert_eq!(digit_value(b'_'), None);
        assert_eq!(digit_value(b'@'), None);
        assert_eq!(digit_value(b'['), None);
    }

    #[quickcheck]
    fn matches_std_classification(ch: u8) -> bool {
        is_digit(ch) == ch.is_ascii_digit()
            && is_uppercase(ch) == ch.is_ascii_uppercase()
            && is_lowercase(ch) == ch.is_ascii_lowercase()
            && is_alphanumeric(ch) == ch.is_ascii_alphanumeric()
            && digit_value(ch).is_some() == ch.is_ascii_alphanumeric()
    }
}

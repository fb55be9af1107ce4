use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Punctuation kept verbatim by [`to_string_binary`].
const PRINTABLE_PUNCTUATION: &[u8] = b" `~!@#$%^&*()-_=+[]{}|;:'\",.<>/?";

/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn to_string(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

/// Render bytes for diagnostics: alphanumerics and common punctuation pass
/// through, everything else becomes `\xHH`.
pub fn to_string_binary(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        if b.is_ascii_alphanumeric() || PRINTABLE_PUNCTUATION.contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{b:02X}"));
        }
    }
    out
}

/// Stable 32-bit hash of a byte sequence.
///
/// Starts at 1 and folds each byte as a signed value with multiplier 31.
/// Persisted comparison results depend on this exact function, so it must
/// not change.
pub fn hash_code(data: &[u8]) -> i32 {
    data.iter()
        .fold(1i32, |acc, &b| acc.wrapping_mul(31).wrapping_add(b as i8 as i32))
}

/// Stable 32-bit hash of a byte map: the wrapping sum of
/// `hash(key) ^ hash(value)` over all entries. Independent of entry order.
pub fn map_hash_code(map: &BTreeMap<Vec<u8>, Vec<u8>>) -> i32 {
    map.iter().fold(0i32, |acc, (k, v)| {
        acc.wrapping_add(hash_code(k) ^ hash_code(v))
    })
}

/// Order two hashes by the sign of their wrapping difference.
///
/// This is not a total order: differences that overflow flip sign. Kept
/// as-is because stored comparison results were produced this way.
pub fn hash_difference(a: i32, b: i32) -> Ordering {
    a.wrapping_sub(b).cmp(&0)
}

/// Parse a textual boolean: `true` in any letter case, anything else is false.
pub fn parse_bool(data: &[u8]) -> bool {
    data.eq_ignore_ascii_case(b"true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_binary_escapes_unprintable() {
        assert_eq!(to_string_binary(b"my_table.1-a"), "my_table.1-a");
        assert_eq!(to_string_binary(&[0x00, b'a', 0xFF]), "\\x00a\\xFF");
        assert_eq!(to_string_binary(b"a\\b"), "a\\x5Cb");
    }

    #[test]
    fn test_hash_code_known_values() {
        assert_eq!(hash_code(&[]), 1);
        // 31 * 1 + 97
        assert_eq!(hash_code(b"a"), 128);
        // 31 * 128 + 98
        assert_eq!(hash_code(b"ab"), 4066);
        // Bytes above 0x7F fold as negative values.
        assert_eq!(hash_code(&[0xFF]), 30);
    }

    #[test]
    fn test_map_hash_is_order_independent_sum() {
        let mut map = BTreeMap::new();
        map.insert(b"a".to_vec(), b"b".to_vec());
        map.insert(b"c".to_vec(), b"d".to_vec());
        let expected = (hash_code(b"a") ^ hash_code(b"b"))
            .wrapping_add(hash_code(b"c") ^ hash_code(b"d"));
        assert_eq!(map_hash_code(&map), expected);
        assert_eq!(map_hash_code(&BTreeMap::new()), 0);
    }

    #[test]
    fn test_hash_difference_wraps() {
        assert_eq!(hash_difference(5, 3), Ordering::Greater);
        assert_eq!(hash_difference(3, 5), Ordering::Less);
        assert_eq!(hash_difference(7, 7), Ordering::Equal);
        // i32::MAX - (-1) overflows to i32::MIN.
        assert_eq!(hash_difference(i32::MAX, -1), Ordering::Less);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(b"true"));
        assert!(parse_bool(b"TRUE"));
        assert!(!parse_bool(b"false"));
        assert!(!parse_bool(b"yes"));
        assert!(!parse_bool(b""));
    }
}

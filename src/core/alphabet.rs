use crate::core::constants::BASE32_ALPHABET;

const INVALID: u8 = 0xff;

/// ASCII byte -> alphabet index, `INVALID` for bytes outside the alphabet.
/// Uppercase letters map to the same index as their lowercase form.
const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < BASE32_ALPHABET.len() {
        let b = BASE32_ALPHABET[i];
        table[b as usize] = i as u8;
        table[b.to_ascii_uppercase() as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the 5-bit value of a hash character, case-insensitively.
///
/// ```
/// use geohash_rs::char_index;
///
/// assert_eq!(char_index('u'), Some(26));
/// assert_eq!(char_index('U'), Some(26));
/// assert_eq!(char_index('a'), None);
/// ```
#[inline]
pub fn char_index(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match DECODE_TABLE[c as usize] {
        INVALID => None,
        idx => Some(idx),
    }
}

/// Returns the hash character for a 5-bit value, `None` when `index >= 32`.
#[inline]
pub fn index_char(index: u8) -> Option<char> {
    BASE32_ALPHABET.get(index as usize).map(|&b| b as char)
}

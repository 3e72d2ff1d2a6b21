//! Content identity for (svg text, normalization mode) pairs.
//!
//! A 32-bit rolling hash (`h = h * 31 + unit`, wrapping) over the UTF-16 code
//! units of `"{content}-colorless:{mode}"`. No seed or salt: the same input
//! yields the same identity across runs and processes, so identities are
//! usable as DOM id fragments.

use std::fmt;

/// Prefix of every symbol id derived from an identity.
pub const SYMBOL_PREFIX: &str = "svg-icon-";

/// Hash-derived cache key over (content, colorless).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentIdentity(u32);

impl ContentIdentity {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Fixed-width lowercase hex (8 chars).
    pub fn to_hex(self) -> String {
        format!("{:08x}", self.0)
    }

    /// DOM id of the symbol registered for this identity.
    pub fn symbol_id(self) -> String {
        format!("{SYMBOL_PREFIX}{:08x}", self.0)
    }
}

impl fmt::Display for ContentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Compute the identity of `content` under the given normalization mode.
pub fn identity(content: &str, colorless: bool) -> ContentIdentity {
    let keyed = format!("{content}-colorless:{colorless}");
    ContentIdentity(rolling_hash(&keyed).unsigned_abs())
}

/// Scope id for a source path, handed to the template compiler.
///
/// Same rolling hash, absolute value rendered in base 36. Scopes compiled
/// output per file; it is not a content identity.
pub fn scope_id(path: &str) -> String {
    to_base36(rolling_hash(path).unsigned_abs())
}

/// `h = h * 31 + unit` over UTF-16 code units, wrapped to 32 bits each step.
fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(7);
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_hash_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 97 * 31 + 98);
        // Java's "hello".hashCode()
        assert_eq!(rolling_hash("hello"), 99_162_322);
    }

    #[test]
    fn test_rolling_hash_wraps() {
        // Long enough to overflow 32 bits many times over
        let long = "x".repeat(10_000);
        let _ = rolling_hash(&long);
        // Java's "polygenelubricants".hashCode() is i32::MIN
        assert_eq!(rolling_hash("polygenelubricants"), i32::MIN);
        assert_eq!(
            identity_of_hash(i32::MIN).to_hex(),
            "80000000",
            "absolute value of i32::MIN fits in u32"
        );
    }

    fn identity_of_hash(h: i32) -> ContentIdentity {
        ContentIdentity(h.unsigned_abs())
    }

    #[test]
    fn test_identity_deterministic() {
        let svg = r#"<svg fill="red"><path/></svg>"#;
        assert_eq!(identity(svg, true), identity(svg, true));
        assert_eq!(identity(svg, false), identity(svg, false));
    }

    #[test]
    fn test_identity_mode_is_part_of_key() {
        let svg = r#"<svg><path fill="red"/></svg>"#;
        assert_ne!(identity(svg, true), identity(svg, false));
    }

    #[test]
    fn test_identity_fixed_width_hex() {
        let id = identity("", true);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(id.to_string(), hex);
        assert_eq!(ContentIdentity::new(0xab).to_hex(), "000000ab");
    }

    #[test]
    fn test_symbol_id_prefix() {
        assert_eq!(ContentIdentity::new(0x1f).symbol_id(), "svg-icon-0000001f");
    }

    #[test]
    fn test_identity_counts_utf16_units() {
        // U+1F600 is a surrogate pair: two units, not one scalar
        let expected = [0xD83Di32, 0xDE00]
            .iter()
            .fold(0i32, |h, &u| h.wrapping_mul(31).wrapping_add(u));
        assert_eq!(rolling_hash("\u{1F600}"), expected);
    }

    #[test]
    fn test_scope_id_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(scope_id("a"), "2p"); // 97 = 2*36 + 25
        assert_ne!(scope_id("/icons/a.svg"), scope_id("/icons/b.svg"));
    }
}

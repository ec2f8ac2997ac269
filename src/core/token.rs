//! Reversible obfuscation of numeric customer ids for portal URLs.
//!
//! The token is the hex form of the id scaled by a fixed multiplier. It keeps
//! casual URL guessing out without pretending to be cryptography; anything
//! security-sensitive must not rely on it.

/// Obfuscation multiplier; a decoded value must divide evenly by it
const MULTIPLIER: i64 = 98765;

/// Encodes a customer id as an opaque URL token.
///
/// Falls back to the plain decimal form if the scaled value would overflow.
pub fn encode_customer_id(id: i64) -> String {
    match id.checked_mul(MULTIPLIER) {
        Some(scaled) => format!("{:x}", scaled),
        None => id.to_string(),
    }
}

/// Decodes a portal token back to a customer id.
///
/// Raw decimal strings are accepted unchanged for links minted before
/// obfuscation existed. Hex tokens must decode to a multiple of the
/// obfuscation multiplier; anything else is rejected.
pub fn decode_customer_id(token: &str) -> Option<i64> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        return token.parse().ok();
    }

    let scaled = i64::from_str_radix(token, 16).ok()?;
    if scaled % MULTIPLIER == 0 {
        Some(scaled / MULTIPLIER)
    } else {
        None
    }
}

use sha2::{Digest, Sha256};

/// Builds the plaintext password for a login name: the name followed by its
/// reversal, character by character.
///
/// ```
/// assert_eq!(seedpass_core::derive_password("alice"), "alicecila");
/// ```
pub fn derive_password(name: &str) -> String {
    let mut password = String::with_capacity(name.len() * 2);
    password.push_str(name);
    password.extend(name.chars().rev());
    password
}

/// Lowercase hex SHA-256 digest, matching MySQL's `SHA2(value, 256)`.
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Whether `pass_hash` is the SHA-256 digest of `password`.
pub(crate) fn hash_matches(password: &str, pass_hash: &str) -> bool {
    sha256_hex(password).eq_ignore_ascii_case(pass_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_password_appends_reversal() {
        assert_eq!(derive_password("alice"), "alicecila");
        assert_eq!(derive_password("ab12"), "ab1221ba");
    }

    #[test]
    fn derive_password_of_empty_name_is_empty() {
        assert_eq!(derive_password(""), "");
    }

    #[test]
    fn derive_password_reverses_by_character() {
        assert_eq!(derive_password("héllo"), "hélloolléh");
    }

    #[test]
    fn sha256_hex_matches_known_digest() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hash_matches_ignores_hex_case() {
        let upper = sha256_hex("alicecila").to_ascii_uppercase();
        assert!(hash_matches("alicecila", &upper));
        assert!(!hash_matches("bobbob", &upper));
    }
}

use anyhow::Result;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

pub const SALT_LEN: usize = 16;

/// Generate a fresh random salt for a new credential record.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

/// hash = HMAC-SHA512(key = salt, message = password)
pub fn hash_password(password: &str, salt: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha512::new_from_slice(salt)?;
    mac.update(password.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Recompute the HMAC and compare against the stored hash in constant time.
pub fn verify_password(password: &str, salt: &[u8], expected: &[u8]) -> Result<bool> {
    let mut mac = HmacSha512::new_from_slice(salt)?;
    mac.update(password.as_bytes());
    Ok(mac.verify_slice(expected).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_roundtrip() {
        let salt = generate_salt();
        let hash = hash_password("hunter2hunter2", &salt).unwrap();

        assert!(verify_password("hunter2hunter2", &salt, &hash).unwrap());
        assert!(!verify_password("hunter3hunter3", &salt, &hash).unwrap());
    }

    #[test]
    fn same_password_different_salts_differ() {
        let salt_a = generate_salt();
        let salt_b = generate_salt();
        assert_ne!(salt_a, salt_b);

        let hash_a = hash_password("password1", &salt_a).unwrap();
        let hash_b = hash_password("password1", &salt_b).unwrap();
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn truncated_hash_rejected() {
        let salt = generate_salt();
        let hash = hash_password("password1", &salt).unwrap();
        assert!(!verify_password("password1", &salt, &hash[..32]).unwrap());
    }
}

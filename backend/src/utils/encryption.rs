//! AES-256-GCM sealing for the portal password carried inside session tokens.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const NONCE_LENGTH: usize = 12;
const ENVELOPE_PREFIX: &str = "sealed:v1";
const KEY_LABEL: &[u8] = b"session-credential";

pub fn seal_secret(plaintext: &str, signing_secret: &str) -> Result<String> {
    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(signing_secret);
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| anyhow!("Invalid encryption key"))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|_| anyhow!("Encryption failed"))?;

    Ok(format!(
        "{}:{}:{}",
        ENVELOPE_PREFIX,
        URL_SAFE_NO_PAD.encode(nonce_bytes),
        URL_SAFE_NO_PAD.encode(ciphertext)
    ))
}

pub fn open_secret(sealed: &str, signing_secret: &str) -> Result<String> {
    let payload = sealed
        .strip_prefix(ENVELOPE_PREFIX)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| anyhow!("Unsupported envelope"))?;

    let (nonce_part, cipher_part) = payload
        .split_once(':')
        .ok_or_else(|| anyhow!("Missing ciphertext payload"))?;

    let nonce_bytes = URL_SAFE_NO_PAD
        .decode(nonce_part)
        .map_err(|_| anyhow!("Invalid nonce encoding"))?;
    if nonce_bytes.len() != NONCE_LENGTH {
        return Err(anyhow!("Invalid nonce length"));
    }
    let ciphertext = URL_SAFE_NO_PAD
        .decode(cipher_part)
        .map_err(|_| anyhow!("Invalid ciphertext encoding"))?;

    let key = derive_key(signing_secret);
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| anyhow!("Invalid decryption key"))?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
        .map_err(|_| anyhow!("Decryption failed"))?;
    String::from_utf8(plaintext).map_err(|_| anyhow!("Decrypted data is not UTF-8"))
}

fn derive_key(signing_secret: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(KEY_LABEL);
    hasher.update(b"|");
    hasher.update(signing_secret.as_bytes());
    let digest = hasher.finalize();
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    key
}

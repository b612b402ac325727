//! Deterministic short code generation
//!
//! `SHA-256(owner 0x00 url 0x00 attempt)` read as a big-endian unsigned
//! integer and rendered in base62, most significant digit first. Truncating
//! the rendering keeps the leading digits, so a shorter code is always a
//! prefix of a longer one for the same inputs.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Base62 alphabet: digits, lowercase, uppercase
pub const BASE62: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, Default)]
pub struct CodeGenerator;

impl CodeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Derive a `length`-character code for one attempt.
    ///
    /// Identical inputs always produce the same leading
    /// `min(length, digest_digits)` characters. When the base62 rendering
    /// is shorter than `length` the tail is random padding.
    pub fn generate(&self, owner_id: Uuid, target_url: &str, length: usize, attempt: u32) -> String {
        let mut hasher = Sha256::new();
        hasher.update(owner_id.to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(target_url.as_bytes());
        hasher.update([0u8]);
        hasher.update(attempt.to_string().as_bytes());
        let digest = hasher.finalize();

        let mut code = to_base62(&digest);
        if code.len() >= length {
            code.truncate(length);
            return code;
        }

        code.push_str(&random_code(length - code.len()));
        code
    }
}

/// Uniformly random base62 string of `length` characters
pub fn random_code(length: usize) -> String {
    std::iter::repeat_with(|| BASE62[rand::random_range(0..BASE62.len())] as char)
        .take(length)
        .collect()
}

/// Render big-endian bytes as a base62 number (no leading zeros; zero is "0")
fn to_base62(bytes: &[u8]) -> String {
    let mut number: Vec<u8> = bytes.iter().copied().skip_while(|b| *b == 0).collect();
    if number.is_empty() {
        return (BASE62[0] as char).to_string();
    }

    let mut digits = Vec::with_capacity(44);
    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());

        // 按字节做长除法
        for &byte in &number {
            let acc = (remainder << 8) | u32::from(byte);
            let q = acc / 62;
            remainder = acc % 62;
            if !(quotient.is_empty() && q == 0) {
                quotient.push(q as u8);
            }
        }

        digits.push(BASE62[remainder as usize]);
        number = quotient;
    }

    digits.iter().rev().map(|&d| d as char).collect()
}

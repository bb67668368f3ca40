//! Auth token generation
//!
//! Tokens are opaque bearer credentials: a fixed prefix followed by random bytes
//! encoded as unpadded base64url.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Generator for opaque user auth tokens
#[derive(Debug, Clone)]
pub struct AuthTokenGenerator {
    prefix: String,
    /// Number of random bytes to generate
    token_bytes: usize,
}

impl AuthTokenGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            token_bytes: 32,
        }
    }

    /// Set the number of random bytes
    pub fn with_token_bytes(mut self, bytes: usize) -> Self {
        self.token_bytes = bytes;
        self
    }

    /// Generate a fresh token
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.token_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes))
    }
}

impl Default for AuthTokenGenerator {
    fn default() -> Self {
        Self::new("ut_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token() {
        let token = AuthTokenGenerator::default().generate();

        assert!(token.starts_with("ut_"));
        // 32 bytes base64-encoded = 43 chars, plus prefix
        assert_eq!(token.len(), "ut_".len() + 43);
        assert!(token[3..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_token_uniqueness() {
        let generator = AuthTokenGenerator::default();
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_custom_prefix_and_length() {
        let token = AuthTokenGenerator::new("tok_").with_token_bytes(16).generate();

        assert!(token.starts_with("tok_"));
        // 16 bytes base64-encoded = 22 chars
        assert_eq!(token.len(), "tok_".len() + 22);
    }
}

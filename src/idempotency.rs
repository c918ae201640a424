//! Idempotency key generation
//!
//! Every mutating user action carries a client-generated de-duplication token
//! so a retried delivery of the same submission cannot double-apply. Keys are
//! prefixed with the action name for log/trace readability.
//!
//! A fresh key is minted per logical submission. A user-initiated retry after
//! a visible failure is a new intent and gets a new key.

use std::fmt;

use rand::Rng;

/// A prefixed, collision-resistant de-duplication token.
///
/// Wire form: `"<prefix>-<uuid-v4>"`, e.g. `"transfer-1f0f...-..."`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Generate a key from a cryptographically strong UUID v4.
    ///
    /// Infallible; consumes entropy only.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
    }

    /// Timestamp + random base36 fallback.
    ///
    /// Weaker collision guarantees than [`generate`](Self::generate) but
    /// adequate for a single operator session's request volume.
    pub fn generate_fallback(prefix: &str) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: String = {
            let mut rng = rand::thread_rng();
            (0..9)
                .map(|_| {
                    let v = rng.gen_range(0..36u32);
                    char::from_digit(v, 36).expect("base36 digit in range")
                })
                .collect()
        };
        Self(format!("{}-{}-{}", prefix, millis, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

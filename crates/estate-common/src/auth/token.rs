//! Opaque token generation for sessions and password resets
//!
//! Tokens carry 256 bits of entropy from the operating system CSPRNG, so the
//! store never needs to re-check uniqueness before insert.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes per token (256 bits)
const TOKEN_BYTES: usize = 32;

/// Generate an unguessable opaque token, URL-safe base64 encoded
#[must_use]
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

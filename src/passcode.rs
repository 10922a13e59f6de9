use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

/// Width of one passcode validity window, in seconds.
const TIME_STEP_SECONDS: u64 = 30;
/// Digits in a derived passcode.
const PASSCODE_DIGITS: u32 = 6;

/// Gate for the privileged operations.
///
/// The shared secret is read once at startup; the valid passcode is
/// re-derived from `(secret, now)` on every call, so a value is never
/// cached across window boundaries. A passcode stays valid for anyone who
/// observes it until its window elapses.
#[derive(Debug)]
pub struct PasscodeAuthenticator {
    secret: SecretString,
}

impl PasscodeAuthenticator {
    pub fn load(secret_path: &Path) -> Result<Self, anyhow::Error> {
        let raw = std::fs::read_to_string(secret_path).with_context(|| {
            format!(
                "Failed to read the passcode secret from {}",
                secret_path.display()
            )
        })?;
        let secret = raw.trim().to_string();
        if secret.is_empty() {
            anyhow::bail!("The passcode secret at {} is empty", secret_path.display());
        }
        Ok(Self {
            secret: SecretString::from(secret),
        })
    }

    /// The passcode of the current time window.
    pub fn current_passcode(&self) -> Result<String, anyhow::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("The system clock is set before the Unix epoch")?;
        Ok(self.passcode_for_window(now.as_secs() / TIME_STEP_SECONDS))
    }

    /// Exact-equality check against the current window's passcode. A
    /// candidate straddling a window boundary may be rejected; no grace
    /// window is applied. `Err` means the authenticator itself is broken,
    /// which callers must surface distinctly from a plain mismatch.
    pub fn validate(&self, candidate: &str) -> Result<bool, anyhow::Error> {
        Ok(self.current_passcode()? == candidate)
    }

    fn passcode_for_window(&self, window: u64) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can accept keys of any length");
        mac.update(&window.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        // RFC 4226 dynamic truncation.
        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = u32::from_be_bytes([
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ]);
        let code = binary % 10u32.pow(PASSCODE_DIGITS);
        format!("{code:06}")
    }
}

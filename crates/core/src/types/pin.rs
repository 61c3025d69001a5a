//! Admin PIN type.
//!
//! The kiosk's only credential: a short numeric PIN gating the admin
//! settings screen. Validation lives here so the API layer and the CLI
//! agree on what a well-formed PIN is.

use serde::{Deserialize, Serialize};

/// Minimum PIN length in digits.
const MIN_PIN_LEN: usize = 4;
/// Maximum PIN length in digits.
const MAX_PIN_LEN: usize = 8;

/// Factory-default PIN, active until the operator changes it.
const FACTORY_DEFAULT_PIN: &str = "1234";

/// Error validating an admin PIN.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("PIN must be between {MIN_PIN_LEN} and {MAX_PIN_LEN} digits (got {0})")]
    InvalidLength(usize),
    #[error("PIN must contain only digits")]
    NonDigit,
}

/// Admin PIN for the kiosk settings screen.
///
/// 4 to 8 ASCII digits. Stored as entered; the kiosk runs on a trusted
/// in-store device, so the PIN is an operator convenience rather than a
/// hardened credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(transparent))]
#[serde(transparent)]
pub struct AdminPin(String);

impl AdminPin {
    /// Parse and validate a PIN string.
    ///
    /// # Errors
    ///
    /// Returns `PinError` if the PIN is not 4-8 ASCII digits.
    pub fn parse(pin: &str) -> Result<Self, PinError> {
        if !(MIN_PIN_LEN..=MAX_PIN_LEN).contains(&pin.len()) {
            return Err(PinError::InvalidLength(pin.len()));
        }
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(PinError::NonDigit);
        }
        Ok(Self(pin.to_owned()))
    }

    /// Check a candidate PIN entered on the admin screen.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Get the PIN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AdminPin {
    fn default() -> Self {
        Self(FACTORY_DEFAULT_PIN.to_owned())
    }
}

//! Core types for Photo Kiosk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod pin;
pub mod price;
pub mod status;

pub use id::*;
pub use pin::{AdminPin, PinError};
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use status::*;

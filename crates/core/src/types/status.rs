//! Status enums for sessions and orders.
//!
//! Both lifecycles are deliberately small: a session is `active` until its
//! expiry timestamp passes, and an order moves from `pending_print` to
//! `printed` exactly once (re-printing just refreshes the timestamp).

use serde::{Deserialize, Serialize};

/// Upload session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session accepts uploads and can be turned into an order.
    #[default]
    Active,
    /// Session passed its expiry timestamp; all operations are rejected.
    Expired,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            _ => Err(format!("invalid session status: {s}")),
        }
    }
}

/// Order print status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created; receipt and photos not yet sent to the printer.
    #[default]
    PendingPrint,
    /// Browser reported `afterprint`; receipt handed to the customer.
    Printed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingPrint => write!(f, "pending_print"),
            Self::Printed => write!(f, "printed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_print" => Ok(Self::PendingPrint),
            "printed" => Ok(Self::Printed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

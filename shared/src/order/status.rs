//! Order status machine
//!
//! Happy path: `Pending → Accepted → Preparing → Ready → Served`.
//! `Cancelled` is reachable from any non-terminal state. `Served` and
//! `Cancelled` are terminal. Transitions are validated against an
//! explicit table; a cancelled or served order can never be revived.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    /// Position on the happy path, used for monotonic checks
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Preparing => 2,
            Self::Ready => 3,
            Self::Served => 4,
            Self::Cancelled => 5,
        }
    }

    /// Whether no further transitions are allowed
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Served | Self::Cancelled)
    }

    /// Whether a customer may still replace the order's line items
    pub fn is_editable(self) -> bool {
        self == Self::Pending
    }

    /// Check whether `self → to` is an allowed transition
    ///
    /// Forward moves along the happy path are allowed (skipping
    /// intermediate states included, so an admin can mark an accepted
    /// order served directly). Backward moves and transitions out of a
    /// terminal state are rejected.
    pub fn can_transition(self, to: OrderStatus) -> bool {
        if self.is_terminal() || self == to {
            return false;
        }
        if to == Self::Cancelled {
            return true;
        }
        to != Self::Pending && to.rank() > self.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Served => "SERVED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "PREPARING" => Ok(Self::Preparing),
            "READY" => Ok(Self::Ready),
            "SERVED" => Ok(Self::Served),
            "CANCELLED" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Accepted));
        assert!(OrderStatus::Accepted.can_transition(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition(OrderStatus::Served));
        // Skipping intermediate states is allowed
        assert!(OrderStatus::Accepted.can_transition(OrderStatus::Served));
    }

    #[test]
    fn test_cancel_from_non_terminal() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Cancelled));
        assert!(OrderStatus::Ready.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Served.can_transition(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition(OrderStatus::Cancelled));
    }

    #[test]
    fn test_no_resurrection_or_backward_moves() {
        assert!(!OrderStatus::Cancelled.can_transition(OrderStatus::Pending));
        assert!(!OrderStatus::Served.can_transition(OrderStatus::Preparing));
        assert!(!OrderStatus::Preparing.can_transition(OrderStatus::Accepted));
        assert!(!OrderStatus::Accepted.can_transition(OrderStatus::Pending));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Served,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }
}

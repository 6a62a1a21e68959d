//! Order lifecycle:
//!
//! ```text
//! pending ──approve──▶ approved ──process──▶ processing ──ship──▶ shipped ──deliver──▶ delivered
//!    │                    │                      │                   │
//!    ├──reject──▶ rejected└──────────────────────┴───────cancel──────┴──▶ cancelled
//!    └──cancel──▶ cancelled
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{StorefrontError, WorkflowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Delivered | Self::Cancelled)
    }

    /// Rejected and cancelled orders are excluded from revenue; every other
    /// status counts, including pending.
    pub fn counts_toward_revenue(&self) -> bool {
        !matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Label on the customer order-lookup page.
    pub fn customer_label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Processing => "Being Made",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Label in the admin panel.
    pub fn admin_label(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            other => other.customer_label(),
        }
    }

    /// The transition table.
    fn target(&self, action: &OrderAction) -> Option<OrderStatus> {
        use OrderAction as A;
        use OrderStatus as S;
        match (self, action) {
            (S::Pending, A::Approve) => Some(S::Approved),
            (S::Pending, A::Reject) => Some(S::Rejected),
            (S::Approved, A::Process) => Some(S::Processing),
            (S::Processing, A::Ship { .. }) => Some(S::Shipped),
            (S::Shipped, A::Deliver) => Some(S::Delivered),
            (s, A::Cancel) if !s.is_terminal() => Some(S::Cancelled),
            _ => None,
        }
    }

    /// Names of the actions the admin may take from this status.
    pub fn available_actions(&self) -> Vec<&'static str> {
        let probes = [
            OrderAction::Approve,
            OrderAction::Reject,
            OrderAction::Process,
            OrderAction::Ship {
                tracking_link: String::new(),
            },
            OrderAction::Deliver,
            OrderAction::Cancel,
        ];
        probes
            .iter()
            .filter(|a| self.target(a).is_some())
            .map(OrderAction::name)
            .collect()
    }

    /// Check `action` against the table and its preconditions.
    pub fn apply(&self, action: &OrderAction) -> Result<OrderTransition, WorkflowError> {
        let to = self.target(action).ok_or_else(|| WorkflowError::InvalidTransition {
            entity: "order",
            from: self.to_string(),
            action: action.name().to_string(),
        })?;

        let tracking_link = match action {
            OrderAction::Ship { tracking_link } => {
                let link = tracking_link.trim();
                if link.is_empty() {
                    return Err(WorkflowError::MissingTrackingLink);
                }
                Some(link.to_string())
            }
            _ => None,
        };

        Ok(OrderTransition {
            from: *self,
            to,
            tracking_link,
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StorefrontError::validation(format!("unknown order status: {s}")))
    }
}

/// Admin actions on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderAction {
    Approve,
    Reject,
    Process,
    /// Requires a carrier tracking link, stored together with the status.
    Ship { tracking_link: String },
    Deliver,
    Cancel,
}

impl OrderAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Process => "process",
            Self::Ship { .. } => "ship",
            Self::Deliver => "deliver",
            Self::Cancel => "cancel",
        }
    }
}

/// A checked transition, ready to be written in one UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// Set only when shipping.
    pub tracking_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn terminal_states_expose_no_actions() {
        for status in [OrderStatus::Rejected, OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(status.available_actions().is_empty(), "{status}");
        }
        assert_eq!(
            OrderStatus::Pending.available_actions(),
            vec!["approve", "reject", "cancel"]
        );
    }

    #[test]
    fn processing_label_differs_between_customer_and_admin() {
        assert_eq!(OrderStatus::Processing.customer_label(), "Being Made");
        assert_eq!(OrderStatus::Processing.admin_label(), "Processing");
        assert_eq!(OrderStatus::Pending.admin_label(), "Pending Review");
    }

    #[test]
    fn ship_action_deserializes_from_tagged_json() {
        let action: OrderAction =
            serde_json::from_str(r#"{"action":"ship","tracking_link":"t.example/1"}"#).unwrap();
        assert_eq!(
            action,
            OrderAction::Ship {
                tracking_link: "t.example/1".into()
            }
        );
    }
}

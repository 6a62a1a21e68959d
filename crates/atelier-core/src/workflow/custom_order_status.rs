//! Custom-order quoting lifecycle.
//!
//! `pending` may be reviewed, quoted, or rejected; `reviewed` may be quoted
//! or rejected. A quote moves to `accepted` once the customer agrees, then
//! `in_progress` and `completed`. `completed` and `rejected` are terminal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{StorefrontError, WorkflowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomOrderStatus {
    Pending,
    Reviewed,
    Quoted,
    Accepted,
    InProgress,
    Completed,
    Rejected,
}

impl CustomOrderStatus {
    pub const ALL: [CustomOrderStatus; 7] = [
        Self::Pending,
        Self::Reviewed,
        Self::Quoted,
        Self::Accepted,
        Self::InProgress,
        Self::Completed,
        Self::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Quoted => "quoted",
            Self::Accepted => "accepted",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }

    pub fn admin_label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Review",
            Self::Reviewed => "Under Review",
            Self::Quoted => "Quote Sent",
            Self::Accepted => "Accepted",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
        }
    }

    fn target(&self, action: &CustomOrderAction) -> Option<CustomOrderStatus> {
        use CustomOrderAction as A;
        use CustomOrderStatus as S;
        match (self, action) {
            (S::Pending, A::Review) => Some(S::Reviewed),
            (S::Pending | S::Reviewed, A::Quote { .. }) => Some(S::Quoted),
            (S::Pending | S::Reviewed, A::Reject) => Some(S::Rejected),
            (S::Quoted, A::Accept) => Some(S::Accepted),
            (S::Accepted, A::Start) => Some(S::InProgress),
            (S::InProgress, A::Complete) => Some(S::Completed),
            _ => None,
        }
    }

    pub fn available_actions(&self) -> Vec<&'static str> {
        let probes = [
            CustomOrderAction::Review,
            CustomOrderAction::Quote {
                quoted_price: 0.0,
                admin_notes: None,
            },
            CustomOrderAction::Reject,
            CustomOrderAction::Accept,
            CustomOrderAction::Start,
            CustomOrderAction::Complete,
        ];
        probes
            .iter()
            .filter(|a| self.target(a).is_some())
            .map(CustomOrderAction::name)
            .collect()
    }

    pub fn apply(&self, action: &CustomOrderAction) -> Result<CustomOrderTransition, WorkflowError> {
        let to = self.target(action).ok_or_else(|| WorkflowError::InvalidTransition {
            entity: "custom order",
            from: self.to_string(),
            action: action.name().to_string(),
        })?;

        let quote = match action {
            CustomOrderAction::Quote {
                quoted_price,
                admin_notes,
            } => {
                if !quoted_price.is_finite() || *quoted_price < 0.0 {
                    return Err(WorkflowError::InvalidQuote {
                        reason: format!("price must be a non-negative number, got {quoted_price}"),
                    });
                }
                Some(Quote {
                    price: *quoted_price,
                    admin_notes: admin_notes
                        .as_deref()
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_string),
                })
            }
            _ => None,
        };

        Ok(CustomOrderTransition {
            from: *self,
            to,
            quote,
        })
    }
}

impl fmt::Display for CustomOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomOrderStatus {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StorefrontError::validation(format!("unknown custom order status: {s}")))
    }
}

/// Admin actions on a custom order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CustomOrderAction {
    Review,
    /// Send a price quote; notes are optional.
    Quote {
        quoted_price: f64,
        #[serde(default)]
        admin_notes: Option<String>,
    },
    Reject,
    /// Record the customer's acceptance of the quote.
    Accept,
    Start,
    Complete,
}

impl CustomOrderAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Quote { .. } => "quote",
            Self::Reject => "reject",
            Self::Accept => "accept",
            Self::Start => "start",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub price: f64,
    /// `None` leaves existing notes untouched.
    pub admin_notes: Option<String>,
}

/// A checked transition. When `quote` is set, status, price, and notes are
/// written by a single UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOrderTransition {
    pub from: CustomOrderStatus,
    pub to: CustomOrderStatus,
    pub quote: Option<Quote>,
}

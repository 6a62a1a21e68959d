//! Stock requests move `pending → notified → fulfilled`, one step at a time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{StorefrontError, WorkflowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockRequestStatus {
    Pending,
    Notified,
    Fulfilled,
}

impl StockRequestStatus {
    pub const ALL: [StockRequestStatus; 3] = [Self::Pending, Self::Notified, Self::Fulfilled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Notified => "notified",
            Self::Fulfilled => "fulfilled",
        }
    }

    pub fn apply(&self, action: StockRequestAction) -> Result<StockRequestStatus, WorkflowError> {
        match (self, action) {
            (Self::Pending, StockRequestAction::Notify) => Ok(Self::Notified),
            (Self::Notified, StockRequestAction::Fulfill) => Ok(Self::Fulfilled),
            _ => Err(WorkflowError::InvalidTransition {
                entity: "stock request",
                from: self.to_string(),
                action: action.name().to_string(),
            }),
        }
    }
}

impl fmt::Display for StockRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockRequestStatus {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StorefrontError::validation(format!("unknown stock request status: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StockRequestAction {
    Notify,
    Fulfill,
}

impl StockRequestAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notify => "notify",
            Self::Fulfill => "fulfill",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_progression() {
        let notified = StockRequestStatus::Pending
            .apply(StockRequestAction::Notify)
            .unwrap();
        assert_eq!(notified, StockRequestStatus::Notified);
        assert_eq!(
            notified.apply(StockRequestAction::Fulfill).unwrap(),
            StockRequestStatus::Fulfilled
        );
    }

    #[test]
    fn no_skipping_or_going_back() {
        assert!(StockRequestStatus::Pending.apply(StockRequestAction::Fulfill).is_err());
        assert!(StockRequestStatus::Notified.apply(StockRequestAction::Notify).is_err());
        assert!(StockRequestStatus::Fulfilled.apply(StockRequestAction::Notify).is_err());
    }
}

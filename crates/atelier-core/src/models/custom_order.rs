//! Bespoke commission requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, normalize_email};
use crate::errors::{StorefrontError, StorefrontResult};
use crate::workflow::CustomOrderStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomOrder {
    pub id: String,
    pub user_email: String,
    pub user_name: String,
    pub user_phone: Option<String>,
    pub description: String,
    pub reference_images: Option<Vec<String>>,
    pub budget_range: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: CustomOrderStatus,
    pub admin_notes: Option<String>,
    pub quoted_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer commission form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomOrderForm {
    pub user_email: String,
    pub user_name: String,
    #[serde(default)]
    pub user_phone: Option<String>,
    pub description: String,
    #[serde(default)]
    pub budget_range: Option<String>,
    /// `YYYY-MM-DD`; blank means no deadline.
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Insert data for `custom_orders`. Status always starts at `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomOrder {
    pub user_email: String,
    pub user_name: String,
    pub user_phone: Option<String>,
    pub description: String,
    pub reference_images: Option<Vec<String>>,
    pub budget_range: Option<String>,
    pub deadline: Option<NaiveDate>,
}

impl CustomOrderForm {
    pub fn into_new_custom_order(self, image_urls: Vec<String>) -> StorefrontResult<NewCustomOrder> {
        let user_email = normalize_email(&self.user_email);
        let user_name = self.user_name.trim().to_string();
        let description = self.description.trim().to_string();
        if user_email.is_empty() || user_name.is_empty() || description.is_empty() {
            return Err(StorefrontError::validation(
                "user_email, user_name and description are required",
            ));
        }

        let deadline = match non_blank(self.deadline.as_deref()) {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                StorefrontError::validation(format!("invalid deadline {raw:?}: {e}"))
            })?),
            None => None,
        };

        Ok(NewCustomOrder {
            user_email,
            user_name,
            user_phone: non_blank(self.user_phone.as_deref()),
            description,
            reference_images: (!image_urls.is_empty()).then_some(image_urls),
            budget_range: non_blank(self.budget_range.as_deref()),
            deadline,
        })
    }
}

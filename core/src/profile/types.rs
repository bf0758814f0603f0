use serde::{Deserialize, Serialize};

use crate::booking::BookingHistoryItem;
use crate::currency::{format_inr, sum_amounts};
use crate::error::{RepairError, Result};

/// Contact details kept under `userProfile`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub member_since: String,
    /// Membership plan id, if the customer picked one.
    pub membership: Option<String>,
}

impl UserProfile {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RepairError::Validation("Name is required".into()));
        }
        if !is_valid_phone(&self.phone) {
            return Err(RepairError::Validation("Phone must be 10 digits".into()));
        }
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(RepairError::Validation("Email address is not valid".into()));
        }
        Ok(())
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Totals shown on the profile header. Always derived from the booking list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileStats {
    pub total_repairs: usize,
    pub total_spent: f64,
    pub total_saved: f64,
}

impl ProfileStats {
    pub fn from_bookings(bookings: &[BookingHistoryItem]) -> Self {
        Self {
            total_repairs: bookings.len(),
            total_spent: sum_amounts(bookings.iter().map(|b| b.cost.as_str())),
            total_saved: sum_amounts(bookings.iter().map(|b| b.discount.as_str())),
        }
    }

    pub fn spent_display(&self) -> String {
        format_inr(self.total_spent)
    }

    pub fn saved_display(&self) -> String {
        format_inr(self.total_saved)
    }
}

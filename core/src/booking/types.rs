use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    Active,
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    Pending,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Active => "Active",
            BookingStatus::Completed => "Completed",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Pending => "Pending",
        }
    }

    /// Still open from the customer's point of view.
    pub fn is_open(&self) -> bool {
        !matches!(self, BookingStatus::Completed)
    }
}

/// A booking as stored under `userBookings`. Missing fields read as empty so
/// older records survive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingHistoryItem {
    pub id: String,
    pub device: String,
    /// Comma-joined issue labels.
    pub issue: String,
    pub date: String,
    pub status: BookingStatus,
    pub cost: String,
    pub discount: String,
    pub rating: u8,
    pub otp: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub description: String,
    pub created_at: String,
}

/// Tabs on the booking history panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl BookingFilter {
    pub const ALL: [BookingFilter; 3] = [
        BookingFilter::All,
        BookingFilter::Active,
        BookingFilter::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingFilter::All => "All",
            BookingFilter::Active => "Active",
            BookingFilter::Completed => "Completed",
        }
    }

    pub fn matches(&self, status: BookingStatus) -> bool {
        match self {
            BookingFilter::All => true,
            BookingFilter::Active => status.is_open(),
            BookingFilter::Completed => status == BookingStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_labels() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        let parsed: BookingStatus = serde_json::from_str("\"Pending\"").unwrap();
        assert_eq!(parsed, BookingStatus::Pending);
    }

    #[test]
    fn test_filter_matches() {
        assert!(BookingFilter::Active.matches(BookingStatus::Pending));
        assert!(BookingFilter::Active.matches(BookingStatus::InProgress));
        assert!(!BookingFilter::Active.matches(BookingStatus::Completed));
        assert!(BookingFilter::Completed.matches(BookingStatus::Completed));
        assert!(BookingFilter::All.matches(BookingStatus::Active));
    }
}

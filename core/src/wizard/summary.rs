use crate::currency::format_inr;

/// Everything shown on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewSummary {
    pub device: String,
    pub brand: String,
    pub issues: Vec<String>,
    pub estimated_cost: u32,
    pub discount: u32,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub description: String,
}

impl ReviewSummary {
    pub fn payable(&self) -> u32 {
        self.estimated_cost.saturating_sub(self.discount)
    }

    pub fn cost_display(&self) -> String {
        format_inr(self.estimated_cost as f64)
    }

    pub fn discount_display(&self) -> String {
        format_inr(self.discount as f64)
    }

    pub fn payable_display(&self) -> String {
        format_inr(self.payable() as f64)
    }

    pub fn issues_display(&self) -> String {
        self.issues.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payable() {
        let summary = ReviewSummary {
            estimated_cost: 3499,
            discount: 700,
            ..Default::default()
        };
        assert_eq!(summary.payable(), 2799);
        assert_eq!(summary.payable_display(), "₹2,799");
        assert_eq!(summary.discount_display(), "₹700");
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub label: String,
    /// Whole rupees.
    pub price: u32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: String,
    pub name: String,
    pub price_monthly: u32,
    pub discount_percent: u32,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub perks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Discount applied to every new booking, in percent.
    pub discount_percent: u32,
    /// Issue id that is exclusive with every other issue.
    pub diagnosis_issue: String,
    pub devices: Vec<DeviceType>,
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub plans: Vec<MembershipPlan>,
}

impl Catalog {
    pub fn device(&self, id: &str) -> Option<&DeviceType> {
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    pub fn plan(&self, id: &str) -> Option<&MembershipPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn brands_for(&self, device_id: &str) -> &[String] {
        self.device(device_id)
            .map(|d| d.brands.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_diagnosis(&self, issue_id: &str) -> bool {
        self.diagnosis_issue == issue_id
    }

    /// Labels for the given issue ids, unknown ids passed through as-is.
    pub fn issue_labels<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .map(|id| {
                self.issue(id)
                    .map(|i| i.label.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect()
    }

    /// Sum of the listed prices of the given issues.
    pub fn estimate<'a, I>(&self, ids: I) -> u32
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .filter_map(|id| self.issue(id))
            .map(|i| i.price)
            .sum()
    }

    /// Booking discount on `cost`, rounded to whole rupees.
    pub fn discount_for(&self, cost: u32) -> u32 {
        percent_of(cost, self.discount_percent)
    }
}

/// `percent`% of `amount`, rounded half up.
pub fn percent_of(amount: u32, percent: u32) -> u32 {
    ((amount as u64 * percent as u64 + 50) / 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_rounds() {
        assert_eq!(percent_of(3499, 20), 700);
        assert_eq!(percent_of(5999, 20), 1200);
        assert_eq!(percent_of(0, 20), 0);
        assert_eq!(percent_of(499, 10), 50);
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info};

use super::summary::ReviewSummary;
use crate::address::{AddressInput, AddressStore};
use crate::booking::{
    generate_booking_id, generate_otp, BookingHistoryItem, BookingStatus, BookingStore,
};
use crate::catalog::Catalog;
use crate::currency::format_inr;
use crate::error::{RepairError, Result};
use crate::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Device,
    Brand,
    Issues,
    Contact,
    Review,
    Success,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Device,
        WizardStep::Brand,
        WizardStep::Issues,
        WizardStep::Contact,
        WizardStep::Review,
        WizardStep::Success,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Device => "Select Device",
            WizardStep::Brand => "Select Brand",
            WizardStep::Issues => "What's Wrong?",
            WizardStep::Contact => "Contact & Address",
            WizardStep::Review => "Review Booking",
            WizardStep::Success => "Booking Confirmed",
        }
    }

    fn following(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn preceding(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Where the technician should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressChoice {
    Saved(u32),
    #[default]
    New,
}

/// Photo attached to the booking form. Only the name and a preview URL are
/// kept; the bytes never leave the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub preview_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub address: AddressInput,
    pub description: String,
    pub image: Option<ImageAttachment>,
}

#[derive(Clone)]
pub struct BookingWizard {
    catalog: Arc<Catalog>,
    addresses: AddressStore,
    bookings: BookingStore,
    step: WizardStep,
    device_type: Option<String>,
    selected_brand: Option<String>,
    selected_issues: Vec<String>,
    form: ContactForm,
    address_choice: AddressChoice,
    confirmed: Option<BookingHistoryItem>,
}

impl BookingWizard {
    pub fn new(catalog: Arc<Catalog>, addresses: AddressStore, bookings: BookingStore) -> Self {
        Self {
            catalog,
            addresses,
            bookings,
            step: WizardStep::Device,
            device_type: None,
            selected_brand: None,
            selected_issues: Vec::new(),
            form: ContactForm::default(),
            address_choice: AddressChoice::New,
            confirmed: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn device_type(&self) -> Option<&str> {
        self.device_type.as_deref()
    }

    pub fn selected_brand(&self) -> Option<&str> {
        self.selected_brand.as_deref()
    }

    pub fn selected_issues(&self) -> &[String] {
        &self.selected_issues
    }

    pub fn is_issue_selected(&self, issue_id: &str) -> bool {
        self.selected_issues.iter().any(|i| i == issue_id)
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn address_choice(&self) -> AddressChoice {
        self.address_choice
    }

    /// The booking created by the last successful submit.
    pub fn confirmed(&self) -> Option<&BookingHistoryItem> {
        self.confirmed.as_ref()
    }

    /// Brands offered for the selected device.
    pub fn brands(&self) -> &[String] {
        self.device_type
            .as_deref()
            .map(|d| self.catalog.brands_for(d))
            .unwrap_or(&[])
    }

    /// Pick the device type and move on to brands. Any brand or issues chosen
    /// for a previous device are dropped.
    pub fn select_device(&mut self, device_id: &str) -> Result<()> {
        self.ensure_editable()?;
        if self.catalog.device(device_id).is_none() {
            return Err(RepairError::NotFound(format!("device type {}", device_id)));
        }
        self.device_type = Some(device_id.to_string());
        self.selected_brand = None;
        self.selected_issues.clear();
        self.go_to(WizardStep::Brand);
        Ok(())
    }

    pub fn select_brand(&mut self, brand: &str) -> Result<()> {
        self.ensure_editable()?;
        if !self.brands().iter().any(|b| b == brand) {
            return Err(RepairError::Validation(format!(
                "{} is not offered for this device",
                brand
            )));
        }
        self.selected_brand = Some(brand.to_string());
        Ok(())
    }

    /// Add an issue to the selection.
    ///
    /// The diagnosis issue is exclusive: selecting it replaces the whole
    /// selection, and selecting anything else drops it.
    pub fn select_issue(&mut self, issue_id: &str) -> Result<()> {
        self.ensure_editable()?;
        if self.catalog.issue(issue_id).is_none() {
            return Err(RepairError::NotFound(format!("issue {}", issue_id)));
        }
        if self.catalog.is_diagnosis(issue_id) {
            self.selected_issues = vec![issue_id.to_string()];
            return Ok(());
        }
        let diagnosis = &self.catalog.diagnosis_issue;
        self.selected_issues.retain(|i| i != diagnosis);
        if !self.is_issue_selected(issue_id) {
            self.selected_issues.push(issue_id.to_string());
        }
        Ok(())
    }

    /// Deselect a selected issue, otherwise behave like [`Self::select_issue`].
    pub fn toggle_issue(&mut self, issue_id: &str) -> Result<()> {
        if self.is_issue_selected(issue_id) {
            self.ensure_editable()?;
            self.selected_issues.retain(|i| i != issue_id);
            Ok(())
        } else {
            self.select_issue(issue_id)
        }
    }

    /// Fill empty name/phone fields from the saved profile.
    pub fn prefill_contact(&mut self, profile: &UserProfile) {
        if self.form.name.trim().is_empty() {
            self.form.name = profile.name.clone();
        }
        if self.form.phone.trim().is_empty() {
            self.form.phone = profile.phone.clone();
        }
    }

    pub fn choose_saved_address(&mut self, id: u32) -> Result<()> {
        if self.addresses.get(id).is_none() {
            return Err(RepairError::NotFound(format!("address {}", id)));
        }
        self.address_choice = AddressChoice::Saved(id);
        Ok(())
    }

    pub fn use_new_address(&mut self) {
        self.address_choice = AddressChoice::New;
    }

    /// Check the current step's requirements.
    pub fn validate_step(&self) -> Result<()> {
        match self.step {
            WizardStep::Device => {
                if self.device_type.is_none() {
                    return Err(RepairError::Validation("Select a device type".into()));
                }
            }
            WizardStep::Brand => {
                if self.selected_brand.as_deref().unwrap_or("").is_empty() {
                    return Err(RepairError::Validation("Select a brand".into()));
                }
            }
            WizardStep::Issues => {
                if self.selected_issues.is_empty() {
                    return Err(RepairError::Validation("Select at least one issue".into()));
                }
            }
            WizardStep::Contact => self.validate_contact()?,
            WizardStep::Review | WizardStep::Success => {}
        }
        Ok(())
    }

    pub fn can_advance(&self) -> bool {
        self.step < WizardStep::Review && self.validate_step().is_ok()
    }

    /// Move forward one step if the current one is complete. The review step
    /// only moves forward through [`Self::submit`].
    pub fn next(&mut self) -> Result<WizardStep> {
        if self.step >= WizardStep::Review {
            return Err(RepairError::InvalidTransition(format!(
                "cannot advance past {}",
                self.step.title()
            )));
        }
        self.validate_step()?;
        if let Some(next) = self.step.following() {
            if next == WizardStep::Contact {
                self.preselect_address();
            }
            self.go_to(next);
        }
        Ok(self.step)
    }

    /// Go back one step. The first and success steps stay where they are.
    pub fn back(&mut self) -> WizardStep {
        if self.step != WizardStep::Success {
            if let Some(prev) = self.step.preceding() {
                self.go_to(prev);
            }
        }
        self.step
    }

    pub fn summary(&self) -> ReviewSummary {
        let device = self
            .device_type
            .as_deref()
            .and_then(|d| self.catalog.device(d))
            .map(|d| d.label.clone())
            .unwrap_or_default();
        let estimated_cost = self.catalog.estimate(&self.selected_issues);
        let address = match self.address_choice {
            AddressChoice::Saved(id) => self.addresses.get(id).map(|a| a.flattened()),
            AddressChoice::New if self.form.address.is_complete() => {
                Some(self.form.address.flattened())
            }
            AddressChoice::New => None,
        };

        ReviewSummary {
            device,
            brand: self.selected_brand.clone().unwrap_or_default(),
            issues: self.catalog.issue_labels(&self.selected_issues),
            estimated_cost,
            discount: self.catalog.discount_for(estimated_cost),
            name: self.form.name.trim().to_string(),
            phone: self.form.phone.trim().to_string(),
            address,
            description: self.form.description.trim().to_string(),
        }
    }

    /// Record the booking.
    ///
    /// A newly entered address is saved first (default only if it is the
    /// first one). The booking goes to the front of the history with a fresh
    /// `BK-` id and a four-digit OTP.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<BookingHistoryItem> {
        if self.step != WizardStep::Review {
            return Err(RepairError::InvalidTransition(format!(
                "cannot submit from {}",
                self.step.title()
            )));
        }

        let address = match self.address_choice {
            AddressChoice::Saved(id) => self
                .addresses
                .get(id)
                .ok_or_else(|| RepairError::NotFound(format!("address {}", id)))?,
            AddressChoice::New => self.addresses.add(self.form.address.clone())?,
        };

        let summary = self.summary();
        let existing = self.bookings.ids();
        let id = generate_booking_id(
            now.timestamp_millis(),
            existing.iter().map(String::as_str),
        );
        let timestamp = now.to_rfc3339();

        let booking = BookingHistoryItem {
            id,
            device: format!("{} {}", summary.brand, summary.device),
            issue: summary.issues_display(),
            date: timestamp.clone(),
            status: BookingStatus::Active,
            cost: format_inr(summary.estimated_cost as f64),
            discount: format_inr(summary.discount as f64),
            rating: 0,
            otp: generate_otp(rng),
            customer_name: summary.name,
            customer_phone: summary.phone,
            address: address.flattened(),
            description: summary.description,
            created_at: timestamp,
        };

        self.bookings.prepend(booking.clone())?;
        info!("Booking {} submitted", booking.id);
        self.confirmed = Some(booking.clone());
        self.go_to(WizardStep::Success);
        Ok(booking)
    }

    /// Throw away everything entered and return to the first step. Stores are
    /// not touched. Returns the attached image so its preview can be released.
    pub fn reset(&mut self) -> Option<ImageAttachment> {
        let image = self.form.image.take();
        self.step = WizardStep::Device;
        self.device_type = None;
        self.selected_brand = None;
        self.selected_issues.clear();
        self.form = ContactForm::default();
        self.address_choice = AddressChoice::New;
        self.confirmed = None;
        debug!("Booking wizard reset");
        image
    }

    fn validate_contact(&self) -> Result<()> {
        if self.form.name.trim().is_empty() {
            return Err(RepairError::Validation("Name is required".into()));
        }
        if self.form.phone.trim().is_empty() {
            return Err(RepairError::Validation("Phone number is required".into()));
        }
        match self.address_choice {
            AddressChoice::Saved(id) => {
                if self.addresses.get(id).is_none() {
                    return Err(RepairError::Validation(
                        "The selected address no longer exists".into(),
                    ));
                }
            }
            AddressChoice::New => self.form.address.validate()?,
        }
        Ok(())
    }

    /// Point the address choice at the default saved address, else the first
    /// one, else the new-address form. A still-valid explicit choice is kept.
    fn preselect_address(&mut self) {
        let saved = self.addresses.list();
        if let AddressChoice::Saved(id) = self.address_choice {
            if saved.iter().any(|a| a.id == id) {
                return;
            }
        }
        self.address_choice = saved
            .iter()
            .find(|a| a.is_default)
            .or_else(|| saved.first())
            .map(|a| AddressChoice::Saved(a.id))
            .unwrap_or(AddressChoice::New);
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.step == WizardStep::Success {
            return Err(RepairError::InvalidTransition(
                "booking already submitted".into(),
            ));
        }
        Ok(())
    }

    fn go_to(&mut self, step: WizardStep) {
        debug!("Wizard step {:?} -> {:?}", self.step, step);
        self.step = step;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::address::AddressType;
    use crate::catalog::default_catalog;
    use crate::events::EventBus;
    use crate::storage::MemoryStorage;

    fn wizard() -> BookingWizard {
        let storage = MemoryStorage::shared();
        let bus = EventBus::new();
        BookingWizard::new(
            Arc::new(default_catalog()),
            AddressStore::new(storage.clone(), bus.clone()),
            BookingStore::new(storage, bus),
        )
    }

    fn at_issues() -> BookingWizard {
        let mut w = wizard();
        w.select_device("laptop").unwrap();
        w.select_brand("Dell").unwrap();
        w.next().unwrap();
        w
    }

    fn fill_new_address(w: &mut BookingWizard) {
        let form = w.form_mut();
        form.name = "Asha".into();
        form.phone = "9999999999".into();
        form.address = AddressInput {
            kind: AddressType::Home,
            address: "7 Lake View".into(),
            city: "Kochi".into(),
            state: "Kerala".into(),
            pincode: "682001".into(),
        };
    }

    #[test]
    fn test_select_device_advances_and_clears() {
        let mut w = at_issues();
        w.select_issue("battery").unwrap();

        w.select_device("desktop").unwrap();

        assert_eq!(w.step(), WizardStep::Brand);
        assert!(w.selected_brand().is_none());
        assert!(w.selected_issues().is_empty());
    }

    #[test]
    fn test_unknown_device_rejected() {
        let mut w = wizard();
        assert!(w.select_device("toaster").is_err());
        assert_eq!(w.step(), WizardStep::Device);
    }

    #[test]
    fn test_brand_required() {
        let mut w = wizard();
        w.select_device("laptop").unwrap();
        assert!(!w.can_advance());
        assert!(w.next().is_err());
        assert!(w.select_brand("Apple").is_err());
        w.select_brand("HP").unwrap();
        assert_eq!(w.next().unwrap(), WizardStep::Issues);
    }

    #[test]
    fn test_diagnosis_is_exclusive() {
        let mut w = at_issues();
        w.select_issue("battery").unwrap();
        w.select_issue("screen").unwrap();

        w.select_issue("not-sure").unwrap();
        assert_eq!(w.selected_issues(), ["not-sure".to_string()]);

        w.select_issue("keyboard").unwrap();
        assert_eq!(w.selected_issues(), ["keyboard".to_string()]);
    }

    #[test]
    fn test_toggle_deselects() {
        let mut w = at_issues();
        w.toggle_issue("battery").unwrap();
        w.toggle_issue("screen").unwrap();
        w.toggle_issue("battery").unwrap();
        assert_eq!(w.selected_issues(), ["screen".to_string()]);
    }

    #[test]
    fn test_issue_required() {
        let mut w = at_issues();
        assert!(matches!(w.next(), Err(RepairError::Validation(_))));
        w.toggle_issue("battery").unwrap();
        assert_eq!(w.next().unwrap(), WizardStep::Contact);
    }

    #[test]
    fn test_contact_requires_complete_new_address() {
        let mut w = at_issues();
        w.select_issue("battery").unwrap();
        w.next().unwrap();
        assert_eq!(w.address_choice(), AddressChoice::New);

        fill_new_address(&mut w);
        w.form_mut().address.pincode = "68200".into();
        assert!(!w.can_advance());

        w.form_mut().address.pincode = "682001".into();
        assert!(w.can_advance());
        assert_eq!(w.next().unwrap(), WizardStep::Review);
    }

    #[test]
    fn test_contact_preselects_default_address() {
        let mut w = at_issues();
        w.addresses
            .add(AddressInput {
                kind: AddressType::Office,
                address: "1 Tech Park".into(),
                city: "Hyderabad".into(),
                state: "Telangana".into(),
                pincode: "500081".into(),
            })
            .unwrap();
        w.select_issue("screen").unwrap();
        w.next().unwrap();

        assert_eq!(w.address_choice(), AddressChoice::Saved(1));
    }

    #[test]
    fn test_back() {
        let mut w = at_issues();
        assert_eq!(w.back(), WizardStep::Brand);
        assert_eq!(w.back(), WizardStep::Device);
        assert_eq!(w.back(), WizardStep::Device);
    }

    #[test]
    fn test_submit_only_from_review() {
        let mut w = at_issues();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            w.submit(&mut rng, Utc::now()),
            Err(RepairError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_summary_prices() {
        let mut w = at_issues();
        w.select_issue("battery").unwrap();
        w.select_issue("motherboard").unwrap();
        let summary = w.summary();
        assert_eq!(summary.device, "Laptop");
        assert_eq!(summary.brand, "Dell");
        assert_eq!(summary.estimated_cost, 9498);
        assert_eq!(summary.discount, 1900);
        assert_eq!(summary.issues_display(), "Battery Problem, Motherboard Repair");
    }

    #[test]
    fn test_reset_returns_image() {
        let mut w = at_issues();
        w.form_mut().image = Some(ImageAttachment {
            file_name: "crack.jpg".into(),
            preview_url: "blob:abc".into(),
        });
        let image = w.reset();
        assert_eq!(image.unwrap().preview_url, "blob:abc");
        assert_eq!(w.step(), WizardStep::Device);
        assert!(w.device_type().is_none());
        assert!(w.form().image.is_none());
    }

    #[test]
    fn test_prefill_keeps_typed_values() {
        let mut w = wizard();
        w.form_mut().name = "Typed".into();
        w.prefill_contact(&UserProfile {
            name: "Saved".into(),
            phone: "9000000000".into(),
            ..Default::default()
        });
        assert_eq!(w.form().name, "Typed");
        assert_eq!(w.form().phone, "9000000000");
    }
}

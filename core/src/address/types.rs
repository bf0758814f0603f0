use serde::{Deserialize, Serialize};

use crate::error::{RepairError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressType {
    #[default]
    Home,
    Office,
    Other,
}

impl AddressType {
    pub const ALL: [AddressType; 3] = [AddressType::Home, AddressType::Office, AddressType::Other];

    pub fn label(&self) -> &'static str {
        match self {
            AddressType::Home => "Home",
            AddressType::Office => "Office",
            AddressType::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// A saved address as stored under `userAddresses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: AddressType,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
}

impl Address {
    /// Single-line form used on booking records.
    pub fn flattened(&self) -> String {
        flatten(&self.address, &self.city, &self.state, &self.pincode)
    }
}

/// Address fields as entered in a form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(rename = "type")]
    pub kind: AddressType,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl AddressInput {
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(RepairError::Validation("Street address is required".into()));
        }
        if self.city.trim().is_empty() {
            return Err(RepairError::Validation("City is required".into()));
        }
        if self.state.trim().is_empty() {
            return Err(RepairError::Validation("State is required".into()));
        }
        if !is_valid_pincode(&self.pincode) {
            return Err(RepairError::Validation("Pincode must be 6 digits".into()));
        }
        Ok(())
    }

    pub fn flattened(&self) -> String {
        flatten(&self.address, &self.city, &self.state, &self.pincode)
    }

    pub(crate) fn into_address(self, id: u32, is_default: bool) -> Address {
        Address {
            id,
            kind: self.kind,
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
            is_default,
        }
    }
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        Self {
            kind: address.kind,
            address: address.address.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            pincode: address.pincode.clone(),
        }
    }
}

pub fn is_valid_pincode(pincode: &str) -> bool {
    let pincode = pincode.trim();
    pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit())
}

fn flatten(address: &str, city: &str, state: &str, pincode: &str) -> String {
    format!(
        "{}, {}, {} - {}",
        address.trim(),
        city.trim(),
        state.trim(),
        pincode.trim()
    )
}

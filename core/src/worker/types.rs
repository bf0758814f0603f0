use serde::{Deserialize, Serialize};

use crate::error::{RepairError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobStatus {
    #[default]
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Assigned => "Assigned",
            JobStatus::InProgress => "In Progress",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

/// A job in the technician queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerBooking {
    pub id: String,
    pub assigned_worker: String,
    pub status: JobStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub device: String,
    pub issue: String,
    pub address: String,
    pub scheduled_for: String,
    #[serde(default)]
    pub worker_otp: Option<String>,
    #[serde(default)]
    pub completion_photos: Vec<String>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub warranty_months: Option<u8>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Logged-in technician under `currentWorker`. The id is whatever the worker
/// typed; nothing verifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSession {
    pub worker_id: String,
    /// Display name. Sessions stored before names were kept read as empty.
    #[serde(default)]
    pub name: String,
    pub logged_in_at: String,
}

/// What the technician records when closing a job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionReport {
    /// Photo file names.
    pub photos: Vec<String>,
    pub components: Vec<String>,
    pub warranty_months: Option<u8>,
    pub notes: String,
}

impl CompletionReport {
    pub fn validate(&self) -> Result<()> {
        if self.photos.iter().all(|p| p.trim().is_empty()) {
            return Err(RepairError::Validation(
                "At least one completion photo is required".into(),
            ));
        }
        if matches!(self.warranty_months, Some(m) if m > 24) {
            return Err(RepairError::Validation(
                "Warranty cannot exceed 24 months".into(),
            ));
        }
        Ok(())
    }
}

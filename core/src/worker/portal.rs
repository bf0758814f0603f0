use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{info, warn};

use super::types::{CompletionReport, JobStatus, WorkerBooking, WorkerSession};
use crate::booking::generate_otp;
use crate::error::{RepairError, Result};
use crate::events::{EventBus, StoreEvent};
use crate::storage::{keys, read_json, read_json_or_default, write_json, SharedStorage};

/// Sample jobs handed to a technician whose queue is empty.
const DEMO_JOBS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Priya Sharma",
        "9812345670",
        "Lenovo Laptop",
        "Screen Replacement",
        "14 Residency Road, Bengaluru, Karnataka - 560025",
    ),
    (
        "Arjun Mehta",
        "9823456781",
        "HP Desktop PC",
        "Overheating / Fan Issue",
        "B-302 Sea Breeze, Mumbai, Maharashtra - 400050",
    ),
    (
        "Neha Verma",
        "9834567892",
        "Apple MacBook",
        "Battery Problem",
        "22 Civil Lines, Jaipur, Rajasthan - 302006",
    ),
];

#[derive(Clone)]
pub struct WorkerPortal {
    storage: SharedStorage,
    bus: EventBus,
}

impl WorkerPortal {
    pub fn new(storage: SharedStorage, bus: EventBus) -> Self {
        Self { storage, bus }
    }

    /// Start a technician session. A blank name falls back to the id.
    pub fn login(&self, worker_id: &str, name: &str, now: DateTime<Utc>) -> Result<WorkerSession> {
        let worker_id = worker_id.trim();
        if worker_id.is_empty() {
            return Err(RepairError::Validation("Worker ID is required".into()));
        }
        let name = match name.trim() {
            "" => worker_id,
            name => name,
        };
        let session = WorkerSession {
            worker_id: worker_id.to_string(),
            name: name.to_string(),
            logged_in_at: now.to_rfc3339(),
        };
        write_json(self.storage.as_ref(), keys::CURRENT_WORKER, &session)?;
        self.bus.publish(StoreEvent::WorkerSessionChanged);
        info!("Worker {} logged in", worker_id);
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.storage.remove_item(keys::CURRENT_WORKER)?;
        self.bus.publish(StoreEvent::WorkerSessionChanged);
        Ok(())
    }

    pub fn current_worker(&self) -> Option<WorkerSession> {
        read_json(self.storage.as_ref(), keys::CURRENT_WORKER)
    }

    pub fn jobs(&self) -> Vec<WorkerBooking> {
        read_json_or_default(self.storage.as_ref(), keys::REPAIR_BOOKINGS)
    }

    pub fn job(&self, job_id: &str) -> Option<WorkerBooking> {
        self.jobs().into_iter().find(|j| j.id == job_id)
    }

    pub fn assigned_jobs(&self, worker_id: &str) -> Vec<WorkerBooking> {
        self.jobs()
            .into_iter()
            .filter(|j| j.assigned_worker == worker_id)
            .collect()
    }

    /// Put a job in the queue as `Assigned`.
    pub fn assign(&self, mut job: WorkerBooking) -> Result<WorkerBooking> {
        if job.assigned_worker.trim().is_empty() {
            return Err(RepairError::Validation("Job has no assigned worker".into()));
        }
        let mut jobs = self.jobs();
        if jobs.iter().any(|j| j.id == job.id) {
            return Err(RepairError::Validation(format!("Job {} already exists", job.id)));
        }
        job.status = JobStatus::Assigned;
        job.worker_otp = None;
        jobs.push(job.clone());
        self.save(&jobs)?;
        info!("Assigned job {} to {}", job.id, job.assigned_worker);
        Ok(job)
    }

    /// Give a worker with an empty queue a handful of sample jobs.
    pub fn seed_demo_jobs(
        &self,
        worker_id: &str,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<WorkerBooking>> {
        if !self.assigned_jobs(worker_id).is_empty() {
            return Ok(Vec::new());
        }
        let mut seeded = Vec::new();
        for (offset, (name, phone, device, issue, address)) in
            DEMO_JOBS.iter().take(count).enumerate()
        {
            let job = WorkerBooking {
                id: self.next_job_id(),
                assigned_worker: worker_id.to_string(),
                status: JobStatus::Assigned,
                customer_name: name.to_string(),
                customer_phone: phone.to_string(),
                device: device.to_string(),
                issue: issue.to_string(),
                address: address.to_string(),
                scheduled_for: (now + Duration::hours(2 * (offset as i64 + 1))).to_rfc3339(),
                worker_otp: None,
                completion_photos: Vec::new(),
                components: Vec::new(),
                warranty_months: None,
                notes: String::new(),
                completed_at: None,
            };
            seeded.push(self.assign(job)?);
        }
        Ok(seeded)
    }

    /// Issue a fresh OTP for an assigned job. The customer reads it back to
    /// the technician on arrival.
    pub fn generate_otp<R: Rng + ?Sized>(&self, job_id: &str, rng: &mut R) -> Result<String> {
        let otp = generate_otp(rng);
        self.update_job(job_id, |job| {
            if job.status != JobStatus::Assigned {
                return Err(RepairError::InvalidTransition(format!(
                    "job {} is {}",
                    job.id,
                    job.status.label()
                )));
            }
            job.worker_otp = Some(otp.clone());
            Ok(())
        })?;
        info!("Generated OTP for job {}", job_id);
        Ok(otp)
    }

    /// Check the customer's code. On a match the job starts.
    pub fn verify_otp(&self, job_id: &str, code: &str) -> Result<WorkerBooking> {
        self.update_job(job_id, |job| {
            if job.status != JobStatus::Assigned {
                return Err(RepairError::InvalidTransition(format!(
                    "job {} is {}",
                    job.id,
                    job.status.label()
                )));
            }
            match job.worker_otp.as_deref() {
                Some(expected) if expected == code.trim() => {
                    job.status = JobStatus::InProgress;
                    job.worker_otp = None;
                    Ok(())
                }
                Some(_) => {
                    warn!("OTP mismatch for job {}", job.id);
                    Err(RepairError::OtpMismatch)
                }
                None => Err(RepairError::Validation(
                    "Generate an OTP before verifying".into(),
                )),
            }
        })
    }

    pub fn complete(
        &self,
        job_id: &str,
        report: CompletionReport,
        now: DateTime<Utc>,
    ) -> Result<WorkerBooking> {
        report.validate()?;
        self.update_job(job_id, |job| {
            if job.status != JobStatus::InProgress {
                return Err(RepairError::InvalidTransition(format!(
                    "job {} must be in progress to complete, it is {}",
                    job.id,
                    job.status.label()
                )));
            }
            job.completion_photos = report
                .photos
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            job.components = report
                .components
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            job.warranty_months = report.warranty_months;
            job.notes = report.notes.trim().to_string();
            job.completed_at = Some(now.to_rfc3339());
            job.status = JobStatus::Completed;
            Ok(())
        })
    }

    pub fn cancel(&self, job_id: &str) -> Result<WorkerBooking> {
        self.update_job(job_id, |job| {
            if job.status.is_closed() {
                return Err(RepairError::InvalidTransition(format!(
                    "job {} is already {}",
                    job.id,
                    job.status.label()
                )));
            }
            job.status = JobStatus::Cancelled;
            job.worker_otp = None;
            Ok(())
        })
    }

    fn update_job<F>(&self, job_id: &str, change: F) -> Result<WorkerBooking>
    where
        F: FnOnce(&mut WorkerBooking) -> Result<()>,
    {
        let mut jobs = self.jobs();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| RepairError::NotFound(format!("job {}", job_id)))?;
        change(job)?;
        let updated = job.clone();
        self.save(&jobs)?;
        info!("Job {} is now {}", updated.id, updated.status.label());
        Ok(updated)
    }

    fn next_job_id(&self) -> String {
        let next = self
            .jobs()
            .iter()
            .filter_map(|j| j.id.strip_prefix("RB-").and_then(|n| n.parse::<u32>().ok()))
            .max()
            .unwrap_or(0)
            + 1;
        format!("RB-{:04}", next)
    }

    fn save(&self, jobs: &[WorkerBooking]) -> Result<()> {
        write_json(self.storage.as_ref(), keys::REPAIR_BOOKINGS, jobs)?;
        self.bus.publish(StoreEvent::WorkerJobsChanged);
        Ok(())
    }
}

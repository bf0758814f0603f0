use fixit_core::booking::BookingStatus;
use fixit_core::worker::JobStatus;
use leptos::prelude::*;

/// Tone of a status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Open,
    Working,
    Done,
    Closed,
}

impl From<BookingStatus> for BadgeTone {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Active | BookingStatus::Pending => BadgeTone::Open,
            BookingStatus::InProgress => BadgeTone::Working,
            BookingStatus::Completed => BadgeTone::Done,
        }
    }
}

impl From<JobStatus> for BadgeTone {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Assigned => BadgeTone::Open,
            JobStatus::InProgress => BadgeTone::Working,
            JobStatus::Completed => BadgeTone::Done,
            JobStatus::Cancelled => BadgeTone::Closed,
        }
    }
}

#[component]
pub fn StatusBadge(
    /// Text shown in the pill, e.g. "In Progress"
    #[prop(into)]
    label: String,
    tone: BadgeTone,
) -> impl IntoView {
    let class = match tone {
        BadgeTone::Open => "status-badge status-open",
        BadgeTone::Working => "status-badge status-working",
        BadgeTone::Done => "status-badge status-done",
        BadgeTone::Closed => "status-badge status-closed",
    };

    view! { <span class=class>{label}</span> }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::form::{Attendance, RsvpForm};
use crate::models::guests::GuestCounts;

pub const EMPTY_NOTE_PLACEHOLDER: &str = "No notes";

/// Snapshot of one submission attempt, taken before the relay call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub attendance: Attendance,
    pub adults: u8,
    pub children_0_to_4: u8,
    pub children_5_plus: u8,
    pub note: String,
    pub total: u32,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    pub fn new(form: &RsvpForm, guests: &GuestCounts, submitted_at: DateTime<Utc>) -> Self {
        let note = if form.note.trim().is_empty() {
            EMPTY_NOTE_PLACEHOLDER.to_string()
        } else {
            form.note.clone()
        };

        Self {
            name: form.name.clone(),
            attendance: form.attendance,
            adults: guests.adults(),
            children_0_to_4: guests.children_0_to_4(),
            children_5_plus: guests.children_5_plus(),
            note,
            total: guests.total(),
            submitted_at,
        }
    }

    pub fn submitted_at_label(&self) -> String {
        self.submitted_at.format("%d/%m/%Y %H:%M:%S UTC").to_string()
    }

    /// Plain-text body carried in the email template.
    pub fn summary(&self) -> String {
        format!(
            "NEW RSVP RECEIVED!\n\n\
             Name: {}\n\
             Attending: {}\n\
             Adults: {}\n\
             Children (0-4 years): {}\n\
             Children (5+ years): {}\n\
             Total: {} guest(s)\n\
             Notes: {}\n\
             Date: {}\n",
            self.name,
            self.attendance.label(),
            self.adults,
            self.children_0_to_4,
            self.children_5_plus,
            self.total,
            self.note,
            self.submitted_at_label(),
        )
    }
}

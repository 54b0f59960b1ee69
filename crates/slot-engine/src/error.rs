//! Error types for slot-engine operations.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::meeting::MeetingId;
use crate::participant::ParticipantId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid search window: earliest start {earliest_start} is not before latest end {latest_end}")]
    InvalidWindow {
        earliest_start: DateTime<Utc>,
        latest_end: DateTime<Utc>,
    },

    #[error("Meeting duration must be positive, got {0}")]
    NonPositiveDuration(Duration),

    #[error("At least one participant is required")]
    NoParticipants,

    #[error("Some participants do not exist: {}", join_ids(.0))]
    InvalidParticipants(Vec<ParticipantId>),

    #[error("No available slot found for the meeting")]
    NoAvailableSlot,

    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    #[error("Participant {participant} is already on meeting {meeting}")]
    AlreadyParticipant {
        meeting: MeetingId,
        participant: ParticipantId,
    },

    #[error("Directory lookup failed: {0}")]
    Directory(String),
}

impl SchedulingError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInterval { .. } => "scheduling.invalid_interval",
            Self::InvalidWindow { .. } => "scheduling.invalid_window",
            Self::NonPositiveDuration(_) => "scheduling.non_positive_duration",
            Self::NoParticipants => "scheduling.no_participants",
            Self::InvalidParticipants(_) => "scheduling.invalid_participants",
            Self::NoAvailableSlot => "scheduling.no_available_slot",
            Self::ParticipantNotFound(_) => "scheduling.participant_not_found",
            Self::AlreadyParticipant { .. } => "scheduling.already_participant",
            Self::Directory(_) => "scheduling.directory",
        }
    }
}

fn join_ids(ids: &[ParticipantId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SchedulingError>;

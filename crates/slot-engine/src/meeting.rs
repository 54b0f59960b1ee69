//! Meetings: booked intervals shared by one or more participants.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SchedulingError};
use crate::interval::Interval;
use crate::participant::ParticipantId;

/// Opaque meeting identifier, used to count a shared meeting once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(Uuid);

impl MeetingId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for MeetingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for MeetingId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// An existing meeting. Equality and hashing go by `id` only, so two distinct
/// meetings that happen to share a time range stay distinct.
///
/// Not serializable: JSON goes through [`MeetingRecord`](crate::MeetingRecord)
/// so attendees pass the duplicate check in
/// [`InMemoryDirectory::from_roster`](crate::InMemoryDirectory::from_roster).
#[derive(Debug, Clone)]
pub struct Meeting {
    pub id: MeetingId,
    pub interval: Interval,
    participants: Vec<ParticipantId>,
}

impl Meeting {
    /// Create a meeting with a freshly minted id and no participants.
    pub fn new(interval: Interval) -> Self {
        Self::with_id(MeetingId::new(), interval)
    }

    pub fn with_id(id: MeetingId, interval: Interval) -> Self {
        Self {
            id,
            interval,
            participants: Vec::new(),
        }
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn has_participant(&self, participant: ParticipantId) -> bool {
        self.participants.contains(&participant)
    }

    /// Add a participant to the meeting.
    ///
    /// # Errors
    /// Returns `SchedulingError::AlreadyParticipant` if the participant is
    /// already on the meeting.
    pub fn add_participant(&mut self, participant: ParticipantId) -> Result<()> {
        if self.has_participant(participant) {
            return Err(SchedulingError::AlreadyParticipant {
                meeting: self.id,
                participant,
            });
        }
        self.participants.push(participant);
        Ok(())
    }
}

impl PartialEq for Meeting {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Meeting {}

impl Hash for Meeting {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

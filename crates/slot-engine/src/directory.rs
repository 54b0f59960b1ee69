//! Participant and meeting lookups used by the scheduler.
//!
//! [`Directory`] is the only seam between the scheduling logic and whatever
//! stores participants and their meetings. [`InMemoryDirectory`] is a complete
//! implementation backed by plain vectors; it can be built programmatically or
//! loaded from a JSON [`Roster`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::interval::Interval;
use crate::meeting::{Meeting, MeetingId};
use crate::participant::{Participant, ParticipantId};

/// Source of participant records and their booked meetings.
pub trait Directory: Send + Sync {
    /// Look up a participant. `Ok(None)` means the id is unknown.
    fn resolve_participant(&self, id: ParticipantId) -> Result<Option<Participant>>;

    /// All meetings the participant is booked into.
    fn busy_meetings(&self, participant: &Participant) -> Result<Vec<Meeting>>;
}

/// In-memory participant and meeting store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    participants: Vec<Participant>,
    meetings: Vec<Meeting>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant. Returns `false` (and keeps the existing record) if
    /// a participant with the same id is already present.
    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if self.participants.contains(&participant) {
            return false;
        }
        self.participants.push(participant);
        true
    }

    /// Add a meeting. Returns `false` (and keeps the existing record) if a
    /// meeting with the same id is already present.
    pub fn add_meeting(&mut self, meeting: Meeting) -> bool {
        if self.meetings.contains(&meeting) {
            return false;
        }
        self.meetings.push(meeting);
        true
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn meeting(&self, id: MeetingId) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == id)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Meetings that list `participant`, in insertion order.
    pub fn meetings_for(&self, participant: &Participant) -> impl Iterator<Item = &Meeting> + '_ {
        let id = participant.id;
        self.meetings.iter().filter(move |m| m.has_participant(id))
    }

    /// Build a directory from a roster.
    ///
    /// # Errors
    /// Returns `SchedulingError::InvalidInterval` for a meeting whose start is
    /// not before its end, `SchedulingError::ParticipantNotFound` if a meeting lists a
    /// participant the roster does not define, and
    /// `SchedulingError::AlreadyParticipant` if a meeting lists the same
    /// participant twice.
    pub fn from_roster(roster: Roster) -> Result<Self> {
        let mut directory = Self::new();
        for participant in roster.participants {
            directory.add_participant(participant);
        }

        for record in roster.meetings {
            let interval = Interval::new(record.start, record.end)?;
            let mut meeting = Meeting::with_id(record.id, interval);
            for participant in record.participants {
                if directory.participant(participant).is_none() {
                    return Err(SchedulingError::ParticipantNotFound(participant));
                }
                meeting.add_participant(participant)?;
            }
            directory.add_meeting(meeting);
        }

        Ok(directory)
    }
}

impl Directory for InMemoryDirectory {
    fn resolve_participant(&self, id: ParticipantId) -> Result<Option<Participant>> {
        Ok(self.participant(id).cloned())
    }

    fn busy_meetings(&self, participant: &Participant) -> Result<Vec<Meeting>> {
        Ok(self.meetings_for(participant).cloned().collect())
    }
}

/// Serializable snapshot of participants and meetings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
}

/// A meeting as it appears in a [`Roster`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: MeetingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<ParticipantId>,
}

impl From<&Meeting> for MeetingRecord {
    fn from(meeting: &Meeting) -> Self {
        Self {
            id: meeting.id,
            start: meeting.interval.start(),
            end: meeting.interval.end(),
            participants: meeting.participants().to_vec(),
        }
    }
}

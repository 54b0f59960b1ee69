//! Find the earliest slot every requested participant can attend.
//!
//! Gathers each participant's meetings from a [`Directory`], keeps the ones
//! that overlap the search window, merges their intervals and hands the merged
//! busy set to [`freebusy::find_earliest_start`].

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::directory::Directory;
use crate::error::{Result, SchedulingError};
use crate::freebusy;
use crate::interval::Interval;
use crate::meeting::Meeting;
use crate::participant::{Participant, ParticipantId};

/// A request for a new meeting slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRequest {
    /// Who must attend. Duplicates are ignored.
    pub participant_ids: Vec<ParticipantId>,
    /// Length of the meeting.
    pub duration: Duration,
    /// The slot may not start before this instant.
    pub earliest_start: DateTime<Utc>,
    /// The slot must end at or before this instant.
    pub latest_end: DateTime<Utc>,
}

impl MeetingRequest {
    pub fn new(
        participant_ids: impl IntoIterator<Item = ParticipantId>,
        duration: Duration,
        earliest_start: DateTime<Utc>,
        latest_end: DateTime<Utc>,
    ) -> Self {
        Self {
            participant_ids: participant_ids.into_iter().collect(),
            duration,
            earliest_start,
            latest_end,
        }
    }

    /// Check the request's preconditions.
    ///
    /// # Errors
    /// Returns `NoParticipants`, `NonPositiveDuration` or `InvalidWindow`.
    pub fn validate(&self) -> Result<()> {
        if self.participant_ids.is_empty() {
            return Err(SchedulingError::NoParticipants);
        }
        if self.duration <= Duration::zero() {
            return Err(SchedulingError::NonPositiveDuration(self.duration));
        }
        if self.earliest_start >= self.latest_end {
            return Err(SchedulingError::InvalidWindow {
                earliest_start: self.earliest_start,
                latest_end: self.latest_end,
            });
        }
        Ok(())
    }

    /// Participant ids with duplicates removed, first occurrence kept.
    fn distinct_participant_ids(&self) -> Vec<ParticipantId> {
        let mut seen = HashSet::new();
        self.participant_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Find the earliest interval of `request.duration` inside
/// `[request.earliest_start, request.latest_end)` during which none of the
/// requested participants has a meeting.
///
/// A meeting shared by several participants is counted once. Meetings that end
/// exactly at `earliest_start` or start exactly at `latest_end` do not block,
/// and the slot may abut existing meetings on either side.
///
/// # Errors
/// - Request precondition errors from [`MeetingRequest::validate`], before any lookup.
/// - `SchedulingError::InvalidParticipants` listing every id the directory
///   cannot resolve.
/// - `SchedulingError::NoAvailableSlot` when no gap is long enough.
/// - Any error the directory itself returns.
pub fn find_earliest_slot<D>(directory: &D, request: &MeetingRequest) -> Result<Interval>
where
    D: Directory + ?Sized,
{
    request.validate()?;
    debug!(
        participants = request.participant_ids.len(),
        duration_minutes = request.duration.num_minutes(),
        earliest_start = %request.earliest_start,
        latest_end = %request.latest_end,
        "searching for earliest slot"
    );

    let participants = resolve_participants(directory, &request.distinct_participant_ids())?;

    let mut seen = HashSet::new();
    let mut meetings: Vec<Meeting> = Vec::new();
    for participant in &participants {
        for meeting in directory.busy_meetings(participant)? {
            if seen.insert(meeting.id) {
                meetings.push(meeting);
            }
        }
    }
    let fetched = meetings.len();

    let busy = freebusy::merge_busy_intervals(
        meetings
            .into_iter()
            .map(|m| m.interval)
            .filter(|i| i.overlaps_window(request.earliest_start, request.latest_end)),
    );
    debug!(fetched, merged = busy.len(), "collected busy intervals");

    let Some(start) = freebusy::find_earliest_start(
        &busy,
        request.earliest_start,
        request.latest_end,
        request.duration,
    ) else {
        debug!("no gap long enough in the search window");
        return Err(SchedulingError::NoAvailableSlot);
    };

    let slot = Interval::starting_at(start, request.duration)?;
    info!(start = %slot.start(), end = %slot.end(), "found earliest slot");
    Ok(slot)
}

/// List a participant's meetings, sorted by start time.
///
/// # Errors
/// Returns `SchedulingError::ParticipantNotFound` if the id does not resolve,
/// or any error the directory returns.
pub fn participant_meetings<D>(directory: &D, id: ParticipantId) -> Result<Vec<Meeting>>
where
    D: Directory + ?Sized,
{
    let participant = directory
        .resolve_participant(id)?
        .ok_or(SchedulingError::ParticipantNotFound(id))?;

    let mut meetings = directory.busy_meetings(&participant)?;
    meetings.sort_by_key(|m| (m.interval.start(), m.interval.end()));
    Ok(meetings)
}

/// Resolve every id or fail with the full list of unknown ones.
fn resolve_participants<D>(directory: &D, ids: &[ParticipantId]) -> Result<Vec<Participant>>
where
    D: Directory + ?Sized,
{
    let mut resolved = Vec::with_capacity(ids.len());
    let mut missing = Vec::new();

    for &id in ids {
        match directory.resolve_participant(id)? {
            Some(participant) => resolved.push(participant),
            None => missing.push(id),
        }
    }

    if !missing.is_empty() {
        warn!(missing = missing.len(), "unknown participants in meeting request");
        return Err(SchedulingError::InvalidParticipants(missing));
    }

    Ok(resolved)
}

//! # slot-engine
//!
//! Find the earliest meeting slot that every participant can attend.
//!
//! Each participant's existing meetings are collected from a [`Directory`],
//! restricted to the search window, merged into a minimal set of busy blocks,
//! and scanned for the first gap long enough to hold the new meeting. All
//! timestamps are UTC.
//!
//! ## Modules
//!
//! - [`interval`] — validated half-open `[start, end)` time ranges
//! - [`participant`] — participant ids and records
//! - [`meeting`] — existing meetings and their participants
//! - [`freebusy`] — merge busy intervals, find the earliest free start
//! - [`directory`] — lookup trait plus an in-memory implementation
//! - [`scheduler`] — the end-to-end earliest-slot search
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use slot_engine::{find_earliest_slot, InMemoryDirectory, Interval, Meeting, MeetingRequest, Participant};
//!
//! let alice = Participant::new("Alice");
//! let mut standup = Meeting::new(Interval::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
//! ).unwrap());
//! standup.add_participant(alice.id).unwrap();
//!
//! let mut directory = InMemoryDirectory::new();
//! directory.add_participant(alice.clone());
//! directory.add_meeting(standup);
//!
//! let request = MeetingRequest::new(
//!     [alice.id],
//!     Duration::minutes(30),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 17, 0, 0).unwrap(),
//! );
//! let slot = find_earliest_slot(&directory, &request).unwrap();
//! assert_eq!(slot.start(), Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
//! ```

pub mod directory;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod meeting;
pub mod participant;
pub mod scheduler;

pub use directory::{Directory, InMemoryDirectory, MeetingRecord, Roster};
pub use error::{Result, SchedulingError};
pub use freebusy::{find_earliest_start, merge_busy_intervals};
pub use interval::Interval;
pub use meeting::{Meeting, MeetingId};
pub use participant::{Participant, ParticipantId};
pub use scheduler::{find_earliest_slot, participant_meetings, MeetingRequest};

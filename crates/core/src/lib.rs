//! # Convene Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The conflict checker that gates every meeting write
//! - Port interfaces (traits) for meeting persistence
//! - The scheduling service enforcing roles and meeting lifecycle
//!
//! ## Architecture Principles
//! - Only depends on `convene-domain`
//! - No HTTP, storage or platform code
//! - All external dependencies via traits

pub mod scheduling;

pub use scheduling::conflict::{ConflictChecker, LinearConflictChecker, ScheduleByParticipant};
pub use scheduling::ports::MeetingRepository;
pub use scheduling::SchedulingService;

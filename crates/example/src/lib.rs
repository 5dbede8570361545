//! Example bindings built with veneer.
//!
//! Two independent halves:
//!
//! - [`bearings`] wraps bearing analysis results exposed by a foreign
//!   runtime. [`sample_analysis`] builds such a runtime in memory.
//! - [`clerk`] holds DTOs for a user-management REST API, decoded
//!   losslessly so fields added by newer API versions survive a round trip.
//!
//! # Type hierarchy
//!
//! ```text
//! BearingLoadCaseResultsLightweight
//!   └── LoadedBearingResults
//!         ├── LoadedRollingBearingResults  (IHasDuration)
//!         │     ├── LoadedBallBearingResults
//!         │     └── LoadedRollerBearingResults
//!         └── LoadedPlainBearingResults
//! ```

pub mod bearings;
pub mod clerk;
mod sample;

pub use bearings::BearingsModule;
pub use sample::sample_analysis;

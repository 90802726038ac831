// src/domain/import/mod.rs
//
// Import Domain
//
// Value objects for the smart import pipeline.
// No I/O, no persistence, no event emission (that's the service's job).

pub mod value_objects;

pub use value_objects::{
    CandidateRecord,
    CommitSummary,
    ImportMatch,
    ImportProgress,
    ParsedEntry,
    Provenance,
    SecondaryStatus,
    SessionPhase,
};

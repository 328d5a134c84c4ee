//! Core data models for the Compa-Ratio Band Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod band;
mod employee;
mod import_result;
mod positioning;

pub use band::{BandKey, BandMap, BandSource, ComputedBand};
pub use employee::{EmployeeRecord, ExtraValue, NO_GROUP, NO_LEVEL};
pub use import_result::{
    AuditStep, AuditTrace, BandStatus, GroupBelowCount, ImportResult, ImportSummary,
    ImportWarning, PositioningMeta, ResultRow,
};
pub use positioning::{
    POSITIONING_HIGH, POSITIONING_LOW, POSITIONING_MID, PositioningEntry, PositioningKey,
    PositioningTable,
};

//! Application layer for Intake.
//!
//! This crate provides the use case that coordinates the session domain
//! model with a backend transport.

pub mod intake_service;

pub use intake_service::{IntakeService, ResetOutcome, TurnOutcome};

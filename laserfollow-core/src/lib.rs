//! Board-agnostic core logic for the laser follow-head controller
//!
//! This crate contains all logic that does not depend on a particular
//! laser output or board:
//!
//! - Follow phase state machine and the sequence result taxonomy
//! - Tagged follow commands (and the legacy numeric code decoding)
//! - Fault escalation sink
//! - Bounded, cancellable polling wait
//! - Configuration type definitions and validation

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod safety;
pub mod state;
pub mod timing;

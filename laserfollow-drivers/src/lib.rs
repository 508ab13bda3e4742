//! Laser follow-head driver implementations
//!
//! This crate provides the concrete pieces built on the traits in
//! laserfollow-hal and the logic in laserfollow-core:
//!
//! - Laser duty gate (idempotent, arm/disarm aware)
//! - Follow fixture signal bundle
//! - Follow sequencer (pierce/cut handshake)
//! - Spindle core with an optional follow strategy
//! - Command-channel controller with fault escalation
//! - embedded-hal PWM adapter and an embassy-time clock

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

#[cfg(feature = "embassy")]
pub mod clock;
pub mod laser;
pub mod spindle;

#[cfg(test)]
mod sim;

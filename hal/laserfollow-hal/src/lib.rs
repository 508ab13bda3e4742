//! Laserfollow Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interfaces the follow-head
//! controller consumes. Chip-specific HALs (or thin adapters over
//! embedded-hal / embassy types) implement them; the controller logic
//! never touches registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  laserfollow-drivers (gate, sequencer)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  laserfollow-hal (this crate - traits)  │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board GPIO / │       │  board timer  │
//! │  PWM drivers  │       │  (monotonic)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::DutyOutput`] - Hardware laser duty application
//! - [`time::Monotonic`] - Microsecond monotonic counter
//!
//! Task suspension is not defined here: the controller uses
//! `embedded_hal_async::delay::DelayNs` directly.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLow, InputPin, OutputPin};
pub use pwm::DutyOutput;
pub use time::Monotonic;

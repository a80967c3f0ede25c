//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `booking` - Hotel booking vocabulary (slots, choices, dates, recognition)
//! - `dialog` - Stack-based dialog orchestration and the booking dialogs

pub mod booking;
pub mod dialog;
pub mod foundation;

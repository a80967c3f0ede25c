//! Booking Concierge - Conversational Hotel Booking
//!
//! This crate implements a slot-filling dialog engine that walks a guest
//! through a hotel room booking, one question per turn, with nested
//! sub-dialogs for breakfast and arrival dates and global help and cancel
//! interruptions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Slotline - Time-Slot Booking Coordination Service
//!
//! This crate manages bounded-capacity time-slot reservations ("bookings"),
//! a waitlist that is promoted when slots free up, and linkage of
//! multi-session purchases to session-tracking packages.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

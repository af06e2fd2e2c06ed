//! CampusFit - University Gym Membership Intake Service
//!
//! This crate validates gym membership applications from enrolled students
//! and records a pending account together with its billing intent.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Attention Warden - Value-Aligned Content Evaluation Core
//!
//! This crate decides, for a single piece of digital content and a single
//! user, whether to show, suppress, elevate, or annotate that content,
//! based on a learned model of the user's values: feature extraction,
//! value-alignment scoring, user-rule evaluation, decision synthesis with
//! safety constraints, and feedback-driven belief updates.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

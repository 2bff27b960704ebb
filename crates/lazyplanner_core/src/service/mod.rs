//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the planner store, snapshot persistence, and the id
//!   and completion collaborators into use-case level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod collaborators;
pub mod planner_service;

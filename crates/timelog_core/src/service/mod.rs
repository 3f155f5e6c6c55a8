//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into page-level use cases.
//! - Feed repository output into the timeline projections.
//! - Keep the web layer decoupled from storage details.

pub mod contact_service;
pub mod project_service;
pub mod work_service;

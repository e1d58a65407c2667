//! Core types shared across rolesync facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error facility and the logging facility: structured field keys and
//! event names.

pub mod schema;

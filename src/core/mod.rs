//! Core business logic - framework-agnostic habit, log, and statistics
//! operations. Each submodule owns one concern and exposes free async
//! functions over the shared store handle.

/// Automatic habit evaluation from health metrics
pub mod automatic;
/// Comparison chart data building
pub mod compare;
/// Daily log upsert protocol and range queries
pub mod daily_log;
/// Habit CRUD and seeding
pub mod habit;
/// Streaks and aggregate statistics
pub mod stats;

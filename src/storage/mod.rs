mod gateway;

pub use gateway::*;

/// SQL migration for the kv slot table
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

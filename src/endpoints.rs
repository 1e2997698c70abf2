//! The API endpoints URIs.

/// The root route, used as a liveness check.
pub const ROOT: &str = "/";

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";

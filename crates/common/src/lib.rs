//! Shared building blocks for the registry workspace: response types that do
//! not belong to any entity and the tracing setup used by every binary.

pub mod types;
pub mod utils;

/// Base path every versioned resource is mounted under.
pub const API_PREFIX: &str = "/api/v1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn api_prefix_is_versioned() {
        assert!(API_PREFIX.starts_with('/'));
        assert!(API_PREFIX.ends_with("v1"));
    }
}

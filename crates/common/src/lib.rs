//! Pieces shared by every crate in the workspace: transport types and
//! logging setup.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn envelope_serializes_iso_timestamp() {
        let env = types::Envelope::ok("Plan Status Option created");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["message"], "Plan Status Option created");
        assert_eq!(json["status"], "OK");
        let ts = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}

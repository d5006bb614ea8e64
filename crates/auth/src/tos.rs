use serde::{Deserialize, Serialize};

/// Terms-of-service acceptance status of the signed-in user.
///
/// The backend reports this as a string; only the two known values map to a
/// definite state. Everything else (absent, empty, new values) is `Unknown`,
/// which the guard treats as "no redirect on this basis".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TosStatus {
    NotAccepted,
    Accepted,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TosStatus {
    pub const NOT_ACCEPTED: &'static str = "NOT_ACCEPTED";
    pub const ACCEPTED: &'static str = "ACCEPTED";

    /// Map the backend's wire value to a status.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some(Self::NOT_ACCEPTED) => TosStatus::NotAccepted,
            Some(Self::ACCEPTED) => TosStatus::Accepted,
            _ => TosStatus::Unknown,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, TosStatus::Accepted)
    }

    pub fn is_not_accepted(&self) -> bool {
        matches!(self, TosStatus::NotAccepted)
    }
}

impl core::fmt::Display for TosStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            TosStatus::NotAccepted => Self::NOT_ACCEPTED,
            TosStatus::Accepted => Self::ACCEPTED,
            TosStatus::Unknown => "UNKNOWN",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_wire_values_are_definite() {
        assert_eq!(TosStatus::from_wire(Some("ACCEPTED")), TosStatus::Accepted);
        assert_eq!(
            TosStatus::from_wire(Some("NOT_ACCEPTED")),
            TosStatus::NotAccepted
        );
        assert_eq!(TosStatus::from_wire(Some("accepted")), TosStatus::Unknown);
        assert_eq!(TosStatus::from_wire(Some("")), TosStatus::Unknown);
        assert_eq!(TosStatus::from_wire(None), TosStatus::Unknown);
    }

    #[test]
    fn unrecognised_json_values_deserialize_as_unknown() {
        let status: TosStatus = serde_json::from_str("\"REQUIRES_REVIEW\"").unwrap();
        assert_eq!(status, TosStatus::Unknown);

        let status: TosStatus = serde_json::from_str("\"NOT_ACCEPTED\"").unwrap();
        assert_eq!(status, TosStatus::NotAccepted);
    }
}

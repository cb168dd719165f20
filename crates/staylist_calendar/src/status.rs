// --- File: crates/staylist_calendar/src/status.rs ---
use serde::{Deserialize, Serialize};

use crate::blocklist::DateSet;

/// Render state of one (listing, day) cell. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum CellStatus {
    Available,
    AdminBlocked,
    HostBlocked,
}

/// What committing a selection that started on a cell would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SelectionAction {
    /// Block the selected days
    Add,
    /// Unblock the selected days
    Remove,
}

impl CellStatus {
    pub fn action(self) -> SelectionAction {
        match self {
            CellStatus::Available => SelectionAction::Add,
            CellStatus::AdminBlocked | CellStatus::HostBlocked => SelectionAction::Remove,
        }
    }
}

/// Resolves the status of `date` from the two blocklists. Host blocks win over admin blocks.
pub fn resolve(admin_blocked: &DateSet, host_blocked: &DateSet, date: &str) -> CellStatus {
    if host_blocked.contains(date) {
        CellStatus::HostBlocked
    } else if admin_blocked.contains(date) {
        CellStatus::AdminBlocked
    } else {
        CellStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocklist::parse;

    #[test]
    fn test_host_block_takes_precedence() {
        let admin = parse("2024-06-01,2024-06-02");
        let host = parse("2024-06-02");

        assert_eq!(resolve(&admin, &host, "2024-06-01"), CellStatus::AdminBlocked);
        assert_eq!(resolve(&admin, &host, "2024-06-02"), CellStatus::HostBlocked);
        assert_eq!(resolve(&admin, &host, "2024-06-03"), CellStatus::Available);
    }

    #[test]
    fn test_action_follows_status() {
        assert_eq!(CellStatus::Available.action(), SelectionAction::Add);
        assert_eq!(CellStatus::AdminBlocked.action(), SelectionAction::Remove);
        assert_eq!(CellStatus::HostBlocked.action(), SelectionAction::Remove);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&CellStatus::HostBlocked).unwrap(),
            "\"host-blocked\""
        );
    }
}

//! Job opportunity pipeline stages and the stage-history audit log.
//!
//! Stages form a nominal forward progression
//! (`initial_contacts -> ... -> deal_closed`) with `archived` reachable from
//! anywhere. Transitions are deliberately unrestricted so users can correct
//! mistakes by jumping backwards; [`JobStage::is_standard_transition`] lets
//! the handler flag out-of-order jumps in the audit log without rejecting
//! them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Pipeline stage of a job opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    InitialContacts,
    InProgress,
    Interview,
    Proposal,
    Negotiation,
    DealClosed,
    Archived,
}

impl JobStage {
    /// The stage every new opportunity starts in.
    pub const INITIAL: JobStage = JobStage::InitialContacts;

    /// Database string for this stage (matches the `stage` column values).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialContacts => "initial_contacts",
            Self::InProgress => "in_progress",
            Self::Interview => "interview",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::DealClosed => "deal_closed",
            Self::Archived => "archived",
        }
    }

    /// Parse a stage string; unknown values are a validation error.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "initial_contacts" => Ok(Self::InitialContacts),
            "in_progress" => Ok(Self::InProgress),
            "interview" => Ok(Self::Interview),
            "proposal" => Ok(Self::Proposal),
            "negotiation" => Ok(Self::Negotiation),
            "deal_closed" => Ok(Self::DealClosed),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown job stage: {other}"
            ))),
        }
    }

    /// Position in the nominal forward progression. `Archived` sits outside
    /// the progression and has no ordinal.
    fn ordinal(&self) -> Option<u8> {
        match self {
            Self::InitialContacts => Some(0),
            Self::InProgress => Some(1),
            Self::Interview => Some(2),
            Self::Proposal => Some(3),
            Self::Negotiation => Some(4),
            Self::DealClosed => Some(5),
            Self::Archived => None,
        }
    }

    /// Whether `self -> to` follows the standard pipeline order.
    ///
    /// Standard moves are one-or-more steps forward, or archiving from any
    /// stage. Everything else (backward jumps, leaving `archived`) is still
    /// permitted by the workflow but should be logged for audit.
    pub fn is_standard_transition(&self, to: JobStage) -> bool {
        if to == Self::Archived {
            return true;
        }
        match (self.ordinal(), to.ordinal()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

/// One entry of the append-only `stage_history` log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageHistoryEntry {
    pub stage: JobStage,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StageHistoryEntry {
    /// Build the entry recorded at a stage change.
    pub fn new(stage: JobStage, timestamp: Timestamp, notes: Option<String>) -> Self {
        Self {
            stage,
            timestamp,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_stage() {
        for stage in [
            JobStage::InitialContacts,
            JobStage::InProgress,
            JobStage::Interview,
            JobStage::Proposal,
            JobStage::Negotiation,
            JobStage::DealClosed,
            JobStage::Archived,
        ] {
            assert_eq!(JobStage::parse(stage.as_str()).unwrap(), stage);
        }
    }

    #[test]
    fn parse_rejects_unknown_stage() {
        let err = JobStage::parse("offer_accepted").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn forward_moves_are_standard() {
        assert!(JobStage::InitialContacts.is_standard_transition(JobStage::InProgress));
        assert!(JobStage::InProgress.is_standard_transition(JobStage::Interview));
        assert!(JobStage::Interview.is_standard_transition(JobStage::DealClosed));
    }

    #[test]
    fn archiving_is_standard_from_any_stage() {
        assert!(JobStage::InitialContacts.is_standard_transition(JobStage::Archived));
        assert!(JobStage::DealClosed.is_standard_transition(JobStage::Archived));
    }

    #[test]
    fn backward_moves_are_flagged() {
        assert!(!JobStage::Interview.is_standard_transition(JobStage::InitialContacts));
        assert!(!JobStage::DealClosed.is_standard_transition(JobStage::Negotiation));
    }

    #[test]
    fn leaving_archived_is_flagged_but_representable() {
        // Archived is not hard-terminal; the transition merely falls outside
        // the standard table.
        assert!(!JobStage::Archived.is_standard_transition(JobStage::Interview));
    }

    #[test]
    fn history_entry_serializes_stage_as_snake_case() {
        let entry = StageHistoryEntry::new(
            JobStage::Interview,
            chrono::Utc::now(),
            Some("phone screen done".into()),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["stage"], "interview");
        assert_eq!(json["notes"], "phone screen done");
    }

    #[test]
    fn history_entry_omits_absent_notes() {
        let entry = StageHistoryEntry::new(JobStage::InitialContacts, chrono::Utc::now(), None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("notes").is_none());
    }
}

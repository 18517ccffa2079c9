use serde::{Deserialize, Serialize};

/// One candidate action spectators can vote on during an open window.
/// The server returns at most three per interval; rank is the 1-based
/// position in the returned list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VotingOption {
    pub id: String,
    pub name: String,
}

/// The `/actions_json/{show_id}/{minutes}/` endpoint answers with one of
/// three shapes depending on window state and whether this session voted.
/// Extra fields such as `percent` ride along and are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum IntervalActions {
    Voted {
        voted: bool,
    },
    Resolved {
        current_action: String,
    },
    Options(Vec<VotingOption>),
}

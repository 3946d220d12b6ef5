use serde::{Deserialize, Serialize};

use super::state::UserPatch;

/// Transitions accepted by the user reducer.
///
/// Encoded with a `type` tag. Tags this build does not know decode to
/// [`UserAction::Unrecognized`], which the reducer passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserAction {
    #[serde(rename = "UPDATE_USER")]
    Update { state: UserPatch },
    #[serde(rename = "TALLY_RECORDING")]
    TallyRecording,
    #[serde(rename = "TALLY_VERIFICATION")]
    TallyVerification,
    #[serde(other)]
    Unrecognized,
}

impl UserAction {
    pub fn update(patch: UserPatch) -> Self {
        Self::Update { state: patch }
    }

    pub fn tally_recording() -> Self {
        Self::TallyRecording
    }

    pub fn tally_verification() -> Self {
        Self::TallyVerification
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Update { .. } => "update_user",
            Self::TallyRecording => "tally_recording",
            Self::TallyVerification => "tally_verification",
            Self::Unrecognized => "unrecognized",
        }
    }
}

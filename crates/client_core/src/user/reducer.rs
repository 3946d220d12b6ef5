use std::sync::Arc;

use super::{action::UserAction, state::UserState};

/// Computes the next user state.
///
/// Every known action yields a freshly allocated state; the input is never
/// touched. [`UserAction::Unrecognized`] hands back the same `Arc`.
pub fn reduce(state: &Arc<UserState>, action: &UserAction) -> Arc<UserState> {
    match action {
        UserAction::Update { state: patch } => Arc::new(state.merged(patch)),
        UserAction::TallyRecording => Arc::new(UserState {
            record_tally: state.record_tally.saturating_add(1),
            ..UserState::clone(state)
        }),
        UserAction::TallyVerification => Arc::new(UserState {
            validate_tally: state.validate_tally.saturating_add(1),
            ..UserState::clone(state)
        }),
        UserAction::Unrecognized => Arc::clone(state),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;

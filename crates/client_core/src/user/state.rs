use serde::{Deserialize, Deserializer, Serialize};
use shared::domain::UserClient;

use crate::id::IdGenerator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    pub user_id: String,
    pub email: Option<String>,
    pub send_emails: bool,
    pub has_downloaded: bool,
    pub privacy_agreed: bool,
    pub record_tally: u64,
    pub validate_tally: u64,
    pub user_clients: Vec<UserClient>,
    pub is_fetching_account: bool,
    pub account: Option<UserClient>,
}

impl UserState {
    /// Builds the state a store starts from. `ids` is consulted exactly once.
    pub fn initial(ids: &dyn IdGenerator) -> Self {
        Self {
            user_id: ids.generate_id(),
            email: None,
            send_emails: false,
            has_downloaded: false,
            privacy_agreed: false,
            record_tally: 0,
            validate_tally: 0,
            user_clients: Vec::new(),
            is_fetching_account: true,
            account: None,
        }
    }

    /// Shallow merge: every key present in `patch` replaces the current value.
    pub fn merged(&self, patch: &UserPatch) -> Self {
        let mut next = self.clone();
        if let Some(user_id) = &patch.user_id {
            next.user_id = user_id.clone();
        }
        if let Some(email) = &patch.email {
            next.email = email.clone();
        }
        if let Some(send_emails) = patch.send_emails {
            next.send_emails = send_emails;
        }
        if let Some(has_downloaded) = patch.has_downloaded {
            next.has_downloaded = has_downloaded;
        }
        if let Some(privacy_agreed) = patch.privacy_agreed {
            next.privacy_agreed = privacy_agreed;
        }
        if let Some(record_tally) = patch.record_tally {
            next.record_tally = record_tally;
        }
        if let Some(validate_tally) = patch.validate_tally {
            next.validate_tally = validate_tally;
        }
        if let Some(user_clients) = &patch.user_clients {
            next.user_clients = user_clients.clone();
        }
        if let Some(is_fetching_account) = patch.is_fetching_account {
            next.is_fetching_account = is_fetching_account;
        }
        if let Some(account) = &patch.account {
            next.account = account.clone();
        }
        next
    }
}

/// A partial [`UserState`]. `None` means the key is absent from the patch.
///
/// `email` and `account` are nullable in the state, so the patch carries
/// `Some(None)` to clear them; on the wire that is an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_emails: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_downloaded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_agreed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_tally: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate_tally: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_clients: Option<Vec<UserClient>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fetching_account: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub account: Option<Option<UserClient>>,
}

fn present_key<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UserPatch {
    pub fn fetching() -> Self {
        Self::default().with_is_fetching_account(true)
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_send_emails(mut self, send_emails: bool) -> Self {
        self.send_emails = Some(send_emails);
        self
    }

    pub fn with_privacy_agreed(mut self, privacy_agreed: bool) -> Self {
        self.privacy_agreed = Some(privacy_agreed);
        self
    }

    pub fn with_user_clients(mut self, user_clients: Vec<UserClient>) -> Self {
        self.user_clients = Some(user_clients);
        self
    }

    pub fn with_is_fetching_account(mut self, is_fetching_account: bool) -> Self {
        self.is_fetching_account = Some(is_fetching_account);
        self
    }

    pub fn with_account(mut self, account: Option<UserClient>) -> Self {
        self.account = Some(account);
        self
    }
}

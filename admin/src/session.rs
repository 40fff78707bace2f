use crate::error::AppError;
use crate::utils::storage;
use hostel_platform_shared::BusinessRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::info;

/// Persisted session state. The field names are the fixed keys the browser
/// front end used in local storage; the admin runtime keeps the same contract
/// in its on-disk state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    #[serde(rename = "kaha_user_token")]
    user_token: Option<String>,

    #[serde(rename = "kaha_business_token")]
    business_token: Option<String>,

    #[serde(rename = "kaha_selected_business")]
    selected_business: Option<BusinessRecord>,
}

/// Auth/session store: user token, business token, selected business.
///
/// The business-scoped token, when present, takes precedence over the user
/// token as the bearer credential for all API calls.
pub struct SessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Restore the session from disk, or start empty when no state file
    /// exists yet.
    pub fn load(path: PathBuf) -> Result<Self, AppError> {
        let state: SessionState = storage::read_json(&path)?.unwrap_or_default();
        if state.user_token.is_some() {
            info!("Restored session from {}", path.display());
        }
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Bearer credential for API calls; business token wins over user token.
    pub async fn bearer_token(&self) -> Option<String> {
        let state = self.state.read().await;
        state
            .business_token
            .clone()
            .or_else(|| state.user_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.user_token.is_some()
    }

    pub async fn selected_business(&self) -> Option<BusinessRecord> {
        self.state.read().await.selected_business.clone()
    }

    /// Record a successful login.
    pub async fn store_login(&self, user_token: String) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.user_token = Some(user_token);
        self.persist(&state)
    }

    /// Record a business selection: scoped token plus the business itself.
    pub async fn store_business(
        &self,
        business_token: String,
        business: BusinessRecord,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.business_token = Some(business_token);
        state.selected_business = Some(business);
        self.persist(&state)
    }

    /// "Switch business": drop only the business-scoped half of the session,
    /// keeping the user token.
    pub async fn clear_business(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.business_token = None;
        state.selected_business = None;
        self.persist(&state)
    }

    /// Logout clears everything.
    pub async fn clear(&self) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        *state = SessionState::default();
        self.persist(&state)
    }

    fn persist(&self, state: &SessionState) -> Result<(), AppError> {
        storage::write_json(&self.path, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn store() -> SessionStore {
        let path = std::env::temp_dir().join(format!("hostel-session-{}.json", Uuid::new_v4()));
        SessionStore::load(path).unwrap()
    }

    fn business() -> BusinessRecord {
        BusinessRecord {
            id: Uuid::new_v4(),
            name: "Sunrise Hostel".to_string(),
            address: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn business_token_takes_precedence() {
        let store = store();
        store.store_login("user-token".to_string()).await.unwrap();
        assert_eq!(store.bearer_token().await.as_deref(), Some("user-token"));

        store
            .store_business("business-token".to_string(), business())
            .await
            .unwrap();
        assert_eq!(
            store.bearer_token().await.as_deref(),
            Some("business-token")
        );
    }

    #[tokio::test]
    async fn switch_business_keeps_user_token() {
        let store = store();
        store.store_login("user-token".to_string()).await.unwrap();
        store
            .store_business("business-token".to_string(), business())
            .await
            .unwrap();

        store.clear_business().await.unwrap();
        assert_eq!(store.bearer_token().await.as_deref(), Some("user-token"));
        assert!(store.selected_business().await.is_none());
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let store = store();
        store.store_login("user-token".to_string()).await.unwrap();
        store
            .store_business("business-token".to_string(), business())
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(store.bearer_token().await.is_none());
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn session_survives_reload() {
        let path = std::env::temp_dir().join(format!("hostel-session-{}.json", Uuid::new_v4()));
        {
            let store = SessionStore::load(path.clone()).unwrap();
            store.store_login("user-token".to_string()).await.unwrap();
        }
        let reloaded = SessionStore::load(path.clone()).unwrap();
        assert_eq!(
            reloaded.bearer_token().await.as_deref(),
            Some("user-token")
        );
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn state_file_keeps_the_original_storage_keys() {
        use hostel_platform_shared::{BUSINESS_TOKEN_KEY, SELECTED_BUSINESS_KEY, USER_TOKEN_KEY};

        let path = std::env::temp_dir().join(format!("hostel-session-{}.json", Uuid::new_v4()));
        let store = SessionStore::load(path.clone()).unwrap();
        store.store_login("user-token".to_string()).await.unwrap();
        store
            .store_business("business-token".to_string(), business())
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get(USER_TOKEN_KEY).is_some());
        assert!(raw.get(BUSINESS_TOKEN_KEY).is_some());
        assert!(raw.get(SELECTED_BUSINESS_KEY).is_some());

        std::fs::remove_file(path).unwrap();
    }
}

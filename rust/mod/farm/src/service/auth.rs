use std::sync::Arc;

use farmerp_authz::User;
use farmerp_client::{ApiClient, ApiError, KvTokenStore, Method, QueryParams, RequestDescriptor};
use farmerp_kv::{KVStore, KVStoreExt};
use serde::de::IgnoredAny;
use tracing::{error, info, warn};

use crate::model::{Credentials, LoginResponse, ProfileUpdate};

const LOGIN_PATH: &str = "/api/auth/login";
const LOGOUT_PATH: &str = "/api/auth/logout";
const ME_PATH: &str = "/api/auth/me";
const PROFILE_PATH: &str = "/api/auth/profile";

/// Key of the cached user record in the session store.
pub const USER_KEY: &str = "session:user";

/// Session lifecycle: the only writer of the token and user stores.
///
/// Both stores are read straight from the [`KVStore`] on each access. Two
/// logins racing on the same store are not serialized; the last write wins.
pub struct AuthService {
    api: Arc<ApiClient>,
    tokens: KvTokenStore,
    kv: Arc<dyn KVStore>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, kv: Arc<dyn KVStore>) -> Self {
        Self {
            api,
            tokens: KvTokenStore::new(kv.clone()),
            kv,
        }
    }

    /// Exchange credentials for a token and persist the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self
            .api
            .post(LOGIN_PATH, &body)
            .await
            .inspect_err(|e| error!(username, error = %e, "login failed"))?;

        self.tokens.store(&resp.token)?;
        self.kv.set_json(USER_KEY, &resp.user)?;
        info!(user = %resp.user.id, role = %resp.user.role, "logged in");
        Ok(resp.user)
    }

    /// Tell the backend, then drop the local session no matter what it said.
    ///
    /// Only a failure to clear the local stores is returned. Both the token
    /// and the cached user are removed even if the first removal fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let req = RequestDescriptor::new(Method::POST, LOGOUT_PATH);
        if let Err(e) = self.api.execute::<IgnoredAny>(req).await {
            warn!(error = %e, "logout request failed, clearing session anyway");
        }
        let token = self.tokens.clear();
        let user = self.kv.delete(USER_KEY).map_err(ApiError::from);
        token.and(user).inspect_err(|e| error!(error = %e, "clearing session failed"))?;
        info!("logged out");
        Ok(())
    }

    /// The user saved by the last login or profile update.
    pub fn current_user(&self) -> Result<Option<User>, ApiError> {
        Ok(self.kv.get_json(USER_KEY)?)
    }

    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.tokens.load()?.is_some())
    }

    /// Reload the profile from the backend and refresh the cached copy.
    pub async fn fetch_profile(&self) -> Result<User, ApiError> {
        let user: User = self
            .api
            .get(ME_PATH, QueryParams::new())
            .await
            .inspect_err(|e| error!(error = %e, "fetching profile failed"))?;
        self.kv.set_json(USER_KEY, &user)?;
        Ok(user)
    }

    pub async fn update_profile(&self, patch: &ProfileUpdate) -> Result<User, ApiError> {
        let user: User = self
            .api
            .patch(PROFILE_PATH, patch)
            .await
            .inspect_err(|e| error!(error = %e, "updating profile failed"))?;
        self.kv.set_json(USER_KEY, &user)?;
        Ok(user)
    }
}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use crate::model::LoginResponse;

const TOKEN_KEY: &str = "token";
const USER_ID_KEY: &str = "user_id";
const USERNAME_KEY: &str = "username";

/// Where the session currently stands. `Checking` covers the window between
/// first render and the local token check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// The persisted credential triple. Always saved and cleared as one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredCredentials {
    pub token: String,
    pub user_id: String,
    pub username: String,
}

/// The identity shown in the UI once a session is live.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
}

/// Durable storage for the credential triple. Injected so session logic
/// runs against an in-memory stand-in under test.
pub trait CredentialStore {
    fn load(&self) -> Option<StoredCredentials>;
    fn save(&self, credentials: &StoredCredentials);
    fn clear(&self);
}

/// `localStorage`-backed store used by the running app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CredentialStore for BrowserStore {
    fn load(&self) -> Option<StoredCredentials> {
        let storage = self.storage()?;
        let token = storage.get_item(TOKEN_KEY).ok()??;
        let user_id = storage.get_item(USER_ID_KEY).ok()??;
        let username = storage.get_item(USERNAME_KEY).ok()??;
        Some(StoredCredentials {
            token,
            user_id,
            username,
        })
    }

    fn save(&self, credentials: &StoredCredentials) {
        if let Some(storage) = self.storage() {
            let _ = storage.set_item(TOKEN_KEY, &credentials.token);
            let _ = storage.set_item(USER_ID_KEY, &credentials.user_id);
            let _ = storage.set_item(USERNAME_KEY, &credentials.username);
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_ID_KEY);
            let _ = storage.remove_item(USERNAME_KEY);
        }
    }
}

/// Claims the backend puts in its access tokens. Only the expiry matters
/// here; the signature is the server's concern.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<String>,
}

/// Reads the claims out of a JWT payload without verifying the signature.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// A token counts as live only while its expiry is strictly in the future.
/// Undecodable tokens count as expired.
pub fn token_is_live(token: &str, now: i64) -> bool {
    decode_claims(token).map(|claims| claims.exp > now).unwrap_or(false)
}

/// Restores a session from persisted credentials. An expired or undecodable
/// token clears the whole triple before reporting no session.
pub fn restore(store: &impl CredentialStore, now: i64) -> Option<SessionUser> {
    let credentials = store.load()?;
    if token_is_live(&credentials.token, now) {
        Some(SessionUser {
            id: credentials.user_id,
            username: credentials.username,
        })
    } else {
        store.clear();
        None
    }
}

/// Persists a successful login. The bearer header follows automatically:
/// requests read the token from the store at send time.
pub fn persist(store: &impl CredentialStore, login: &LoginResponse) -> SessionUser {
    store.save(&StoredCredentials {
        token: login.access_token.clone(),
        user_id: login.user_id.clone(),
        username: login.username.clone(),
    });
    SessionUser {
        id: login.user_id.clone(),
        username: login.username.clone(),
    }
}

/// Logout: drop the triple. Never fails and never touches the network.
pub fn clear(store: &impl CredentialStore) {
    store.clear();
}

pub fn bearer_token(store: &impl CredentialStore) -> Option<String> {
    store.load().map(|credentials| credentials.token)
}

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

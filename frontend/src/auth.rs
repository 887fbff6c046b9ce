use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use yew::prelude::*;

pub const TOKEN_STORAGE_KEY: &str = "auth_token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub picture_url: Option<String>,
}

/// Auth state for the whole application, created once at startup and passed
/// down explicitly to the components that need it. Sign-out goes through
/// `on_token_change(None)`, which clears the stored token and drops the user.
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub token: Option<String>,
    pub on_token_change: Callback<Option<String>>,
}

pub fn stored_token() -> Option<String> {
    LocalStorage::get(TOKEN_STORAGE_KEY).ok()
}

pub fn persist_token(token: Option<&str>) {
    match token {
        Some(token) => {
            if let Err(e) = LocalStorage::set(TOKEN_STORAGE_KEY, token) {
                log::error!("Failed to persist auth token: {:?}", e);
            }
        }
        None => LocalStorage::delete(TOKEN_STORAGE_KEY),
    }
}

/// Resolves the signed-in user's profile from the identity provider.
pub async fn fetch_user_info(token: &str) -> Result<UserInfo, String> {
    let response = gloo_net::http::Request::get("/auth/me")
        .header("Authorization", &format!("Bearer {}", token))
        .send()
        .await;

    match response {
        Ok(resp) if resp.ok() => resp
            .json::<UserInfo>()
            .await
            .map_err(|e| format!("Failed to parse user info: {:?}", e)),
        Ok(resp) => {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            Err(format!("Failed to fetch user info: {} - {}", status, detail))
        }
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory login sessions, token -> member email.
///
/// Sessions live for the process only, matching the app's non-persistent
/// login: restarting the server logs everyone out.
#[derive(Default)]
pub struct SessionStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub async fn member_for_token(&self, token: &str) -> Option<String> {
        self.tokens.read().await.get(token).cloned()
    }

    /// Returns the member's existing token, or generates a fresh one.
    pub async fn get_or_generate_token(&self, email: &str) -> String {
        let mut tokens = self.tokens.write().await;

        let existing = tokens
            .iter()
            .find_map(|(token, member)| (member == email).then(|| token.clone()));
        if let Some(token) = existing {
            return token;
        }

        let token = Uuid::new_v4().to_string();
        tokens.insert(token.clone(), email.to_owned());

        token
    }

    /// Drops every session held by the member.
    pub async fn remove(&self, email: &str) {
        self.tokens
            .write()
            .await
            .retain(|_token, member| member != email);
    }
}

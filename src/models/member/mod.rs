use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::error::{ServeError, ServeResult};
use crate::models::member::session::SessionStore;
use crate::sheets::SheetClient;
use crate::util;

pub mod session;

/// A registered member, one row of the users sheet.
#[derive(SimpleObject, Clone, Debug, Deserialize)]
pub struct Member {
    /// The member's email, which must be unique
    #[serde(default)]
    pub email: String,
    /// The member's full name
    #[serde(default)]
    pub name: String,
    /// e.g. "Student" or "Student Council"
    #[serde(default)]
    pub role: String,
    /// The member's class
    #[serde(default)]
    pub class: String,
    /// The member's phone number
    #[serde(default)]
    pub contact: String,

    /// The bcrypt hash stored in the sheet's Password column
    #[graphql(skip)]
    #[serde(rename = "Password", default)]
    pub pass_hash: String,
}

/// Signup form for a new member.
#[derive(InputObject, Clone, Debug)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub password: String,
    #[graphql(default)]
    pub role: String,
    #[graphql(default)]
    pub class: String,
    #[graphql(default)]
    pub contact: String,
}

/// The row POSTed to the users sheet. The password column is capitalized in
/// the sheet's header and holds a bcrypt hash, never the password itself.
#[derive(Serialize, Debug)]
pub struct NewUserRow {
    pub name: String,
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
    pub role: String,
    pub class: String,
    pub contact: String,
}

impl Member {
    pub async fn with_email(email: &str, client: &SheetClient) -> ServeResult<Member> {
        Self::with_email_opt(email, client)
            .await?
            .ok_or_else(|| ServeError::NotFound(format!("No member with email {}", email)))
    }

    pub async fn with_email_opt(email: &str, client: &SheetClient) -> ServeResult<Option<Member>> {
        let email = util::normalize_email(email);
        Ok(client.users_with_email(&email).await?.into_iter().next())
    }

    pub async fn with_token(
        token: &str,
        sessions: &SessionStore,
        client: &SheetClient,
    ) -> ServeResult<Member> {
        let email = sessions
            .member_for_token(token)
            .await
            .ok_or(ServeError::Unauthorized)?;

        Self::with_email(&email, client).await
    }

    /// Whether the given credentials match a user row. Unknown emails and
    /// wrong passwords are indistinguishable to the caller.
    pub async fn login_is_valid(
        email: &str,
        password: &str,
        client: &SheetClient,
    ) -> ServeResult<bool> {
        if let Some(member) = Self::with_email_opt(email, client).await? {
            verify_password(password, &member.pass_hash)
        } else {
            Ok(false)
        }
    }

    /// Validates the signup form, rejects duplicate emails, and appends the
    /// new user row with a hashed password.
    pub async fn register(new_member: NewMember, client: &SheetClient) -> ServeResult<Member> {
        let email = util::normalize_email(&new_member.email);
        if !util::email_is_valid(&email) {
            return Err(ServeError::InvalidFormat(format!(
                "{} is not a valid email",
                new_member.email
            )));
        }
        if new_member.name.trim().is_empty() || new_member.password.is_empty() {
            return Err(ServeError::InvalidFormat(String::from(
                "name and password are required",
            )));
        }

        if Self::with_email_opt(&email, client).await?.is_some() {
            return Err(ServeError::AlreadyRegistered(email));
        }

        let pass_hash = hash_password(&new_member.password)?;
        client
            .create_user(&NewUserRow {
                name: new_member.name,
                email: email.clone(),
                password: pass_hash,
                role: new_member.role,
                class: new_member.class,
                contact: new_member.contact,
            })
            .await?;

        Self::with_email(&email, client).await
    }
}

pub fn hash_password(password: &str) -> ServeResult<String> {
    bcrypt::hash(password, 10)
        .map_err(|err| ServeError::ServerError(format!("Failed to hash password: {}", err)))
}

pub fn verify_password(password: &str, pass_hash: &str) -> ServeResult<bool> {
    bcrypt::verify(password, pass_hash)
        .map_err(|err| ServeError::ServerError(format!("Failed to verify password: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_hashed_passwords() {
        // minimum cost keeps the test fast
        let hash = bcrypt::hash("hunter2", 4).unwrap();

        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn garbage_hashes_are_server_errors_not_mismatches() {
        assert!(matches!(
            verify_password("hunter2", "not a bcrypt hash"),
            Err(ServeError::ServerError(_))
        ));
    }

    #[test]
    fn deserializes_user_rows() {
        let row = serde_json::json!({
            "email": "john@email.com",
            "name": "John",
            "role": "Student",
            "class": "3A",
            "contact": "91234567",
            "Password": "$2b$10$abcdefghijklmnopqrstuv",
        });

        let member: Member = serde_json::from_value(row).unwrap();
        assert_eq!(member.email, "john@email.com");
        assert_eq!(member.pass_hash, "$2b$10$abcdefghijklmnopqrstuv");
    }
}

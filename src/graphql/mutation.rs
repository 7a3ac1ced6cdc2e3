use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::error::ServeError;
use crate::graphql::guards::LoggedIn;
use crate::graphql::SUCCESS_MESSAGE;
use crate::models::attendance::{self, AttendanceRecord, RedeemedCredit};
use crate::models::member::session::SessionStore;
use crate::models::member::{Member, NewMember};
use crate::sheets::SheetClient;
use crate::util;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Gets a login token on successful login
    pub async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<String> {
        let client: &SheetClient = ctx.data_unchecked();
        let sessions: &Arc<SessionStore> = ctx.data_unchecked();

        if !Member::login_is_valid(&email, &password, client).await? {
            return Err(ServeError::CredentialMismatch.into());
        }

        Ok(sessions
            .get_or_generate_token(&util::normalize_email(&email))
            .await)
    }

    /// Logs the member out
    pub async fn logout(&self, ctx: &Context<'_>) -> Result<&'static str> {
        let user = ctx.data_opt::<Member>().ok_or("Not currently logged in")?;
        let sessions: &Arc<SessionStore> = ctx.data_unchecked();
        sessions.remove(&user.email).await;

        Ok(SUCCESS_MESSAGE)
    }

    /// Registers a new member
    pub async fn register_member(&self, ctx: &Context<'_>, new_member: NewMember) -> Result<Member> {
        let client: &SheetClient = ctx.data_unchecked();

        Ok(Member::register(new_member, client).await?)
    }

    /// Exchanges a 6-digit attendance code for volunteer-hour credit.
    ///
    /// Malformed codes fail locally before any sheet call; a credit the
    /// member already holds for the same event is rejected rather than
    /// double-counted.
    #[graphql(guard = "LoggedIn")]
    pub async fn redeem_attendance_code(
        &self,
        ctx: &Context<'_>,
        code: String,
    ) -> Result<RedeemedCredit> {
        let client: &SheetClient = ctx.data_unchecked();
        let user: &Member = ctx.data_unchecked();

        attendance::validate_code(&code)?;

        let code_table = client.attendance_codes().await?;
        let credit = attendance::redeem(&code, &code_table)?;

        let existing = client.attendance_for_email(&user.email).await?;
        if attendance::already_redeemed(&existing, &credit.event_name) {
            return Err(ServeError::AlreadyRedeemed(credit.event_name).into());
        }

        client
            .record_attendance(&AttendanceRecord {
                email: user.email.clone(),
                date: util::today_string(),
                event_name: credit.event_name.clone(),
                hours: credit.hours.to_string(),
            })
            .await?;

        Ok(credit)
    }
}

use async_graphql::{Context, Object, Result};

use crate::graphql::guards::LoggedIn;
use crate::models::announcement::{self, Announcement};
use crate::models::attendance::{self, AttendanceRecord};
use crate::models::filter::{OpportunityFilter, KNOWN_BOARDS};
use crate::models::member::Member;
use crate::models::opportunity::OpportunityRecord;
use crate::sheets::SheetClient;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The currently logged-in member, if any
    pub async fn user<'c>(&self, ctx: &'c Context<'c>) -> Option<Member> {
        ctx.data_opt::<Member>().cloned()
    }

    /// The member with the given email
    #[graphql(guard = "LoggedIn")]
    pub async fn member(&self, ctx: &Context<'_>, email: String) -> Result<Member> {
        let client: &SheetClient = ctx.data_unchecked();
        Ok(Member::with_email(&email, client).await?)
    }

    /// Opportunity rows passed through the given filter. No filter, or an
    /// empty one, returns the sheet in its original order.
    pub async fn opportunities(
        &self,
        ctx: &Context<'_>,
        filter: Option<OpportunityFilter>,
    ) -> Result<Vec<OpportunityRecord>> {
        let client: &SheetClient = ctx.data_unchecked();
        let records = client.opportunities().await?;

        Ok(match filter {
            Some(filter) => filter.apply(records, KNOWN_BOARDS),
            None => records,
        })
    }

    /// The first opportunity with the given display name. Names are not
    /// true identifiers; duplicates resolve to the earliest row.
    pub async fn opportunity(&self, ctx: &Context<'_>, name: String) -> Result<OpportunityRecord> {
        let client: &SheetClient = ctx.data_unchecked();
        client
            .opportunities()
            .await?
            .into_iter()
            .find(|record| record.name == name)
            .ok_or_else(|| format!("No opportunity named {}", name).into())
    }

    /// The enumerated board list that the "Others" filter is defined against
    pub async fn known_boards(&self) -> Vec<String> {
        KNOWN_BOARDS.iter().map(|board| board.to_string()).collect()
    }

    /// The current member's redeemed credit rows
    #[graphql(guard = "LoggedIn")]
    pub async fn attendance(&self, ctx: &Context<'_>) -> Result<Vec<AttendanceRecord>> {
        let client: &SheetClient = ctx.data_unchecked();
        let user: &Member = ctx.data_unchecked();

        Ok(client.attendance_for_email(&user.email).await?)
    }

    /// The current member's running volunteer-hour total
    #[graphql(guard = "LoggedIn")]
    pub async fn total_hours(&self, ctx: &Context<'_>) -> Result<f64> {
        let client: &SheetClient = ctx.data_unchecked();
        let user: &Member = ctx.data_unchecked();
        let records = client.attendance_for_email(&user.email).await?;

        Ok(attendance::total_hours(&records))
    }

    /// The announcements feed
    pub async fn announcements(&self) -> Vec<Announcement> {
        announcement::all()
    }
}

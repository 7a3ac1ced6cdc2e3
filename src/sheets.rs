//! The data layer. Every read and write goes to one of three public
//! spreadsheet-view endpoints; there is no database.
//!
//! No call is retried and no two calls are atomic together. A failed fetch
//! surfaces as [`ServeError::Network`] or [`ServeError::SheetApi`]; a failed
//! append is its own failure domain, [`ServeError::Persistence`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ServeError, ServeResult};
use crate::models::attendance::{AttendanceCode, AttendanceRecord};
use crate::models::member::{Member, NewUserRow};
use crate::models::opportunity::OpportunityRecord;

pub const DEFAULT_BASE_URL: &str = "https://api.sheetbest.com";

pub struct SheetClient {
    http: reqwest::Client,
    base_url: String,
    opportunities_sheet: String,
    users_sheet: String,
    attendance_sheet: String,
}

impl SheetClient {
    /// Reads the endpoint configuration from the environment, the same way
    /// the database-backed deployments this replaces read `DATABASE_URL`.
    pub fn from_env() -> ServeResult<Self> {
        dotenv::dotenv().ok();

        Ok(Self::new(
            std::env::var("SHEET_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            require_var("OPPORTUNITIES_SHEET_ID")?,
            require_var("USERS_SHEET_ID")?,
            require_var("ATTENDANCE_SHEET_ID")?,
        ))
    }

    pub fn new(
        base_url: String,
        opportunities_sheet: String,
        users_sheet: String,
        attendance_sheet: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            opportunities_sheet,
            users_sheet,
            attendance_sheet,
        }
    }

    /// Every opportunity row, with `parsed_date` derived exactly once here.
    pub async fn opportunities(&self) -> ServeResult<Vec<OpportunityRecord>> {
        let rows: Vec<OpportunityRecord> = self
            .fetch_rows(self.sheet_url(&self.opportunities_sheet), None)
            .await?;

        Ok(rows.into_iter().map(OpportunityRecord::finalize).collect())
    }

    /// User rows matching the given email (0 or 1 rows in practice).
    pub async fn users_with_email(&self, email: &str) -> ServeResult<Vec<Member>> {
        self.fetch_rows(self.sheet_url(&self.users_sheet), Some(email))
            .await
    }

    pub async fn create_user(&self, row: &NewUserRow) -> ServeResult<()> {
        self.append_row(self.sheet_url(&self.users_sheet), row).await
    }

    /// The full code table. The code table and the credit log share a
    /// sheet; credit rows deserialize with an empty code and can never
    /// match a 6-digit redemption.
    pub async fn attendance_codes(&self) -> ServeResult<Vec<AttendanceCode>> {
        self.fetch_rows(self.sheet_url(&self.attendance_sheet), None)
            .await
    }

    /// The member's redeemed credit rows.
    pub async fn attendance_for_email(&self, email: &str) -> ServeResult<Vec<AttendanceRecord>> {
        self.fetch_rows(self.sheet_url(&self.attendance_sheet), Some(email))
            .await
    }

    pub async fn record_attendance(&self, record: &AttendanceRecord) -> ServeResult<()> {
        self.append_row(self.sheet_url(&self.attendance_sheet), record)
            .await
    }

    fn sheet_url(&self, sheet: &str) -> String {
        format!("{}/sheets/{}", self.base_url, sheet)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        url: String,
        email: Option<&str>,
    ) -> ServeResult<Vec<T>> {
        let mut request = self.http.get(&url);
        if let Some(email) = email {
            request = request.query(&[("email", email)]);
        }

        debug!(%url, "fetching sheet rows");
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ServeError::SheetApi {
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(Into::into)
    }

    async fn append_row<T: Serialize>(&self, url: String, row: &T) -> ServeResult<()> {
        debug!(%url, "appending sheet row");
        let response = self
            .http
            .post(&url)
            .json(row)
            .send()
            .await
            .map_err(|err| ServeError::Persistence(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ServeError::Persistence(format!(
                "sheet API returned status {}",
                response.status()
            )))
        }
    }
}

fn require_var(name: &str) -> ServeResult<String> {
    std::env::var(name).map_err(|_| ServeError::ServerError(format!("{} is not set", name)))
}

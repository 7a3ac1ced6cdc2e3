//! Backend for the Servve school volunteering app.
//!
//! All data lives in public spreadsheet-view endpoints; this service fronts
//! them with a GraphQL API for browsing and filtering opportunities,
//! member registration and login, and attendance-code redemption.

pub mod error;
pub mod graphql;
pub mod models;
pub mod sheets;
pub mod util;

use async_graphql::{InputValueError, InputValueResult, Scalar, ScalarType, Value};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

pub mod announcement;
pub mod attendance;
pub mod filter;
pub mod member;
pub mod opportunity;

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub const DATE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A day-granularity date, serialized as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SheetDate(pub Date);

#[Scalar]
impl ScalarType for SheetDate {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(date_str) = &value {
            if let Ok(date) = Date::parse(date_str, DATE_FORMAT) {
                return Ok(SheetDate(date));
            }
        }

        Err(InputValueError::expected_type(value))
    }

    fn to_value(&self) -> Value {
        self.0
            .format(DATE_FORMAT)
            .map(Value::String)
            .unwrap_or(Value::Null)
    }
}

/// A wall-clock timestamp with no timezone, serialized as
/// `YYYY-MM-DD HH:MM:SS`. The sheet's timestamps carry no offset, so none
/// is invented here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SheetDateTime(pub PrimitiveDateTime);

#[Scalar]
impl ScalarType for SheetDateTime {
    fn parse(value: Value) -> InputValueResult<Self> {
        if let Value::String(date_str) = &value {
            if let Ok(datetime) = PrimitiveDateTime::parse(date_str, DATE_TIME_FORMAT) {
                return Ok(SheetDateTime(datetime));
            }
        }

        Err(InputValueError::expected_type(value))
    }

    fn to_value(&self) -> Value {
        self.0
            .format(DATE_TIME_FORMAT)
            .map(Value::String)
            .unwrap_or(Value::Null)
    }
}

//! Shared validation helpers for inbound HTTP adapters.

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use crate::domain::{Error, PhoneNumber, ServiceType, VerificationCode};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, format!("missing required field: {name}"), "missing_field")
}

/// Unwrap an optional payload field or report it missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a YYYY-MM-DD date"),
            "invalid_date",
        )
    })
}

/// Accept `HH:MM` (what the booking form sends) as well as `HH:MM:SS`.
pub(crate) fn parse_time(value: &str, field: FieldName) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            let name = field.as_str();
            field_error(
                field,
                format!("{name} must be an HH:MM time"),
                "invalid_time",
            )
        })
}

pub(crate) fn parse_phone(value: &str, field: FieldName) -> Result<PhoneNumber, Error> {
    PhoneNumber::new(value).map_err(|err| {
        let name = field.as_str();
        field_error(field, format!("{name}: {err}"), "invalid_phone")
    })
}

pub(crate) fn parse_code(value: &str, field: FieldName) -> Result<VerificationCode, Error> {
    VerificationCode::new(value).map_err(|err| {
        let name = field.as_str();
        field_error(field, format!("{name}: {err}"), "invalid_code")
    })
}

pub(crate) fn parse_service_type(value: &str, field: FieldName) -> Result<ServiceType, Error> {
    serde_json::from_value(json!(value)).map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} is not a known service type"),
            "invalid_service_type",
        )
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("date");

    #[test]
    fn missing_field_names_the_field() {
        let err = missing_field_error(FieldName::new("phone"));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("field")).and_then(|f| f.as_str()),
            Some("phone")
        );
    }

    #[rstest]
    #[case("2025-06-02", true)]
    #[case("06/02/2025", false)]
    #[case("2025-13-40", false)]
    fn dates_parse_strictly(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(parse_date(raw, FIELD).is_ok(), ok);
    }

    #[rstest]
    #[case("10:30", true)]
    #[case("10:30:00", true)]
    #[case("25:00", false)]
    #[case("afternoon", false)]
    fn times_accept_both_shapes(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(parse_time(raw, FieldName::new("time")).is_ok(), ok);
    }

    #[rstest]
    #[case("gel", true)]
    #[case("mushroom-design", true)]
    #[case("haircut", false)]
    fn service_types_parse_by_wire_name(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(
            parse_service_type(raw, FieldName::new("serviceType")).is_ok(),
            ok
        );
    }
}

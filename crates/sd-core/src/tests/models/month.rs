use crate::{CoreError, Month};

use std::str::FromStr;

#[test]
fn given_year_month_when_parsed_then_returns_month() {
    assert_eq!(Month::from_year_month("2024-03").unwrap(), Month::Mar);
    assert_eq!(Month::from_year_month("2023-12").unwrap(), Month::Dec);
}

#[test]
fn given_garbage_year_month_when_parsed_then_invalid_month() {
    let result = Month::from_year_month("2024-13");
    assert!(matches!(result, Err(CoreError::InvalidMonth { .. })));

    let result = Month::from_year_month("March");
    assert!(matches!(result, Err(CoreError::InvalidMonth { .. })));
}

#[test]
fn given_short_or_long_name_when_from_str_then_parses() {
    assert_eq!(Month::from_str("Sep").unwrap(), Month::Sep);
    assert_eq!(Month::from_str("september").unwrap(), Month::Sep);
    assert!(Month::from_str("Sept").is_err());
}

#[test]
fn given_number_when_from_number_then_round_trips() {
    for month in Month::ALL {
        assert_eq!(Month::from_number(month.number()).unwrap(), month);
    }
    assert!(Month::from_number(0).is_err());
    assert!(Month::from_number(13).is_err());
}

#[test]
fn given_month_when_labelled_then_uses_full_name() {
    assert_eq!(Month::Jan.label(), "January");
    assert_eq!(Month::Jan.to_string(), "Jan");
}

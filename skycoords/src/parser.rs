//! Parsers for the sexagesimal coordinate strings found in star catalog entries
//!
//! Right ascension: `05h 55m 10.3053s`
//! Declination: `−08° 12′ 05.9″`, `+07°24′25.4″`
//!
//! Both grammars are anchored at the start of the input only; anything after
//! the final unit symbol is ignored.

use crate::{
    DEGREE_SIGN, DOUBLE_PRIME, HOURS_UNIT, MINUS_SIGN, MINUTES_UNIT, PRIME, SECONDS_UNIT,
};
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, value},
    error::ErrorKind,
};
use skytypes::prelude::*;
use tracing::debug;

type Result<I, O, E = GrammarError<I>> = std::result::Result<(I, O), nom::Err<E>>;

/// Why a coordinate pair could not be converted.
///
/// There is no partial result: if either axis fails the whole pair is rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum CoordinateError {
    #[error("unparseable right ascension")]
    RightAscension,
    #[error("unparseable declination")]
    Declination,
}

#[derive(Debug, PartialEq)]
enum GrammarError<I> {
    Seconds,
    Nom(I, ErrorKind),
}

/// Convert a right ascension and declination pair to decimal degrees.
///
/// Right ascension is checked first and becomes `x`; declination becomes `y`.
pub fn parse_coordinate(
    ra: &str,
    dec: &str,
) -> std::result::Result<DecimalCoordinate, CoordinateError> {
    let ra = parse_right_ascension(ra)?;
    let dec = parse_declination(dec)?;
    Ok(DecimalCoordinate::new(ra.to_degrees(), dec.to_degrees()))
}

pub fn parse_right_ascension(s: &str) -> std::result::Result<RightAscension, CoordinateError> {
    match right_ascension(s) {
        Ok((_, ra)) => Ok(ra),
        Err(e) => {
            debug!(input = s, err = ?e, "Unrecognized right ascension");
            Err(CoordinateError::RightAscension)
        }
    }
}

pub fn parse_declination(s: &str) -> std::result::Result<Declination, CoordinateError> {
    match declination(s) {
        Ok((_, dec)) => Ok(dec),
        Err(e) => {
            debug!(input = s, err = ?e, "Unrecognized declination");
            Err(CoordinateError::Declination)
        }
    }
}

/// `<hours>h <minutes>m <seconds>s`
fn right_ascension(s: &str) -> Result<&str, RightAscension> {
    let (s, hours) = integer(s)?;
    let (s, _) = char(HOURS_UNIT)(s)?;
    let (s, _) = char(' ')(s)?;
    let (s, minutes) = integer(s)?;
    let (s, _) = char(MINUTES_UNIT)(s)?;
    let (s, _) = char(' ')(s)?;
    let (s, seconds) = seconds(s)?;
    let (s, _) = char(SECONDS_UNIT)(s)?;
    Ok((s, RightAscension::new(hours, minutes, seconds)))
}

/// `[sign]<degrees>°[ws]<minutes>′[ws]<seconds>″`
fn declination(s: &str) -> Result<&str, Declination> {
    let (s, sign) = map(opt(sign), Option::unwrap_or_default)(s)?;
    let (s, degrees) = integer(s)?;
    let (s, _) = char(DEGREE_SIGN)(s)?;
    let (s, _) = whitespace(s)?;
    let (s, minutes) = integer(s)?;
    let (s, _) = char(PRIME)(s)?;
    let (s, _) = whitespace(s)?;
    let (s, seconds) = seconds(s)?;
    let (s, _) = char(DOUBLE_PRIME)(s)?;
    Ok((s, Declination::new(sign, degrees, minutes, seconds)))
}

/// Unsigned ASCII digits of any length. Values past `f64` range become infinite.
fn integer(s: &str) -> Result<&str, f64> {
    map_res(digit1, |t: &str| t.parse::<f64>())(s)
}

fn sign(s: &str) -> Result<&str, Sign> {
    alt((
        value(Sign::Positive, char('+')),
        value(Sign::Negative, char('-')),
        value(Sign::Negative, char(MINUS_SIGN)),
    ))(s)
}

/// Zero or more Unicode whitespace characters, which includes the no-break space
fn whitespace(s: &str) -> Result<&str, &str> {
    take_while(char::is_whitespace)(s)
}

/// A run of digits and dots that must form a valid decimal number
fn seconds(s: &str) -> Result<&str, f64> {
    map_res(
        take_while1(|c: char| c.is_ascii_digit() || c == '.'),
        |t: &str| t.parse::<f64>(),
    )(s)
    .map_err(|e| match e {
        nom::Err::Error(GrammarError::Nom(i, ErrorKind::MapRes)) => {
            debug!(input = i, "Malformed seconds field");
            nom::Err::Error(GrammarError::Seconds)
        }
        e => e,
    })
}

impl<I> nom::error::ParseError<I> for GrammarError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        GrammarError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E> nom::error::FromExternalError<I, E> for GrammarError<I> {
    fn from_external_error(s: I, kind: ErrorKind, _e: E) -> Self {
        GrammarError::Nom(s, kind)
    }
}

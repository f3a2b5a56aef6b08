//! Result limits
//!
//! A `Limit` caps how many results a query returns, optionally starting
//! somewhere other than the first result. Positions are 1-based.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of results, starting at a 1-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LimitFields")]
pub struct Limit {
    max_results: u32,
    start_at: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LimitFields {
    max_results: u32,
    #[serde(default = "first_position")]
    start_at: u64,
}

fn first_position() -> u64 {
    1
}

impl TryFrom<LimitFields> for Limit {
    type Error = Error;

    fn try_from(fields: LimitFields) -> Result<Self> {
        check_max_results(fields.max_results)?;
        check_start_at(fields.start_at)?;
        Ok(Self {
            max_results: fields.max_results,
            start_at: fields.start_at,
        })
    }
}

fn check_max_results(max_results: u32) -> Result<()> {
    if max_results < 1 {
        return Err(Error::invalid_limit("maximum number of results must be at least 1"));
    }
    Ok(())
}

fn check_start_at(start_at: u64) -> Result<()> {
    if start_at < 1 {
        return Err(Error::invalid_limit("starting position must be at least 1"));
    }
    Ok(())
}

impl Limit {
    /// Limit to the first `max_results` results
    pub fn of(max_results: u32) -> Result<Self> {
        check_max_results(max_results)?;
        Ok(Self {
            max_results,
            start_at: 1,
        })
    }

    /// Limit to the results at positions `start_at..=end_at`
    pub fn range(start_at: u64, end_at: u64) -> Result<Self> {
        check_start_at(start_at)?;
        if end_at < start_at {
            return Err(Error::invalid_limit(format!(
                "ending position {end_at} must not be less than starting position {start_at}"
            )));
        }
        let max_results = u32::try_from(end_at - start_at + 1).map_err(|_| {
            Error::invalid_limit(format!(
                "range {start_at}..={end_at} exceeds {} results",
                u32::MAX
            ))
        })?;
        Ok(Self {
            max_results,
            start_at,
        })
    }

    /// Maximum number of results
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// 1-based position of the first result
    pub fn start_at(&self) -> u64 {
        self.start_at
    }

    /// Number of results skipped before the first one returned
    pub fn offset(&self) -> u64 {
        self.start_at.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_limit_of() {
        let limit = Limit::of(3).unwrap();
        assert_eq!(limit.max_results(), 3);
        assert_eq!(limit.start_at(), 1);
        assert_eq!(limit.offset(), 0);
    }

    #[test]
    fn test_limit_of_rejects_zero() {
        let err = Limit::of(0).unwrap_err();
        assert!(matches!(err, Error::InvalidLimit { .. }));
    }

    #[test_case(1, 1, 1 ; "single result")]
    #[test_case(5, 14, 10 ; "ten results")]
    #[test_case(100, 100, 1 ; "last position")]
    fn test_limit_range(start: u64, end: u64, expected_max: u32) {
        let limit = Limit::range(start, end).unwrap();
        assert_eq!(limit.max_results(), expected_max);
        assert_eq!(limit.start_at(), start);
        assert_eq!(limit.offset(), start - 1);
    }

    #[test_case(0, 5 ; "zero start")]
    #[test_case(6, 5 ; "end before start")]
    #[test_case(1, u64::MAX ; "too many results")]
    fn test_limit_range_rejects(start: u64, end: u64) {
        assert!(Limit::range(start, end).is_err());
    }

    #[test]
    fn test_limit_serde() {
        let limit: Limit = serde_json::from_str(r#"{"maxResults": 5, "startAt": 11}"#).unwrap();
        assert_eq!(limit, Limit::range(11, 15).unwrap());
        assert_eq!(limit.offset(), 10);

        let limit: Limit = serde_json::from_str(r#"{"maxResults": 3}"#).unwrap();
        assert_eq!(limit, Limit::of(3).unwrap());

        let json = serde_json::to_value(limit).unwrap();
        assert_eq!(json, serde_json::json!({"maxResults": 3, "startAt": 1}));
    }

    #[test_case(r#"{"maxResults": 0, "startAt": 1}"# ; "zero max results")]
    #[test_case(r#"{"maxResults": 5, "startAt": 0}"# ; "zero start")]
    fn test_limit_deserialize_rejects(json: &str) {
        let err = serde_json::from_str::<Limit>(json).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }
}

//! # Query Parameter Parser
//!
//! Parses and validates the query string of the pagination endpoint.

use std::collections::HashMap;

use super::errors::{RestError, RestResult};

/// Maximum number of records a page may hold
pub const MAX_LIMIT: usize = 1000;

/// Page size if not specified
pub const DEFAULT_LIMIT: usize = 10;

/// Parsed `GET /pagination` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationQuery {
    /// Resume after this identifier
    pub last_key: Option<String>,

    /// Page size, always in `1..=MAX_LIMIT`
    pub limit: usize,

    /// Attribute to filter on
    pub field: Option<String>,

    /// Required value of `field`
    pub value: Option<String>,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            last_key: None,
            limit: DEFAULT_LIMIT,
            field: None,
            value: None,
        }
    }
}

impl PaginationQuery {
    /// Parse query parameters from a HashMap.
    ///
    /// Unknown keys are ignored. Empty `lastKey` is treated as absent.
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let mut result = PaginationQuery::default();

        for (key, value) in params {
            match key.as_str() {
                "lastKey" => {
                    result.last_key = Some(value.clone()).filter(|v| !v.is_empty());
                }
                "limit" => {
                    result.limit = parse_limit(value)?;
                }
                "field" => {
                    result.field = Some(parse_field(value)?);
                }
                "value" => {
                    result.value = Some(value.clone());
                }
                _ => {}
            }
        }

        if result.value.is_some() && result.field.is_none() {
            return Err(RestError::DependentParam("value", "field"));
        }

        Ok(result)
    }
}

/// Parse limit parameter: a positive integer no larger than `MAX_LIMIT`
fn parse_limit(value: &str) -> RestResult<usize> {
    let limit: usize = value.trim().parse().map_err(|_| {
        RestError::InvalidQueryParam(format!("limit must be a positive integer, got '{}'", value))
    })?;

    if limit == 0 {
        return Err(RestError::InvalidQueryParam(
            "limit must be a positive integer, got '0'".to_string(),
        ));
    }
    if limit > MAX_LIMIT {
        return Err(RestError::LimitExceeded(limit, MAX_LIMIT));
    }

    Ok(limit)
}

/// Parse field parameter (attribute name, non-empty)
fn parse_field(value: &str) -> RestResult<String> {
    let field = value.trim();
    if field.is_empty() {
        return Err(RestError::InvalidQueryParam(
            "field cannot be empty".to_string(),
        ));
    }
    Ok(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit("50").unwrap(), 50);
        assert!(parse_limit("abc").is_err());
        assert!(parse_limit("0").is_err());
        assert!(parse_limit("-3").is_err());
        assert!(parse_limit("2.5").is_err());
    }

    #[test]
    fn test_defaults() {
        let query = PaginationQuery::parse(&HashMap::new()).unwrap();
        assert_eq!(query, PaginationQuery::default());
        assert_eq!(query.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_full_query() {
        let query = PaginationQuery::parse(&params(&[
            ("lastKey", "p-7"),
            ("limit", "2"),
            ("field", "category"),
            ("value", "shoes"),
        ]))
        .unwrap();

        assert_eq!(query.last_key.as_deref(), Some("p-7"));
        assert_eq!(query.limit, 2);
        assert_eq!(query.field.as_deref(), Some("category"));
        assert_eq!(query.value.as_deref(), Some("shoes"));
    }

    #[test]
    fn test_value_requires_field() {
        let result = PaginationQuery::parse(&params(&[("value", "shoes")]));
        assert!(matches!(
            result,
            Err(RestError::DependentParam("value", "field"))
        ));
    }

    #[test]
    fn test_empty_field_rejected() {
        let result = PaginationQuery::parse(&params(&[("field", "  ")]));
        assert!(matches!(result, Err(RestError::InvalidQueryParam(_))));
    }

    #[test]
    fn test_limit_exceeded() {
        let result = PaginationQuery::parse(&params(&[("limit", "5000")]));
        assert!(matches!(result, Err(RestError::LimitExceeded(5000, 1000))));
    }

    #[test]
    fn test_empty_last_key_is_absent() {
        let query = PaginationQuery::parse(&params(&[("lastKey", "")])).unwrap();
        assert_eq!(query.last_key, None);
    }
}

//! Search queries, typed and raw.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use opps_core::AppConfig;
use opps_geo::normalize_radius;

use crate::error::SearchError;

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Default,
    Nearby,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Nearby => f.write_str("nearby"),
        }
    }
}

impl FromStr for SortMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("default") {
            Ok(Self::Default)
        } else if trimmed.eq_ignore_ascii_case("nearby") {
            Ok(Self::Nearby)
        } else {
            Err(SearchError::invalid(
                "sort",
                format!("unknown sort mode '{trimmed}' (expected default or nearby)"),
            ))
        }
    }
}

/// One search request. Facets left as `None` match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuerySpec {
    pub search_text: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
    pub sort_mode: SortMode,
    /// 1-based; out-of-range values are clamped by the paginator.
    pub page: usize,
    pub page_size: usize,
    pub radius_miles: Option<f64>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_text: None,
            category: None,
            tag: None,
            status: None,
            sort_mode: SortMode::Default,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            radius_miles: None,
        }
    }
}

/// Values applied when a [`QueryParams`] leaves a field blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecDefaults {
    pub page_size: usize,
    pub radius_miles: Option<f64>,
}

impl Default for SpecDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            radius_miles: None,
        }
    }
}

impl SpecDefaults {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            page_size: config.default_page_size.clamp(1, MAX_PAGE_SIZE),
            radius_miles: config.default_radius_miles,
        }
    }
}

/// A query as it arrives from a query string or command line: every field is
/// an unparsed string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub radius: Option<String>,
}

impl QueryParams {
    /// Convert into a [`QuerySpec`].
    ///
    /// A page below 1 becomes 1 and the page size is clamped into
    /// `1..=MAX_PAGE_SIZE`; integers too large for `i64` saturate first. A
    /// negative radius becomes 0.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidSpec`] for a non-numeric page, page size
    /// or radius, a non-finite radius, or an unknown sort mode.
    pub fn into_spec(self, defaults: &SpecDefaults) -> Result<QuerySpec, SearchError> {
        let sort_mode = match non_blank(self.sort.as_deref()) {
            Some(raw) => raw.parse()?,
            None => SortMode::Default,
        };

        let page = match non_blank(self.page.as_deref()) {
            Some(raw) => {
                let n = parse_integer("page", raw)?;
                usize::try_from(n.max(1)).unwrap_or(usize::MAX)
            }
            None => 1,
        };

        let page_size = match non_blank(self.page_size.as_deref()) {
            Some(raw) => {
                let n = parse_integer("pageSize", raw)?;
                if n < 1 {
                    1
                } else {
                    usize::try_from(n).map_or(MAX_PAGE_SIZE, |n| n.min(MAX_PAGE_SIZE))
                }
            }
            None => defaults.page_size,
        };

        let radius_miles = match non_blank(self.radius.as_deref()) {
            Some(raw) => {
                let value: f64 = raw.parse().map_err(|_| {
                    SearchError::invalid("radius", format!("'{raw}' is not a number"))
                })?;
                Some(
                    normalize_radius(value)
                        .map_err(|error| SearchError::invalid("radius", error.to_string()))?,
                )
            }
            None => defaults.radius_miles,
        };

        Ok(QuerySpec {
            search_text: self.q,
            category: self.category,
            tag: self.tag,
            status: self.status,
            sort_mode,
            page,
            page_size,
            radius_miles,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an optionally signed run of digits, saturating at the `i64` bounds.
fn parse_integer(field: &'static str, raw: &str) -> Result<i64, SearchError> {
    let not_an_integer = || SearchError::invalid(field, format!("'{raw}' is not an integer"));

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_an_integer());
    }

    raw.parse::<i64>().or_else(|error| match error.kind() {
        IntErrorKind::PosOverflow => Ok(i64::MAX),
        IntErrorKind::NegOverflow => Ok(i64::MIN),
        _ => Err(not_an_integer()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> QueryParams {
        QueryParams::default()
    }

    #[test]
    fn blank_params_use_defaults() {
        let spec = params().into_spec(&SpecDefaults::default()).unwrap();
        assert_eq!(spec, QuerySpec::default());
    }

    #[test]
    fn defaults_fill_page_size_and_radius() {
        let defaults = SpecDefaults {
            page_size: 12,
            radius_miles: Some(25.0),
        };
        let spec = params().into_spec(&defaults).unwrap();
        assert_eq!(spec.page_size, 12);
        assert_eq!(spec.radius_miles, Some(25.0));
    }

    #[test]
    fn page_and_page_size_are_clamped() {
        let spec = QueryParams {
            page: Some("-4".to_string()),
            page_size: Some("0".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap();
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 1);

        let spec = QueryParams {
            page: Some(" 3 ".to_string()),
            page_size: Some("1000".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap();
        assert_eq!(spec.page, 3);
        assert_eq!(spec.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn oversized_integers_saturate_instead_of_failing() {
        let spec = QueryParams {
            page: Some("99999999999999999999".to_string()),
            page_size: Some("+99999999999999999999".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap();
        assert!(spec.page > 1);
        assert_eq!(spec.page_size, MAX_PAGE_SIZE);

        let spec = QueryParams {
            page: Some("-99999999999999999999".to_string()),
            page_size: Some("-99999999999999999999".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap();
        assert_eq!(spec.page, 1);
        assert_eq!(spec.page_size, 1);
    }

    #[test]
    fn oversized_non_integer_is_still_rejected() {
        for bad in ["99999999999999999999x", "-", "1e30"] {
            let err = QueryParams {
                page: Some(bad.to_string()),
                ..params()
            }
            .into_spec(&SpecDefaults::default())
            .unwrap_err();
            assert!(
                matches!(err, SearchError::InvalidSpec { field: "page", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        let err = QueryParams {
            page: Some("two".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidSpec { field: "page", .. }));
    }

    #[test]
    fn non_numeric_page_size_is_rejected() {
        let err = QueryParams {
            page_size: Some("6.5".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidSpec {
                field: "pageSize",
                ..
            }
        ));
    }

    #[test]
    fn radius_parsing() {
        let spec = QueryParams {
            radius: Some("-10".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap();
        assert_eq!(spec.radius_miles, Some(0.0));

        for bad in ["far", "NaN", "inf"] {
            let err = QueryParams {
                radius: Some(bad.to_string()),
                ..params()
            }
            .into_spec(&SpecDefaults::default())
            .unwrap_err();
            assert!(
                matches!(err, SearchError::InvalidSpec { field: "radius", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn sort_mode_parsing() {
        assert_eq!("Nearby".parse::<SortMode>().unwrap(), SortMode::Nearby);
        assert_eq!(" default ".parse::<SortMode>().unwrap(), SortMode::Default);
        assert!("closest".parse::<SortMode>().is_err());
    }

    #[test]
    fn facets_pass_through_untouched() {
        let spec = QueryParams {
            q: Some("rust".to_string()),
            category: Some("jobs".to_string()),
            tag: Some("all".to_string()),
            sort: Some("nearby".to_string()),
            ..params()
        }
        .into_spec(&SpecDefaults::default())
        .unwrap();
        assert_eq!(spec.search_text.as_deref(), Some("rust"));
        assert_eq!(spec.category.as_deref(), Some("jobs"));
        assert_eq!(spec.tag.as_deref(), Some("all"));
        assert_eq!(spec.sort_mode, SortMode::Nearby);
    }

    #[test]
    fn query_params_deserialize_from_camel_case() {
        let params: QueryParams =
            serde_json::from_str(r#"{"q":"ml","pageSize":"12","sort":"nearby"}"#).unwrap();
        assert_eq!(params.q.as_deref(), Some("ml"));
        assert_eq!(params.page_size.as_deref(), Some("12"));
        assert_eq!(params.sort.as_deref(), Some("nearby"));
    }
}

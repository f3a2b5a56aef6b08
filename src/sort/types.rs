//! Sort and order types
//!
//! A `Sort` names one entity property; an `Order` lists several, most
//! significant first.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Regex for property paths: `name` or `address.city`
static PROPERTY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*$").unwrap()
});

// ============================================================================
// Direction
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl Direction {
    /// The opposite direction
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(Error::invalid_sort(format!(
                "unknown direction '{other}' (expected asc or desc)"
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

// ============================================================================
// Sort
// ============================================================================

/// A single ordering criterion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    property: String,
    #[serde(default = "default_ascending")]
    ascending: bool,
    #[serde(default)]
    ignore_case: bool,
}

fn default_ascending() -> bool {
    true
}

impl Sort {
    /// Create a sort with an explicit direction and case sensitivity
    pub fn of(property: impl Into<String>, direction: Direction, ignore_case: bool) -> Self {
        Self {
            property: property.into(),
            ascending: direction == Direction::Asc,
            ignore_case,
        }
    }

    /// Ascending, case-sensitive
    pub fn asc(property: impl Into<String>) -> Self {
        Self::of(property, Direction::Asc, false)
    }

    /// Ascending, case-insensitive
    pub fn asc_ignore_case(property: impl Into<String>) -> Self {
        Self::of(property, Direction::Asc, true)
    }

    /// Descending, case-sensitive
    pub fn desc(property: impl Into<String>) -> Self {
        Self::of(property, Direction::Desc, false)
    }

    /// Descending, case-insensitive
    pub fn desc_ignore_case(property: impl Into<String>) -> Self {
        Self::of(property, Direction::Desc, true)
    }

    /// Parse a textual sort spec: `property[:asc|:desc][:ci]`
    ///
    /// ```ignore
    /// let sort = Sort::parse("name:desc:ci")?;
    /// assert!(sort.is_descending() && sort.ignore_case());
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.trim().split(':');
        let property = parts.next().unwrap_or_default().trim();

        let mut direction = Direction::Asc;
        let mut ignore_case = false;
        for part in parts {
            match part.trim().to_ascii_lowercase().as_str() {
                "ci" | "ignore_case" => ignore_case = true,
                other => direction = other.parse()?,
            }
        }

        let sort = Self::of(property, direction, ignore_case);
        sort.validate()?;
        Ok(sort)
    }

    /// Check that the property is a well-formed property path
    pub fn validate(&self) -> Result<()> {
        if self.property.is_empty() {
            return Err(Error::invalid_sort("property name must not be empty"));
        }
        if !PROPERTY_REGEX.is_match(&self.property) {
            return Err(Error::invalid_sort(format!(
                "'{}' is not a valid property path",
                self.property
            )));
        }
        Ok(())
    }

    /// Name of the property to sort by
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Whether the sort is ascending
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Whether the sort is descending
    pub fn is_descending(&self) -> bool {
        !self.ascending
    }

    /// Whether text comparisons ignore case
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Direction of the sort
    pub fn direction(&self) -> Direction {
        if self.ascending {
            Direction::Asc
        } else {
            Direction::Desc
        }
    }
}

impl FromStr for Sort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.property, self.direction())?;
        if self.ignore_case {
            f.write_str(":ci")?;
        }
        Ok(())
    }
}

// ============================================================================
// Order
// ============================================================================

/// Ordered sequence of sort criteria, most significant first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order {
    sorts: Vec<Sort>,
}

impl Order {
    /// An order with no criteria
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Build an order from sort criteria
    pub fn by(sorts: impl IntoIterator<Item = Sort>) -> Self {
        Self {
            sorts: sorts.into_iter().collect(),
        }
    }

    /// Append a less significant criterion
    #[must_use]
    pub fn then(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Parse a comma-separated list of sort specs: `a:asc,b:desc:ci`
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(Self::unsorted());
        }
        let sorts = spec
            .split(',')
            .map(Sort::parse)
            .collect::<Result<Vec<_>>>()?;
        let order = Self { sorts };
        order.validate()?;
        Ok(order)
    }

    /// Check every criterion and reject properties listed twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for sort in &self.sorts {
            sort.validate()?;
            if !seen.insert(sort.property()) {
                return Err(Error::invalid_sort(format!(
                    "property '{}' appears more than once",
                    sort.property()
                )));
            }
        }
        Ok(())
    }

    /// The criteria, most significant first
    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    /// Number of criteria
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    /// Whether there are no criteria
    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }

    /// Iterate over the criteria
    pub fn iter(&self) -> std::slice::Iter<'_, Sort> {
        self.sorts.iter()
    }
}

impl FromIterator<Sort> for Order {
    fn from_iter<I: IntoIterator<Item = Sort>>(iter: I) -> Self {
        Self::by(iter)
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a Sort;
    type IntoIter = std::slice::Iter<'a, Sort>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorts.iter()
    }
}

impl From<Sort> for Order {
    fn from(sort: Sort) -> Self {
        Self { sorts: vec![sort] }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sort) in self.sorts.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{sort}")?;
        }
        Ok(())
    }
}

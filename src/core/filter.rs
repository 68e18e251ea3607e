use crate::core::json::RangeRecord;
use log::trace;
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Default Filter Parameters
-------------------------------------------------------------------------------------------------*/

/// Traffic directions included by the default [Filter].
pub const DEFAULT_DIRECTIONS: [&str; 1] = ["ingress"];

/// Products included by the default [Filter].
pub const DEFAULT_PRODUCTS: [&str; 2] = ["confluence", "jira"];

/*-------------------------------------------------------------------------------------------------
  FilterBuilder
-------------------------------------------------------------------------------------------------*/

/// Builder used to construct a [Filter] object. Starts from the default filter parameters;
/// each setter replaces one parameter set.
///
/// ```rust
/// let filter = atlassianipranges::FilterBuilder::new()
///     .directions(["ingress", "egress"])
///     .products(["bitbucket"])
///     .build();
///
/// assert!(filter.directions().contains("egress"));
/// assert!(!filter.products().contains("jira"));
/// ```
#[derive(Debug)]
pub struct FilterBuilder {
    directions: BTreeSet<String>,
    products: BTreeSet<String>,
}

/*--------------------------------------------------------------------------------------
  Filter Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for FilterBuilder {
    fn default() -> Self {
        Self {
            directions: to_set(DEFAULT_DIRECTIONS),
            products: to_set(DEFAULT_PRODUCTS),
        }
    }
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Include IP ranges that apply to any of these traffic directions.
    pub fn directions<I, S>(mut self, directions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.directions = to_set(directions);
        self
    }

    /// Include IP ranges that apply to any of these products.
    pub fn products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.products = to_set(products);
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(self) -> Filter {
        Filter {
            directions: self.directions,
            products: self.products,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Filter
-------------------------------------------------------------------------------------------------*/

/// Filter used to include IP range records based on the traffic directions and products they
/// apply to. A record is included when it shares at least one direction AND at least one
/// product with the filter; an empty parameter set matches no records.
///
/// [Filter::default] includes inbound (`ingress`) ranges for Confluence and Jira.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filter {
    directions: BTreeSet<String>,
    products: BTreeSet<String>,
}

/*--------------------------------------------------------------------------------------
  Filter Implementation
--------------------------------------------------------------------------------------*/

impl Default for Filter {
    fn default() -> Self {
        FilterBuilder::default().build()
    }
}

impl Filter {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Traffic directions included in the filter.
    pub fn directions(&self) -> &BTreeSet<String> {
        &self.directions
    }

    /// Products included in the filter.
    pub fn products(&self) -> &BTreeSet<String> {
        &self.products
    }

    /*-------------------------------------------------------------------------
      Filter Functions
    -------------------------------------------------------------------------*/

    pub(crate) fn match_directions(&self, record: &RangeRecord) -> bool {
        let matched = intersects(&self.directions, &record.directions);
        if !matched {
            trace!("Direction mismatch {:?}: {}", record.directions, record.cidr);
        }
        matched
    }

    pub(crate) fn match_products(&self, record: &RangeRecord) -> bool {
        let matched = intersects(&self.products, &record.products);
        if !matched {
            trace!("Product mismatch {:?}: {}", record.products, record.cidr);
        }
        matched
    }

    pub fn include_record(&self, record: &RangeRecord) -> bool {
        let filters = [Filter::match_directions, Filter::match_products];
        filters.iter().all(|filter| filter(self, record))
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn to_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect()
}

fn intersects(filter_values: &BTreeSet<String>, record_values: &[String]) -> bool {
    record_values
        .iter()
        .any(|value| filter_values.contains(value))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

/// Label of the selector entry that disables site filtering.
pub const ALL_SITES: &str = "All Sites";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column (0 = failure, 1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value as stored in the input file.
    pub fn class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the input table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(launch_site: impl Into<String>, payload_mass_kg: f64, outcome: Outcome) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table with pre-computed site index and payload bounds.
///
/// Built once at startup and never mutated; everything downstream borrows it.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct site names in order of first appearance.
    sites: Vec<String>,
    site_set: BTreeSet<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build the site index and payload bounds.  Returns `None` for an empty table.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut sites = Vec::new();
        let mut site_set = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            if site_set.insert(rec.launch_site.clone()) {
                sites.push(rec.launch_site.clone());
            }
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
        }

        Some(LaunchDataset {
            records,
            sites,
            site_set,
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, first-appearance order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.site_set.contains(site)
    }

    /// Resolve a selection to the site it filters on.
    ///
    /// `None` means "no site filter": the sentinel and any name that was not
    /// observed at load time both land here.
    pub fn resolve_site<'a>(&self, selection: &'a SiteSelection) -> Option<&'a str> {
        match selection {
            SiteSelection::Site(name) if self.has_site(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Turn a typed site name into a selection.
    ///
    /// Membership decides: an observed site is selected even if it happens to
    /// be spelled like the sentinel, anything else means no site filter.
    pub fn selection_for(&self, label: &str) -> SiteSelection {
        if self.has_site(label) {
            SiteSelection::Site(label.to_string())
        } else {
            SiteSelection::AllSites
        }
    }

    /// Observed `(min, max)` payload mass.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// Value of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelection {
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::AllSites => ALL_SITES,
            SiteSelection::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// An inverted interval is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

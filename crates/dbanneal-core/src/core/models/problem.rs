use super::aggregate::SiteTree;
use super::site::FixedCharge;
use nalgebra::Point2;
use phf::phf_map;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Built-in values for simulation parameters that may be omitted from the input.
pub static PARAMETER_DEFAULTS: phf::Map<&'static str, &'static str> = phf_map! {
    "preanneal_cycles" => "1000",
    "anneal_cycles" => "10000",
    "global_v0" => "1",
    "debye_length" => "5e-9",
    "result_queue_size" => "1000",
    "kT_init" => "2.568e-2",
    "kT_step" => "0.999999",
    "v_freeze_init" => "0",
    "v_freeze_step" => "0.001",
    "unfav_hop_scale" => "1",
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParameterError {
    #[error("Missing required simulation parameter '{0}'")]
    Missing(String),

    #[error("Invalid value '{value}' for simulation parameter '{key}'")]
    Invalid { key: String, value: String },
}

/// Sites of a design split by role, in flattening order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedSites {
    /// Locations of the sites whose occupation is simulated.
    pub free: Vec<Point2<f64>>,
    /// Fixed sites followed by the problem's external charges.
    pub fixed: Vec<FixedCharge>,
}

/// A loaded simulation problem: the design tree, the raw simulation
/// parameters and any external fixed charges.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    sites: SiteTree,
    parameters: BTreeMap<String, String>,
    fixed_charges: Vec<FixedCharge>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sites(sites: SiteTree) -> Self {
        Self {
            sites,
            ..Self::default()
        }
    }

    pub fn sites(&self) -> &SiteTree {
        &self.sites
    }

    pub fn sites_mut(&mut self) -> &mut SiteTree {
        &mut self.sites
    }

    /// Iterates over the raw parameter table in key order.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inserts or replaces a parameter; values are kept as text until consumed.
    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), value.into());
    }

    /// Returns `true` if the key was given explicitly (defaults do not count).
    pub fn parameter_exists(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// The explicit value for `key`, falling back to the built-in default.
    pub fn get_parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .map(String::as_str)
            .or_else(|| PARAMETER_DEFAULTS.get(key).copied())
    }

    /// Like [`Problem::get_parameter`], but a key with neither a value nor a
    /// default is an error.
    pub fn require_parameter(&self, key: &str) -> Result<&str, ParameterError> {
        self.get_parameter(key)
            .ok_or_else(|| ParameterError::Missing(key.to_string()))
    }

    /// Parses the value of a required parameter.
    pub fn parse_parameter<T: FromStr>(&self, key: &str) -> Result<T, ParameterError> {
        let raw = self.require_parameter(key)?;
        parse_value(key, raw)
    }

    /// Parses the value of a parameter that may legitimately be absent.
    pub fn parse_optional_parameter<T: FromStr>(
        &self,
        key: &str,
    ) -> Result<Option<T>, ParameterError> {
        self.get_parameter(key)
            .map(|raw| parse_value(key, raw))
            .transpose()
    }

    /// External charges that are not part of the design tree.
    pub fn fixed_charges(&self) -> &[FixedCharge] {
        &self.fixed_charges
    }

    pub fn add_fixed_charge(&mut self, charge: FixedCharge) {
        self.fixed_charges.push(charge);
    }

    /// Flattens the design and splits it into free sites and fixed charges.
    ///
    /// Free-site order is the flattening order of the tree; every index-keyed
    /// array downstream relies on it.
    pub fn partition(&self) -> PartitionedSites {
        let mut partitioned = PartitionedSites::default();
        for site in self.sites.sites() {
            if site.is_fixed() {
                partitioned.fixed.push(FixedCharge::from(site));
            } else {
                partitioned.free.push(site.location());
            }
        }
        partitioned.fixed.extend_from_slice(&self.fixed_charges);
        partitioned
    }

    /// Number of sites whose occupation will be simulated.
    pub fn free_site_count(&self) -> usize {
        self.sites.sites().filter(|site| !site.is_fixed()).count()
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ParameterError> {
    raw.trim().parse().map_err(|_| ParameterError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::site::Site;

    fn create_mixed_problem() -> Problem {
        let mut tree = SiteTree::new();
        let root = tree.root();
        tree.add_site(root, Site::free(0.0, 0.0)).unwrap();
        let agg = tree.add_aggregate(root).unwrap();
        tree.add_site(agg, Site::fixed(5.0, 0.0)).unwrap();
        tree.add_site(agg, Site::free(10.0, 0.0)).unwrap();
        Problem::with_sites(tree)
    }

    #[test]
    fn explicit_parameter_overrides_default() {
        let mut problem = Problem::new();
        assert_eq!(problem.get_parameter("anneal_cycles"), Some("10000"));
        assert!(!problem.parameter_exists("anneal_cycles"));

        problem.set_parameter("anneal_cycles", "50");
        assert!(problem.parameter_exists("anneal_cycles"));
        assert_eq!(problem.get_parameter("anneal_cycles"), Some("50"));
        assert_eq!(problem.parse_parameter::<usize>("anneal_cycles"), Ok(50));
    }

    #[test]
    fn unknown_parameter_without_default_is_missing() {
        let problem = Problem::new();
        assert_eq!(problem.get_parameter("no_such_key"), None);
        assert_eq!(
            problem.require_parameter("no_such_key"),
            Err(ParameterError::Missing("no_such_key".to_string()))
        );
    }

    #[test]
    fn optional_parameter_is_none_when_absent() {
        let mut problem = Problem::new();
        assert_eq!(problem.parse_optional_parameter::<u64>("seed"), Ok(None));
        problem.set_parameter("seed", " 42 ");
        assert_eq!(problem.parse_optional_parameter::<u64>("seed"), Ok(Some(42)));
    }

    #[test]
    fn unparsable_parameter_reports_key_and_value() {
        let mut problem = Problem::new();
        problem.set_parameter("preanneal_cycles", "lots");
        assert_eq!(
            problem.parse_parameter::<usize>("preanneal_cycles"),
            Err(ParameterError::Invalid {
                key: "preanneal_cycles".to_string(),
                value: "lots".to_string(),
            })
        );
    }

    #[test]
    fn every_default_parses_as_a_number() {
        for (key, value) in PARAMETER_DEFAULTS.entries() {
            assert!(value.parse::<f64>().is_ok(), "default for {key} is not numeric");
        }
    }

    #[test]
    fn partition_keeps_flattening_order_and_appends_external_charges() {
        let mut problem = create_mixed_problem();
        problem.add_fixed_charge(FixedCharge::new(-5.0, 0.0, 2.0));

        let partitioned = problem.partition();
        assert_eq!(
            partitioned.free,
            vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]
        );
        assert_eq!(
            partitioned.fixed,
            vec![
                FixedCharge::new(5.0, 0.0, 1.0),
                FixedCharge::new(-5.0, 0.0, 2.0)
            ]
        );
        assert_eq!(problem.free_site_count(), 2);
    }

    #[test]
    fn problem_with_only_fixed_sites_has_no_free_sites() {
        let mut tree = SiteTree::new();
        tree.add_site(tree.root(), Site::fixed(1.0, 1.0)).unwrap();
        let problem = Problem::with_sites(tree);
        assert_eq!(problem.free_site_count(), 0);
        assert!(problem.partition().free.is_empty());
    }
}

//! Cascade filter terms.
//!
//! A filter has one optional stage per geography level. Within a stage a
//! server passes if it matches any term; stages combine with AND and are
//! applied continent → country → region → city.

use super::types::ServerRecord;

/// Lowercased match terms for one geography level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Terms(Vec<String>);

impl Terms {
    /// Builds a stage from raw terms. Empty input yields an inactive stage.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        Self(terms.iter().map(|t| t.as_ref().to_lowercase()).collect())
    }

    /// A stage with no terms lets every server through.
    pub fn is_active(&self) -> bool {
        !self.0.is_empty()
    }

    /// Case-insensitive exact match of any candidate against any term.
    pub fn matches_any(&self, candidates: &[&str]) -> bool {
        candidates
            .iter()
            .any(|c| !c.is_empty() && self.0.iter().any(|t| t.as_str() == c.to_lowercase()))
    }
}

/// Cascade filter over continent, country, region and city.
///
/// ```
/// use vanish::GeoFilter;
///
/// let filter = GeoFilter::new().continents(&["EU"]).cities(&["London"]);
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoFilter {
    pub continents: Terms,
    pub countries: Terms,
    pub regions: Terms,
    pub cities: Terms,
}

impl GeoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continent names or codes.
    pub fn continents<S: AsRef<str>>(mut self, terms: &[S]) -> Self {
        self.continents = Terms::new(terms);
        self
    }

    /// Country names or codes.
    pub fn countries<S: AsRef<str>>(mut self, terms: &[S]) -> Self {
        self.countries = Terms::new(terms);
        self
    }

    /// Region names, codes, or abbreviations.
    pub fn regions<S: AsRef<str>>(mut self, terms: &[S]) -> Self {
        self.regions = Terms::new(terms);
        self
    }

    /// City names.
    pub fn cities<S: AsRef<str>>(mut self, terms: &[S]) -> Self {
        self.cities = Terms::new(terms);
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.continents.is_active()
            || self.countries.is_active()
            || self.regions.is_active()
            || self.cities.is_active())
    }
}

/// Geography levels, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Continent,
    Country,
    Region,
    City,
}

impl Stage {
    /// Values of `server` this stage's terms are compared against.
    fn keys(self, server: &ServerRecord) -> Vec<&str> {
        match self {
            Stage::Continent => vec![server.continent.as_str(), server.continent_code.as_str()],
            Stage::Country => vec![server.country.as_str(), server.country_code.as_str()],
            Stage::Region => vec![
                server.region.as_str(),
                server.region_code.as_str(),
                server.region_abbr.as_str(),
            ],
            Stage::City => vec![server.city.as_str()],
        }
    }

    fn terms(self, filter: &GeoFilter) -> &Terms {
        match self {
            Stage::Continent => &filter.continents,
            Stage::Country => &filter.countries,
            Stage::Region => &filter.regions,
            Stage::City => &filter.cities,
        }
    }
}

/// Applies the stages of `filter` up to and including `last`, in cascade order.
pub fn apply<'a>(
    servers: &'a [ServerRecord],
    filter: &GeoFilter,
    last: Stage,
) -> Vec<&'a ServerRecord> {
    let stages = [Stage::Continent, Stage::Country, Stage::Region, Stage::City];
    let mut selected: Vec<&ServerRecord> = servers.iter().collect();

    for stage in stages.into_iter().filter(|s| *s <= last) {
        let terms = stage.terms(filter);
        if !terms.is_active() {
            continue;
        }
        selected.retain(|server| terms.matches_any(&stage.keys(server)));
    }
    selected
}

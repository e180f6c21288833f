//! Hierarchical queries over a loaded catalog.
//!
//! Listings keep first-seen order and drop repeats by the level's key, which
//! gives reproducible output without sorting.

use std::collections::HashSet;

use serde::Serialize;

use super::filter::{apply, GeoFilter, Stage};
use super::types::{Catalog, ServerRecord};

/// A continent as `(name, code)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Continent {
    pub name: String,
    pub code: String,
}

/// A country with the continent it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub continent: String,
    pub name: String,
    pub code: String,
}

/// A sub-country region with its country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub country: String,
    pub name: String,
    pub code: String,
}

/// A city with its continent and country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub continent: String,
    pub country: String,
    pub name: String,
}

/// Read-only view answering cascade queries over a [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct ServerIndex<'a> {
    servers: &'a [ServerRecord],
}

impl<'a> ServerIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            servers: catalog.servers(),
        }
    }

    /// Servers passing every stage of `filter`, in catalog order.
    pub fn servers(&self, filter: &GeoFilter) -> Vec<&'a ServerRecord> {
        apply(self.servers, filter, Stage::City)
    }

    /// Every continent, unique by code.
    pub fn continents(&self) -> Vec<Continent> {
        unique_by(self.servers.iter(), |s| &s.continent_code, |s| Continent {
            name: s.continent.clone(),
            code: s.continent_code.clone(),
        })
    }

    /// Countries on the continents selected by `filter`, unique by code.
    pub fn countries(&self, filter: &GeoFilter) -> Vec<Country> {
        let selected = apply(self.servers, filter, Stage::Continent);
        unique_by(selected.into_iter(), |s| &s.country_code, |s| Country {
            continent: s.continent.clone(),
            name: s.country.clone(),
            code: s.country_code.clone(),
        })
    }

    /// Regions in the continents and countries selected by `filter`, unique by code.
    ///
    /// Country-level servers (empty region) are left out.
    pub fn regions(&self, filter: &GeoFilter) -> Vec<Region> {
        let selected = apply(self.servers, filter, Stage::Country);
        unique_by(
            selected.into_iter().filter(|s| s.has_region()),
            |s| &s.region_code,
            |s| Region {
                country: s.country.clone(),
                name: s.region.clone(),
                code: s.region_code.clone(),
            },
        )
    }

    /// Cities in the continents, countries and regions selected by `filter`.
    ///
    /// Unique by city name alone: two countries with a same-named city list it once.
    pub fn cities(&self, filter: &GeoFilter) -> Vec<City> {
        let selected = apply(self.servers, filter, Stage::Region);
        unique_by(selected.into_iter(), |s| &s.city, |s| City {
            continent: s.continent.clone(),
            country: s.country.clone(),
            name: s.city.clone(),
        })
    }
}

fn unique_by<'a, I, K, T>(
    servers: I,
    key: impl Fn(&'a ServerRecord) -> &'a K,
    build: impl Fn(&'a ServerRecord) -> T,
) -> Vec<T>
where
    I: Iterator<Item = &'a ServerRecord>,
    K: Eq + std::hash::Hash + ?Sized + 'a,
{
    let mut seen: HashSet<&K> = HashSet::new();
    servers
        .filter(|s| seen.insert(key(*s)))
        .map(build)
        .collect()
}

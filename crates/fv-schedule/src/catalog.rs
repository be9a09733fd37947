//! Pipe type catalog: per-system tables of physical dimensions.
//!
//! Lookups never fail on missing data. A size that is absent from a table
//! answers 0, since sparse size ranges are routine; callers decide whether
//! that matters.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use fv_core::Real;

use crate::error::ScheduleResult;
use crate::types::{FlowClass, PipeSeries, PipeSystem};

/// Unique key of a row within one pipe type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogKey {
    pub flow_class: FlowClass,
    pub dn: u32,
    pub series: PipeSeries,
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DN{} {}", self.flow_class, self.dn, self.series)
    }
}

/// One catalog row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub key: CatalogKey,
    /// Media pipe outer diameter (mm).
    pub outer_diameter_mm: Real,
    /// Casing ("kOd") outer diameter (mm).
    pub casing_diameter_mm: Real,
    /// Media pipe wall thickness (mm), when the table carries it.
    pub wall_thickness_mm: Option<Real>,
    /// Minimum elastic bending radius (m).
    pub min_elastic_radius_m: Real,
    /// Maximum bend angle (degrees) of a prefabricated 12 m bent pipe.
    pub vp_max_12_deg: Real,
    /// Maximum bend angle (degrees) of a prefabricated 16 m bent pipe.
    pub vp_max_16_deg: Real,
}

impl CatalogEntry {
    fn vp_max_deg(&self, std_length_m: u32) -> Real {
        if std_length_m <= 12 {
            self.vp_max_12_deg
        } else {
            self.vp_max_16_deg
        }
    }
}

/// All rows for one pipe type (one tabular file).
#[derive(Debug, Clone)]
pub struct PipeTypeTable {
    code: String,
    system: PipeSystem,
    entries: HashMap<CatalogKey, CatalogEntry>,
    // Outer diameter does not depend on series or flow class; first row wins.
    outer_by_dn: HashMap<u32, Real>,
}

impl PipeTypeTable {
    /// Create an empty table. The system is derived from the code.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let system = PipeSystem::from_code(&code).unwrap_or(PipeSystem::Unknown);
        Self {
            code,
            system,
            entries: HashMap::new(),
            outer_by_dn: HashMap::new(),
        }
    }

    /// Insert a row. Returns the displaced row if the key was already present.
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.outer_by_dn
            .entry(entry.key.dn)
            .or_insert(entry.outer_diameter_mm);
        self.entries.insert(entry.key, entry)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn system(&self) -> PipeSystem {
        self.system
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, flow_class: FlowClass, dn: u32, series: PipeSeries) -> Option<&CatalogEntry> {
        self.entries.get(&CatalogKey {
            flow_class,
            dn,
            series,
        })
    }

    /// Entries sorted by key, for listing.
    pub fn entries(&self) -> Vec<&CatalogEntry> {
        let mut rows: Vec<_> = self.entries.values().collect();
        rows.sort_by_key(|e| e.key);
        rows
    }

    pub fn outer_diameter(&self, dn: u32) -> Real {
        self.outer_by_dn.get(&dn).copied().unwrap_or(0.0)
    }

    pub fn casing_diameter(&self, flow_class: FlowClass, dn: u32, series: PipeSeries) -> Real {
        // PEX-U is only produced in series 3.
        let series = if self.system == PipeSystem::PexU {
            PipeSeries::S3
        } else {
            series
        };
        self.entry(flow_class, dn, series)
            .map_or(0.0, |e| e.casing_diameter_mm)
    }

    pub fn min_elastic_radius(&self, flow_class: FlowClass, dn: u32, series: PipeSeries) -> Real {
        self.entry(flow_class, dn, series)
            .map_or(0.0, |e| e.min_elastic_radius_m)
    }

    /// Minimum radius of a prefabricated bent pipe of the given standard length.
    ///
    /// Uses the first series (S1..S3) that defines a positive bend angle.
    /// Flexible systems have no prefabricated bends.
    pub fn bend_min_radius(&self, flow_class: FlowClass, dn: u32, std_length_m: u32) -> Real {
        if self.system.is_flexible() {
            return 0.0;
        }
        PipeSeries::DEFINED
            .into_iter()
            .filter_map(|s| self.entry(flow_class, dn, s))
            .map(|e| e.vp_max_deg(std_length_m))
            .find(|deg| deg.is_finite() && *deg > 0.0)
            .map_or(0.0, |deg| Real::from(std_length_m) / deg.to_radians())
    }

    /// Defined series present for (flow class, DN), in S1..S3 order.
    pub fn series_candidates(
        &self,
        flow_class: FlowClass,
        dn: u32,
    ) -> impl Iterator<Item = &CatalogEntry> + '_ {
        PipeSeries::DEFINED
            .into_iter()
            .filter_map(move |s| self.entry(flow_class, dn, s))
    }
}

/// Immutable catalog of pipe type tables, keyed by type code.
///
/// Built once, then shared read-only (wrap in `Arc` to share between threads).
#[derive(Debug, Clone, Default)]
pub struct PipeCatalog {
    tables: BTreeMap<String, PipeTypeTable>,
}

impl PipeCatalog {
    /// Load every `*.csv` table in `dir` (top level only).
    pub fn load(dir: &Path) -> ScheduleResult<Self> {
        crate::loader::load_catalog_dir(dir)
    }

    /// Assemble a catalog from already-parsed tables.
    ///
    /// A later table with the same code replaces an earlier one.
    pub fn from_tables(tables: impl IntoIterator<Item = PipeTypeTable>) -> Self {
        Self {
            tables: tables
                .into_iter()
                .map(|t| (t.code.to_ascii_uppercase(), t))
                .collect(),
        }
    }

    pub fn tables(&self) -> impl Iterator<Item = &PipeTypeTable> {
        self.tables.values()
    }

    pub fn table_by_code(&self, code: &str) -> Option<&PipeTypeTable> {
        self.tables.get(&code.to_ascii_uppercase())
    }

    pub fn table(&self, system: PipeSystem) -> Option<&PipeTypeTable> {
        system.code().and_then(|code| self.table_by_code(code))
    }

    pub fn outer_diameter(&self, system: PipeSystem, dn: u32) -> Real {
        self.table(system).map_or(0.0, |t| t.outer_diameter(dn))
    }

    pub fn casing_diameter(
        &self,
        system: PipeSystem,
        flow_class: FlowClass,
        dn: u32,
        series: PipeSeries,
    ) -> Real {
        self.table(system)
            .map_or(0.0, |t| t.casing_diameter(flow_class, dn, series))
    }

    pub fn min_elastic_radius(
        &self,
        system: PipeSystem,
        flow_class: FlowClass,
        dn: u32,
        series: PipeSeries,
    ) -> Real {
        self.table(system)
            .map_or(0.0, |t| t.min_elastic_radius(flow_class, dn, series))
    }

    pub fn bend_min_radius(
        &self,
        system: PipeSystem,
        flow_class: FlowClass,
        dn: u32,
        std_length_m: u32,
    ) -> Real {
        self.table(system)
            .map_or(0.0, |t| t.bend_min_radius(flow_class, dn, std_length_m))
    }

    /// One line per table: code, system and row count.
    pub fn list_pipe_types(&self) -> Vec<String> {
        self.tables
            .values()
            .map(|t| format!("{} ({:?}): {} rows", t.code, t.system, t.len()))
            .collect()
    }
}

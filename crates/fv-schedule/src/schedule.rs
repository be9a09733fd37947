//! Pipe schedule facade: descriptor-level queries against a shared catalog.

use std::sync::Arc;

use fv_core::{Length, Real};
use serde::Serialize;
use tracing::warn;

use crate::catalog::PipeCatalog;
use crate::classify::{PipeDescriptor, SeriesMode, pipe_series};
use crate::error::{ScheduleError, ScheduleResult};
use crate::label::format_label;
use crate::types::PipeSeries;

/// Standard pipe length (m) for a nominal diameter.
pub fn std_length(dn: u32) -> u32 {
    if dn <= 80 { 12 } else { 16 }
}

/// Everything derivable for one pipe. Missing values are 0 / empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeDimensions {
    pub series: PipeSeries,
    pub outer_diameter_mm: Real,
    pub casing_diameter_mm: Real,
    pub min_elastic_radius_m: Real,
    pub bend_min_radius_m: Real,
    pub std_length_m: u32,
    pub in_situ_bent: bool,
    pub label: String,
}

/// Cheap to clone; all clones share one read-only catalog.
#[derive(Debug, Clone)]
pub struct PipeSchedule {
    catalog: Arc<PipeCatalog>,
}

impl PipeSchedule {
    pub fn new(catalog: Arc<PipeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PipeCatalog {
        &self.catalog
    }

    pub fn outer_diameter(&self, desc: &PipeDescriptor) -> Real {
        self.catalog.outer_diameter(desc.system, desc.dn)
    }

    pub fn pipe_series(
        &self,
        desc: &PipeDescriptor,
        constant_width: Length,
        mode: SeriesMode,
    ) -> ScheduleResult<PipeSeries> {
        pipe_series(&self.catalog, desc, constant_width, mode)
    }

    pub fn casing_diameter_for_series(&self, desc: &PipeDescriptor, series: PipeSeries) -> Real {
        match desc.flow_class() {
            Some(flow_class) => self
                .catalog
                .casing_diameter(desc.system, flow_class, desc.dn, series),
            None => 0.0,
        }
    }

    /// Resolve the series from the drawn width, then look up the casing diameter.
    pub fn casing_diameter(
        &self,
        desc: &PipeDescriptor,
        constant_width: Length,
        mode: SeriesMode,
    ) -> ScheduleResult<Real> {
        let series = self.pipe_series(desc, constant_width, mode)?;
        let kod = self.casing_diameter_for_series(desc, series);
        if kod == 0.0 {
            warn!(pipe = %desc, %series, "casing diameter is 0");
        }
        Ok(kod)
    }

    /// Minimum elastic bending radius (m).
    ///
    /// With `consider_in_situ`, pipes bent on site answer 0.
    pub fn min_elastic_radius(
        &self,
        desc: &PipeDescriptor,
        constant_width: Length,
        consider_in_situ: bool,
    ) -> ScheduleResult<Real> {
        if consider_in_situ && desc.is_in_situ_bent()? {
            return Ok(0.0);
        }
        let Some(flow_class) = desc.flow_class() else {
            return Ok(0.0);
        };
        let series = self.pipe_series(desc, constant_width, SeriesMode::Lenient)?;
        Ok(self
            .catalog
            .min_elastic_radius(desc.system, flow_class, desc.dn, series))
    }

    /// Minimum radius of a prefabricated bent pipe of the standard length.
    pub fn bend_min_radius(&self, desc: &PipeDescriptor) -> Real {
        match desc.flow_class() {
            Some(flow_class) => self.catalog.bend_min_radius(
                desc.system,
                flow_class,
                desc.dn,
                std_length(desc.dn),
            ),
            None => 0.0,
        }
    }

    /// Size label; the series must be determinable.
    pub fn label(&self, desc: &PipeDescriptor, constant_width: Length) -> ScheduleResult<String> {
        let series = self.pipe_series(desc, constant_width, SeriesMode::HardFail)?;
        let od = self.outer_diameter(desc);
        let kod = self.casing_diameter_for_series(desc, series);
        Ok(format_label(desc, od, kod))
    }

    /// All derived dimensions, never failing on missing catalog data.
    ///
    /// Only an unresolved pipe type is an error, since in-situ bending
    /// cannot be answered without one.
    pub fn dimensions(&self, desc: &PipeDescriptor, constant_width: Length) -> ScheduleResult<PipeDimensions> {
        if desc.flow_class().is_none() {
            return Err(ScheduleError::UnresolvedPipeType {
                what: desc.to_string(),
            });
        }
        let in_situ_bent = desc.is_in_situ_bent()?;
        let series = self.pipe_series(desc, constant_width, SeriesMode::Lenient)?;
        let outer_diameter_mm = self.outer_diameter(desc);
        let casing_diameter_mm = self.casing_diameter_for_series(desc, series);
        let min_elastic_radius_m = match (in_situ_bent, desc.flow_class()) {
            (false, Some(flow_class)) => {
                self.catalog
                    .min_elastic_radius(desc.system, flow_class, desc.dn, series)
            }
            _ => 0.0,
        };

        Ok(PipeDimensions {
            series,
            outer_diameter_mm,
            casing_diameter_mm,
            min_elastic_radius_m,
            bend_min_radius_m: self.bend_min_radius(desc),
            std_length_m: std_length(desc.dn),
            in_situ_bent,
            label: format_label(desc, outer_diameter_mm, casing_diameter_mm),
        })
    }
}

//! Layer name classifier and series inference.

use std::fmt;
use std::sync::LazyLock;

use fv_core::{Length, Real, as_m, within_abs};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::PipeCatalog;
use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{FlowClass, PipeFlowRole, PipeSeries, PipeSystem};

/// Casing diameters closer than this (mm) to a catalog value match it.
pub const SERIES_TOLERANCE_MM: Real = 1.0;

static LAYER_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^FJV-(?P<role>TWIN|FREM|RETUR|ENKELT)-(?P<system>DN|ALUPEX|CU|PEXU)(?P<dn>\d+)$")
        .expect("layer grammar is a valid pattern")
});

/// How series inference treats an undetermined result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesMode {
    /// Return `PipeSeries::Undefined`.
    #[default]
    Lenient,
    /// Fail with `ScheduleError::AmbiguousSeries`.
    HardFail,
}

/// Structured pipe description parsed from a layer name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeDescriptor {
    pub system: PipeSystem,
    pub flow_role: PipeFlowRole,
    /// Nominal diameter code.
    pub dn: u32,
}

impl PipeDescriptor {
    pub fn new(system: PipeSystem, flow_role: PipeFlowRole, dn: u32) -> Self {
        Self {
            system,
            flow_role,
            dn,
        }
    }

    pub fn flow_class(&self) -> Option<FlowClass> {
        self.flow_role.flow_class()
    }

    /// `FJV-{ROLE}-{CODE}{DN}`, or `None` for unresolved descriptors.
    pub fn canonical_layer(&self) -> Option<String> {
        let role = self.flow_role.layer_word()?;
        let code = self.system.code()?;
        Some(format!("FJV-{role}-{code}{}", self.dn))
    }

    /// True when the pipe is bent on site rather than prefabricated.
    ///
    /// Flexible systems always are. Rigid twin pipe below DN65 and rigid
    /// single pipe below DN100 are too.
    pub fn is_in_situ_bent(&self) -> ScheduleResult<bool> {
        if self.system.is_flexible() {
            return Ok(true);
        }
        match (self.system, self.flow_role) {
            (PipeSystem::Unknown, _) | (_, PipeFlowRole::Unknown) => {
                Err(ScheduleError::UnresolvedPipeType {
                    what: format!("in-situ bending of {self}"),
                })
            }
            (_, PipeFlowRole::Twin) => Ok(self.dn < 65),
            _ => Ok(self.dn < 100),
        }
    }
}

impl fmt::Display for PipeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_layer() {
            Some(layer) => f.write_str(&layer),
            None => write!(f, "{:?}/{:?} DN{}", self.system, self.flow_role, self.dn),
        }
    }
}

// Drawing widths are metres; scale by 1000 so whole-millimetre widths stay exact.
fn width_mm(width: Length) -> Real {
    as_m(width) * 1000.0
}

/// Keep the text after the last `|` (external reference prefixes).
pub fn strip_namespace(layer: &str) -> &str {
    layer.rsplit('|').next().unwrap_or(layer)
}

/// Parse a layer name into a descriptor.
pub fn classify(layer: &str) -> ScheduleResult<PipeDescriptor> {
    let name = strip_namespace(layer).trim();
    let fail = || ScheduleError::Classification {
        layer: layer.to_string(),
    };

    let caps = LAYER_GRAMMAR.captures(name).ok_or_else(fail)?;
    let flow_role = PipeFlowRole::from_layer_word(&caps["role"]).ok_or_else(fail)?;
    let system = PipeSystem::from_code(&caps["system"]).ok_or_else(fail)?;
    let dn = caps["dn"].parse::<u32>().map_err(|_| fail())?;

    Ok(PipeDescriptor::new(system, flow_role, dn))
}

/// Infer the insulation series from the drawn constant width.
///
/// The width (drawing units, metres) is compared in millimetres against the
/// catalog casing diameters for the descriptor's (system, flow class, DN).
/// The first of S1, S2, S3 closer than `SERIES_TOLERANCE_MM` wins.
pub fn pipe_series(
    catalog: &PipeCatalog,
    desc: &PipeDescriptor,
    constant_width: Length,
    mode: SeriesMode,
) -> ScheduleResult<PipeSeries> {
    let observed_mm = width_mm(constant_width);

    let series = match (catalog.table(desc.system), desc.flow_class()) {
        (Some(table), Some(flow_class)) if observed_mm.is_finite() => table
            .series_candidates(flow_class, desc.dn)
            .find(|e| within_abs(e.casing_diameter_mm, observed_mm, SERIES_TOLERANCE_MM))
            .map_or(PipeSeries::Undefined, |e| e.key.series),
        _ => PipeSeries::Undefined,
    };

    if series == PipeSeries::Undefined {
        if mode == SeriesMode::HardFail {
            return Err(ScheduleError::AmbiguousSeries {
                descriptor: desc.to_string(),
                observed_mm,
            });
        }
        warn!(pipe = %desc, observed_mm, "pipe series could not be determined");
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, CatalogKey, PipeTypeTable};
    use fv_core::m;

    fn catalog() -> PipeCatalog {
        let mut t = PipeTypeTable::new("DN");
        for (series, kod) in [(PipeSeries::S1, 200.0), (PipeSeries::S2, 225.0), (PipeSeries::S3, 250.0)] {
            t.insert(CatalogEntry {
                key: CatalogKey {
                    flow_class: FlowClass::Single,
                    dn: 100,
                    series,
                },
                outer_diameter_mm: 114.3,
                casing_diameter_mm: kod,
                wall_thickness_mm: None,
                min_elastic_radius_m: 57.0,
                vp_max_12_deg: 0.0,
                vp_max_16_deg: 0.0,
            });
        }
        PipeCatalog::from_tables([t])
    }

    #[test]
    fn classify_strips_namespace() {
        let d = classify("XREF|FJV-FREM-DN150").unwrap();
        assert_eq!(d.system, PipeSystem::Steel);
        assert_eq!(d.flow_role, PipeFlowRole::Supply);
        assert_eq!(d.dn, 150);
        assert_eq!(d, PipeDescriptor::new(PipeSystem::Steel, PipeFlowRole::Supply, 150));

        let d = classify("a|b|FJV-RETUR-CU22").unwrap();
        assert_eq!(d.system, PipeSystem::CopperFlex);
        assert_eq!(d.flow_role, PipeFlowRole::Return);
    }

    #[test]
    fn classify_twin_alupex() {
        let d = classify("FJV-TWIN-ALUPEX20").unwrap();
        assert_eq!(d.system, PipeSystem::AluPex);
        assert_eq!(d.flow_role, PipeFlowRole::Twin);
        assert_eq!(d.dn, 20);
    }

    #[test]
    fn classify_is_case_insensitive() {
        let d = classify("fjv-twin-dn65").unwrap();
        assert_eq!(d.canonical_layer().as_deref(), Some("FJV-TWIN-DN65"));
    }

    #[test]
    fn classify_rejects_malformed() {
        for layer in ["RANDOM-LAYER", "FJV-FREM-DN", "FJV-FREM-PE32", "FJV-FREM-DN150-X", ""] {
            assert!(
                matches!(classify(layer), Err(ScheduleError::Classification { .. })),
                "{layer} should not classify"
            );
        }
    }

    #[test]
    fn series_first_match_within_tolerance() {
        let c = catalog();
        let d = classify("FJV-FREM-DN100").unwrap();
        let s = pipe_series(&c, &d, m(0.2255), SeriesMode::Lenient).unwrap();
        assert_eq!(s, PipeSeries::S2);
    }

    #[test]
    fn series_tolerance_boundary_is_exclusive() {
        let c = catalog();
        let d = classify("FJV-RETUR-DN100").unwrap();
        assert_eq!(
            pipe_series(&c, &d, m(0.251), SeriesMode::Lenient).unwrap(),
            PipeSeries::Undefined
        );
        assert_eq!(
            pipe_series(&c, &d, m(0.2509), SeriesMode::Lenient).unwrap(),
            PipeSeries::S3
        );
    }

    #[test]
    fn hard_fail_rejects_undefined() {
        let c = catalog();
        let d = classify("FJV-FREM-DN100").unwrap();
        let err = pipe_series(&c, &d, m(0.5), SeriesMode::HardFail).unwrap_err();
        assert!(matches!(err, ScheduleError::AmbiguousSeries { .. }));
        // Unknown table
        let d = classify("FJV-FREM-CU22").unwrap();
        assert_eq!(
            pipe_series(&c, &d, m(0.065), SeriesMode::Lenient).unwrap(),
            PipeSeries::Undefined
        );
    }

    #[test]
    fn in_situ_bending_thresholds() {
        let d = |role, dn| PipeDescriptor::new(PipeSystem::Steel, role, dn);
        assert!(d(PipeFlowRole::Twin, 50).is_in_situ_bent().unwrap());
        assert!(!d(PipeFlowRole::Twin, 65).is_in_situ_bent().unwrap());
        assert!(d(PipeFlowRole::Supply, 80).is_in_situ_bent().unwrap());
        assert!(!d(PipeFlowRole::Return, 100).is_in_situ_bent().unwrap());
        assert!(
            PipeDescriptor::new(PipeSystem::AluPex, PipeFlowRole::Single, 32)
                .is_in_situ_bent()
                .unwrap()
        );
        assert!(d(PipeFlowRole::Unknown, 100).is_in_situ_bent().is_err());
        assert!(
            PipeDescriptor::new(PipeSystem::Unknown, PipeFlowRole::Twin, 20)
                .is_in_situ_bent()
                .is_err()
        );
    }
}

//! Pipe classification enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipe system; selects the catalog table used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipeSystem {
    Unknown,
    /// Bonded steel pipe (layer code `DN`).
    Steel,
    /// Flexible copper pipe (layer code `CU`).
    CopperFlex,
    /// Flexible aluminium-PEX pipe (layer code `ALUPEX`).
    AluPex,
    /// Flexible PEX-U pipe (layer code `PEXU`).
    PexU,
}

impl PipeSystem {
    pub const KNOWN: [PipeSystem; 4] = [
        PipeSystem::Steel,
        PipeSystem::CopperFlex,
        PipeSystem::AluPex,
        PipeSystem::PexU,
    ];

    /// Code used both in layer names and as the catalog table name.
    pub fn code(self) -> Option<&'static str> {
        match self {
            PipeSystem::Unknown => None,
            PipeSystem::Steel => Some("DN"),
            PipeSystem::CopperFlex => Some("CU"),
            PipeSystem::AluPex => Some("ALUPEX"),
            PipeSystem::PexU => Some("PEXU"),
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|s| s.code().is_some_and(|c| c.eq_ignore_ascii_case(code)))
    }

    /// Prefix in front of the DN in size labels.
    pub fn label_prefix(self) -> Option<&'static str> {
        match self {
            PipeSystem::Unknown => None,
            PipeSystem::Steel => Some("DN"),
            PipeSystem::CopperFlex => Some("CU"),
            PipeSystem::AluPex => Some("ALUPEX"),
            PipeSystem::PexU => Some("PEX"),
        }
    }

    /// Flexible pipe is always bent in situ.
    pub fn is_flexible(self) -> bool {
        matches!(
            self,
            PipeSystem::CopperFlex | PipeSystem::AluPex | PipeSystem::PexU
        )
    }
}

/// Role of a pipe in the network as encoded in its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeFlowRole {
    Unknown,
    Twin,
    /// Supply ("Frem").
    Supply,
    /// Return ("Retur").
    Return,
    /// Single ("Enkelt").
    Single,
}

impl PipeFlowRole {
    /// Word used in layer names.
    pub fn layer_word(self) -> Option<&'static str> {
        match self {
            PipeFlowRole::Unknown => None,
            PipeFlowRole::Twin => Some("TWIN"),
            PipeFlowRole::Supply => Some("FREM"),
            PipeFlowRole::Return => Some("RETUR"),
            PipeFlowRole::Single => Some("ENKELT"),
        }
    }

    pub fn from_layer_word(word: &str) -> Option<Self> {
        [
            PipeFlowRole::Twin,
            PipeFlowRole::Supply,
            PipeFlowRole::Return,
            PipeFlowRole::Single,
        ]
        .into_iter()
        .find(|r| r.layer_word().is_some_and(|w| w.eq_ignore_ascii_case(word)))
    }

    /// Supply and return are built like single pipes; only twin differs.
    pub fn flow_class(self) -> Option<FlowClass> {
        match self {
            PipeFlowRole::Unknown => None,
            PipeFlowRole::Twin => Some(FlowClass::Twin),
            PipeFlowRole::Supply | PipeFlowRole::Return | PipeFlowRole::Single => {
                Some(FlowClass::Single)
            }
        }
    }
}

/// Construction class used as part of the catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlowClass {
    Twin,
    Single,
}

impl FlowClass {
    /// Parse the `PipeType` catalog column.
    pub fn from_catalog(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("twin") {
            return Some(FlowClass::Twin);
        }
        ["enkelt", "single", "frem", "retur"]
            .iter()
            .any(|w| value.eq_ignore_ascii_case(w))
            .then_some(FlowClass::Single)
    }
}

impl fmt::Display for FlowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowClass::Twin => f.write_str("Twin"),
            FlowClass::Single => f.write_str("Enkelt"),
        }
    }
}

/// Insulation series. `Undefined` is a normal "not determined yet" state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PipeSeries {
    #[default]
    Undefined,
    S1,
    S2,
    S3,
}

impl PipeSeries {
    /// Defined series in matching order.
    pub const DEFINED: [PipeSeries; 3] = [PipeSeries::S1, PipeSeries::S2, PipeSeries::S3];

    pub fn from_catalog(value: &str) -> Option<Self> {
        Self::DEFINED
            .into_iter()
            .find(|s| s.to_string().eq_ignore_ascii_case(value.trim()))
    }

    pub fn is_defined(self) -> bool {
        self != PipeSeries::Undefined
    }
}

impl fmt::Display for PipeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipeSeries::Undefined => "Undefined",
            PipeSeries::S1 => "S1",
            PipeSeries::S2 => "S2",
            PipeSeries::S3 => "S3",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_codes_round_trip() {
        for system in PipeSystem::KNOWN {
            let code = system.code().unwrap();
            assert_eq!(PipeSystem::from_code(code), Some(system));
            assert_eq!(PipeSystem::from_code(&code.to_lowercase()), Some(system));
        }
        assert_eq!(PipeSystem::from_code("PE"), None);
        assert_eq!(PipeSystem::Unknown.code(), None);
    }

    #[test]
    fn supply_and_return_collapse_to_single() {
        assert_eq!(PipeFlowRole::Supply.flow_class(), Some(FlowClass::Single));
        assert_eq!(PipeFlowRole::Return.flow_class(), Some(FlowClass::Single));
        assert_eq!(PipeFlowRole::Twin.flow_class(), Some(FlowClass::Twin));
        assert_eq!(PipeFlowRole::Unknown.flow_class(), None);
    }

    #[test]
    fn catalog_values_parse() {
        assert_eq!(FlowClass::from_catalog("Enkelt"), Some(FlowClass::Single));
        assert_eq!(FlowClass::from_catalog(" twin "), Some(FlowClass::Twin));
        assert_eq!(FlowClass::from_catalog("Ukendt"), None);
        assert_eq!(PipeSeries::from_catalog("s2"), Some(PipeSeries::S2));
        assert_eq!(PipeSeries::from_catalog("Undefined"), None);
    }

    #[test]
    fn flexible_systems() {
        assert!(PipeSystem::AluPex.is_flexible());
        assert!(PipeSystem::CopperFlex.is_flexible());
        assert!(PipeSystem::PexU.is_flexible());
        assert!(!PipeSystem::Steel.is_flexible());
        assert!(!PipeSystem::Unknown.is_flexible());
    }
}

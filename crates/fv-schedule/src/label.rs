//! Human-readable size labels.

use fv_core::Real;

use crate::classify::PipeDescriptor;
use crate::types::{FlowClass, PipeSystem};

/// Format a size label such as `DN100-ø114.3/250` or `ALUPEX20-ø20+ø20/90`.
///
/// Twin pipes repeat the media diameter. Steel diameters keep one decimal,
/// flexible pipe diameters none. Returns an empty string when the descriptor
/// is unresolved or a dimension is not positive.
pub fn format_label(desc: &PipeDescriptor, outer_diameter_mm: Real, casing_diameter_mm: Real) -> String {
    let resolved = |v: Real| v.is_finite() && v > 0.0;
    if desc.dn == 0 || !resolved(outer_diameter_mm) || !resolved(casing_diameter_mm) {
        return String::new();
    }
    let (Some(prefix), Some(flow_class)) = (desc.system.label_prefix(), desc.flow_class()) else {
        return String::new();
    };

    // Halves round away from zero.
    let od = match desc.system {
        PipeSystem::Steel => format!("ø{:.1}", (outer_diameter_mm * 10.0).round() / 10.0),
        _ => format!("ø{:.0}", outer_diameter_mm.round()),
    };
    let kod = format!("{:.0}", casing_diameter_mm.round());

    match flow_class {
        FlowClass::Twin => format!("{prefix}{}-{od}+{od}/{kod}", desc.dn),
        FlowClass::Single => format!("{prefix}{}-{od}/{kod}", desc.dn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PipeFlowRole;

    #[test]
    fn steel_single_label() {
        let d = PipeDescriptor::new(PipeSystem::Steel, PipeFlowRole::Single, 100);
        assert_eq!(format_label(&d, 114.3, 250.0), "DN100-ø114.3/250");
    }

    #[test]
    fn twin_repeats_media_pipe() {
        let d = PipeDescriptor::new(PipeSystem::AluPex, PipeFlowRole::Twin, 20);
        assert_eq!(format_label(&d, 20.0, 90.0), "ALUPEX20-ø20+ø20/90");
        let d = PipeDescriptor::new(PipeSystem::Steel, PipeFlowRole::Twin, 65);
        assert_eq!(format_label(&d, 76.1, 280.0), "DN65-ø76.1+ø76.1/280");
    }

    #[test]
    fn prefixes_per_system() {
        let cu = PipeDescriptor::new(PipeSystem::CopperFlex, PipeFlowRole::Return, 22);
        assert_eq!(format_label(&cu, 22.0, 65.0), "CU22-ø22/65");
        let pex = PipeDescriptor::new(PipeSystem::PexU, PipeFlowRole::Supply, 32);
        assert_eq!(format_label(&pex, 32.0, 125.0), "PEX32-ø32/125");
    }

    #[test]
    fn halves_round_up() {
        let cu = PipeDescriptor::new(PipeSystem::CopperFlex, PipeFlowRole::Return, 22);
        assert_eq!(format_label(&cu, 22.5, 62.5), "CU22-ø23/63");
        let steel = PipeDescriptor::new(PipeSystem::Steel, PipeFlowRole::Single, 100);
        assert_eq!(format_label(&steel, 114.25, 249.5), "DN100-ø114.3/250");
    }

    #[test]
    fn unresolved_inputs_give_empty_label() {
        let d = PipeDescriptor::new(PipeSystem::Steel, PipeFlowRole::Single, 100);
        assert_eq!(format_label(&d, 0.0, 250.0), "");
        assert_eq!(format_label(&d, 114.3, -1.0), "");
        assert_eq!(format_label(&d, Real::NAN, 250.0), "");
        let unknown = PipeDescriptor::new(PipeSystem::Unknown, PipeFlowRole::Single, 100);
        assert_eq!(format_label(&unknown, 114.3, 250.0), "");
        let no_role = PipeDescriptor::new(PipeSystem::Steel, PipeFlowRole::Unknown, 100);
        assert_eq!(format_label(&no_role, 114.3, 250.0), "");
    }
}

use super::request::TenderRequest;
use crate::utils::round_two_decimals;

// Thresholds in euros, excluding VAT.
const EU_SERVICES_THRESHOLD: f64 = 221_000.0;
const SARA_THRESHOLD: f64 = 215_000.0;
const SIMPLIFIED_LIMIT: f64 = 215_000.0;
const ABBREVIATED_LIMIT: f64 = 60_000.0;

const ALLOWED_VAT_RATES: [f64; 4] = [0.0, 0.04, 0.10, 0.21];

/// Contract figures the administrative service derives from the submitted budget.
///
/// Computed locally only to report them before submission; the service remains the
/// authority and nothing here blocks a request.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFigures {
    /// Estimated contract value (valor estimado del contrato), extensions included.
    pub vec: Option<f64>,
    pub procedure: Option<&'static str>,
    /// Whether the contract is subject to harmonized EU regulation.
    pub sara: Option<bool>,
    pub vec_justification: Option<&'static str>,
    /// VAT as a fraction (21 becomes 0.21).
    pub vat_rate: f64,
    pub vat_allowed: bool,
}

pub fn procedure_type(vec: f64) -> &'static str {
    if vec >= EU_SERVICES_THRESHOLD {
        "abierto_ordinario"
    } else if vec <= ABBREVIATED_LIMIT {
        "simplificado_abreviado"
    } else if vec <= SIMPLIFIED_LIMIT {
        "abierto_simplificado"
    } else {
        "abierto_ordinario"
    }
}

pub fn derive_figures(request: &TenderRequest) -> DerivedFigures {
    let pbl = request.pbl_sin_iva;
    let vec = (request.duracion_meses > 0).then(|| {
        let duration = request.duracion_meses as f64;
        pbl * (duration + request.prorrogas as f64) / duration
    });

    let vat_rate = if request.iva > 1.0 {
        request.iva / 100.0
    } else {
        request.iva
    };
    let rounded = round_two_decimals(vat_rate);

    DerivedFigures {
        vec,
        procedure: vec.filter(|v| *v > 0.0).map(procedure_type),
        sara: vec.map(|v| v >= SARA_THRESHOLD),
        vec_justification: vec.filter(|v| pbl > 0.0 && *v > pbl * 1.1).map(|_| {
            "El VEC incluye una estimación prudente de posibles modificaciones conforme al art. 101.12 LCSP."
        }),
        vat_rate,
        vat_allowed: ALLOWED_VAT_RATES
            .iter()
            .any(|allowed| (allowed - rounded).abs() < f64::EPSILON),
    }
}

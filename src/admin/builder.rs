use super::request::*;
use crate::constants::{AFFIRMATIVE, WEIGHTING_TOLERANCE, WEIGHTING_TOTAL};
use crate::errors::{AppError, AppResult};
use crate::form::FormData;

/// Builds the nested administrative request from submitted form values.
///
/// Booleans are true only for the literal `"true"`. Numeric inputs accept a decimal
/// comma. Conditional members are `None` when their governing flag is false, and
/// optional text members are `None` when left blank.
///
/// The form carries two inputs named `oferta_economica` (the documentation checkbox and
/// the economic-offer weight). The boolean member takes the first value that reads as a
/// boolean, the weight takes the first value that reads as a number.
///
/// # Errors
///
/// Returns `InvalidInput` if a required field is missing or a numeric field cannot be
/// parsed.
pub fn build_tender_request(form: &FormData) -> AppResult<TenderRequest> {
    let trata_datos = boolean(form, "trata_datos");
    let subcontratara = boolean(form, "subcontratara");
    let cumple_prtr = boolean(form, "cumple_prtr");
    let garantia_provisional = boolean(form, "garantia_provisional");

    Ok(TenderRequest {
        objeto_contrato: text(form, "objeto_contrato")?,
        necesidad_resuelta: text(form, "necesidad_resuelta")?,
        responsable_contrato: text(form, "responsable_contrato")?,
        lugar_prestacion: text(form, "lugar_prestacion")?,
        pbl_sin_iva: number(form, "pbl_sin_iva")?,
        iva: number(form, "iva")?,
        duracion_meses: integer(form, "duracion_meses")?,
        prorrogas: integer(form, "prorrogas")?,
        documentacion: Documentacion {
            declaracion_responsable: boolean(form, "declaracion_responsable"),
            oferta_economica: form
                .get_all("oferta_economica")
                .into_iter()
                .find(|v| *v == "true" || *v == "false")
                .map(|v| v == AFFIRMATIVE)
                .unwrap_or(false),
            aceptacion_pliego: boolean(form, "aceptacion_pliego"),
            equipo_cumple: boolean(form, "equipo_cumple"),
            fecha: text(form, "fecha")?,
        },
        proteccion_datos: ProteccionDatos {
            trata_datos,
            subcontrata_servidores: optional_text(form, "subcontrata_servidores", trata_datos),
        },
        subcontratacion: Subcontratacion {
            subcontratara,
            subcontratas_no_vinculadas: subcontratara
                .then(|| boolean(form, "subcontratas_no_vinculadas")),
        },
        criterios: CriteriosValoracion {
            precio_ofertado: number(form, "precio_ofertado")?,
            anormalmente_bajo: boolean(form, "anormalmente_bajo"),
        },
        nextgen: NextGeneration {
            cumple_prtr,
            modelos_b1b2c: cumple_prtr.then(|| boolean(form, "modelos_b1b2c")),
            titular_real: optional_text(form, "titular_real", cumple_prtr),
        },
        garantias: Garantias {
            garantia_provisional,
            porcentaje_cuantia: optional_text(form, "porcentaje_cuantia", garantia_provisional),
        },
        solvencia: Solvencia {
            volumen_anual_negocios_min: number(form, "volumen_anual_negocios_min")?,
            importe_anual_similares_min: number(form, "importe_anual_similares_min")?,
            seguro_rcp_min: number(form, "seguro_rcp_min")?,
        },
        ponderacion: Ponderacion {
            metodologia_plan: number(form, "metodologia_plan")?,
            equipo_experiencia: number(form, "equipo_experiencia")?,
            dnsh_sostenibilidad: number(form, "dnsh_sostenibilidad")?,
            oferta_economica: form
                .get_all("oferta_economica")
                .into_iter()
                .find_map(parse_decimal)
                .ok_or_else(|| {
                    AppError::InvalidInput(
                        "Field 'oferta_economica' needs a numeric weight".to_string(),
                    )
                })?,
        },
    })
}

/// Checks that the award-criteria weights add up to 100%.
///
/// # Errors
///
/// Returns `Validation` with a message reporting the actual total (two decimals) when it
/// deviates from 100 by more than 0.01.
pub fn validate_weighting(ponderacion: &Ponderacion) -> AppResult<()> {
    let total = ponderacion.total();
    // Written so that a NaN total fails the check.
    let within = (total - WEIGHTING_TOTAL).abs() <= WEIGHTING_TOLERANCE;
    if !within {
        return Err(AppError::Validation(format!(
            "La suma de los porcentajes de criterios es {total:.2}%. Debe ser exactamente 100%."
        )));
    }
    Ok(())
}

fn boolean(form: &FormData, name: &str) -> bool {
    form.get(name) == Some(AFFIRMATIVE)
}

fn text(form: &FormData, name: &str) -> AppResult<String> {
    form.get(name)
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidInput(format!("Missing field '{name}'")))
}

fn optional_text(form: &FormData, name: &str, enabled: bool) -> Option<String> {
    if !enabled {
        return None;
    }
    form.get(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn number(form: &FormData, name: &str) -> AppResult<f64> {
    let raw = form
        .get(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Missing field '{name}'")))?;
    parse_decimal(raw)
        .ok_or_else(|| AppError::InvalidInput(format!("Field '{name}' is not a number: '{raw}'")))
}

fn integer(form: &FormData, name: &str) -> AppResult<i64> {
    // Fractional input is truncated, the way an integer field is read back.
    number(form, name).map(|v| v.trunc() as i64)
}

/// Parses a finite decimal number, accepting `,` as the decimal separator.
///
/// `NaN` and infinities are refused: they would serialize as `null`.
fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let parsed: Result<f64, _> = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".").parse()
    } else {
        trimmed.parse()
    };
    parsed.ok().filter(|v| v.is_finite())
}

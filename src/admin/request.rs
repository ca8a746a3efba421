use serde::{Deserialize, Serialize};

/// Body of `POST /administrativo`.
///
/// Field names are the backend's wire names. Optional members of the nested groups are
/// `None` whenever the boolean that governs them is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderRequest {
    pub objeto_contrato: String,
    pub necesidad_resuelta: String,
    pub responsable_contrato: String,
    pub lugar_prestacion: String,
    pub pbl_sin_iva: f64,
    pub iva: f64,
    pub duracion_meses: i64,
    pub prorrogas: i64,
    pub documentacion: Documentacion,
    pub proteccion_datos: ProteccionDatos,
    pub subcontratacion: Subcontratacion,
    pub criterios: CriteriosValoracion,
    pub nextgen: NextGeneration,
    pub garantias: Garantias,
    pub solvencia: Solvencia,
    pub ponderacion: Ponderacion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentacion {
    pub declaracion_responsable: bool,
    pub oferta_economica: bool,
    pub aceptacion_pliego: bool,
    pub equipo_cumple: bool,
    pub fecha: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteccionDatos {
    pub trata_datos: bool,
    pub subcontrata_servidores: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcontratacion {
    pub subcontratara: bool,
    pub subcontratas_no_vinculadas: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriosValoracion {
    pub precio_ofertado: f64,
    pub anormalmente_bajo: bool,
}

/// EU recovery-fund (PRTR / NextGenerationEU) compliance disclosure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextGeneration {
    pub cumple_prtr: bool,
    pub modelos_b1b2c: Option<bool>,
    pub titular_real: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garantias {
    pub garantia_provisional: bool,
    pub porcentaje_cuantia: Option<String>,
}

/// Minimum economic and insurance thresholds required of bidders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solvencia {
    pub volumen_anual_negocios_min: f64,
    pub importe_anual_similares_min: f64,
    pub seguro_rcp_min: f64,
}

/// Scoring weights across award criteria, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ponderacion {
    pub metodologia_plan: f64,
    pub equipo_experiencia: f64,
    pub dnsh_sostenibilidad: f64,
    pub oferta_economica: f64,
}

impl Ponderacion {
    pub fn total(&self) -> f64 {
        self.metodologia_plan + self.equipo_experiencia + self.dnsh_sostenibilidad + self.oferta_economica
    }
}

/// Successful response of `POST /administrativo`.
///
/// Only `pliego_final` is consumed; the other members are kept when present so they
/// can be logged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminResponse {
    pub pliego_final: String,
    #[serde(default)]
    pub objeto: Option<String>,
    #[serde(default)]
    pub indice: Vec<String>,
}

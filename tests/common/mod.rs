//! Common test utilities for integration tests

use pliego_cli::config::ResolvedConfig;
use std::path::Path;

/// Configuration pointing both services at a mock server and the store into `dir`
#[allow(dead_code)]
pub fn config_for(base_url: &str, dir: &Path) -> ResolvedConfig {
    ResolvedConfig {
        admin_base_url: base_url.to_string(),
        technical_base_url: base_url.to_string(),
        storage_path: dir.join("handoff.json"),
        request_timeout_secs: Some(5),
        ..ResolvedConfig::default()
    }
}

/// Complete administrative form, weights summing to 100
#[allow(dead_code)]
pub const ADMIN_FORM_TOML: &str = r#"
objeto_contrato = "Digitalización del archivo municipal"
necesidad_resuelta = "Preservar y consultar expedientes históricos"
responsable_contrato = "Jefa del Servicio de Archivo"
lugar_prestacion = "Dependencias municipales"
pbl_sin_iva = 100000
iva = 21
duracion_meses = 12
prorrogas = 12
declaracion_responsable = true
aceptacion_pliego = true
equipo_cumple = true
fecha = "2025-03-01"
trata_datos = true
subcontrata_servidores = "Proveedor de nube en la UE"
subcontratara = false
subcontratas_no_vinculadas = true
precio_ofertado = 60
anormalmente_bajo = true
cumple_prtr = false
modelos_b1b2c = true
titular_real = "No debería enviarse"
garantia_provisional = true
porcentaje_cuantia = "3% del presupuesto"
volumen_anual_negocios_min = 150000
importe_anual_similares_min = 70000
seguro_rcp_min = 300000
metodologia_plan = 30
equipo_experiencia = 20
dnsh_sostenibilidad = 10
oferta_economica = [true, 40]
"#;

/// Question list as served by the technical service
#[allow(dead_code)]
pub const QUESTIONS_JSON: &str = r#"[
  [" Objeto del Contrato", [
    "¿Cuál es el objeto principal del contrato? (por ejemplo: escaneo de documentos, desarrollo de software, suministro de material…)",
    "¿Cuál será la duración estimada del contrato/proyecto?"
  ]],
  [" Requisitos de las Empresas", [
    "¿Se requieren certificaciones obligatorias de la empresa adjudicataria?",
    "¿Qué certificaciones obligatorias debe tener la empresa adjudicataria? (Ej. ISO 9001, ISO 14001…)"
  ]]
]"#;

/// Answer sheet for [`QUESTIONS_JSON`], certifications answered `Sí`
#[allow(dead_code)]
pub const ANSWERS_TOML: &str = r#"
["Objeto del Contrato"]
"¿Cuál es el objeto principal del contrato? (por ejemplo: escaneo de documentos, desarrollo de software, suministro de material…)" = "escaneo de documentos"
"¿Cuál será la duración estimada del contrato/proyecto?" = "12 meses"

["Requisitos de las Empresas"]
"¿Se requieren certificaciones obligatorias de la empresa adjudicataria?" = true
"¿Qué certificaciones obligatorias debe tener la empresa adjudicataria? (Ej. ISO 9001, ISO 14001…)" = "ISO 9001"
"#;

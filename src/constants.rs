// Service defaults
pub const ADMIN_BASE_URL: &str = "http://127.0.0.1:8000";
pub const TECHNICAL_BASE_URL: &str = "http://127.0.0.1:8001";

// Endpoint paths
pub const ADMIN_PATH: &str = "administrativo";
pub const QUESTIONS_PATH: &str = "preguntas";
pub const GENERATE_PATH: &str = "generar";

// Editor handoff
pub const HANDOFF_KEY: &str = "generatedPliegoContent";
pub const EDITOR_TARGET: &str = "editor.html";
pub const STORAGE_PATH: &str = "data/handoff.json";

// Form values
pub const AFFIRMATIVE: &str = "true";
pub const CHOICE_YES: &str = "Sí";
pub const CHOICE_NO: &str = "No";

// Technical form special case
pub const CERTIFICATIONS_QUESTION: &str =
    "¿Se requieren certificaciones obligatorias de la empresa adjudicataria?";
pub const CERTIFICATIONS_FOLLOW_UP: &str =
    "¿Qué certificaciones obligatorias debe tener la empresa adjudicataria? (Ej. ISO 9001, ISO 14001…)";
pub const CERTIFICATIONS_FIELD_SUFFIX: &str = "certificaciones";

// Weighting tolerance around 100%
pub const WEIGHTING_TOTAL: f64 = 100.0;
pub const WEIGHTING_TOLERANCE: f64 = 0.01;

// Handoff mode aliases
pub const REDIRECT_ALIASES: &[&str] = &["redirect", "editor"];
pub const INLINE_ALIASES: &[&str] = &["inline", "print"];

//! Administrative pliego form.
//!
//! Conditional regions, request construction, the weighting check and submission to
//! the administrative service. The main entry point is [`AdminFormController`].

mod builder;
mod controller;
mod derived;
mod request;
mod visibility;

// Re-export public API
pub use builder::{build_tender_request, validate_weighting};
pub use controller::{user_message, AdminFormController};
pub use derived::{derive_figures, procedure_type, DerivedFigures};
pub use request::{
    AdminResponse, CriteriosValoracion, Documentacion, Garantias, NextGeneration, Ponderacion,
    ProteccionDatos, Solvencia, Subcontratacion, TenderRequest,
};
pub use visibility::{AdminForm, ConditionalGroup, Dependent};

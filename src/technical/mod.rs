//! Technical pliego form.
//!
//! The question list comes from the technical service at load time. This module renders
//! it into fields, tracks the certifications follow-up, rebuilds the answers keyed by
//! question text, and assembles the generated sections into one document. The flow is
//! driven by [`TechnicalFormState`] and run against the services by
//! [`TechnicalFormController`].

mod answers;
mod controller;
mod document;
mod form;
mod questions;

// Re-export public API
pub use answers::{collect_answers, AnswerSheet, TechnicalAnswers};
pub use controller::{Effect, Phase, TechnicalEvent, TechnicalFormController, TechnicalFormState};
pub use document::{assemble_markdown, assemble_plain_text, DocumentFormat, GenerationResponse};
pub use form::{
    field_name, follow_up_field_name, normalize_choice, Field, FieldKind, Fieldset, TechnicalForm,
};
pub use questions::{is_certifications_question, QuestionSet, Section};

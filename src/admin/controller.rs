use super::builder::{build_tender_request, validate_weighting};
use super::derived::derive_figures;
use super::request::TenderRequest;
use super::visibility::AdminForm;
use crate::api::ApiClient;
use crate::errors::{AppError, AppResult};
use crate::form::FormData;
use crate::handoff::{Handoff, HandoffOutcome};
use crate::ui;
use tracing::{info, warn};

/// Submits the administrative form and hands the generated pliego over.
///
/// One controller serves both presentations of the result: [`Handoff`] decides whether
/// the document is stored for the editor or returned for inline display.
pub struct AdminFormController {
    client: ApiClient,
    handoff: Handoff,
}

impl AdminFormController {
    pub fn new(client: ApiClient, handoff: Handoff) -> Self {
        Self { client, handoff }
    }

    /// Builds and validates the request without sending it.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for unusable field values, `Validation` when the weights do not
    /// add up to 100%.
    pub fn prepare(values: &FormData) -> AppResult<TenderRequest> {
        let request = build_tender_request(values)?;
        validate_weighting(&request.ponderacion)?;
        Ok(request)
    }

    pub async fn submit_form(&self, form: &AdminForm) -> AppResult<HandoffOutcome> {
        self.submit(form.values()).await
    }

    /// Validates, posts the request, and delivers `pliego_final`.
    ///
    /// Nothing is sent when validation fails.
    pub async fn submit(&self, values: &FormData) -> AppResult<HandoffOutcome> {
        let request = Self::prepare(values)?;
        log_derived_figures(&request);

        let spinner = ui::create_spinner("Generando pliego administrativo...")?;
        let response = self.client.generate_administrative(&request).await;
        spinner.finish_and_clear();
        let response = response?;

        if let Some(objeto) = &response.objeto {
            info!(objeto = %objeto, sections = response.indice.len(), "Pliego generated");
        }
        self.handoff.deliver(&response.pliego_final).await
    }
}

/// Message shown to the user for a failed submission.
///
/// Validation failures are shown verbatim; anything else is prefixed the way the form
/// reports generation errors.
pub fn user_message(err: &AppError) -> String {
    match err {
        AppError::Validation(msg) => msg.clone(),
        other => format!("Error al generar el pliego: {other}"),
    }
}

fn log_derived_figures(request: &TenderRequest) {
    let figures = derive_figures(request);

    info!(
        vec = ?figures.vec,
        procedimiento = figures.procedure.unwrap_or("-"),
        sara = ?figures.sara,
        "Derived contract figures"
    );
    if let Some(note) = figures.vec_justification {
        info!(note, "VEC justification");
    }
    if !figures.vat_allowed {
        warn!(
            iva = request.iva,
            "IVA is not 0%, 4%, 10% or 21%; the administrative service will likely reject it"
        );
    }
}

use super::answers::{collect_answers, AnswerSheet, TechnicalAnswers};
use super::document::{DocumentFormat, GenerationResponse};
use super::form::{FieldKind, TechnicalForm};
use super::questions::QuestionSet;
use crate::api::ApiClient;
use crate::errors::AppResult;
use crate::handoff::{Handoff, HandoffOutcome};
use crate::ui;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    QuestionsLoading,
    QuestionsLoaded,
    AnswersSubmitting,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TechnicalEvent {
    Load,
    LoadSucceeded(QuestionSet),
    LoadFailed(String),
    FieldChanged { name: String, value: String },
    Submit,
    SubmitSucceeded(GenerationResponse),
    SubmitFailed(String),
}

/// Work the state machine asks its driver to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchQuestions,
    PostAnswers(TechnicalAnswers),
    Handoff(String),
}

/// Technical form state: `Idle → QuestionsLoading → QuestionsLoaded → AnswersSubmitting → Done | Error`.
///
/// [`TechnicalFormState::dispatch`] is pure: it applies one event and returns the effect,
/// if any, that the driver has to run. Events that make no sense in the current phase
/// are ignored, which also means a second `Submit` while one is in flight does nothing.
/// A failure keeps the loaded questions and form values so the user can retry.
#[derive(Debug, Clone)]
pub struct TechnicalFormState {
    phase: Phase,
    questions: Option<QuestionSet>,
    form: Option<TechnicalForm>,
    document: Option<String>,
    error: Option<String>,
    format: DocumentFormat,
}

impl TechnicalFormState {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            phase: Phase::Idle,
            questions: None,
            form: None,
            document: None,
            error: None,
            format,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn form(&self) -> Option<&TechnicalForm> {
        self.form.as_ref()
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn editable(&self) -> bool {
        self.form.is_some() && matches!(self.phase, Phase::QuestionsLoaded | Phase::Error)
    }

    pub fn dispatch(&mut self, event: TechnicalEvent) -> Option<Effect> {
        debug!(phase = ?self.phase, event = event_name(&event), "Dispatching event");

        match event {
            TechnicalEvent::Load if matches!(self.phase, Phase::Idle | Phase::Error) => {
                self.phase = Phase::QuestionsLoading;
                self.error = None;
                self.questions = None;
                self.form = None;
                Some(Effect::FetchQuestions)
            }
            TechnicalEvent::LoadSucceeded(questions) if self.phase == Phase::QuestionsLoading => {
                self.form = Some(TechnicalForm::render(&questions));
                self.questions = Some(questions);
                self.phase = Phase::QuestionsLoaded;
                None
            }
            TechnicalEvent::LoadFailed(message) if self.phase == Phase::QuestionsLoading => {
                self.fail(format!(
                    "Error al cargar las preguntas técnicas: {message}"
                ));
                None
            }
            TechnicalEvent::FieldChanged { name, value } if self.editable() => {
                if let Some(form) = self.form.as_mut() {
                    form.change(&name, &value);
                }
                None
            }
            TechnicalEvent::Submit if self.editable() => {
                let (Some(questions), Some(form)) = (self.questions.as_ref(), self.form.as_ref())
                else {
                    return None;
                };

                let missing = form.missing_required();
                if !missing.is_empty() {
                    let message = format!("Faltan respuestas obligatorias: {}", missing.join(" | "));
                    self.fail(message);
                    return None;
                }

                let answers = collect_answers(questions, form.values());
                self.error = None;
                self.phase = Phase::AnswersSubmitting;
                Some(Effect::PostAnswers(answers))
            }
            TechnicalEvent::SubmitSucceeded(response) if self.phase == Phase::AnswersSubmitting => {
                let document = self.format.assemble(&response);
                self.document = Some(document.clone());
                self.phase = Phase::Done;
                Some(Effect::Handoff(document))
            }
            TechnicalEvent::SubmitFailed(message) if self.phase == Phase::AnswersSubmitting => {
                self.fail(format!(
                    "Error al generar el pliego técnico: {message}. Por favor, revise los datos e inténtelo de nuevo."
                ));
                None
            }
            other => {
                warn!(phase = ?self.phase, event = event_name(&other), "Event ignored in current phase");
                None
            }
        }
    }

    fn fail(&mut self, message: String) {
        error!(error = %message, "Technical form error");
        self.error = Some(message);
        self.phase = Phase::Error;
    }
}

fn event_name(event: &TechnicalEvent) -> &'static str {
    match event {
        TechnicalEvent::Load => "load",
        TechnicalEvent::LoadSucceeded(_) => "load-succeeded",
        TechnicalEvent::LoadFailed(_) => "load-failed",
        TechnicalEvent::FieldChanged { .. } => "field-changed",
        TechnicalEvent::Submit => "submit",
        TechnicalEvent::SubmitSucceeded(_) => "submit-succeeded",
        TechnicalEvent::SubmitFailed(_) => "submit-failed",
    }
}

/// Runs the technical form against the live services.
///
/// Request failures become `LoadFailed`/`SubmitFailed` events and end up in the state's
/// error message; only handoff I/O errors are returned to the caller.
pub struct TechnicalFormController {
    client: ApiClient,
    handoff: Handoff,
    state: TechnicalFormState,
    outcome: Option<HandoffOutcome>,
}

impl TechnicalFormController {
    pub fn new(client: ApiClient, handoff: Handoff, format: DocumentFormat) -> Self {
        Self {
            client,
            handoff,
            state: TechnicalFormState::new(format),
            outcome: None,
        }
    }

    pub fn state(&self) -> &TechnicalFormState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&HandoffOutcome> {
        self.outcome.as_ref()
    }

    /// Dispatches an event and runs every effect that follows from it.
    pub async fn send(&mut self, event: TechnicalEvent) -> AppResult<()> {
        let mut next = self.state.dispatch(event);
        while let Some(effect) = next {
            next = match self.execute(effect).await? {
                Some(event) => self.state.dispatch(event),
                None => None,
            };
        }
        Ok(())
    }

    pub async fn load(&mut self) -> AppResult<()> {
        self.send(TechnicalEvent::Load).await
    }

    pub async fn change(&mut self, name: &str, value: &str) -> AppResult<()> {
        self.send(TechnicalEvent::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        })
        .await
    }

    pub async fn submit(&mut self) -> AppResult<()> {
        self.send(TechnicalEvent::Submit).await
    }

    /// Fills every rendered field from a prepared sheet.
    ///
    /// Choices are applied before the fields that depend on them, so a `Sí` answer
    /// reveals the follow-up field in time for it to be filled as well.
    pub async fn fill(&mut self, sheet: &AnswerSheet) -> AppResult<()> {
        let Some(questions) = self.state.questions().cloned() else {
            return Ok(());
        };

        for section in questions.sections() {
            for index in 0..section.questions.len() {
                let name = super::form::field_name(&section.title, index);
                let Some(field) = self.state.form().and_then(|f| f.field(&name)).cloned() else {
                    continue;
                };
                if let Some(answer) = sheet.lookup(&section.title, &field.label) {
                    self.change(&name, answer).await?;
                }

                if field.kind == FieldKind::YesNo {
                    let follow_up = super::form::follow_up_field_name(&section.title);
                    let revealed = self.state.form().and_then(|f| f.field(&follow_up)).cloned();
                    if let Some(revealed) = revealed {
                        if let Some(answer) = sheet.lookup(&section.title, &revealed.label) {
                            self.change(&follow_up, answer).await?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn execute(&mut self, effect: Effect) -> AppResult<Option<TechnicalEvent>> {
        match effect {
            Effect::FetchQuestions => {
                let spinner = ui::create_spinner("Cargando preguntas técnicas...")?;
                let result = self.client.fetch_questions().await;
                spinner.finish_and_clear();
                Ok(Some(match result {
                    Ok(questions) => TechnicalEvent::LoadSucceeded(questions),
                    Err(e) => TechnicalEvent::LoadFailed(e.to_string()),
                }))
            }
            Effect::PostAnswers(answers) => {
                let spinner = ui::create_spinner("Generando pliego técnico...")?;
                let result = self.client.generate_technical(&answers).await;
                spinner.finish_and_clear();
                Ok(Some(match result {
                    Ok(response) => TechnicalEvent::SubmitSucceeded(response),
                    Err(e) => TechnicalEvent::SubmitFailed(e.to_string()),
                }))
            }
            Effect::Handoff(document) => {
                self.outcome = Some(self.handoff.deliver(&document).await?);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CERTIFICATIONS_FOLLOW_UP, CERTIFICATIONS_QUESTION, CHOICE_NO, CHOICE_YES};
    use crate::models::OrderedMap;
    use crate::technical::form::{field_name, follow_up_field_name};
    use crate::technical::questions::Section;

    const TITLE: &str = " Requisitos de las Empresas";

    fn questions() -> QuestionSet {
        QuestionSet::new(vec![
            Section::new("Sección A", vec!["Q1".to_string()]),
            Section::new(
                TITLE,
                vec![
                    CERTIFICATIONS_QUESTION.to_string(),
                    CERTIFICATIONS_FOLLOW_UP.to_string(),
                ],
            ),
        ])
    }

    fn loaded() -> TechnicalFormState {
        let mut state = TechnicalFormState::new(DocumentFormat::Markdown);
        assert_eq!(state.dispatch(TechnicalEvent::Load), Some(Effect::FetchQuestions));
        assert_eq!(state.dispatch(TechnicalEvent::LoadSucceeded(questions())), None);
        state
    }

    fn change(state: &mut TechnicalFormState, name: String, value: &str) {
        state.dispatch(TechnicalEvent::FieldChanged {
            name,
            value: value.to_string(),
        });
    }

    fn response() -> GenerationResponse {
        GenerationResponse {
            objeto: "X".to_string(),
            indice: vec!["I1".to_string()],
            secciones: [("S1".to_string(), "body".to_string())].into_iter().collect::<OrderedMap<_>>(),
        }
    }

    #[test]
    fn load_renders_form() {
        let state = loaded();
        assert_eq!(state.phase(), Phase::QuestionsLoaded);
        assert_eq!(state.form().unwrap().fieldsets().len(), 2);
    }

    #[test]
    fn load_failure_reports_message() {
        let mut state = TechnicalFormState::new(DocumentFormat::Markdown);
        state.dispatch(TechnicalEvent::Load);
        state.dispatch(TechnicalEvent::LoadFailed("Network error: refused".into()));

        assert_eq!(state.phase(), Phase::Error);
        assert!(state.error().unwrap().contains("Network error: refused"));
        // Retry is possible from the error phase.
        assert_eq!(state.dispatch(TechnicalEvent::Load), Some(Effect::FetchQuestions));
    }

    #[test]
    fn submit_with_blank_required_field_stays_editable() {
        let mut state = loaded();
        assert_eq!(state.dispatch(TechnicalEvent::Submit), None);
        assert_eq!(state.phase(), Phase::Error);
        assert!(state.error().unwrap().contains("Q1"));
        assert!(state.form().is_some());
    }

    #[test]
    fn submit_posts_answers_and_blocks_second_submit() {
        let mut state = loaded();
        change(&mut state, field_name("Sección A", 0), "uno");
        change(&mut state, field_name(TITLE, 0), CHOICE_NO);

        let Some(Effect::PostAnswers(answers)) = state.dispatch(TechnicalEvent::Submit) else {
            panic!("expected answers to be posted");
        };
        assert_eq!(state.phase(), Phase::AnswersSubmitting);
        assert_eq!(
            answers.get("Sección A").and_then(|s| s.get("Q1")).map(String::as_str),
            Some("uno")
        );
        assert!(!answers.get(TITLE).unwrap().contains_key(CERTIFICATIONS_FOLLOW_UP));

        assert_eq!(state.dispatch(TechnicalEvent::Submit), None);
        assert_eq!(state.phase(), Phase::AnswersSubmitting);
    }

    #[test]
    fn yes_requires_follow_up_before_submitting() {
        let mut state = loaded();
        change(&mut state, field_name("Sección A", 0), "uno");
        change(&mut state, field_name(TITLE, 0), CHOICE_YES);
        assert_eq!(state.dispatch(TechnicalEvent::Submit), None);
        assert!(state.error().unwrap().contains(CERTIFICATIONS_FOLLOW_UP));

        change(&mut state, follow_up_field_name(TITLE), "ISO 9001");
        let Some(Effect::PostAnswers(answers)) = state.dispatch(TechnicalEvent::Submit) else {
            panic!("expected answers to be posted");
        };
        let section = answers.get(TITLE).unwrap();
        assert_eq!(section.get(CERTIFICATIONS_QUESTION).map(String::as_str), Some(CHOICE_YES));
        assert_eq!(section.get(CERTIFICATIONS_FOLLOW_UP).map(String::as_str), Some("ISO 9001"));
    }

    #[test]
    fn success_assembles_document_and_requests_handoff() {
        let mut state = loaded();
        change(&mut state, field_name("Sección A", 0), "uno");
        change(&mut state, field_name(TITLE, 0), CHOICE_NO);
        state.dispatch(TechnicalEvent::Submit);

        let effect = state.dispatch(TechnicalEvent::SubmitSucceeded(response()));
        let Some(Effect::Handoff(document)) = effect else {
            panic!("expected a handoff");
        };
        assert!(document.contains("(X)"));
        assert!(document.contains("- I1"));
        assert_eq!(state.phase(), Phase::Done);
        assert_eq!(state.document(), Some(document.as_str()));
    }

    #[test]
    fn submit_failure_keeps_form_values_for_retry() {
        let mut state = loaded();
        change(&mut state, field_name("Sección A", 0), "uno");
        change(&mut state, field_name(TITLE, 0), CHOICE_NO);
        state.dispatch(TechnicalEvent::Submit);
        state.dispatch(TechnicalEvent::SubmitFailed(
            r#"HTTP error 422 - {"detail":"bad input"}"#.into(),
        ));

        assert_eq!(state.phase(), Phase::Error);
        assert!(state.error().unwrap().contains("422"));
        assert!(state.error().unwrap().contains("bad input"));
        assert_eq!(
            state.form().unwrap().values().get(&field_name("Sección A", 0)),
            Some("uno")
        );
        assert!(matches!(
            state.dispatch(TechnicalEvent::Submit),
            Some(Effect::PostAnswers(_))
        ));
    }

    #[test]
    fn events_out_of_phase_are_ignored() {
        let mut state = TechnicalFormState::new(DocumentFormat::Markdown);
        assert_eq!(state.dispatch(TechnicalEvent::Submit), None);
        assert_eq!(state.dispatch(TechnicalEvent::SubmitSucceeded(response())), None);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn empty_question_list_submits_empty_answers() {
        let mut state = TechnicalFormState::new(DocumentFormat::Markdown);
        state.dispatch(TechnicalEvent::Load);
        state.dispatch(TechnicalEvent::LoadSucceeded(QuestionSet::default()));
        assert_eq!(
            state.dispatch(TechnicalEvent::Submit),
            Some(Effect::PostAnswers(TechnicalAnswers::new()))
        );
    }
}

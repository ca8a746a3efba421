use super::form::{field_name, follow_up_field_name};
use super::questions::{is_certifications_question, QuestionSet};
use crate::constants::{CERTIFICATIONS_FOLLOW_UP, CHOICE_NO, CHOICE_YES};
use crate::errors::{AppError, AppResult};
use crate::form::FormData;
use crate::models::OrderedMap;
use std::fs;
use std::path::Path;

/// Section title → question text → answer, in question-list order.
pub type TechnicalAnswers = OrderedMap<OrderedMap<String>>;

/// Rebuilds the answer mapping by walking the same question list used for rendering.
///
/// Keys are the original section titles and question texts, never field names. Every
/// section gets an entry even when none of its questions were answered; unanswered
/// questions are left out. The certifications follow-up is included, under its full
/// question text, only when the choice is `Sí`.
pub fn collect_answers(questions: &QuestionSet, values: &FormData) -> TechnicalAnswers {
    let mut answers = TechnicalAnswers::new();

    for section in questions.sections() {
        let mut section_answers = OrderedMap::new();

        for (index, question) in section.questions.iter().enumerate() {
            if section.is_conditional_follow_up(question) {
                continue;
            }

            let Some(answer) = values.get(&field_name(&section.title, index)) else {
                continue;
            };
            section_answers.insert(question.clone(), answer.to_string());

            if is_certifications_question(question) && answer == CHOICE_YES {
                if let Some(certifications) = values.get(&follow_up_field_name(&section.title)) {
                    section_answers.insert(CERTIFICATIONS_FOLLOW_UP, certifications.to_string());
                }
            }
        }

        answers.insert(section.title.clone(), section_answers);
    }

    answers
}

/// Answers prepared ahead of time, keyed by section title and question text.
///
/// Titles and questions are compared after trimming, so a sheet written by hand does not
/// need the leading spaces some section titles carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    sections: OrderedMap<OrderedMap<String>>,
}

impl AnswerSheet {
    /// Loads a sheet from TOML: one table per section, one `"question" = answer` per entry.
    ///
    /// Booleans are accepted for yes/no questions and read as `Sí`/`No`.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let table: toml::Table = toml::from_str(contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse answers: {e}")))?;

        let mut sections = OrderedMap::new();
        for (title, value) in table {
            let toml::Value::Table(entries) = value else {
                return Err(AppError::InvalidInput(format!(
                    "Section '{title}' must be a table of question = answer"
                )));
            };

            let mut answers = OrderedMap::new();
            for (question, answer) in entries {
                let text = match answer {
                    toml::Value::String(s) => s,
                    toml::Value::Boolean(true) => CHOICE_YES.to_string(),
                    toml::Value::Boolean(false) => CHOICE_NO.to_string(),
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Float(f) => f.to_string(),
                    _ => {
                        return Err(AppError::InvalidInput(format!(
                            "Answer to '{question}' must be text"
                        )))
                    }
                };
                answers.insert(question, text);
            }
            sections.insert(title, answers);
        }

        Ok(Self { sections })
    }

    pub fn lookup(&self, section: &str, question: &str) -> Option<&str> {
        let section = section.trim();
        let question = question.trim();
        self.sections
            .iter()
            .find(|(title, _)| title.trim() == section)
            .and_then(|(_, answers)| {
                answers
                    .iter()
                    .find(|(q, _)| q.trim() == question)
                    .map(|(_, a)| a.as_str())
            })
    }

    /// Blank sheet for a question list, suitable for filling in and loading back.
    pub fn template(questions: &QuestionSet) -> Self {
        let sections = questions
            .sections()
            .iter()
            .map(|section| {
                let answers: OrderedMap<String> = section
                    .questions
                    .iter()
                    .map(|q| {
                        let placeholder = if is_certifications_question(q) {
                            CHOICE_NO
                        } else {
                            ""
                        };
                        (q.trim().to_string(), placeholder.to_string())
                    })
                    .collect();
                (section.title.trim().to_string(), answers)
            })
            .collect();
        Self { sections }
    }

    pub fn to_toml_string(&self) -> AppResult<String> {
        toml::to_string(&self.sections)
            .map_err(|e| AppError::InvalidInput(format!("Failed to render answer sheet: {e}")))
    }
}

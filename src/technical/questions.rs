use crate::constants::{CERTIFICATIONS_FOLLOW_UP, CERTIFICATIONS_QUESTION};
use serde::{Deserialize, Serialize};

/// One titled group of questions.
///
/// On the wire a section is a two-element array `[title, [question, ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Vec<String>)", into = "(String, Vec<String>)")]
pub struct Section {
    pub title: String,
    pub questions: Vec<String>,
}

impl From<(String, Vec<String>)> for Section {
    fn from((title, questions): (String, Vec<String>)) -> Self {
        Self { title, questions }
    }
}

impl From<Section> for (String, Vec<String>) {
    fn from(section: Section) -> Self {
        (section.title, section.questions)
    }
}

impl Section {
    pub fn new(title: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }

    /// Whether the section asks the yes/no certifications question.
    pub fn has_certifications_question(&self) -> bool {
        self.questions.iter().any(|q| is_certifications_question(q))
    }

    /// Whether `question` is only asked through the certifications choice of this
    /// section rather than as a field of its own.
    pub fn is_conditional_follow_up(&self, question: &str) -> bool {
        question.trim() == CERTIFICATIONS_FOLLOW_UP && self.has_certifications_question()
    }
}

/// Ordered question list served by the technical service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    sections: Vec<Section>,
}

impl QuestionSet {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

pub fn is_certifications_question(question: &str) -> bool {
    question.trim() == CERTIFICATIONS_QUESTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pair_list() {
        let json = r#"[[" Objeto del Contrato", ["Q1", "Q2"]], ["Auditorías", []]]"#;
        let questions: QuestionSet = serde_json::from_str(json).unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions.sections()[0].title, " Objeto del Contrato");
        assert_eq!(questions.sections()[0].questions, vec!["Q1", "Q2"]);
        assert!(questions.sections()[1].questions.is_empty());
        assert_eq!(questions.question_count(), 2);
    }

    #[test]
    fn serializes_back_to_pairs() {
        let questions = QuestionSet::new(vec![Section::new("A", vec!["Q".to_string()])]);
        let json = serde_json::to_string(&questions).unwrap();
        assert_eq!(json, r#"[["A",["Q"]]]"#);
    }

    #[test]
    fn rejects_object_shape() {
        let result = serde_json::from_str::<QuestionSet>(r#"{"A": ["Q"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn certifications_question_is_matched_after_trim() {
        assert!(is_certifications_question(&format!(" {CERTIFICATIONS_QUESTION} ")));
        assert!(!is_certifications_question("¿Otra pregunta?"));
    }

    #[test]
    fn follow_up_is_conditional_only_next_to_the_choice() {
        let with_choice = Section::new(
            "Requisitos",
            vec![
                CERTIFICATIONS_QUESTION.to_string(),
                CERTIFICATIONS_FOLLOW_UP.to_string(),
            ],
        );
        let without_choice = Section::new("Otros", vec![CERTIFICATIONS_FOLLOW_UP.to_string()]);

        assert!(with_choice.is_conditional_follow_up(CERTIFICATIONS_FOLLOW_UP));
        assert!(!without_choice.is_conditional_follow_up(CERTIFICATIONS_FOLLOW_UP));
    }
}

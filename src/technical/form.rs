use super::questions::{is_certifications_question, QuestionSet};
use crate::constants::{
    CERTIFICATIONS_FIELD_SUFFIX, CERTIFICATIONS_FOLLOW_UP, CHOICE_NO, CHOICE_YES,
};
use crate::form::FormData;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Multi-line free text.
    TextArea,
    /// Two radio buttons, `Sí` and `No`.
    YesNo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Set on the field that only exists while its yes/no choice is `Sí`.
    pub follow_up: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fieldset {
    pub legend: String,
    pub fields: Vec<Field>,
}

/// Name of the field answering question `index` of section `title`.
pub fn field_name(title: &str, index: usize) -> String {
    format!("{title}__{index}")
}

/// Name of the certifications follow-up field of section `title`.
pub fn follow_up_field_name(title: &str) -> String {
    format!("{title}__{CERTIFICATIONS_FIELD_SUFFIX}")
}

/// Canonical spelling of a yes/no answer, if `value` is one.
pub fn normalize_choice(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "sí" | "si" => Some(CHOICE_YES),
        "no" => Some(CHOICE_NO),
        _ => None,
    }
}

/// Rendered technical form: one fieldset per section plus the current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechnicalForm {
    fieldsets: Vec<Fieldset>,
    values: FormData,
}

impl TechnicalForm {
    /// Renders one required field per question.
    ///
    /// The certifications question becomes a yes/no choice. When the list also carries
    /// the certifications follow-up in the same section, that question gets no field of
    /// its own: it appears through the choice instead.
    pub fn render(questions: &QuestionSet) -> Self {
        let fieldsets = questions
            .sections()
            .iter()
            .map(|section| Fieldset {
                legend: section.title.trim().to_string(),
                fields: section
                    .questions
                    .iter()
                    .enumerate()
                    .filter(|(_, question)| !section.is_conditional_follow_up(question))
                    .map(|(index, question)| Field {
                        name: field_name(&section.title, index),
                        label: question.clone(),
                        kind: if is_certifications_question(question) {
                            FieldKind::YesNo
                        } else {
                            FieldKind::TextArea
                        },
                        required: true,
                        follow_up: false,
                    })
                    .collect(),
            })
            .collect();

        Self {
            fieldsets,
            values: FormData::new(),
        }
    }

    pub fn fieldsets(&self) -> &[Fieldset] {
        &self.fieldsets
    }

    pub fn values(&self) -> &FormData {
        &self.values
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fieldsets
            .iter()
            .flat_map(|fs| fs.fields.iter())
            .find(|f| f.name == name)
    }

    /// Records a field value.
    ///
    /// Yes/no choices accept `Sí` or `No` regardless of case or accent and are stored in
    /// their canonical spelling; any other value leaves the choice untouched. Changing a
    /// choice drops any follow-up field of that fieldset along with its value, then adds
    /// a fresh required follow-up when the choice is `Sí`. Values for names that are not
    /// rendered fields are ignored.
    pub fn change(&mut self, name: &str, value: &str) {
        let Some(position) = self
            .fieldsets
            .iter()
            .position(|fs| fs.fields.iter().any(|f| f.name == name))
        else {
            debug!(field = name, "Ignoring value for unknown field");
            return;
        };

        let fieldset = &mut self.fieldsets[position];
        let is_choice = fieldset
            .fields
            .iter()
            .any(|f| f.name == name && f.kind == FieldKind::YesNo);
        if !is_choice {
            self.values.set(name, value);
            return;
        }

        let Some(choice) = normalize_choice(value) else {
            warn!(field = name, value, "Ignoring value that is neither Sí nor No");
            return;
        };
        self.values.set(name, choice);

        let values = &mut self.values;
        fieldset.fields.retain(|f| {
            if f.follow_up {
                values.remove(&f.name);
            }
            !f.follow_up
        });

        if choice == CHOICE_YES {
            let title = name
                .rsplit_once("__")
                .map(|(title, _)| title)
                .unwrap_or(name);
            fieldset.fields.push(Field {
                name: follow_up_field_name(title),
                label: CERTIFICATIONS_FOLLOW_UP.to_string(),
                kind: FieldKind::TextArea,
                required: true,
                follow_up: true,
            });
            debug!(field = name, "Certifications follow-up shown");
        }
    }

    /// Labels of required fields that are still blank.
    pub fn missing_required(&self) -> Vec<&str> {
        self.fieldsets
            .iter()
            .flat_map(|fs| fs.fields.iter())
            .filter(|f| f.required)
            .filter(|f| self.values.get(&f.name).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.label.as_str())
            .collect()
    }
}

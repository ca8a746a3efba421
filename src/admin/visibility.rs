use crate::constants::AFFIRMATIVE;
use crate::form::FormData;
use std::collections::BTreeSet;
use tracing::debug;

/// How a dependent input is reset when its region is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependent {
    /// Free-text input: value becomes the empty string.
    Text(&'static str),
    /// Radio group: nothing stays checked, so the field is not submitted at all.
    Radio(&'static str),
}

impl Dependent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(name) | Self::Radio(name) => name,
        }
    }
}

/// A yes/no radio group that shows or hides one dependent region of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalGroup {
    DataProcessing,
    Subcontracting,
    RecoveryFund,
    ProvisionalGuarantee,
}

impl ConditionalGroup {
    pub const ALL: [ConditionalGroup; 4] = [
        Self::DataProcessing,
        Self::Subcontracting,
        Self::RecoveryFund,
        Self::ProvisionalGuarantee,
    ];

    /// Name of the governing radio group.
    pub fn governing_field(&self) -> &'static str {
        match self {
            Self::DataProcessing => "trata_datos",
            Self::Subcontracting => "subcontratara",
            Self::RecoveryFund => "cumple_prtr",
            Self::ProvisionalGuarantee => "garantia_provisional",
        }
    }

    /// Identifier of the region toggled by the group.
    pub fn region(&self) -> &'static str {
        match self {
            Self::DataProcessing => "subcontrata_servidores_div",
            Self::Subcontracting => "subcontratas_no_vinculadas_div",
            Self::RecoveryFund => "prtr_details_div",
            Self::ProvisionalGuarantee => "porcentaje_cuantia_div",
        }
    }

    pub fn dependents(&self) -> &'static [Dependent] {
        match self {
            Self::DataProcessing => &[Dependent::Text("subcontrata_servidores")],
            Self::Subcontracting => &[Dependent::Radio("subcontratas_no_vinculadas")],
            Self::RecoveryFund => &[
                Dependent::Radio("modelos_b1b2c"),
                Dependent::Text("titular_real"),
            ],
            Self::ProvisionalGuarantee => &[Dependent::Text("porcentaje_cuantia")],
        }
    }

    pub fn for_field(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|group| group.governing_field() == name)
    }
}

/// Administrative form values plus the visibility of its conditional regions.
///
/// Regions start hidden. Each change of a governing radio group reveals its region on
/// `"true"` and otherwise hides it and resets the dependents; other fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct AdminForm {
    values: FormData,
    visible: BTreeSet<&'static str>,
}

impl AdminForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays submitted values through [`AdminForm::change`].
    ///
    /// Governing fields are applied last so that dependents supplied alongside a
    /// negative answer end up cleared, as if the user had toggled the group afterwards.
    pub fn from_values(values: &FormData) -> Self {
        let mut form = Self::new();
        let (governing, rest): (Vec<_>, Vec<_>) = values
            .iter()
            .partition(|(name, _)| ConditionalGroup::for_field(name).is_some());

        for (name, value) in rest {
            form.values.append(name, value);
        }
        for (name, value) in governing {
            form.change(name, value);
        }
        form
    }

    pub fn change(&mut self, field: &str, value: &str) {
        self.values.set(field, value);

        let Some(group) = ConditionalGroup::for_field(field) else {
            return;
        };

        if value == AFFIRMATIVE {
            self.visible.insert(group.region());
            debug!(region = group.region(), "Showing conditional region");
            return;
        }

        self.visible.remove(group.region());
        for dependent in group.dependents() {
            match dependent {
                Dependent::Text(name) => {
                    if self.values.contains(name) {
                        self.values.set(*name, "");
                    }
                }
                Dependent::Radio(name) => self.values.remove(name),
            }
        }
        debug!(region = group.region(), "Hiding conditional region and clearing dependents");
    }

    pub fn is_visible(&self, group: ConditionalGroup) -> bool {
        self.visible.contains(group.region())
    }

    pub fn values(&self) -> &FormData {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_start_hidden() {
        let form = AdminForm::new();
        for group in ConditionalGroup::ALL {
            assert!(!form.is_visible(group));
        }
    }

    #[test]
    fn affirmative_reveals_without_touching_other_fields() {
        let mut form = AdminForm::new();
        form.change("objeto_contrato", "Limpieza");
        form.change("subcontrata_servidores", "Nube");
        form.change("trata_datos", "true");

        assert!(form.is_visible(ConditionalGroup::DataProcessing));
        assert!(!form.is_visible(ConditionalGroup::RecoveryFund));
        assert_eq!(form.values().get("objeto_contrato"), Some("Limpieza"));
        assert_eq!(form.values().get("subcontrata_servidores"), Some("Nube"));
    }

    #[test]
    fn negative_hides_and_clears_text_dependent() {
        let mut form = AdminForm::new();
        form.change("trata_datos", "true");
        form.change("subcontrata_servidores", "Nube");
        form.change("trata_datos", "false");

        assert!(!form.is_visible(ConditionalGroup::DataProcessing));
        assert_eq!(form.values().get("subcontrata_servidores"), Some(""));
    }

    #[test]
    fn negative_unchecks_radio_and_clears_text_for_recovery_fund() {
        let mut form = AdminForm::new();
        form.change("cumple_prtr", "true");
        form.change("modelos_b1b2c", "true");
        form.change("titular_real", "Empresa S.A.");
        form.change("garantia_provisional", "true");
        form.change("porcentaje_cuantia", "3%");
        form.change("cumple_prtr", "false");

        assert!(!form.is_visible(ConditionalGroup::RecoveryFund));
        assert!(!form.values().contains("modelos_b1b2c"));
        assert_eq!(form.values().get("titular_real"), Some(""));
        // Unrelated group keeps its state.
        assert!(form.is_visible(ConditionalGroup::ProvisionalGuarantee));
        assert_eq!(form.values().get("porcentaje_cuantia"), Some("3%"));
    }

    #[test]
    fn subcontracting_negative_unchecks_radio() {
        let mut form = AdminForm::new();
        form.change("subcontratara", "true");
        form.change("subcontratas_no_vinculadas", "false");
        form.change("subcontratara", "false");
        assert!(!form.values().contains("subcontratas_no_vinculadas"));
    }

    #[test]
    fn from_values_applies_governing_fields_last() {
        let values: FormData = [
            ("garantia_provisional", "false"),
            ("porcentaje_cuantia", "5%"),
            ("cumple_prtr", "true"),
            ("titular_real", "Titular"),
        ]
        .into_iter()
        .collect();

        let form = AdminForm::from_values(&values);
        assert_eq!(form.values().get("porcentaje_cuantia"), Some(""));
        assert_eq!(form.values().get("titular_real"), Some("Titular"));
        assert!(form.is_visible(ConditionalGroup::RecoveryFund));
        assert!(!form.is_visible(ConditionalGroup::ProvisionalGuarantee));
    }
}

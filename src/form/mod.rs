use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, TagField, FAMILY_RECIPIENT};
use crate::cli::Flow;
use crate::errors::{FormError, ImageError};
use crate::image::{ImageAttachment, ImageSlot, LoadTicket};

pub const TOTAL_STEPS: u8 = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Everything the user told the wizard about the person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerSet {
    pub gender: String,
    pub age: String,
    pub profession: String,
    pub recipient: String,
    pub occasion: String,
    pub family_member: String,
    pub interests: Vec<String>,
    pub color: String,
    pub styles: Vec<String>,
    pub gift_type: Vec<String>,
    pub budget: Budget,
    pub notes: String,
    pub city: String,
    pub date: String,
    #[serde(skip)]
    pub image: Option<ImageAttachment>,
}

impl AnswerSet {
    pub fn tags(&self, field: TagField) -> &[String] {
        match field {
            TagField::Interests => &self.interests,
            TagField::Styles => &self.styles,
            TagField::GiftType => &self.gift_type,
        }
    }

    fn tags_mut(&mut self, field: TagField) -> &mut Vec<String> {
        match field {
            TagField::Interests => &mut self.interests,
            TagField::Styles => &mut self.styles,
            TagField::GiftType => &mut self.gift_type,
        }
    }

    pub fn is_family(&self) -> bool {
        self.recipient == FAMILY_RECIPIENT
    }

    /// Recipient with the family subtype in parentheses when it applies.
    pub fn recipient_label(&self) -> String {
        if self.is_family() && !self.family_member.is_empty() {
            format!("{} ({})", self.recipient, self.family_member)
        } else {
            self.recipient.clone()
        }
    }

    /// Names of the fields a flow cannot proceed without.
    pub fn missing_required(&self, flow: Flow) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("gender", &self.gender),
            ("age", &self.age),
            ("recipient", &self.recipient),
            ("occasion", &self.occasion),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if self.is_family() && self.family_member.trim().is_empty() {
            missing.push("familyMember");
        }
        if flow == Flow::Activity {
            if self.city.trim().is_empty() {
                missing.push("city");
            }
            if self.date.trim().is_empty() {
                missing.push("date");
            }
        }
        missing
    }

    /// Check tag fields against their catalogs and drop duplicates.
    /// Used for answer sets that did not come through the interactive form.
    pub fn validated(mut self) -> Result<Self, FormError> {
        for field in [TagField::Interests, TagField::Styles, TagField::GiftType] {
            let catalog = catalog::catalog_for(field);
            let mut seen: Vec<String> = Vec::new();
            for v in self.tags(field) {
                if !catalog::contains(catalog, v) {
                    return Err(FormError::NotInCatalog { field: field.name(), value: v.clone() });
                }
                if !seen.contains(v) {
                    seen.push(v.clone());
                }
            }
            *self.tags_mut(field) = seen;
        }
        Ok(self)
    }
}

/// Scalar fields that can be set by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Gender,
    Age,
    Profession,
    Recipient,
    Occasion,
    FamilyMember,
    Color,
    Notes,
    City,
    Date,
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "gender" => Field::Gender,
            "age" => Field::Age,
            "profession" => Field::Profession,
            "recipient" => Field::Recipient,
            "occasion" => Field::Occasion,
            "familyMember" | "family_member" => Field::FamilyMember,
            "color" => Field::Color,
            "notes" => Field::Notes,
            "city" => Field::City,
            "date" => Field::Date,
            other => return Err(FormError::UnknownField(other.to_string())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBound {
    Min,
    Max,
}

impl FromStr for BudgetBound {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(BudgetBound::Min),
            "max" => Ok(BudgetBound::Max),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Intro,
    BasicInfo,
    Personality,
    Conditions,
    EventDetails,
    Notes,
    Results,
}

/// Step position and answers for one run of a wizard.
#[derive(Debug)]
pub struct Wizard {
    flow: Flow,
    step: u8,
    total_steps: u8,
    answers: AnswerSet,
    image: ImageSlot,
}

impl Wizard {
    pub fn new(flow: Flow) -> Self {
        Self::with_total_steps(flow, TOTAL_STEPS)
    }

    pub fn with_total_steps(flow: Flow, total_steps: u8) -> Self {
        Self {
            flow,
            step: 1,
            total_steps: total_steps.max(1),
            answers: AnswerSet::default(),
            image: ImageSlot::default(),
        }
    }

    /// Start at the results step with answers gathered elsewhere.
    pub fn from_answers(flow: Flow, answers: AnswerSet) -> Self {
        let mut w = Self::new(flow);
        let image = answers.image.clone();
        w.answers = answers;
        if let Some(img) = image {
            w.set_image(img);
        }
        w.step = w.total_steps;
        w
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn total_steps(&self) -> u8 {
        self.total_steps
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn next_step(&mut self) {
        self.step = self.step.saturating_add(1).min(self.total_steps);
    }

    pub fn prev_step(&mut self) {
        self.step = self.step.saturating_sub(1).max(1);
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.total_steps
    }

    pub fn step_kind(&self) -> StepKind {
        match self.step {
            s if s >= self.total_steps => StepKind::Results,
            2 => StepKind::BasicInfo,
            3 => StepKind::Personality,
            4 => match self.flow {
                Flow::Gift => StepKind::Conditions,
                Flow::Activity => StepKind::EventDetails,
            },
            5 => StepKind::Notes,
            _ => StepKind::Intro,
        }
    }

    /// Percentage shown in the progress bar.
    pub fn progress(&self) -> f64 {
        if self.step >= self.total_steps || self.total_steps <= 2 {
            return 100.0;
        }
        f64::from(self.step - 1) / f64::from(self.total_steps - 2) * 100.0
    }

    pub fn can_advance(&self) -> bool {
        let a = &self.answers;
        match self.step_kind() {
            StepKind::BasicInfo => {
                !a.gender.is_empty()
                    && !a.age.is_empty()
                    && !a.recipient.is_empty()
                    && !a.occasion.is_empty()
                    && !(a.is_family() && a.family_member.is_empty())
            }
            StepKind::EventDetails => !a.city.trim().is_empty() && !a.date.trim().is_empty(),
            _ => true,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let a = &mut self.answers;
        let slot = match field {
            Field::Gender => &mut a.gender,
            Field::Age => &mut a.age,
            Field::Profession => &mut a.profession,
            Field::Recipient => &mut a.recipient,
            Field::Occasion => &mut a.occasion,
            Field::FamilyMember => &mut a.family_member,
            Field::Color => &mut a.color,
            Field::Notes => &mut a.notes,
            Field::City => &mut a.city,
            Field::Date => &mut a.date,
        };
        *slot = value;
    }

    /// Set a field by its form name, e.g. `"familyMember"`.
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = name.parse::<Field>()?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn set_budget(&mut self, bound: BudgetBound, value: Option<u64>) {
        match bound {
            BudgetBound::Min => self.answers.budget.min = value,
            BudgetBound::Max => self.answers.budget.max = value,
        }
    }

    /// Parse a budget input box. Empty text clears the bound.
    pub fn set_budget_text(&mut self, bound: BudgetBound, text: &str) -> Result<(), FormError> {
        let t = text.trim();
        let value = if t.is_empty() {
            None
        } else {
            Some(t.parse::<u64>().map_err(|_| FormError::InvalidBudget(t.to_string()))?)
        };
        self.set_budget(bound, value);
        Ok(())
    }

    /// Checkbox semantics: add when checked, remove otherwise.
    pub fn set_tag(&mut self, field: TagField, value: &str, checked: bool) -> Result<(), FormError> {
        if !catalog::contains(catalog::catalog_for(field), value) {
            return Err(FormError::NotInCatalog { field: field.name(), value: value.to_string() });
        }
        let tags = self.answers.tags_mut(field);
        if checked {
            if !tags.iter().any(|t| t == value) {
                tags.push(value.to_string());
            }
        } else {
            tags.retain(|t| t != value);
        }
        Ok(())
    }

    pub fn toggle_tag(&mut self, field: TagField, value: &str) -> Result<(), FormError> {
        let checked = !self.answers.tags(field).iter().any(|t| t == value);
        self.set_tag(field, value, checked)
    }

    /// Replace a whole tag field, e.g. from a multi-select prompt.
    pub fn set_tags(&mut self, field: TagField, values: &[String]) -> Result<(), FormError> {
        self.answers.tags_mut(field).clear();
        for v in values {
            self.set_tag(field, v, true)?;
        }
        Ok(())
    }

    pub fn begin_image_load(&mut self) -> LoadTicket {
        self.image.begin_load()
    }

    /// Apply a finished load if it is still the latest one requested.
    pub fn commit_image(&mut self, ticket: LoadTicket, image: ImageAttachment) -> bool {
        let applied = self.image.commit(ticket, image);
        self.answers.image = self.image.get().cloned();
        applied
    }

    pub fn set_image(&mut self, image: ImageAttachment) {
        let ticket = self.begin_image_load();
        self.commit_image(ticket, image);
    }

    /// Load a photo from disk into the slot. Returns whether it was applied.
    pub async fn load_image(&mut self, path: &Path) -> Result<bool, ImageError> {
        let applied = self.image.load_from(path).await?;
        self.answers.image = self.image.get().cloned();
        Ok(applied)
    }

    pub fn clear_image(&mut self) {
        self.image.clear();
        self.answers.image = None;
    }

    /// Back to the first step with an empty answer set.
    pub fn restart(&mut self) {
        debug!(flow = ?self.flow, step = self.step, "wizard restart");
        self.step = 1;
        self.answers = AnswerSet::default();
        self.image.clear();
    }
}

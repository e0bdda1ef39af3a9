//! The assessment record: fifteen named lifestyle and physiological fields.
//!
//! DESIGN
//! ======
//! `Vitals` is always complete; every field has a default and mutation
//! replaces one field at a time. Each field also carries the metadata of the
//! input widget that edits it (label, section, range, step, unit). The range
//! is a widget concern: front ends clamp through [`FieldSpec::clamp`] and
//! the record itself stores whatever it is given.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VitalsError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects {expected}")]
    WrongKind { field: VitalField, expected: &'static str },
    #[error("invalid value `{raw}` for field `{field}`")]
    InvalidValue { field: VitalField, raw: String },
}

// =============================================================================
// FIELDS
// =============================================================================

/// Field keys, in form order. String forms are the camelCase record keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum VitalField {
    SleepHours,
    PhysicalActivity,
    Caffeine,
    Alcohol,
    Smoking,
    FamilyHistoryAnxiety,
    Dizziness,
    Medication,
    RecentLifeEvent,
    StressLevel,
    HeartRate,
    BreathingRate,
    SweatingLevel,
    TherapySessions,
    DietQuality,
}

impl VitalField {
    /// Parse a camelCase key.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::UnknownField`] for any other string.
    pub fn parse(key: &str) -> Result<Self, VitalsError> {
        key.parse().map_err(|_| VitalsError::UnknownField(key.to_owned()))
    }

    #[must_use]
    pub fn is_toggle(self) -> bool {
        matches!(self.spec().kind, FieldKind::Toggle)
    }

    #[must_use]
    pub fn spec(self) -> FieldSpec {
        use FieldKind::{Slider, Toggle};
        use Section::*;

        let (label, section, kind) = match self {
            Self::SleepHours => ("Sleep Hours", SleepActivity, Slider { min: 2.3, max: 11.3, step: 0.1, unit: " hrs" }),
            Self::PhysicalActivity => {
                ("Physical Activity", SleepActivity, Slider { min: 0.0, max: 10.0, step: 0.1, unit: " hrs/wk" })
            }
            Self::Caffeine => ("Caffeine Intake", Substances, Slider { min: 0.0, max: 599.0, step: 5.0, unit: " mg/day" }),
            Self::Alcohol => {
                ("Alcohol Consumption", Substances, Slider { min: 0.0, max: 19.0, step: 1.0, unit: " drinks/wk" })
            }
            Self::Smoking => ("Smoking", HealthHistory, Toggle),
            Self::FamilyHistoryAnxiety => ("Family History of Anxiety", HealthHistory, Toggle),
            Self::Dizziness => ("Dizziness", HealthHistory, Toggle),
            Self::Medication => ("Medication", HealthHistory, Toggle),
            Self::RecentLifeEvent => ("Recent Major Life Event", HealthHistory, Toggle),
            Self::StressLevel => ("Stress Level (1-10)", StressVitals, Slider { min: 1.0, max: 10.0, step: 1.0, unit: "" }),
            Self::HeartRate => ("Heart Rate", StressVitals, Slider { min: 60.0, max: 119.0, step: 1.0, unit: " bpm" }),
            Self::BreathingRate => {
                ("Breathing Rate", StressVitals, Slider { min: 12.0, max: 29.0, step: 1.0, unit: " breaths/min" })
            }
            Self::SweatingLevel => ("Sweating Level (1-5)", StressVitals, Slider { min: 1.0, max: 5.0, step: 1.0, unit: "" }),
            Self::TherapySessions => {
                ("Therapy Sessions", TherapyDiet, Slider { min: 0.0, max: 12.0, step: 1.0, unit: " /mo" })
            }
            Self::DietQuality => ("Diet Quality (1-10)", TherapyDiet, Slider { min: 1.0, max: 10.0, step: 1.0, unit: "" }),
        };

        FieldSpec { field: self, label, section, kind }
    }
}

/// Form sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Section {
    SleepActivity,
    Substances,
    HealthHistory,
    StressVitals,
    TherapyDiet,
}

impl Section {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SleepActivity => "Sleep & Activity",
            Self::Substances => "Substances",
            Self::HealthHistory => "Health History",
            Self::StressVitals => "Stress & Vitals",
            Self::TherapyDiet => "Therapy & Diet",
        }
    }

    /// Fields shown in this section, in form order.
    pub fn fields(self) -> impl Iterator<Item = VitalField> {
        VitalField::iter().filter(move |f| f.spec().section == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Slider { min: f64, max: f64, step: f64, unit: &'static str },
    Toggle,
}

/// Widget metadata for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field: VitalField,
    pub label: &'static str,
    pub section: Section,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Snap `value` onto the slider's step grid and keep it inside the
    /// range, the way a range input does. Toggles pass values through.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        let FieldKind::Slider { min, max, step, .. } = self.kind else {
            return value;
        };
        if !value.is_finite() {
            return min;
        }
        let clamped = value.clamp(min, max);
        let mut steps = ((clamped - min) / step).round();
        if min + steps * step > max + step * 1e-9 {
            steps -= 1.0;
        }
        round_to_grid(min + steps * step)
    }

    /// Render a value with the widget's unit suffix.
    #[must_use]
    pub fn display(&self, value: FieldValue) -> String {
        match (self.kind, value) {
            (FieldKind::Slider { unit, .. }, FieldValue::Number(n)) => format!("{}{unit}", format_number(n)),
            (_, v) => v.to_string(),
        }
    }
}

fn round_to_grid(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Format a number without a trailing `.0` for whole values.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = n as i64;
        whole.to_string()
    } else {
        n.to_string()
    }
}

// =============================================================================
// VALUES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    /// Parse user text for `field`: numbers for sliders; yes/no, true/false,
    /// on/off or 1/0 for toggles.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::InvalidValue`] if the text does not fit the
    /// field's kind.
    pub fn parse_for(field: VitalField, raw: &str) -> Result<Self, VitalsError> {
        let trimmed = raw.trim();
        let invalid = || VitalsError::InvalidValue { field, raw: raw.to_owned() };

        if field.is_toggle() {
            match trimmed.to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" | "on" | "1" => Ok(Self::Flag(true)),
                "no" | "n" | "false" | "off" | "0" => Ok(Self::Flag(false)),
                _ => Err(invalid()),
            }
        } else {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Self::Number)
                .ok_or_else(invalid)
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
        }
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// One assessment snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    pub sleep_hours: f64,
    pub physical_activity: f64,
    pub caffeine: f64,
    pub alcohol: f64,
    pub smoking: bool,
    pub family_history_anxiety: bool,
    pub dizziness: bool,
    pub medication: bool,
    pub recent_life_event: bool,
    pub stress_level: f64,
    pub heart_rate: f64,
    pub breathing_rate: f64,
    pub sweating_level: f64,
    pub therapy_sessions: f64,
    pub diet_quality: f64,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            sleep_hours: 6.5,
            physical_activity: 4.0,
            caffeine: 200.0,
            alcohol: 2.0,
            smoking: false,
            family_history_anxiety: false,
            dizziness: false,
            medication: false,
            recent_life_event: false,
            stress_level: 7.0,
            heart_rate: 78.0,
            breathing_rate: 18.0,
            sweating_level: 3.0,
            therapy_sessions: 1.0,
            diet_quality: 6.0,
        }
    }
}

impl Vitals {
    #[must_use]
    pub fn get(&self, field: VitalField) -> FieldValue {
        match field {
            VitalField::Smoking => FieldValue::Flag(self.smoking),
            VitalField::FamilyHistoryAnxiety => FieldValue::Flag(self.family_history_anxiety),
            VitalField::Dizziness => FieldValue::Flag(self.dizziness),
            VitalField::Medication => FieldValue::Flag(self.medication),
            VitalField::RecentLifeEvent => FieldValue::Flag(self.recent_life_event),
            numeric => FieldValue::Number(*self.number_slot(numeric)),
        }
    }

    /// Replace one field.
    ///
    /// # Errors
    ///
    /// Returns [`VitalsError::WrongKind`] when a toggle gets a number or a
    /// slider gets a flag. The record is unchanged in that case.
    pub fn update_field(&mut self, field: VitalField, value: FieldValue) -> Result<(), VitalsError> {
        match (field.is_toggle(), value) {
            (true, FieldValue::Flag(flag)) => {
                *self.flag_slot(field) = flag;
                Ok(())
            }
            (false, FieldValue::Number(n)) => {
                *self.number_slot_mut(field) = n;
                Ok(())
            }
            (true, FieldValue::Number(_)) => Err(VitalsError::WrongKind { field, expected: "a yes/no value" }),
            (false, FieldValue::Flag(_)) => Err(VitalsError::WrongKind { field, expected: "a number" }),
        }
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Field/value pairs in form order.
    pub fn entries(&self) -> impl Iterator<Item = (VitalField, FieldValue)> + '_ {
        VitalField::iter().map(|f| (f, self.get(f)))
    }

    fn number_slot(&self, field: VitalField) -> &f64 {
        match field {
            VitalField::SleepHours => &self.sleep_hours,
            VitalField::PhysicalActivity => &self.physical_activity,
            VitalField::Caffeine => &self.caffeine,
            VitalField::Alcohol => &self.alcohol,
            VitalField::StressLevel => &self.stress_level,
            VitalField::HeartRate => &self.heart_rate,
            VitalField::BreathingRate => &self.breathing_rate,
            VitalField::SweatingLevel => &self.sweating_level,
            VitalField::TherapySessions => &self.therapy_sessions,
            _ => &self.diet_quality,
        }
    }

    fn number_slot_mut(&mut self, field: VitalField) -> &mut f64 {
        match field {
            VitalField::SleepHours => &mut self.sleep_hours,
            VitalField::PhysicalActivity => &mut self.physical_activity,
            VitalField::Caffeine => &mut self.caffeine,
            VitalField::Alcohol => &mut self.alcohol,
            VitalField::StressLevel => &mut self.stress_level,
            VitalField::HeartRate => &mut self.heart_rate,
            VitalField::BreathingRate => &mut self.breathing_rate,
            VitalField::SweatingLevel => &mut self.sweating_level,
            VitalField::TherapySessions => &mut self.therapy_sessions,
            _ => &mut self.diet_quality,
        }
    }

    fn flag_slot(&mut self, field: VitalField) -> &mut bool {
        match field {
            VitalField::Smoking => &mut self.smoking,
            VitalField::FamilyHistoryAnxiety => &mut self.family_history_anxiety,
            VitalField::Dizziness => &mut self.dizziness,
            VitalField::Medication => &mut self.medication,
            _ => &mut self.recent_life_event,
        }
    }
}

#[cfg(test)]
#[path = "vitals_test.rs"]
mod tests;

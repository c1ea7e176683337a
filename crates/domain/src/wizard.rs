//! Booking wizard state machine.
//!
//! The wizard walks a visitor through four steps: select a service, choose a
//! staff member, pick a date and time, leave contact details. State lives in
//! the visitor's wizard session; this module owns the pure transition
//! function applied to it.
//!
//! Step targets are validated to the range 1..=4, but jumps are not required
//! to be sequential: 1 → 4 is accepted without checking that earlier steps
//! were completed. Field updates are partial and merge shallowly; the
//! customer sub-object merges key-by-key.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ContactDetails, ServiceSummary};

/// The four wizard steps, numbered 1..=4 on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum WizardStep {
    #[default]
    SelectService,
    ChooseStaff,
    PickSlot,
    ContactDetails,
}

impl WizardStep {
    pub fn number(self) -> i32 {
        match self {
            WizardStep::SelectService => 1,
            WizardStep::ChooseStaff => 2,
            WizardStep::PickSlot => 3,
            WizardStep::ContactDetails => 4,
        }
    }
}

impl From<WizardStep> for i32 {
    fn from(step: WizardStep) -> i32 {
        step.number()
    }
}

impl TryFrom<i32> for WizardStep {
    type Error = WizardError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WizardStep::SelectService),
            2 => Ok(WizardStep::ChooseStaff),
            3 => Ok(WizardStep::PickSlot),
            4 => Ok(WizardStep::ContactDetails),
            other => Err(WizardError::StepOutOfRange(other)),
        }
    }
}

/// Errors from applying a wizard update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step must be between 1 and 4, got {0}")]
    StepOutOfRange(i32),
}

/// Accumulated wizard state for one visitor session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub service_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub customer: ContactDetails,
    /// Snapshot of the selected service, filled in by service selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceSummary>,
}

impl WizardState {
    /// Records a service selection and advances to the staff step, as the
    /// selection endpoint does in one stroke.
    pub fn select_service(&mut self, summary: ServiceSummary) {
        self.service_id = Some(summary.id);
        self.service = Some(summary);
        self.current_step = WizardStep::ChooseStaff;
    }
}

/// A partial update posted against the wizard session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WizardUpdate {
    /// Raw step number; validated to 1..=4 when applied.
    pub current_step: Option<i32>,
    pub service_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub customer: Option<ContactDetails>,
}

/// Applies `update` to `state`. All-or-nothing: an out-of-range step leaves
/// the state untouched. Returns whether the update carried a step value,
/// which callers use to trigger session id regeneration.
pub fn apply(state: &mut WizardState, update: WizardUpdate) -> Result<bool, WizardError> {
    // Validate before mutating anything.
    let new_step = update.current_step.map(WizardStep::try_from).transpose()?;

    if let Some(step) = new_step {
        state.current_step = step;
    }
    if update.service_id.is_some() {
        state.service_id = update.service_id;
    }
    if update.staff_id.is_some() {
        state.staff_id = update.staff_id;
    }
    if update.date.is_some() {
        state.date = update.date;
    }
    if update.time.is_some() {
        state.time = update.time;
    }
    if let Some(patch) = update.customer {
        state.customer.merge(patch);
    }

    Ok(new_step.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_update(step: i32) -> WizardUpdate {
        WizardUpdate {
            current_step: Some(step),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_state_is_step_one_all_unset() {
        let state = WizardState::default();
        assert_eq!(state.current_step, WizardStep::SelectService);
        assert_eq!(state.current_step.number(), 1);
        assert!(state.service_id.is_none());
        assert!(state.staff_id.is_none());
        assert!(state.date.is_none());
        assert!(state.time.is_none());
        assert_eq!(state.customer, ContactDetails::default());
    }

    #[test]
    fn test_steps_in_range_accepted() {
        for target in 1..=4 {
            let mut state = WizardState::default();
            let changed = apply(&mut state, step_update(target)).unwrap();
            assert!(changed);
            assert_eq!(state.current_step.number(), target);
        }
    }

    #[test]
    fn test_steps_out_of_range_rejected_without_change() {
        for target in [0, -1, 5, 99] {
            let mut state = WizardState::default();
            apply(&mut state, step_update(2)).unwrap();
            let err = apply(&mut state, step_update(target)).unwrap_err();
            assert_eq!(err, WizardError::StepOutOfRange(target));
            // stored step unchanged
            assert_eq!(state.current_step.number(), 2);
        }
    }

    #[test]
    fn test_invalid_step_does_not_apply_other_fields() {
        let mut state = WizardState::default();
        let update = WizardUpdate {
            current_step: Some(9),
            service_id: Some(10),
            ..Default::default()
        };
        assert!(apply(&mut state, update).is_err());
        assert!(state.service_id.is_none());
    }

    #[test]
    fn test_non_sequential_jump_allowed() {
        let mut state = WizardState::default();
        apply(&mut state, step_update(4)).unwrap();
        assert_eq!(state.current_step, WizardStep::ContactDetails);
    }

    #[test]
    fn test_partial_updates_accumulate() {
        let mut state = WizardState::default();
        apply(
            &mut state,
            WizardUpdate {
                current_step: Some(2),
                service_id: Some(10),
                ..Default::default()
            },
        )
        .unwrap();
        apply(
            &mut state,
            WizardUpdate {
                date: Some("2026-02-15".parse().unwrap()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(state.current_step.number(), 2);
        assert_eq!(state.service_id, Some(10));
        assert_eq!(state.date, Some("2026-02-15".parse().unwrap()));
    }

    #[test]
    fn test_update_without_step_reports_no_step_change() {
        let mut state = WizardState::default();
        let changed = apply(
            &mut state,
            WizardUpdate {
                staff_id: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!changed);
        assert_eq!(state.staff_id, Some(3));
    }

    #[test]
    fn test_customer_fields_merge_key_by_key() {
        let mut state = WizardState::default();
        apply(
            &mut state,
            WizardUpdate {
                customer: Some(ContactDetails {
                    name: Some("Jo March".into()),
                    email: Some("jo@example.com".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .unwrap();
        apply(
            &mut state,
            WizardUpdate {
                customer: Some(ContactDetails {
                    phone: Some("07700 900123".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(state.customer.name.as_deref(), Some("Jo March"));
        assert_eq!(state.customer.email.as_deref(), Some("jo@example.com"));
        assert_eq!(state.customer.phone.as_deref(), Some("07700 900123"));
    }

    #[test]
    fn test_select_service_advances_to_staff_step() {
        let mut state = WizardState::default();
        state.select_service(ServiceSummary {
            id: 5,
            name: "Beard Trim".into(),
            duration: 30,
            price: 15.0,
        });
        assert_eq!(state.current_step, WizardStep::ChooseStaff);
        assert_eq!(state.service_id, Some(5));
        assert_eq!(state.service.as_ref().unwrap().name, "Beard Trim");
    }

    #[test]
    fn test_step_serializes_as_number() {
        let state = WizardState::default();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["current_step"], 1);
        assert_eq!(json["service_id"], serde_json::Value::Null);
    }

    #[test]
    fn test_update_deserializes_from_wire_shape() {
        let update: WizardUpdate = serde_json::from_str(
            r#"{"current_step": 3, "staff_id": 2, "date": "2026-02-15", "time": "10:30:00"}"#,
        )
        .unwrap();
        assert_eq!(update.current_step, Some(3));
        assert_eq!(update.staff_id, Some(2));
        assert!(update.date.is_some());
        assert!(update.time.is_some());
    }
}

//! Fire-and-forget form tracking. Payloads go onto `window.dataLayer` (and
//! `gtag` when the site loads it); a missing sink is never an error and no
//! failure here may block a wizard transition.

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

use super::state::{Budget, FutureStart, Improvement, WizardState};

pub const FORM_NAME: &str = "kontaktformular";
pub const FORM_ID: &str = "contact_modal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingEvent {
    FormOpen,
    FormClose,
    FormStepView,
    FormStepChoice,
    FormStepContinue,
    FormSubmit,
    FormSubmitSuccess,
    FormSubmitError,
}

impl TrackingEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TrackingEvent::FormOpen => "form_open",
            TrackingEvent::FormClose => "form_close",
            TrackingEvent::FormStepView => "form_step_view",
            TrackingEvent::FormStepChoice => "form_step_choice",
            TrackingEvent::FormStepContinue => "form_step_continue",
            TrackingEvent::FormSubmit => "form_submit",
            TrackingEvent::FormSubmitSuccess => "form_submit_success",
            TrackingEvent::FormSubmitError => "form_submit_error",
        }
    }
}

/// Human-readable name of a (step, branch) pair as it goes into tracking
/// payloads. Total over arbitrary input; the state machine only produces
/// the six defined names.
pub fn step_name(step: u8, has_marketing: Option<bool>) -> &'static str {
    match (step, has_marketing) {
        (1, _) => "marketing_status",
        (2, Some(false)) => "future_start",
        (2, Some(true)) => "improvements",
        (3, _) => "budget",
        (4, _) => "contact_details",
        (5, _) => "success",
        _ => "unknown",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackingPayload {
    pub event: &'static str,
    pub form_name: &'static str,
    pub form_id: &'static str,
    pub form_step: u8,
    pub form_step_name: &'static str,
    pub has_marketing: Option<bool>,
    pub future_start: Option<FutureStart>,
    pub improvements: Vec<Improvement>,
    pub budget: Option<Budget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TrackingPayload {
    pub fn from_wizard(event: TrackingEvent, wizard: &WizardState) -> Self {
        let step = wizard.step.number();
        Self {
            event: event.name(),
            form_name: FORM_NAME,
            form_id: FORM_ID,
            form_step: step,
            form_step_name: step_name(step, wizard.has_marketing),
            has_marketing: wizard.has_marketing,
            future_start: wizard.future_start,
            improvements: wizard.improvements.clone(),
            budget: wizard.budget,
            error_message: None,
        }
    }
}

pub fn push(payload: &TrackingPayload) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(value) = serde_wasm_bindgen::to_value(payload) else {
        return;
    };

    let data_layer = js_sys::Reflect::get(&window, &JsValue::from_str("dataLayer"))
        .ok()
        .and_then(|existing| existing.dyn_into::<js_sys::Array>().ok())
        .unwrap_or_else(|| {
            let fresh = js_sys::Array::new();
            let _ = js_sys::Reflect::set(&window, &JsValue::from_str("dataLayer"), &fresh);
            fresh
        });
    data_layer.push(&value);

    if let Ok(gtag) = js_sys::Reflect::get(&window, &JsValue::from_str("gtag")) {
        if let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() {
            let _ = gtag.call3(
                &JsValue::NULL,
                &JsValue::from_str("event"),
                &JsValue::from_str(payload.event),
                &value,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::state::{Improvement, WizardState};

    #[test]
    fn step_names_cover_every_reachable_combination() {
        assert_eq!(step_name(1, None), "marketing_status");
        assert_eq!(step_name(1, Some(true)), "marketing_status");
        assert_eq!(step_name(2, Some(false)), "future_start");
        assert_eq!(step_name(2, Some(true)), "improvements");
        assert_eq!(step_name(3, Some(true)), "budget");
        assert_eq!(step_name(3, Some(false)), "budget");
        assert_eq!(step_name(4, Some(true)), "contact_details");
        assert_eq!(step_name(5, Some(false)), "success");
    }

    #[test]
    fn unreachable_combinations_fall_back_to_unknown() {
        assert_eq!(step_name(2, None), "unknown");
        assert_eq!(step_name(0, None), "unknown");
        assert_eq!(step_name(6, Some(true)), "unknown");
    }

    #[test]
    fn walking_the_wizard_only_produces_defined_step_names() {
        let defined = [
            "marketing_status",
            "future_start",
            "improvements",
            "budget",
            "contact_details",
            "success",
        ];

        for has_marketing in [true, false] {
            let mut state = WizardState::new();
            loop {
                let name = step_name(state.step.number(), state.has_marketing);
                assert!(defined.contains(&name), "undefined step name: {}", name);
                match state.step.number() {
                    1 => state.choose_marketing(has_marketing),
                    2 => {
                        if has_marketing {
                            state.toggle_improvement(Improvement::AccountCheck);
                            state.continue_from_improvements();
                        } else {
                            state.select_future_start(crate::contact::state::FutureStart::Asap);
                        }
                    }
                    3 => state.select_budget(crate::contact::state::Budget::Under1000),
                    4 => {
                        state.begin_submission();
                        state.finish_submission();
                    }
                    _ => break,
                }
            }
        }
    }

    #[test]
    fn payload_snapshot_carries_the_form_identity() {
        let mut state = WizardState::new();
        state.choose_marketing(true);
        let payload = TrackingPayload::from_wizard(TrackingEvent::FormStepView, &state);
        assert_eq!(payload.event, "form_step_view");
        assert_eq!(payload.form_name, "kontaktformular");
        assert_eq!(payload.form_id, "contact_modal");
        assert_eq!(payload.form_step, 2);
        assert_eq!(payload.form_step_name, "improvements");
    }
}

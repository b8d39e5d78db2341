use gloo_console::log;
use gloo_net::http::Request;
use serde::Deserialize;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config;
use crate::contact::analytics::{self, TrackingEvent, TrackingPayload};
use crate::contact::state::{
    Budget, ContactPayload, FutureStart, Improvement, SubmissionStatus, WizardState, WizardStep,
};

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

async fn send_contact_request(payload: &ContactPayload) -> Result<(), String> {
    let request = Request::post(&format!("{}/api/contact", config::get_backend_url()))
        .json(payload)
        .map_err(|e| e.to_string())?;

    match request.send().await {
        Ok(response) => {
            if response.ok() {
                Ok(())
            } else {
                match response.json::<ErrorResponse>().await {
                    Ok(body) => Err(body.error),
                    Err(_) => Err("Fehler beim Senden der Anfrage".to_string()),
                }
            }
        }
        Err(e) => Err(format!("Request failed: {}", e)),
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[function_component(ContactForm)]
pub fn contact_form(props: &ContactFormProps) -> Html {
    let wizard = use_state(WizardState::new);
    let was_open = use_mut_ref(|| false);

    // Opening after an earlier run resets everything, so no stale data
    // leaks between sessions within the same page load.
    {
        let wizard = wizard.clone();
        let was_open = was_open.clone();
        use_effect_with_deps(
            move |open| {
                let mut was = was_open.borrow_mut();
                if *open && !*was {
                    let fresh = if wizard.step != WizardStep::MarketingStatus {
                        let fresh = WizardState::new();
                        wizard.set(fresh.clone());
                        fresh
                    } else {
                        (*wizard).clone()
                    };
                    analytics::push(&TrackingPayload::from_wizard(TrackingEvent::FormOpen, &fresh));
                    analytics::push(&TrackingPayload::from_wizard(
                        TrackingEvent::FormStepView,
                        &fresh,
                    ));
                }
                if !*open && *was {
                    analytics::push(&TrackingPayload::from_wizard(
                        TrackingEvent::FormClose,
                        &wizard,
                    ));
                }
                *was = *open;
                || ()
            },
            props.open,
        );
    }

    let choose_marketing = {
        let wizard = wizard.clone();
        move |has_marketing: bool| {
            let wizard = wizard.clone();
            Callback::from(move |_: MouseEvent| {
                let prev = (*wizard).clone();
                let mut next = prev.clone();
                next.choose_marketing(has_marketing);
                let mut payload =
                    TrackingPayload::from_wizard(TrackingEvent::FormStepChoice, &prev);
                payload.has_marketing = Some(has_marketing);
                analytics::push(&payload);
                analytics::push(&TrackingPayload::from_wizard(
                    TrackingEvent::FormStepView,
                    &next,
                ));
                wizard.set(next);
            })
        }
    };

    let choose_future_start = {
        let wizard = wizard.clone();
        move |choice: FutureStart| {
            let wizard = wizard.clone();
            Callback::from(move |_: MouseEvent| {
                let prev = (*wizard).clone();
                let mut next = prev.clone();
                next.select_future_start(choice);
                let mut payload =
                    TrackingPayload::from_wizard(TrackingEvent::FormStepChoice, &prev);
                payload.future_start = Some(choice);
                analytics::push(&payload);
                analytics::push(&TrackingPayload::from_wizard(
                    TrackingEvent::FormStepView,
                    &next,
                ));
                wizard.set(next);
            })
        }
    };

    let toggle_improvement = {
        let wizard = wizard.clone();
        move |improvement: Improvement| {
            let wizard = wizard.clone();
            Callback::from(move |_: MouseEvent| {
                let prev = (*wizard).clone();
                let mut next = prev.clone();
                next.toggle_improvement(improvement);
                let mut payload =
                    TrackingPayload::from_wizard(TrackingEvent::FormStepChoice, &prev);
                payload.improvements = next.improvements.clone();
                analytics::push(&payload);
                wizard.set(next);
            })
        }
    };

    let continue_improvements = {
        let wizard = wizard.clone();
        Callback::from(move |_: MouseEvent| {
            let prev = (*wizard).clone();
            let mut next = prev.clone();
            if !next.continue_from_improvements() {
                return;
            }
            analytics::push(&TrackingPayload::from_wizard(
                TrackingEvent::FormStepContinue,
                &prev,
            ));
            analytics::push(&TrackingPayload::from_wizard(
                TrackingEvent::FormStepView,
                &next,
            ));
            wizard.set(next);
        })
    };

    let choose_budget = {
        let wizard = wizard.clone();
        move |budget: Budget| {
            let wizard = wizard.clone();
            Callback::from(move |_: MouseEvent| {
                let prev = (*wizard).clone();
                let mut next = prev.clone();
                next.select_budget(budget);
                let mut payload =
                    TrackingPayload::from_wizard(TrackingEvent::FormStepChoice, &prev);
                payload.budget = Some(budget);
                analytics::push(&payload);
                analytics::push(&TrackingPayload::from_wizard(
                    TrackingEvent::FormStepView,
                    &next,
                ));
                wizard.set(next);
            })
        }
    };

    let go_back = {
        let wizard = wizard.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*wizard).clone();
            next.back();
            analytics::push(&TrackingPayload::from_wizard(
                TrackingEvent::FormStepView,
                &next,
            ));
            wizard.set(next);
        })
    };

    let onsubmit = {
        let wizard = wizard.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !wizard.can_submit() {
                return;
            }
            let mut submitting = (*wizard).clone();
            submitting.begin_submission();
            analytics::push(&TrackingPayload::from_wizard(
                TrackingEvent::FormSubmit,
                &submitting,
            ));
            let payload = submitting.payload();
            wizard.set(submitting.clone());

            let wizard = wizard.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let mut next = submitting;
                match send_contact_request(&payload).await {
                    Ok(()) => {
                        analytics::push(&TrackingPayload::from_wizard(
                            TrackingEvent::FormSubmitSuccess,
                            &next,
                        ));
                        next.finish_submission();
                        analytics::push(&TrackingPayload::from_wizard(
                            TrackingEvent::FormStepView,
                            &next,
                        ));
                    }
                    Err(message) => {
                        log!("Form submission error:", &message);
                        let mut payload =
                            TrackingPayload::from_wizard(TrackingEvent::FormSubmitError, &next);
                        payload.error_message = Some(message.clone());
                        analytics::push(&payload);
                        next.fail_submission(message);
                    }
                }
                wizard.set(next);
            });
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.open {
        return html! {};
    }

    let is_submitting = wizard.submission == SubmissionStatus::Submitting;

    let step_content = match wizard.step {
        WizardStep::MarketingStatus => html! {
            <div class="form-step">
                <h2 class="form-question">{"Betreiben Sie bereits Online Marketing?"}</h2>
                <p class="form-description">{"Wählen Sie die Option, die auf Sie zutrifft"}</p>
                <div class="choice-grid">
                    <button class="choice-button" onclick={choose_marketing(true)}>
                        <span class="choice-emoji">{"✅"}</span>
                        <span class="choice-text">{"Ja, bereits aktiv"}</span>
                    </button>
                    <button class="choice-button" onclick={choose_marketing(false)}>
                        <span class="choice-emoji">{"🚀"}</span>
                        <span class="choice-text">{"Nein, noch nicht"}</span>
                    </button>
                </div>
            </div>
        },
        WizardStep::FutureStart => html! {
            <div class="form-step">
                <button class="back-button" onclick={go_back.clone()}>{"← Zurück"}</button>
                <h2 class="form-question">{"Möchten Sie in naher Zukunft mit Online Marketing starten?"}</h2>
                <p class="form-description">{"Lassen Sie uns gemeinsam Ihre Strategie aufbauen"}</p>
                <div class="choice-grid">
                    {
                        FutureStart::ALL.iter().map(|choice| html! {
                            <button class="choice-button" onclick={choose_future_start(*choice)}>
                                <span class="choice-emoji">{choice.emoji()}</span>
                                <span class="choice-text">{choice.label()}</span>
                            </button>
                        }).collect::<Html>()
                    }
                </div>
            </div>
        },
        WizardStep::Improvements => html! {
            <div class="form-step">
                <button class="back-button" onclick={go_back.clone()}>{"← Zurück"}</button>
                <h2 class="form-question">{"Was möchten Sie optimieren?"}</h2>
                <p class="form-description">{"Wählen Sie alle Bereiche, die für Sie relevant sind"}</p>
                <div class="choice-grid">
                    {
                        Improvement::ALL.iter().map(|improvement| {
                            let selected = wizard.has_improvement(*improvement);
                            html! {
                                <button
                                    class={classes!("multi-choice-button", selected.then_some("selected"))}
                                    onclick={toggle_improvement(*improvement)}
                                >
                                    <span class="check-icon">{ if selected { "✓" } else { "" } }</span>
                                    <span class="choice-text">{improvement.label()}</span>
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
                <div class="continue-button">
                    <button
                        class="primary-button"
                        onclick={continue_improvements}
                        disabled={!wizard.can_continue_improvements()}
                    >
                        {"Weiter"}
                    </button>
                </div>
            </div>
        },
        WizardStep::Budget => html! {
            <div class="form-step">
                <button class="back-button" onclick={go_back.clone()}>{"← Zurück"}</button>
                <h2 class="form-question">{"Wie hoch ist Ihr monatliches Marketing-Budget?"}</h2>
                <p class="form-description">{"Damit können wir Ihnen die passende Lösung anbieten"}</p>
                <div class="choice-grid">
                    {
                        Budget::ALL.iter().map(|budget| {
                            let selected = wizard.budget == Some(*budget);
                            html! {
                                <button
                                    class={classes!("choice-button", selected.then_some("selected"))}
                                    onclick={choose_budget(*budget)}
                                >
                                    <span class="choice-text">{budget.label()}</span>
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
            </div>
        },
        WizardStep::ContactDetails => html! {
            <div class="form-step">
                <button class="back-button" onclick={go_back.clone()}>{"← Zurück"}</button>
                <h2 class="form-question">{"Wie können wir Sie erreichen?"}</h2>
                <p class="form-description">{"Ihre Daten werden vertraulich behandelt"}</p>
                <form onsubmit={onsubmit} class="contact-details-form">
                    <div class="form-group">
                        <label for="name">{"Name *"}</label>
                        <input
                            type="text"
                            id="name"
                            required={true}
                            value={wizard.name.clone()}
                            placeholder="Max Mustermann"
                            onchange={
                                let wizard = wizard.clone();
                                move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    let mut next = (*wizard).clone();
                                    next.name = input.value();
                                    wizard.set(next);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="company">{"Firmenname"}</label>
                        <input
                            type="text"
                            id="company"
                            value={wizard.company.clone()}
                            placeholder="Musterfirma GmbH"
                            onchange={
                                let wizard = wizard.clone();
                                move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    let mut next = (*wizard).clone();
                                    next.company = input.value();
                                    wizard.set(next);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="email">{"E-Mail *"}</label>
                        <input
                            type="email"
                            id="email"
                            required={true}
                            value={wizard.email.clone()}
                            placeholder="max@beispiel.de"
                            onchange={
                                let wizard = wizard.clone();
                                move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    let mut next = (*wizard).clone();
                                    next.email = input.value();
                                    wizard.set(next);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label for="phone">{"Telefon (optional)"}</label>
                        <input
                            type="tel"
                            id="phone"
                            value={wizard.phone.clone()}
                            placeholder="+49 123 456789"
                            onchange={
                                let wizard = wizard.clone();
                                move |e: Event| {
                                    let input: HtmlInputElement = e.target_unchecked_into();
                                    let mut next = (*wizard).clone();
                                    next.phone = input.value();
                                    wizard.set(next);
                                }
                            }
                        />
                    </div>
                    <div class="form-group">
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                required={true}
                                checked={wizard.privacy_accepted}
                                onchange={
                                    let wizard = wizard.clone();
                                    move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        let mut next = (*wizard).clone();
                                        next.privacy_accepted = input.checked();
                                        wizard.set(next);
                                    }
                                }
                            />
                            <span>
                                {"Ich habe die "}
                                <a
                                    href="https://www.franco-consulting.com/datenschutz"
                                    target="_blank"
                                    rel="noopener noreferrer"
                                    class="privacy-link"
                                >
                                    {"Datenschutzerklärung"}
                                </a>
                                {" gelesen und akzeptiere sie. *"}
                            </span>
                        </label>
                    </div>
                    {
                        if let SubmissionStatus::Error(message) = &wizard.submission {
                            html! {
                                <div class="error-message">
                                    <span>{"⚠️"}</span>
                                    <span>{message}</span>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <div class="submit-button">
                        <button type="submit" class="primary-button" disabled={is_submitting}>
                            { if is_submitting { "Wird gesendet..." } else { "Beratungsgespräch anfragen" } }
                        </button>
                    </div>
                </form>
            </div>
        },
        WizardStep::Success => html! {
            <div class="form-step">
                <div class="success">
                    <div class="success-icon">{"✓"}</div>
                    <h2 class="success-title">{"Vielen Dank für Ihre Anfrage!"}</h2>
                    <p class="success-text">{"Wir melden uns innerhalb von 24 Stunden bei Ihnen."}</p>
                    <div class="success-details">
                        <h3>{"Ihre Angaben:"}</h3>
                        <ul>
                            <li>
                                <strong>{"Marketing-Status: "}</strong>
                                { if wizard.has_marketing == Some(true) { "Bereits aktiv" } else { "Noch nicht gestartet" } }
                            </li>
                            {
                                if wizard.improvements.is_empty() {
                                    html! {}
                                } else {
                                    html! {
                                        <li>
                                            <strong>{"Optimierungswünsche: "}</strong>
                                            {
                                                wizard.improvements.iter()
                                                    .map(|improvement| improvement.label())
                                                    .collect::<Vec<_>>()
                                                    .join(", ")
                                            }
                                        </li>
                                    }
                                }
                            }
                            <li>
                                <strong>{"Budget: "}</strong>
                                { wizard.budget.map(|budget| budget.label()).unwrap_or_default() }
                            </li>
                            {
                                if wizard.company.is_empty() {
                                    html! {}
                                } else {
                                    html! {
                                        <li>
                                            <strong>{"Firma: "}</strong>
                                            { wizard.company.clone() }
                                        </li>
                                    }
                                }
                            }
                        </ul>
                    </div>
                </div>
            </div>
        },
    };

    html! {
        <div class="modal-overlay" onclick={close.clone()}>
            <div class="modal-content" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <button class="close-button" onclick={close} aria-label="Schließen">{"✕"}</button>
                <div class="form-wrapper">
                    <div class="form-progress">
                        <div class="progress-bar">
                            <div
                                class="progress-fill"
                                style={format!("width: {}%", (wizard.step.number() as u32) * 100 / 5)}
                            />
                        </div>
                        <p class="progress-text">
                            { format!("Schritt {} von 5", wizard.step.number()) }
                        </p>
                    </div>
                    { step_content }
                </div>
            </div>
        </div>
    }
}

//! State machine behind the multi-step contact modal.
//!
//! The wizard is a closed set of named steps instead of a bare step counter,
//! so unreachable (step, branch) combinations cannot be represented. Step
//! numbers only exist at the edges, for the progress display and the
//! tracking payload.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    MarketingStatus,
    FutureStart,
    Improvements,
    Budget,
    ContactDetails,
    Success,
}

impl WizardStep {
    /// Linear position shown as "Schritt X von 5"; both branches of the
    /// second screen share number 2.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::MarketingStatus => 1,
            WizardStep::FutureStart | WizardStep::Improvements => 2,
            WizardStep::Budget => 3,
            WizardStep::ContactDetails => 4,
            WizardStep::Success => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureStart {
    Asap,
    Planning,
    Exploring,
}

impl FutureStart {
    pub const ALL: [FutureStart; 3] = [
        FutureStart::Asap,
        FutureStart::Planning,
        FutureStart::Exploring,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FutureStart::Asap => "Ja, so bald wie möglich",
            FutureStart::Planning => "Ja, bin in der Planungsphase",
            FutureStart::Exploring => "Ich informiere mich erst mal",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            FutureStart::Asap => "🎯",
            FutureStart::Planning => "📊",
            FutureStart::Exploring => "💡",
        }
    }
}

// The wire keeps the historical union: literal `true` for "as soon as
// possible", string ids otherwise.
impl Serialize for FutureStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FutureStart::Asap => serializer.serialize_bool(true),
            FutureStart::Planning => serializer.serialize_str("planning"),
            FutureStart::Exploring => serializer.serialize_str("exploring"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Improvement {
    AccountCheck,
    MoreBookings,
    NoAgency,
    ConversionTracking,
    BetterCampaigns,
}

impl Improvement {
    pub const ALL: [Improvement; 5] = [
        Improvement::AccountCheck,
        Improvement::MoreBookings,
        Improvement::NoAgency,
        Improvement::ConversionTracking,
        Improvement::BetterCampaigns,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Improvement::AccountCheck => "account-check",
            Improvement::MoreBookings => "more-bookings",
            Improvement::NoAgency => "no-agency",
            Improvement::ConversionTracking => "conversion-tracking",
            Improvement::BetterCampaigns => "better-campaigns",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Improvement::AccountCheck => "Account Check",
            Improvement::MoreBookings => "Mehr Buchungen",
            Improvement::NoAgency => "Keine Agentur mehr",
            Improvement::ConversionTracking => "Conversion Tracking",
            Improvement::BetterCampaigns => "Bessere Kampagnen",
        }
    }
}

impl Serialize for Improvement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Under1000,
    From1000To3000,
    From3000To5000,
    From5000To10000,
    Over10000,
}

impl Budget {
    pub const ALL: [Budget; 5] = [
        Budget::Under1000,
        Budget::From1000To3000,
        Budget::From3000To5000,
        Budget::From5000To10000,
        Budget::Over10000,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Budget::Under1000 => "under-1000",
            Budget::From1000To3000 => "1000-3000",
            Budget::From3000To5000 => "3000-5000",
            Budget::From5000To10000 => "5000-10000",
            Budget::Over10000 => "over-10000",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Under1000 => "Unter 1.000€",
            Budget::From1000To3000 => "1.000€ - 3.000€",
            Budget::From3000To5000 => "3.000€ - 5.000€",
            Budget::From5000To10000 => "5.000€ - 10.000€",
            Budget::Over10000 => "Über 10.000€",
        }
    }
}

impl Serialize for Budget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub has_marketing: Option<bool>,
    pub future_start: Option<FutureStart>,
    pub improvements: Vec<Improvement>,
    pub budget: Option<Budget>,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub privacy_accepted: bool,
    pub submission: SubmissionStatus,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::MarketingStatus,
            has_marketing: None,
            future_start: None,
            improvements: Vec::new(),
            budget: None,
            name: String::new(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            privacy_accepted: false,
            submission: SubmissionStatus::Idle,
        }
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Which screen step 2 shows, derived from the step-1 answer.
    fn branch_step(&self) -> WizardStep {
        match self.has_marketing {
            Some(true) => WizardStep::Improvements,
            Some(false) => WizardStep::FutureStart,
            None => WizardStep::MarketingStatus,
        }
    }

    pub fn choose_marketing(&mut self, has_marketing: bool) {
        if self.step != WizardStep::MarketingStatus {
            return;
        }
        self.has_marketing = Some(has_marketing);
        self.step = self.branch_step();
    }

    pub fn select_future_start(&mut self, choice: FutureStart) {
        if self.step != WizardStep::FutureStart {
            return;
        }
        self.future_start = Some(choice);
        self.step = WizardStep::Budget;
    }

    pub fn toggle_improvement(&mut self, improvement: Improvement) {
        if self.step != WizardStep::Improvements {
            return;
        }
        if let Some(position) = self.improvements.iter().position(|i| *i == improvement) {
            self.improvements.remove(position);
        } else {
            self.improvements.push(improvement);
        }
    }

    pub fn has_improvement(&self, improvement: Improvement) -> bool {
        self.improvements.contains(&improvement)
    }

    pub fn can_continue_improvements(&self) -> bool {
        self.step == WizardStep::Improvements && !self.improvements.is_empty()
    }

    pub fn continue_from_improvements(&mut self) -> bool {
        if !self.can_continue_improvements() {
            return false;
        }
        self.step = WizardStep::Budget;
        true
    }

    pub fn select_budget(&mut self, budget: Budget) {
        if self.step != WizardStep::Budget {
            return;
        }
        self.budget = Some(budget);
        self.step = WizardStep::ContactDetails;
    }

    /// Leaving the budget screen always lands on the step-2 branch derived
    /// from `has_marketing`; every other step is a plain decrement.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Budget => self.branch_step(),
            WizardStep::ContactDetails => WizardStep::Budget,
            WizardStep::FutureStart | WizardStep::Improvements => WizardStep::MarketingStatus,
            step @ (WizardStep::MarketingStatus | WizardStep::Success) => step,
        };
    }

    /// Advisory gate for the submit button; the server re-validates.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::ContactDetails
            && !self.name.trim().is_empty()
            && email_looks_valid(&self.email)
            && self.privacy_accepted
            && self.submission != SubmissionStatus::Submitting
    }

    pub fn begin_submission(&mut self) {
        self.submission = SubmissionStatus::Submitting;
    }

    pub fn finish_submission(&mut self) {
        self.submission = SubmissionStatus::Success;
        self.step = WizardStep::Success;
    }

    /// Keeps every entered value so the user can retry in place.
    pub fn fail_submission(&mut self, message: String) {
        self.submission = SubmissionStatus::Error(message);
    }

    pub fn payload(&self) -> ContactPayload {
        ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
            phone: self.phone.clone(),
            has_marketing: self.has_marketing,
            future_start: self.future_start,
            improvements: self.improvements.clone(),
            budget: self.budget,
        }
    }
}

/// Mirrors the server's RFC-lite check: local part, `@`, a dotted domain,
/// no whitespace anywhere.
pub fn email_looks_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() => match domain.rsplit_once('.') {
            Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
            None => false,
        },
        _ => false,
    }
}

/// Wire format of `POST /api/contact`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub has_marketing: Option<bool>,
    pub future_start: Option<FutureStart>,
    pub improvements: Vec<Improvement>,
    pub budget: Option<Budget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_state() -> WizardState {
        let mut state = WizardState::new();
        state.choose_marketing(true);
        state.toggle_improvement(Improvement::AccountCheck);
        state.continue_from_improvements();
        state.select_budget(Budget::From1000To3000);
        state.name = "Max Mustermann".to_string();
        state.email = "max@beispiel.de".to_string();
        state.privacy_accepted = true;
        state
    }

    #[test]
    fn marketing_branch_selects_the_improvements_screen() {
        let mut state = WizardState::new();
        state.choose_marketing(true);
        assert_eq!(state.step, WizardStep::Improvements);
        assert_eq!(state.step.number(), 2);
        assert_eq!(state.has_marketing, Some(true));
    }

    #[test]
    fn no_marketing_branch_selects_the_future_start_screen() {
        let mut state = WizardState::new();
        state.choose_marketing(false);
        assert_eq!(state.step, WizardStep::FutureStart);
        assert_eq!(state.step.number(), 2);
    }

    #[test]
    fn future_start_choice_advances_to_budget() {
        let mut state = WizardState::new();
        state.choose_marketing(false);
        state.select_future_start(FutureStart::Planning);
        assert_eq!(state.step, WizardStep::Budget);
        assert_eq!(state.future_start, Some(FutureStart::Planning));
    }

    #[test]
    fn double_toggle_restores_the_improvement_set() {
        let mut state = WizardState::new();
        state.choose_marketing(true);
        state.toggle_improvement(Improvement::AccountCheck);
        let snapshot = state.improvements.clone();
        state.toggle_improvement(Improvement::MoreBookings);
        state.toggle_improvement(Improvement::MoreBookings);
        assert_eq!(state.improvements, snapshot);
    }

    #[test]
    fn continue_is_gated_on_a_non_empty_selection() {
        let mut state = WizardState::new();
        state.choose_marketing(true);
        assert!(!state.can_continue_improvements());
        assert!(!state.continue_from_improvements());
        assert_eq!(state.step, WizardStep::Improvements);

        state.toggle_improvement(Improvement::NoAgency);
        assert!(state.can_continue_improvements());
        assert!(state.continue_from_improvements());
        assert_eq!(state.step, WizardStep::Budget);
    }

    #[test]
    fn back_from_budget_returns_to_the_branch_screen() {
        let mut state = WizardState::new();
        state.choose_marketing(false);
        state.select_future_start(FutureStart::Asap);
        state.back();
        assert_eq!(state.step, WizardStep::FutureStart);

        let mut state = WizardState::new();
        state.choose_marketing(true);
        state.toggle_improvement(Improvement::AccountCheck);
        state.continue_from_improvements();
        state.back();
        assert_eq!(state.step, WizardStep::Improvements);
    }

    #[test]
    fn back_walks_the_remaining_steps_one_at_a_time() {
        let mut state = filled_state();
        assert_eq!(state.step, WizardStep::ContactDetails);
        state.back();
        assert_eq!(state.step, WizardStep::Budget);
        state.back();
        assert_eq!(state.step, WizardStep::Improvements);
        state.back();
        assert_eq!(state.step, WizardStep::MarketingStatus);
        state.back();
        assert_eq!(state.step, WizardStep::MarketingStatus);
    }

    #[test]
    fn back_is_ignored_on_the_success_screen() {
        let mut state = filled_state();
        state.begin_submission();
        state.finish_submission();
        state.back();
        assert_eq!(state.step, WizardStep::Success);
    }

    #[test]
    fn reset_restores_every_field() {
        let mut state = filled_state();
        state.fail_submission("kaputt".to_string());
        state.reset();
        assert_eq!(state, WizardState::default());
    }

    #[test]
    fn submit_gate_requires_name_email_and_privacy() {
        let mut state = filled_state();
        assert!(state.can_submit());

        state.privacy_accepted = false;
        assert!(!state.can_submit());
        state.privacy_accepted = true;

        state.email = "not-an-email".to_string();
        assert!(!state.can_submit());
        state.email = "max@beispiel.de".to_string();

        state.name = "   ".to_string();
        assert!(!state.can_submit());
        state.name = "Max".to_string();

        state.begin_submission();
        assert!(!state.can_submit());
    }

    #[test]
    fn failed_submission_keeps_the_entered_values() {
        let mut state = filled_state();
        state.begin_submission();
        state.fail_submission("Fehler beim Senden der Anfrage".to_string());
        assert_eq!(state.step, WizardStep::ContactDetails);
        assert_eq!(state.name, "Max Mustermann");
        assert_eq!(
            state.submission,
            SubmissionStatus::Error("Fehler beim Senden der Anfrage".to_string())
        );
        assert!(state.can_submit());
    }

    #[test]
    fn email_check_accepts_dotted_domains_only() {
        assert!(email_looks_valid("max@beispiel.de"));
        assert!(email_looks_valid("max.mustermann@mail.beispiel.de"));
        assert!(!email_looks_valid("not-an-email"));
        assert!(!email_looks_valid("max@beispiel"));
        assert!(!email_looks_valid("max@.de"));
        assert!(!email_looks_valid("max@beispiel."));
        assert!(!email_looks_valid("max mustermann@beispiel.de"));
        assert!(!email_looks_valid("@beispiel.de"));
    }

    #[test]
    fn payload_serializes_the_wire_union_for_future_start() {
        let mut state = WizardState::new();
        state.choose_marketing(false);
        state.select_future_start(FutureStart::Asap);
        let value = serde_json::to_value(state.payload()).unwrap();
        assert_eq!(value["futureStart"], serde_json::json!(true));
        assert_eq!(value["hasMarketing"], serde_json::json!(false));

        let mut state = WizardState::new();
        state.choose_marketing(false);
        state.select_future_start(FutureStart::Exploring);
        let value = serde_json::to_value(state.payload()).unwrap();
        assert_eq!(value["futureStart"], serde_json::json!("exploring"));
    }

    #[test]
    fn payload_serializes_improvement_and_budget_ids() {
        let state = filled_state();
        let value = serde_json::to_value(state.payload()).unwrap();
        assert_eq!(value["improvements"], serde_json::json!(["account-check"]));
        assert_eq!(value["budget"], serde_json::json!("1000-3000"));
        assert_eq!(value["name"], serde_json::json!("Max Mustermann"));
    }
}

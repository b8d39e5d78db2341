use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub on_contact: Callback<MouseEvent>,
}

/// Minimal hero shell; its only job is to hand visitors to the contact
/// wizard.
#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    html! {
        <main class="landing">
            <section class="hero">
                <h1 class="hero-title">
                    {"Die #1 Agentur für Hotel Mehr Buchungen mit Ads"}
                </h1>
                <p class="hero-subtitle">
                    {"Wir steigern Ihre Direktbuchungsquote und reduzieren Abhängigkeiten von \
                      Buchungsportalen – durch strategische Performance-Kampagnen mit nachweisbaren \
                      Ergebnissen"}
                </p>
                <button class="primary-button" onclick={props.on_contact.clone()}>
                    {"Kostenlose Beratung"}
                </button>
            </section>
        </main>
    }
}

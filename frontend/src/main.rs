use yew::prelude::*;
use log::Level;

mod config;
mod contact {
    pub mod analytics;
    pub mod form;
    pub mod state;
}
mod pages {
    pub mod landing;
}

use contact::form::ContactForm;
use pages::landing::Landing;

#[function_component(App)]
fn app() -> Html {
    let modal_open = use_state(|| false);

    let open_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: MouseEvent| modal_open.set(true))
    };
    let close_modal = {
        let modal_open = modal_open.clone();
        Callback::from(move |_: ()| modal_open.set(false))
    };

    html! {
        <>
            <Landing on_contact={open_modal} />
            <ContactForm open={*modal_open} on_close={close_modal} />
        </>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(Level::Info).expect("failed to initialize logging");
    yew::Renderer::<App>::new().render();
}

//! Flash notice shown after create, update and delete actions.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Post `message` and schedule its dismissal.
pub fn show_notice(ui: RwSignal<UiState>, message: &str) {
    let mut seq = 0;
    ui.update(|state| seq = state.show_notice(message));

    #[cfg(feature = "hydrate")]
    gloo_timers::callback::Timeout::new(crate::state::ui::NOTICE_TIMEOUT_MS, move || {
        ui.update(|state| {
            state.dismiss_notice(seq);
        });
    })
    .forget();

    #[cfg(not(feature = "hydrate"))]
    log::debug!("notice {seq} posted without a browser timer");
}

#[component]
pub fn Notice() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <Show when=move || ui.get().notice.is_some()>
            <div class="notice" role="status">
                {move || ui.get().notice.unwrap_or_default()}
            </div>
        </Show>
    }
}

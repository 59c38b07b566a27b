use leptos::*;
use walkmap_core::{entities::place::PlaceCandidate, screen::SuggestionField};

use super::AddressInput;

#[component]
pub fn RouteForm(
    start: RwSignal<String>,
    end: RwSignal<String>,
    start_suggestions: Signal<Vec<PlaceCandidate>>,
    end_suggestions: Signal<Vec<PlaceCandidate>>,
    loading: Signal<bool>,
    on_input: Callback<(SuggestionField, String)>,
    on_select: Callback<(SuggestionField, usize)>,
    on_submit: Callback<()>,
) -> impl IntoView {
    view! {
      <form
        class="route-form"
        on:submit=move |ev| {
          ev.prevent_default();
          on_submit.call(());
        }
      >
        <AddressInput
          value=start
          suggestions=start_suggestions
          placeholder="Start"
          on_input=Callback::new(move |text| on_input.call((SuggestionField::Start, text)))
          on_select=Callback::new(move |index| on_select.call((SuggestionField::Start, index)))
        />
        <AddressInput
          value=end
          suggestions=end_suggestions
          placeholder="Destination"
          on_input=Callback::new(move |text| on_input.call((SuggestionField::End, text)))
          on_select=Callback::new(move |index| on_select.call((SuggestionField::End, index)))
        />
        <button type="submit" disabled=move || loading.get()>"Walking route"</button>
        { move || loading.get().then(|| view! { <p class="loading">"Calculating route..."</p> }) }
      </form>
    }
}

use leptos::*;
use walkmap_core::entities::place::PlaceCandidate;

/// A text field with address suggestions below.
#[component]
pub fn AddressInput(
    value: RwSignal<String>,
    suggestions: Signal<Vec<PlaceCandidate>>,
    placeholder: &'static str,
    on_input: Callback<String>,
    on_select: Callback<usize>,
    #[prop(optional)] on_enter: Option<Callback<String>>,
) -> impl IntoView {
    view! {
      <div class="address-input">
        <input
          type="search"
          placeholder=placeholder
          prop:value=move || value.get()
          on:input=move |ev| {
            let text = event_target_value(&ev);
            value.set(text.clone());
            on_input.call(text);
          }
          on:keyup=move |ev| {
            ev.stop_propagation();
            match &*ev.key() {
              "Enter" => {
                if let Some(on_enter) = on_enter {
                  on_enter.call(value.get_untracked());
                }
              }
              "Escape" => {
                value.set(String::new());
                on_input.call(String::new());
              }
              _ => { /* nothing to do */ }
            }
          }
        />
        <ul class="suggestions">
          { move || suggestions.get()
              .into_iter()
              .enumerate()
              .map(|(index, place)| view! {
                <li on:click=move |_| on_select.call(index)>{ place.display_name }</li>
              })
              .collect_view()
          }
        </ul>
      </div>
    }
}

use leptos::*;
use walkmap_core::screen::Notice;

#[component]
pub fn NoticeBar(notice: Signal<Option<Notice>>, on_dismiss: Callback<()>) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            view! {
              <div class="notice" role="alert">
                <span>{ notice.to_string() }</span>
                <button on:click=move |_| on_dismiss.call(())>"OK"</button>
              </div>
            }
        })
    }
}

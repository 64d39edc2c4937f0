//! ヘッダーコンポーネント（リソースのタブ）

use leptos::prelude::*;
use lifeline_admin_common::ResourceKind;

#[component]
pub fn Header(active: RwSignal<ResourceKind>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Lifeline Admin"</h1>
            <nav class="tabs">
                {ResourceKind::ALL
                    .into_iter()
                    .map(|kind| {
                        view! {
                            <button
                                class=move || if active.get() == kind { "tab active" } else { "tab" }
                                on:click=move |_| active.set(kind)
                            >
                                {kind.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}

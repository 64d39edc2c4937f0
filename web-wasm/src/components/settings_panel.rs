//! 設定パネルコンポーネント

use leptos::prelude::*;

use crate::settings::{self, Backend};

/// 接続先の変更
///
/// APIルートは保存したときだけ `api_root` を更新する（入力中は再読み込みしない）。
/// 取得先は選んだ時点で切り替える。
#[component]
pub fn SettingsPanel(api_root: RwSignal<String>, backend: RwSignal<Backend>) -> impl IntoView {
    let (draft, set_draft) = signal(api_root.get_untracked());
    let (status, set_status) = signal(String::new());

    let on_save = move |_| match settings::save_api_root(&draft.get_untracked()) {
        Ok(root) => {
            set_draft.set(root.clone());
            api_root.set(root);
            set_status.set("保存しました".to_string());
        }
        Err(e) => set_status.set(e),
    };

    let on_reset = move |_| {
        settings::clear_api_root();
        let root = settings::load_api_root();
        set_draft.set(root.clone());
        api_root.set(root);
        set_status.set("既定値に戻しました".to_string());
    };

    let on_backend = move |ev: web_sys::Event| {
        let Some(selected) = Backend::parse(&event_target_value(&ev)) else {
            return;
        };
        if let Err(e) = settings::save_backend(selected) {
            set_status.set(e);
        }
        backend.set(selected);
    };

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="backend">"データの取得先"</label>
                <select id="backend" on:change=on_backend>
                    {Backend::ALL
                        .into_iter()
                        .map(|option| {
                            view! {
                                <option
                                    value=option.as_str()
                                    selected=move || backend.get() == option
                                >
                                    {option.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label for="api-root">"APIルート"</label>
                <input
                    type="url"
                    id="api-root"
                    placeholder="https://example.com/api"
                    disabled=move || backend.get() == Backend::Memory
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <div class="api-actions">
                    <button class="btn btn-primary btn-small" on:click=on_save>
                        "保存"
                    </button>
                    <button class="btn btn-tertiary btn-small" on:click=on_reset>
                        "既定値"
                    </button>
                </div>
                <div class="api-root-status">{move || status.get()}</div>
            </div>
        </div>
    }
}

//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップまたはクリックで1ファイルを選び、
//! data URL として読み込んで `Attachment` を渡す。

use leptos::prelude::*;
use lifeline_admin_common::Attachment;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader};

#[component]
pub fn UploadArea<F, FE>(
    accept: &'static str,
    preview: Signal<Option<String>>,
    on_file: F,
    on_error: FE,
) -> impl IntoView
where
    F: Fn(Attachment) + Clone + Send + Sync + 'static,
    FE: Fn(String) + Clone + Send + Sync + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let handle_files = move |files: FileList| {
        if let Some(file) = files.get(0) {
            read_file(file, on_file.clone(), on_error.clone());
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        // ファイル選択ダイアログを開く
        let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("input").ok())
            .and_then(|e| e.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        input.set_type("file");
        input.set_accept(&accept_attribute(accept));

        let handle_files = handle_files.clone();
        let picker = input.clone();
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(files) = picker.files() {
                handle_files(files);
            }
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
        input.click();
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <Show
                when=move || preview.get().is_some()
                fallback=|| view! {
                    <div class="upload-icon">"📷"</div>
                    <p>"画像をドラッグ&ドロップ または クリックして選択"</p>
                }
            >
                <img class="preview" src=move || preview.get().unwrap_or_default() alt="" />
                <p class="text-muted">"クリックして差し替え"</p>
            </Show>
        </div>
    }
}

/// 読み込みの失敗はすべて `on_error` に渡す
fn read_file<F, FE>(file: File, on_file: F, on_error: FE)
where
    F: Fn(Attachment) + 'static,
    FE: Fn(String) + Clone + 'static,
{
    let file_name = file.name();
    let Ok(reader) = FileReader::new() else {
        on_error(unreadable_message(&file_name));
        return;
    };

    let reader_clone = reader.clone();
    let name = file_name.clone();
    let on_load_error = on_error.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let data_url = reader_clone.result().ok().and_then(|r| r.as_string());
        match data_url.map(|url| Attachment::from_data_url(name.clone(), &url)) {
            Some(Ok(attachment)) => on_file(attachment),
            Some(Err(e)) => on_load_error(e.to_string()),
            None => on_load_error(unreadable_message(&name)),
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if reader.read_as_data_url(&file).is_err() {
        web_sys::console::warn_1(&format!("read_as_data_url failed: {}", file_name).into());
        on_error(unreadable_message(&file_name));
    }
}

fn unreadable_message(file_name: &str) -> String {
    format!("{} を読み込めません", file_name)
}

/// MIME接頭辞（"image/"）を accept 属性（"image/*"）に
fn accept_attribute(prefix: &str) -> String {
    if prefix.ends_with('/') {
        format!("{}*", prefix)
    } else {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_attribute() {
        assert_eq!(accept_attribute("image/"), "image/*");
        assert_eq!(accept_attribute("application/pdf"), "application/pdf");
    }

    #[test]
    fn test_unreadable_message_names_file() {
        assert_eq!(unreadable_message("photo.jpg"), "photo.jpg を読み込めません");
    }
}

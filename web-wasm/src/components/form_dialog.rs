//! 作成・編集ダイアログ
//!
//! 項目はスキーマから組み立てる。入力値の初期値は開いた時点の下書きで、
//! 以降の入力はそのまま `Page` の下書きへ書き戻す。

use leptos::prelude::*;
use lifeline_admin_common::{
    Attachment, AttachmentSpec, Category, FieldKind, FieldSpec, Mode, Page, Resource,
    ResourceService,
};

use crate::components::resource_page::dispatch;
use crate::components::upload_area::UploadArea;

pub fn form_dialog<R, S>(page: RwSignal<Page<R>>, service: S) -> impl IntoView
where
    R: Resource,
    S: ResourceService<R> + Clone + Send + Sync + 'static,
{
    // 開閉が変わったときだけ描き直す
    let mode = Memo::new(move |_| page.with(|p| p.editor().map(|e| e.mode)));

    move || {
        mode.get()
            .map(|mode| dialog_view(page, service.clone(), mode))
    }
}

fn dialog_view<R, S>(page: RwSignal<Page<R>>, service: S, mode: Mode) -> impl IntoView
where
    R: Resource,
    S: ResourceService<R> + Clone + Send + Sync + 'static,
{
    let schema = R::schema();
    let heading = match mode {
        Mode::Create => format!("{}の追加", R::KIND.title()),
        Mode::Update => format!("{}の編集", R::KIND.title()),
    };

    let error = move || page.with(|p| p.editor().and_then(|e| e.error.clone()));
    let submitting = move || page.with(|p| p.editor().is_some_and(|e| e.submitting));

    let on_submit = move |_| {
        if let Some(request) = page.try_update(|p| p.submit()).flatten() {
            dispatch(page, service.clone(), request);
        }
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog">
                <h2>{heading}</h2>
                {schema
                    .fields
                    .iter()
                    .map(|field| field_view(page, field))
                    .collect_view()}
                {schema.attachment.as_ref().map(|spec| attachment_view(page, spec))}
                {move || error().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="modal-actions">
                    <button
                        class="btn btn-tertiary"
                        on:click=move |_| page.update(|p| p.cancel_dialog())
                    >
                        "キャンセル"
                    </button>
                    <button class="btn btn-primary" disabled=submitting on:click=on_submit>
                        {move || if submitting() { "保存中..." } else { "保存" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn field_view<R: Resource>(page: RwSignal<Page<R>>, field: &'static FieldSpec) -> AnyView {
    let name = field.name;
    let initial = page.with_untracked(|p| {
        p.editor()
            .map(|e| e.draft.get(name).to_string())
            .unwrap_or_default()
    });
    let set = move |value: String| page.update(|p| p.set_field(name, value));
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    };

    let control = match field.kind {
        FieldKind::Multiline => view! {
            <textarea
                id=name
                rows="4"
                prop:value=initial
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Choice(choices) => {
            let options: Vec<(String, String)> = choices
                .iter()
                .map(|choice| (choice.to_string(), choice.to_string()))
                .collect();
            select_view(name, initial, Signal::derive(move || options.clone()), set)
        }
        FieldKind::Reference(_) => {
            // 読み込みが後から終わっても選択肢に反映する
            let options = Memo::new(move |_| page.with(|p| category_options(p.categories())));
            select_view(name, initial, options.into(), set)
        }
        kind => view! {
            <input
                type=input_type(kind)
                id=name
                prop:value=initial
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            {control}
        </div>
    }
    .into_any()
}

fn select_view<F>(
    name: &'static str,
    initial: String,
    options: Signal<Vec<(String, String)>>,
    on_change: F,
) -> AnyView
where
    F: Fn(String) + 'static,
{
    let placeholder_selected = initial.is_empty();
    view! {
        <select id=name on:change=move |ev| on_change(event_target_value(&ev))>
            <option value="" selected=placeholder_selected>"-- 選択してください --"</option>
            {move || {
                let initial = initial.clone();
                options
                    .get()
                    .into_iter()
                    .map(|(value, label)| {
                        let selected = value == initial;
                        view! { <option value=value selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
    .into_any()
}

/// カテゴリ選択肢（IDのないものは選べない）
fn category_options(categories: &[Category]) -> Vec<(String, String)> {
    categories
        .iter()
        .filter_map(|c| {
            let id = c.id.clone()?;
            let label = c.display_name().unwrap_or(&id).to_string();
            Some((id, label))
        })
        .collect()
}

fn attachment_view<R: Resource>(
    page: RwSignal<Page<R>>,
    spec: &'static AttachmentSpec,
) -> impl IntoView {
    let preview = Signal::derive(move || {
        page.with(|p| {
            p.editor()
                .and_then(|e| e.draft.preview())
                .map(str::to_string)
        })
    });
    let label = if spec.required {
        format!("{} *", spec.label)
    } else {
        spec.label.to_string()
    };

    let on_file = move |attachment: Attachment| {
        page.update(|p| {
            // 種類が違えばダイアログにエラーが出る
            let _ = p.attach(attachment);
        })
    };
    let on_error = move |message: String| page.update(|p| p.attachment_failed(message));

    view! {
        <div class="form-group">
            <label>{label}</label>
            <UploadArea accept=spec.accept preview=preview on_file=on_file on_error=on_error />
        </div>
    }
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Phone => "tel",
        FieldKind::Url => "url",
        FieldKind::Date => "date",
        _ => "text",
    }
}

//! リソース1種類分の一覧ページ
//!
//! 状態遷移は `Page` に任せ、ここでは通信の実行と描画だけを行う。
//! 通信先は `ResourceService` を実装していれば何でもよい。

use leptos::prelude::*;
use leptos::task::spawn_local;
use lifeline_admin_common::driver;
use lifeline_admin_common::{Category, Feedback, Page, Request, Resource, ResourceService};

use crate::components::feedback_banner::FeedbackBanner;
use crate::components::form_dialog::form_dialog;
use crate::components::record_table::RecordTable;

/// 一覧部分の表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Loading,
    Empty,
    Populated,
}

/// 要求を実行し、結果を `Page` に戻す（続く要求があれば続けて実行）
///
/// ページが破棄された後に届いた結果は捨てる。
pub(crate) fn dispatch<R, S>(page: RwSignal<Page<R>>, service: S, request: Request)
where
    R: Resource,
    S: ResourceService<R> + 'static,
{
    spawn_local(async move {
        let mut next = Some(request);
        while let Some(Request { ticket, effect }) = next.take() {
            let outcome = driver::execute(&service, effect).await;
            next = page.try_update(|p| p.apply(ticket, outcome)).flatten();
        }
    });
}

/// ギャラリーのカテゴリ名解決用
fn load_categories<R, C>(page: RwSignal<Page<R>>, categories: C)
where
    R: Resource,
    C: ResourceService<Category> + 'static,
{
    spawn_local(async move {
        match categories.list().await {
            Ok(list) => {
                page.try_update(|p| p.set_categories(list));
            }
            // 名前が引けなければIDのまま表示する
            Err(e) => web_sys::console::warn_1(&format!("カテゴリ取得失敗: {}", e).into()),
        }
    });
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn resource_page<R, S, C>(service: S, categories: C) -> impl IntoView
where
    R: Resource,
    S: ResourceService<R> + Clone + Send + Sync + 'static,
    C: ResourceService<Category> + 'static,
{
    let page = RwSignal::new(Page::<R>::new());

    if R::NEEDS_CATEGORIES {
        load_categories(page, categories);
    }
    if let Some(request) = page.try_update(|p| p.mount()) {
        dispatch(page, service.clone(), request);
    }

    let listing = Memo::new(move |_| {
        page.with(|p| {
            if p.is_loading() {
                Listing::Loading
            } else if p.records().is_empty() {
                Listing::Empty
            } else {
                Listing::Populated
            }
        })
    });
    let rows = Memo::new(move |_| page.with(|p| p.rows()));
    let feedback = Memo::new(move |_| page.with(|p| p.feedback().cloned()));

    let on_refresh = {
        let service = service.clone();
        move |_| {
            if let Some(request) = page.try_update(|p| p.refresh()) {
                dispatch(page, service.clone(), request);
            }
        }
    };

    let on_add = move |_| page.update(|p| p.open_create());

    let on_edit = move |id: String| {
        page.update(|p| {
            if let Err(e) = p.open_edit(&id) {
                p.notify(Feedback::error(e.to_string()));
            }
        })
    };

    let on_delete = {
        let service = service.clone();
        move |id: String| {
            if let Some(Err(e)) = page.try_update(|p| p.request_delete(&id)) {
                page.update(|p| p.notify(Feedback::error(e.to_string())));
                return;
            }
            if !confirm(&R::KIND.delete_prompt()) {
                page.update(|p| p.cancel_delete());
                return;
            }
            if let Some(request) = page.try_update(|p| p.confirm_delete()).flatten() {
                dispatch(page, service.clone(), request);
            }
        }
    };

    view! {
        <section class="resource-page">
            <div class="page-header">
                <h2>{R::KIND.title()}</h2>
                <div class="page-actions">
                    <button class="btn btn-secondary" on:click=on_refresh>
                        "再読み込み"
                    </button>
                    <button class="btn btn-primary" on:click=on_add>
                        "追加"
                    </button>
                </div>
            </div>

            <FeedbackBanner
                feedback=feedback.into()
                on_dismiss=move || page.update(|p| p.dismiss_feedback())
            />

            {move || match listing.get() {
                Listing::Loading => view! { <div class="loading">"読み込み中..."</div> }.into_any(),
                Listing::Empty => view! {
                    <div class="empty-state">
                        <p>{R::KIND.empty_message()}</p>
                    </div>
                }
                .into_any(),
                Listing::Populated => view! {
                    <RecordTable
                        columns=R::columns()
                        rows=rows.into()
                        editable=R::EDITABLE
                        on_edit=on_edit.clone()
                        on_delete=on_delete.clone()
                    />
                }
                .into_any(),
            }}

            {form_dialog(page, service)}
        </section>
    }
}

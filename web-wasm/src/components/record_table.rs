//! 一覧テーブル

use leptos::prelude::*;

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

#[component]
pub fn RecordTable<FE, FD>(
    columns: &'static [&'static str],
    rows: Signal<Vec<(String, Vec<String>)>>,
    editable: bool,
    on_edit: FE,
    on_delete: FD,
) -> impl IntoView
where
    FE: Fn(String) + Clone + Send + Sync + 'static,
    FD: Fn(String) + Clone + Send + Sync + 'static,
{
    view! {
        <table class="record-table">
            <thead>
                <tr>
                    <th>"ID"</th>
                    {columns.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                    <th class="actions"></th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    rows.get()
                        .into_iter()
                        .map(|(id, cells)| {
                            let edit_id = id.clone();
                            let delete_id = id.clone();
                            let on_edit = on_edit.clone();
                            let on_delete = on_delete.clone();
                            view! {
                                <tr>
                                    <td class="id">{id}</td>
                                    {cells.into_iter().map(cell_view).collect_view()}
                                    <td class="actions">
                                        {editable
                                            .then(|| {
                                                view! {
                                                    <button
                                                        class="btn btn-secondary btn-small"
                                                        on:click=move |_| on_edit(edit_id.clone())
                                                    >
                                                        "編集"
                                                    </button>
                                                }
                                            })}
                                        <button
                                            class="btn btn-tertiary btn-small"
                                            on:click=move |_| on_delete(delete_id.clone())
                                        >
                                            "削除"
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

fn cell_view(cell: String) -> AnyView {
    if is_image_url(&cell) {
        view! {
            <td>
                <img class="thumb" src=cell alt="" />
            </td>
        }
        .into_any()
    } else {
        view! { <td>{cell}</td> }.into_any()
    }
}

/// サムネイル表示するURLか
fn is_image_url(cell: &str) -> bool {
    let lower = cell.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    (lower.starts_with("http://") || lower.starts_with("https://"))
        && IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

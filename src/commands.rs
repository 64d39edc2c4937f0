//! サブコマンドの実装
//!
//! どのコマンドも `Page` を通して操作し、検証・フィードバック・再読み込みは
//! Web版と同じ状態遷移に従う。

use std::path::Path;

use dialoguer::Confirm;
use lifeline_admin_common::{
    driver, Category, Error, Page, Resource, ResourceService, Severity,
};

use crate::backend::Backend;
use crate::cli::parse_field;
use crate::console::{print_page, spinner};
use crate::error::{AdminError, Result};
use crate::files;

/// `ResourceKind` から具体的なレコード型を選んで本体を実行する
///
/// ```ignore
/// with_resource!(kind, |R| commands::list::<R>(&backend).await)
/// ```
#[macro_export]
macro_rules! with_resource {
    ($kind:expr, |$R:ident| $body:expr) => {{
        use lifeline_admin_common::ResourceKind;
        match $kind {
            ResourceKind::Video => {
                type $R = lifeline_admin_common::Video;
                $body
            }
            ResourceKind::Gallery => {
                type $R = lifeline_admin_common::GalleryPhoto;
                $body
            }
            ResourceKind::Category => {
                type $R = lifeline_admin_common::Category;
                $body
            }
            ResourceKind::Contact => {
                type $R = lifeline_admin_common::Contact;
                $body
            }
            ResourceKind::Location => {
                type $R = lifeline_admin_common::Location;
                $body
            }
            ResourceKind::PersonDetail => {
                type $R = lifeline_admin_common::PersonDetail;
                $body
            }
            ResourceKind::PressRelease => {
                type $R = lifeline_admin_common::PressRelease;
                $body
            }
            ResourceKind::SlideImage => {
                type $R = lifeline_admin_common::SlideImage;
                $body
            }
        }
    }};
}

/// 一覧（とギャラリー用のカテゴリ）を読み込む
pub async fn load<R, S>(page: &mut Page<R>, service: &S, backend: &Backend)
where
    R: Resource,
    S: ResourceService<R>,
{
    if R::NEEDS_CATEGORIES {
        match backend.service::<Category>().list().await {
            Ok(categories) => page.set_categories(categories),
            Err(e) => tracing::warn!(error = %e, "Failed to load categories"),
        }
    }

    let bar = spinner(format!("{} を読み込み中...", R::KIND.title()));
    let request = page.mount();
    driver::run(page, service, request).await;
    bar.finish_and_clear();
}

/// 一覧を表示
pub async fn list<R: Resource>(backend: &Backend) -> Result<()> {
    let service = backend.service::<R>();
    let mut page = Page::<R>::new();
    load(&mut page, &service, backend).await;
    report(&mut page)
}

/// 1件をJSONで表示
pub async fn show<R: Resource>(backend: &Backend, id: &str) -> Result<()> {
    let record: R = backend.service::<R>().get(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// 作成ダイアログを開き、値を埋めて保存
pub async fn create<R: Resource>(
    backend: &Backend,
    fields: &[String],
    file: Option<&Path>,
) -> Result<()> {
    let service = backend.service::<R>();
    let mut page = Page::<R>::new();
    if R::NEEDS_CATEGORIES {
        load(&mut page, &service, backend).await;
    }

    page.open_create();
    fill_draft(&mut page, fields, file)?;
    submit(&mut page, &service).await?;
    report(&mut page)
}

/// 既存レコードの編集ダイアログを開き、指定された値だけ上書きして保存
pub async fn update<R: Resource>(
    backend: &Backend,
    id: &str,
    fields: &[String],
    file: Option<&Path>,
) -> Result<()> {
    let service = backend.service::<R>();
    let mut page = Page::<R>::new();
    load(&mut page, &service, backend).await;
    ensure_loaded(&mut page)?;

    page.open_edit(id)?;
    fill_draft(&mut page, fields, file)?;
    submit(&mut page, &service).await?;
    report(&mut page)
}

/// 削除（`--yes` がなければ確認する）
pub async fn delete<R: Resource>(backend: &Backend, id: &str, yes: bool) -> Result<()> {
    let service = backend.service::<R>();
    let mut page = Page::<R>::new();
    load(&mut page, &service, backend).await;
    ensure_loaded(&mut page)?;

    page.request_delete(id)?;
    let confirmed = yes
        || Confirm::new()
            .with_prompt(R::KIND.delete_prompt())
            .default(false)
            .interact()?;

    if !confirmed {
        page.cancel_delete();
        println!("キャンセルしました");
        return Ok(());
    }

    if let Some(request) = page.confirm_delete() {
        let bar = spinner("削除中...");
        driver::run(&mut page, &service, request).await;
        bar.finish_and_clear();
    }
    report(&mut page)
}

/// `-f key=value` と `--file` を下書きに反映
pub fn fill_draft<R: Resource>(
    page: &mut Page<R>,
    fields: &[String],
    file: Option<&Path>,
) -> Result<()> {
    for arg in fields {
        let (key, value) =
            parse_field(arg).ok_or_else(|| AdminError::InvalidFieldArgument(arg.clone()))?;
        if R::schema().field(key).is_none() {
            let known: Vec<_> = R::schema().fields.iter().map(|f| f.name).collect();
            return Err(AdminError::InvalidFieldArgument(format!(
                "{}（{} の項目: {}）",
                key,
                R::KIND.name(),
                known.join(", ")
            )));
        }
        page.set_field(key, value);
    }

    if let Some(path) = file {
        let attachment = files::load_attachment(path)?;
        page.attach(attachment)?;
    }
    Ok(())
}

/// 保存を実行
///
/// 検証エラー・サーバーの拒否はダイアログに残ったエラーとして返す。
pub async fn submit<R, S>(page: &mut Page<R>, service: &S) -> Result<()>
where
    R: Resource,
    S: ResourceService<R>,
{
    let Some(request) = page.submit() else {
        return Err(dialog_error(page));
    };

    let bar = spinner("保存中...");
    driver::run(page, service, request).await;
    bar.finish_and_clear();

    match page.editor().and_then(|e| e.error.clone()) {
        Some(message) => Err(AdminError::Failed(message)),
        None => Ok(()),
    }
}

fn dialog_error<R: Resource>(page: &Page<R>) -> AdminError {
    let message = page
        .editor()
        .and_then(|e| e.error.clone())
        .unwrap_or_else(|| R::KIND.fallback_error_message());
    Error::invalid(message).into()
}

/// 読み込みに失敗していればエラー
fn ensure_loaded<R: Resource>(page: &mut Page<R>) -> Result<()> {
    match take_failure(page) {
        Some(message) => Err(AdminError::Failed(message)),
        None => Ok(()),
    }
}

fn take_failure<R: Resource>(page: &mut Page<R>) -> Option<String> {
    let message = page
        .feedback()
        .filter(|f| f.severity == Severity::Error)
        .map(|f| f.message.clone())?;
    page.dismiss_feedback();
    Some(message)
}

/// ページを表示し、エラーのフィードバックがあれば終了コードに反映
fn report<R: Resource>(page: &mut Page<R>) -> Result<()> {
    let failure = take_failure(page);
    print_page(page);
    match failure {
        Some(message) => Err(AdminError::Failed(message)),
        None => Ok(()),
    }
}

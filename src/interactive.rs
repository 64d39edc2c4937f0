//! 対話式ページ
//!
//! Web版と同じ一覧・追加・編集・削除の流れを端末上で行う。

use dialoguer::{Confirm, Input, Select};
use lifeline_admin_common::{
    driver, Draft, FieldKind, Page, Resource, ResourceService, Severity,
};

use crate::backend::Backend;
use crate::commands;
use crate::console::{format_feedback, print_page, spinner};
use crate::error::Result;
use crate::files;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Refresh,
    Add,
    Edit,
    Delete,
    Quit,
}

impl PageAction {
    pub fn label(&self) -> &'static str {
        match self {
            PageAction::Refresh => "再読み込み",
            PageAction::Add => "追加",
            PageAction::Edit => "編集",
            PageAction::Delete => "削除",
            PageAction::Quit => "終了",
        }
    }
}

/// 現在の状態で選べる操作
pub fn available_actions<R: Resource>(page: &Page<R>) -> Vec<PageAction> {
    let mut actions = vec![PageAction::Refresh, PageAction::Add];
    if !page.records().is_empty() {
        if R::EDITABLE {
            actions.push(PageAction::Edit);
        }
        actions.push(PageAction::Delete);
    }
    actions.push(PageAction::Quit);
    actions
}

pub async fn run_page<R: Resource>(backend: &Backend) -> Result<()> {
    let service = backend.service::<R>();
    let mut page = Page::<R>::new();
    commands::load(&mut page, &service, backend).await;

    loop {
        print_page(&page);
        page.dismiss_feedback();

        let actions = available_actions(&page);
        let labels: Vec<_> = actions.iter().map(PageAction::label).collect();
        let choice = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            PageAction::Refresh => {
                let bar = spinner("再読み込み中...");
                let request = page.refresh();
                driver::run(&mut page, &service, request).await;
                bar.finish_and_clear();
            }
            PageAction::Add => {
                page.open_create();
                edit_dialog(&mut page, &service).await?;
            }
            PageAction::Edit => {
                let Some(id) = pick_record(&page)? else { continue };
                page.open_edit(&id)?;
                edit_dialog(&mut page, &service).await?;
            }
            PageAction::Delete => {
                let Some(id) = pick_record(&page)? else { continue };
                page.request_delete(&id)?;
                let confirmed = Confirm::new()
                    .with_prompt(R::KIND.delete_prompt())
                    .default(false)
                    .interact()?;
                if !confirmed {
                    page.cancel_delete();
                    continue;
                }
                if let Some(request) = page.confirm_delete() {
                    let bar = spinner("削除中...");
                    driver::run(&mut page, &service, request).await;
                    bar.finish_and_clear();
                }
            }
            PageAction::Quit => break,
        }
    }

    Ok(())
}

/// 対象レコードを選ぶ（ESCでNone）
fn pick_record<R: Resource>(page: &Page<R>) -> Result<Option<String>> {
    let ctx = page.label_context();
    let records: Vec<_> = page
        .records()
        .iter()
        .filter_map(|r| r.id().map(|id| (id.to_string(), r)))
        .collect();
    let labels: Vec<String> = records
        .iter()
        .map(|(id, r)| format!("{} ({})", r.row(&ctx).join(" / "), id))
        .collect();

    let choice = Select::new()
        .with_prompt(format!("対象の{}", R::KIND.noun()))
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| records[i].0.clone()))
}

/// ダイアログの入力と保存
///
/// 失敗した場合は入力し直すか、破棄して閉じる。
async fn edit_dialog<R, S>(page: &mut Page<R>, service: &S) -> Result<()>
where
    R: Resource,
    S: ResourceService<R>,
{
    loop {
        let categories: Vec<(String, String)> = page
            .categories()
            .iter()
            .filter_map(|c| c.id.clone().map(|id| (id, c.label())))
            .collect();

        let Some(draft) = page.draft_mut() else {
            return Ok(());
        };
        prompt_fields::<R>(draft, &categories)?;

        let file = prompt_file::<R>(draft)?;
        if let Some(path) = file {
            let attached = files::load_attachment(std::path::Path::new(&path))
                .and_then(|attachment| Ok(page.attach(attachment)?));
            if let Err(e) = attached {
                println!("✖ {}", e);
                continue;
            }
        }

        if let Some(request) = page.submit() {
            let bar = spinner("保存中...");
            driver::run(page, service, request).await;
            bar.finish_and_clear();
        }

        let Some(error) = page.editor().and_then(|e| e.error.clone()) else {
            // 保存済み（フィードバックは一覧と一緒に表示）
            if let Some(feedback) = page.feedback().filter(|f| f.severity == Severity::Error) {
                println!("{}", format_feedback(feedback));
            }
            return Ok(());
        };

        println!("✖ {}", error);
        let retry = Confirm::new()
            .with_prompt("入力し直しますか？")
            .default(true)
            .interact()?;
        if !retry {
            page.cancel_dialog();
            return Ok(());
        }
    }
}

fn prompt_fields<R: Resource>(draft: &mut Draft, categories: &[(String, String)]) -> Result<()> {
    for field in R::schema().fields {
        let current = draft.get(field.name).to_string();
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.to_string()
        };

        let value = match field.kind {
            FieldKind::Choice(options) => {
                let default = options.iter().position(|o| *o == current).unwrap_or(0);
                let index = Select::new()
                    .with_prompt(label)
                    .items(options)
                    .default(default)
                    .interact()?;
                options[index].to_string()
            }
            FieldKind::Reference(_) if !categories.is_empty() => {
                let labels: Vec<&str> = categories.iter().map(|(_, l)| l.as_str()).collect();
                let default = categories
                    .iter()
                    .position(|(id, _)| *id == current)
                    .unwrap_or(0);
                let index = Select::new()
                    .with_prompt(label)
                    .items(&labels)
                    .default(default)
                    .interact()?;
                categories[index].0.clone()
            }
            _ => Input::<String>::new()
                .with_prompt(label)
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()?,
        };
        draft.set(field.name, value);
    }
    Ok(())
}

/// 添付ファイルのパス（空なら現在の画像を維持）
fn prompt_file<R: Resource>(draft: &Draft) -> Result<Option<String>> {
    let Some(spec) = R::schema().attachment else {
        return Ok(None);
    };

    let hint = match draft.preview() {
        Some(url) if url.starts_with("data:") => "選択済み".to_string(),
        Some(url) => url.to_string(),
        None => "未選択".to_string(),
    };
    let path: String = Input::new()
        .with_prompt(format!("{} のファイルパス（現在: {}）", spec.label, hint))
        .allow_empty(true)
        .interact_text()?;

    let path = path.trim();
    Ok(if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_admin_common::{Category, Contact, Outcome};

    #[test]
    fn test_actions_for_empty_page() {
        let page = Page::<Category>::new();
        assert_eq!(
            available_actions(&page),
            vec![PageAction::Refresh, PageAction::Add, PageAction::Quit]
        );
    }

    #[test]
    fn test_contact_cannot_be_edited() {
        let mut page = Page::<Contact>::new();
        let request = page.mount();
        page.apply(
            request.ticket,
            Outcome::Loaded(Ok(vec![Contact {
                id: Some("1".into()),
                name: "Ana".into(),
                ..Default::default()
            }])),
        );
        let actions = available_actions(&page);
        assert!(!actions.contains(&PageAction::Edit));
        assert!(actions.contains(&PageAction::Delete));
    }
}

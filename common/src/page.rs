//! 一覧・詳細ページの状態機械
//!
//! UIから独立した同期的な状態遷移のみを持つ。
//! 通信が必要な操作は `Request`（チケット + `Effect`）を返し、
//! 結果は `apply` に `Outcome` として戻す。非同期実行は `driver` が担う。
//!
//! ```text
//! mount/refresh ─→ Load ─→ Loaded ─→ Empty | Populated
//! open_create/open_edit ─→ Editing ─ submit ─→ Create/Update ─→ Saved ─→ reload
//! request_delete ─→ PendingDelete ─ confirm ─→ Delete ─→ Deleted ─→ reload
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::draft::{Attachment, Draft};
use crate::error::{Error, Result};
use crate::kind::ResourceKind;
use crate::payload::{self, Mode, Payload};
use crate::resource::{LabelContext, Resource};
use crate::types::Category;

/// フィードバックの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// 画面上部に出す通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub severity: Severity,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// 画面の状態（表示の分岐に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Empty,
    Loading,
    Populated,
    Editing,
    PendingDelete,
}

/// 発行した要求の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// サービスに対して行う操作
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Load,
    Create(Payload),
    Update { id: String, payload: Payload },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub ticket: Ticket,
    pub effect: Effect,
}

/// サービス呼び出しの結果
#[derive(Debug)]
pub enum Outcome<R> {
    Loaded(Result<Vec<R>>),
    Saved(Result<Value>),
    Deleted(Result<Value>),
}

/// 作成・編集ダイアログ
#[derive(Debug, Clone)]
pub struct Editor {
    pub mode: Mode,
    /// 編集対象のID（作成時はNone）
    pub target: Option<String>,
    pub draft: Draft,
    /// ダイアログ内に表示するエラー
    pub error: Option<String>,
    pub submitting: bool,
    epoch: u64,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Load,
    Save { epoch: u64, mode: Mode },
    Delete,
}

pub struct Page<R: Resource> {
    records: Vec<R>,
    categories: Vec<Category>,
    loading: bool,
    feedback: Option<Feedback>,
    editor: Option<Editor>,
    pending_delete: Option<String>,
    next_ticket: u64,
    next_epoch: u64,
    latest_load: Option<Ticket>,
    in_flight: HashMap<Ticket, Pending>,
}

impl<R: Resource> Default for Page<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> Page<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            categories: Vec::new(),
            loading: false,
            feedback: None,
            editor: None,
            pending_delete: None,
            next_ticket: 1,
            next_epoch: 1,
            latest_load: None,
            in_flight: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // 参照
    // ------------------------------------------------------------------

    pub fn state(&self) -> PageState {
        if self.pending_delete.is_some() {
            PageState::PendingDelete
        } else if self.editor.is_some() {
            PageState::Editing
        } else if self.loading {
            PageState::Loading
        } else if self.records.is_empty() {
            PageState::Empty
        } else {
            PageState::Populated
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    /// 画面側で起きたエラー（編集対象なしなど）の表示
    pub fn notify(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// ギャラリーのカテゴリ選択肢・表示名に使う一覧
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn label_context(&self) -> LabelContext<'_> {
        LabelContext {
            categories: &self.categories,
        }
    }

    /// 一覧表示用の行（IDと表示列）
    pub fn rows(&self) -> Vec<(String, Vec<String>)> {
        let ctx = self.label_context();
        self.records
            .iter()
            .map(|r| (r.id().unwrap_or_default().to_string(), r.row(&ctx)))
            .collect()
    }

    // ------------------------------------------------------------------
    // 読み込み
    // ------------------------------------------------------------------

    /// 初回表示
    pub fn mount(&mut self) -> Request {
        self.refresh()
    }

    /// 再読み込み（以前の読み込み結果は破棄される）
    pub fn refresh(&mut self) -> Request {
        self.loading = true;
        let ticket = self.issue(Pending::Load);
        self.latest_load = Some(ticket);
        Request {
            ticket,
            effect: Effect::Load,
        }
    }

    // ------------------------------------------------------------------
    // ダイアログ
    // ------------------------------------------------------------------

    pub fn open_create(&mut self) {
        let epoch = self.next_epoch();
        self.editor = Some(Editor {
            mode: Mode::Create,
            target: None,
            draft: Draft::new(),
            error: None,
            submitting: false,
            epoch,
        });
    }

    /// 既存レコードの編集を開始
    pub fn open_edit(&mut self, id: &str) -> Result<()> {
        if !R::EDITABLE {
            return Err(Error::invalid(format!(
                "{} entries cannot be edited",
                R::KIND.subject()
            )));
        }
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::invalid(R::KIND.id_required_message()));
        }
        let draft = self
            .record(id)
            .map(Resource::to_draft)
            .ok_or_else(|| Error::invalid(R::KIND.not_found_message()))?;

        let epoch = self.next_epoch();
        self.editor = Some(Editor {
            mode: Mode::Update,
            target: Some(id.to_string()),
            draft,
            error: None,
            submitting: false,
            epoch,
        });
        Ok(())
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.editor.as_mut().map(|e| &mut e.draft)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.draft.set(name, value);
        }
    }

    /// ファイル選択
    ///
    /// 種類が合わなければダイアログにエラーを出し、下書きは変更しない。
    pub fn attach(&mut self, attachment: Attachment) -> Result<()> {
        let Some(editor) = self.editor.as_mut() else {
            return Err(Error::invalid("No dialog is open"));
        };
        if let Err(e) = R::schema().check_attachment(&attachment) {
            editor.error = Some(e.to_string());
            return Err(e);
        }
        editor.error = None;
        editor.draft.attach(attachment);
        Ok(())
    }

    /// ファイルを読めなかったことをダイアログに出す（閉じていればフィードバックに）
    pub fn attachment_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(resource = %R::KIND, %message, "Attachment unreadable");
        match self.editor.as_mut() {
            Some(editor) => editor.error = Some(message),
            None => self.feedback = Some(Feedback::error(message)),
        }
    }

    /// 下書きを破棄して閉じる（通信なし）
    pub fn cancel_dialog(&mut self) {
        self.editor = None;
    }

    /// 保存
    ///
    /// 検証に失敗した場合はダイアログにエラーを出して `None`。
    /// 送信中の再送信も `None`。
    pub fn submit(&mut self) -> Option<Request> {
        let editor = self.editor.as_mut()?;
        if editor.submitting {
            return None;
        }

        if let Err(e) = R::schema().validate(&editor.draft) {
            editor.error = Some(e.to_string());
            return None;
        }

        let payload = payload::build(R::schema(), &editor.draft, editor.mode);
        let effect = match (editor.mode, &editor.target) {
            (Mode::Update, Some(id)) => Effect::Update {
                id: id.clone(),
                payload,
            },
            _ => Effect::Create(payload),
        };
        editor.submitting = true;
        editor.error = None;
        let pending = Pending::Save {
            epoch: editor.epoch,
            mode: editor.mode,
        };

        let ticket = self.issue(pending);
        Some(Request { ticket, effect })
    }

    // ------------------------------------------------------------------
    // 削除
    // ------------------------------------------------------------------

    /// 削除確認を開始
    pub fn request_delete(&mut self, id: &str) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::invalid(R::KIND.id_required_message()));
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<Request> {
        let id = self.pending_delete.take()?;
        let ticket = self.issue(Pending::Delete);
        Some(Request {
            ticket,
            effect: Effect::Delete { id },
        })
    }

    // ------------------------------------------------------------------
    // 結果の反映
    // ------------------------------------------------------------------

    /// サービスの結果を反映し、必要なら続く要求（再読み込み）を返す
    pub fn apply(&mut self, ticket: Ticket, outcome: Outcome<R>) -> Option<Request> {
        let Some(pending) = self.in_flight.remove(&ticket) else {
            tracing::warn!(resource = %R::KIND, ?ticket, "Outcome for unknown ticket");
            return None;
        };

        match (pending, outcome) {
            (Pending::Load, Outcome::Loaded(result)) => {
                self.apply_load(ticket, result);
                None
            }
            (Pending::Save { epoch, mode }, Outcome::Saved(result)) => {
                self.apply_save(epoch, mode, result)
            }
            (Pending::Delete, Outcome::Deleted(result)) => self.apply_delete(result),
            (pending, outcome) => {
                tracing::warn!(resource = %R::KIND, ?pending, ?outcome, "Mismatched outcome");
                None
            }
        }
    }

    fn apply_load(&mut self, ticket: Ticket, result: Result<Vec<R>>) {
        if self.latest_load != Some(ticket) {
            tracing::debug!(resource = %R::KIND, ?ticket, "Discarding superseded load");
            return;
        }
        self.latest_load = None;
        self.loading = false;

        match result {
            Ok(records) => {
                tracing::debug!(resource = %R::KIND, count = records.len(), "Loaded");
                self.records = records;
            }
            Err(e) => {
                tracing::warn!(resource = %R::KIND, error = %e, "Load failed");
                self.feedback = Some(Feedback::error(e.to_string()));
            }
        }
    }

    fn apply_save(&mut self, epoch: u64, mode: Mode, result: Result<Value>) -> Option<Request> {
        let current = self.editor.as_ref().is_some_and(|e| e.epoch == epoch);

        match result {
            Ok(_) => {
                if current {
                    self.editor = None;
                } else {
                    // ダイアログは閉じられているが、サーバー側は変更済み
                    tracing::debug!(resource = %R::KIND, "Save finished after dialog closed");
                }
                self.feedback = Some(Feedback::success(saved_message::<R>(mode)));
                Some(self.refresh())
            }
            Err(e) => {
                match self.editor.as_mut().filter(|_| current) {
                    Some(editor) => {
                        tracing::warn!(resource = %R::KIND, error = %e, "Save rejected");
                        editor.submitting = false;
                        editor.error = Some(e.to_string());
                    }
                    None => {
                        tracing::warn!(resource = %R::KIND, error = %e, "Dropping stale save failure");
                    }
                }
                None
            }
        }
    }

    fn apply_delete(&mut self, result: Result<Value>) -> Option<Request> {
        match result {
            Ok(_) => {
                self.feedback = Some(Feedback::success(removed_message::<R>()));
                Some(self.refresh())
            }
            Err(e) => {
                tracing::warn!(resource = %R::KIND, error = %e, "Delete rejected");
                self.feedback = Some(Feedback::error(e.to_string()));
                None
            }
        }
    }

    fn issue(&mut self, pending: Pending) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight.insert(ticket, pending);
        ticket
    }

    fn next_epoch(&mut self) -> u64 {
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        epoch
    }
}

// 人物詳細と連絡先は画面ごとの既存文言に合わせる
fn saved_message<R: Resource>(mode: Mode) -> String {
    match (R::KIND, mode) {
        (ResourceKind::PersonDetail, Mode::Create) => "Person detail added successfully".into(),
        (ResourceKind::PersonDetail, Mode::Update) => "Person detail updated successfully".into(),
        (ResourceKind::Contact, Mode::Create) => "Contact entry added successfully.".into(),
        (kind, Mode::Create) => format!("{} added successfully.", kind.subject()),
        (kind, Mode::Update) => format!("{} updated successfully.", kind.subject()),
    }
}

fn removed_message<R: Resource>() -> String {
    match R::KIND {
        ResourceKind::PersonDetail => "Person detail deleted successfully".into(),
        kind => format!("{} removed successfully.", kind.subject()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Contact, Location, PersonDetail};

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: Some(id.to_string()),
            categoryname: name.to_string(),
            ..Default::default()
        }
    }

    fn loaded(page: &mut Page<Category>, records: Vec<Category>) {
        let request = page.mount();
        page.apply(request.ticket, Outcome::Loaded(Ok(records)));
    }

    #[test]
    fn test_initial_state_is_empty() {
        let page = Page::<Category>::new();
        assert_eq!(page.state(), PageState::Empty);
        assert!(page.feedback().is_none());
    }

    #[test]
    fn test_mount_sets_loading() {
        let mut page = Page::<Category>::new();
        let request = page.mount();
        assert_eq!(request.effect, Effect::Load);
        assert_eq!(page.state(), PageState::Loading);

        page.apply(request.ticket, Outcome::Loaded(Ok(vec![category("c1", "A")])));
        assert_eq!(page.state(), PageState::Populated);
        assert_eq!(page.rows(), vec![("c1".to_string(), vec!["A".to_string()])]);
    }

    #[test]
    fn test_only_latest_load_clears_loading() {
        let mut page = Page::<Category>::new();
        let first = page.mount();
        let second = page.refresh();

        page.apply(second.ticket, Outcome::Loaded(Ok(vec![category("c2", "New")])));
        assert!(!page.is_loading());

        // 遅れて届いた古い結果は無視
        page.apply(first.ticket, Outcome::Loaded(Ok(vec![category("c1", "Old")])));
        assert_eq!(page.records().len(), 1);
        assert_eq!(page.records()[0].label(), "New");
    }

    #[test]
    fn test_superseded_load_keeps_loading() {
        let mut page = Page::<Category>::new();
        let first = page.mount();
        let _second = page.refresh();

        page.apply(first.ticket, Outcome::Loaded(Ok(vec![category("c1", "Old")])));
        assert!(page.is_loading());
        assert!(page.records().is_empty());
    }

    #[test]
    fn test_load_failure_keeps_previous_records() {
        let mut page = Page::<Category>::new();
        loaded(&mut page, vec![category("c1", "Kept")]);

        let request = page.refresh();
        page.apply(
            request.ticket,
            Outcome::Loaded(Err(Error::Transport("offline".into()))),
        );
        assert_eq!(page.records().len(), 1);
        let feedback = page.feedback().unwrap();
        assert_eq!(feedback.severity, Severity::Error);
        assert!(feedback.message.contains("offline"));
    }

    #[test]
    fn test_submit_with_missing_field_stays_open() {
        let mut page = Page::<Contact>::new();
        page.open_create();
        page.set_field("name", "Ana");
        page.set_field("email", "ana@example.com");
        page.set_field("phone", "555");
        page.set_field("message", "Hello");

        assert!(page.submit().is_none());
        let editor = page.editor().unwrap();
        assert_eq!(editor.error.as_deref(), Some("All fields are required."));
        assert!(!editor.submitting);
        assert_eq!(page.state(), PageState::Editing);
    }

    #[test]
    fn test_invalid_url_never_submits() {
        let mut page = Page::<Location>::new();
        page.open_create();
        page.set_field("link", "not-a-url");
        assert!(page.submit().is_none());
        assert_eq!(
            page.editor().unwrap().error.as_deref(),
            Some("Please enter a valid URL")
        );
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut page = Page::<Category>::new();
        page.open_create();
        page.set_field("categoryname", "Banners");
        assert!(page.submit().is_some());
        assert!(page.submit().is_none());
    }

    #[test]
    fn test_successful_create_closes_and_reloads() {
        let mut page = Page::<Category>::new();
        page.open_create();
        page.set_field("categoryname", "Banners");
        let request = page.submit().unwrap();
        match &request.effect {
            Effect::Create(payload) => assert_eq!(payload.get("categoryname"), Some("Banners")),
            other => panic!("unexpected effect: {:?}", other),
        }

        let follow_up = page
            .apply(request.ticket, Outcome::Saved(Ok(Value::Null)))
            .expect("reload");
        assert_eq!(follow_up.effect, Effect::Load);
        assert!(page.editor().is_none());
        assert_eq!(
            page.feedback(),
            Some(&Feedback::success("Category added successfully."))
        );
    }

    #[test]
    fn test_success_messages_follow_each_screen() {
        assert_eq!(
            saved_message::<PersonDetail>(Mode::Update),
            "Person detail updated successfully"
        );
        assert_eq!(
            saved_message::<PersonDetail>(Mode::Create),
            "Person detail added successfully"
        );
        assert_eq!(removed_message::<PersonDetail>(), "Person detail deleted successfully");
        assert_eq!(
            saved_message::<Contact>(Mode::Create),
            "Contact entry added successfully."
        );
        assert_eq!(removed_message::<Contact>(), "Contact removed successfully.");
        assert_eq!(saved_message::<Location>(Mode::Update), "Location updated successfully.");
    }

    #[test]
    fn test_unreadable_attachment_is_shown_in_dialog() {
        let mut page = Page::<Category>::new();
        page.attachment_failed("a.png could not be read");
        assert_eq!(
            page.feedback(),
            Some(&Feedback::error("a.png could not be read"))
        );

        page.dismiss_feedback();
        page.open_create();
        page.attachment_failed("b.png could not be read");
        assert_eq!(
            page.editor().unwrap().error.as_deref(),
            Some("b.png could not be read")
        );
        assert!(page.feedback().is_none());
    }

    #[test]
    fn test_failed_save_keeps_dialog_with_error() {
        let mut page = Page::<Category>::new();
        page.open_create();
        page.set_field("categoryname", "Dup");
        let request = page.submit().unwrap();

        let follow_up = page.apply(
            request.ticket,
            Outcome::Saved(Err(Error::rejection(409, "Category already exists"))),
        );
        assert!(follow_up.is_none());
        let editor = page.editor().unwrap();
        assert_eq!(editor.error.as_deref(), Some("Category already exists"));
        assert!(!editor.submitting);
        assert_eq!(editor.draft.get("categoryname"), "Dup");
    }

    #[test]
    fn test_stale_save_does_not_touch_new_dialog() {
        let mut page = Page::<Category>::new();
        page.open_create();
        page.set_field("categoryname", "First");
        let request = page.submit().unwrap();

        page.cancel_dialog();
        page.open_create();
        page.set_field("categoryname", "Second");

        let follow_up = page.apply(
            request.ticket,
            Outcome::Saved(Err(Error::rejection(500, "boom"))),
        );
        assert!(follow_up.is_none());
        let editor = page.editor().unwrap();
        assert_eq!(editor.error, None);
        assert_eq!(editor.draft.get("categoryname"), "Second");
    }

    #[test]
    fn test_stale_save_success_still_reloads() {
        let mut page = Page::<Category>::new();
        page.open_create();
        page.set_field("categoryname", "First");
        let request = page.submit().unwrap();
        page.cancel_dialog();

        let follow_up = page.apply(request.ticket, Outcome::Saved(Ok(Value::Null)));
        assert_eq!(follow_up.map(|r| r.effect), Some(Effect::Load));
        assert!(page.editor().is_none());
    }

    #[test]
    fn test_edit_prefills_draft_and_emits_update() {
        let mut page = Page::<Category>::new();
        loaded(&mut page, vec![category("c1", "Old")]);

        page.open_edit("c1").unwrap();
        assert_eq!(page.editor().unwrap().draft.get("categoryname"), "Old");
        page.set_field("categoryname", "New");

        let request = page.submit().unwrap();
        match request.effect {
            Effect::Update { id, payload } => {
                assert_eq!(id, "c1");
                assert_eq!(payload.get("categoryname"), Some("New"));
            }
            other => panic!("unexpected effect: {:?}", other),
        }
    }

    #[test]
    fn test_edit_errors() {
        let mut page = Page::<Category>::new();
        assert!(page.open_edit("").unwrap_err().is_invalid_argument());
        assert_eq!(
            page.open_edit("missing").unwrap_err().to_string(),
            "Category not found"
        );

        let mut contacts = Page::<Contact>::new();
        assert!(contacts.open_edit("x").is_err());
    }

    #[test]
    fn test_delete_confirm_and_cancel() {
        let mut page = Page::<Category>::new();
        loaded(&mut page, vec![category("c1", "A")]);

        assert!(page.request_delete("").is_err());
        assert_eq!(page.state(), PageState::Populated);

        page.request_delete("c1").unwrap();
        assert_eq!(page.state(), PageState::PendingDelete);
        page.cancel_delete();
        assert_eq!(page.state(), PageState::Populated);
        assert!(page.confirm_delete().is_none());

        page.request_delete("c1").unwrap();
        let request = page.confirm_delete().unwrap();
        assert_eq!(request.effect, Effect::Delete { id: "c1".into() });

        let follow_up = page.apply(request.ticket, Outcome::Deleted(Ok(Value::Null)));
        assert_eq!(follow_up.map(|r| r.effect), Some(Effect::Load));
        assert_eq!(
            page.feedback().unwrap().message,
            "Category removed successfully."
        );
    }

    #[test]
    fn test_delete_failure_is_feedback() {
        let mut page = Page::<Category>::new();
        loaded(&mut page, vec![category("c1", "A")]);
        page.request_delete("c1").unwrap();
        let request = page.confirm_delete().unwrap();

        let follow_up = page.apply(
            request.ticket,
            Outcome::Deleted(Err(Error::rejection(404, "Category not found"))),
        );
        assert!(follow_up.is_none());
        assert_eq!(page.records().len(), 1);
        assert_eq!(page.feedback().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_attach_rejects_wrong_type() {
        let mut page = Page::<crate::types::SlideImage>::new();
        page.open_create();
        let result = page.attach(Attachment::new("a.txt", "text/plain", vec![1]));
        assert!(result.is_err());
        let editor = page.editor().unwrap();
        assert_eq!(
            editor.error.as_deref(),
            Some("Please select a valid image file.")
        );
        assert!(editor.draft.attachment().is_none());

        page.attach(Attachment::new("a.png", "image/png", vec![1]))
            .unwrap();
        assert!(page.editor().unwrap().draft.preview().is_some());
    }

    #[test]
    fn test_unknown_ticket_is_ignored() {
        let mut page = Page::<Category>::new();
        let request = page.mount();
        page.apply(request.ticket, Outcome::Loaded(Ok(vec![])));
        assert!(page
            .apply(request.ticket, Outcome::Loaded(Ok(vec![category("c1", "A")])))
            .is_none());
        assert!(page.records().is_empty());
    }

    #[test]
    fn test_notify_and_dismiss() {
        let mut page = Page::<Category>::new();
        page.notify(Feedback::error("Category not found"));
        assert_eq!(page.feedback().unwrap().severity, Severity::Error);
        page.dismiss_feedback();
        assert!(page.feedback().is_none());
    }
}

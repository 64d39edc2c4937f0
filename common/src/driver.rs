//! ページの要求をサービスで実行する

use crate::page::{Effect, Outcome, Page, Request};
use crate::resource::Resource;
use crate::service::ResourceService;

/// 1つの操作を実行して結果を返す
pub async fn execute<R, S>(service: &S, effect: Effect) -> Outcome<R>
where
    R: Resource,
    S: ResourceService<R>,
{
    match effect {
        Effect::Load => Outcome::Loaded(service.list().await),
        Effect::Create(payload) => Outcome::Saved(service.create(payload).await),
        Effect::Update { id, payload } => Outcome::Saved(service.update(&id, payload).await),
        Effect::Delete { id } => Outcome::Deleted(service.delete(&id).await),
    }
}

/// 要求を実行し、続く要求（保存後の再読み込みなど）がなくなるまで反映する
pub async fn run<R, S>(page: &mut Page<R>, service: &S, request: Request)
where
    R: Resource,
    S: ResourceService<R>,
{
    let mut next = Some(request);
    while let Some(Request { ticket, effect }) = next.take() {
        let outcome = execute(service, effect).await;
        next = page.apply(ticket, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    use crate::draft::Attachment;
    use crate::memory::InMemoryStore;
    use crate::page::{PageState, Severity};
    use crate::types::{Category, GalleryPhoto, Video};

    #[test]
    fn test_empty_collection_reports_empty() {
        let store = InMemoryStore::<Video>::new();
        let mut page = Page::new();
        let request = page.mount();
        block_on(run(&mut page, &store, request));

        assert_eq!(page.state(), PageState::Empty);
        assert!(page.feedback().is_none());
    }

    #[test]
    fn test_add_category_round_trip() {
        let store = InMemoryStore::<Category>::new();
        let mut page = Page::new();
        let request = page.mount();
        block_on(run(&mut page, &store, request));

        page.open_create();
        page.set_field("categoryname", "Banners");
        let request = page.submit().unwrap();
        block_on(run(&mut page, &store, request));

        assert_eq!(page.state(), PageState::Populated);
        assert_eq!(page.records()[0].label(), "Banners");
        assert_eq!(page.feedback().unwrap().severity, Severity::Success);
        // 一覧・作成・再読み込み
        assert_eq!(store.call_count(), 3);
    }

    #[test]
    fn test_declined_delete_issues_no_call() {
        let store = InMemoryStore::<Video>::new();
        store
            .seed(vec![Video {
                id: Some("v1".into()),
                title: "Intro".into(),
                ..Default::default()
            }])
            .unwrap();
        let mut page = Page::new();
        let request = page.mount();
        block_on(run(&mut page, &store, request));
        let calls = store.call_count();

        page.request_delete("v1").unwrap();
        page.cancel_delete();

        assert_eq!(store.call_count(), calls);
        assert_eq!(page.records().len(), 1);
    }

    #[test]
    fn test_delete_twice_leaves_page_usable() {
        let store = InMemoryStore::<Category>::new();
        store
            .seed(vec![Category {
                id: Some("c1".into()),
                categoryname: "A".into(),
                ..Default::default()
            }])
            .unwrap();
        let mut page = Page::new();
        let request = page.mount();
        block_on(run(&mut page, &store, request));

        page.request_delete("c1").unwrap();
        let request = page.confirm_delete().unwrap();
        block_on(run(&mut page, &store, request));
        assert_eq!(page.state(), PageState::Empty);

        page.request_delete("c1").unwrap();
        let request = page.confirm_delete().unwrap();
        block_on(run(&mut page, &store, request));
        let feedback = page.feedback().unwrap();
        assert_eq!(feedback.severity, Severity::Error);
        assert_eq!(feedback.message, "Category not found");

        let request = page.refresh();
        block_on(run(&mut page, &store, request));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_gallery_with_unknown_category_shows_raw_id() {
        let store = InMemoryStore::<GalleryPhoto>::new();
        let mut page = Page::new();
        page.set_categories(vec![Category {
            id: Some("c1".into()),
            categoryname: "Banners".into(),
            ..Default::default()
        }]);

        page.open_create();
        page.set_field("category", "no-such-category");
        page.attach(Attachment::new("p.jpg", "image/jpeg", vec![0xff, 0xd8]))
            .unwrap();
        let request = page.submit().unwrap();
        block_on(run(&mut page, &store, request));

        let rows = page.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1[1], "no-such-category");
    }

    #[test]
    fn test_update_without_new_file_keeps_image() {
        let store = InMemoryStore::<Video>::new();
        store
            .seed(vec![Video {
                id: Some("v1".into()),
                title: "Intro".into(),
                description: "First".into(),
                video_url: "https://youtu.be/a".into(),
                image: "https://cdn.example.com/t.jpg".into(),
                ..Default::default()
            }])
            .unwrap();
        let mut page = Page::new();
        let request = page.mount();
        block_on(run(&mut page, &store, request));

        page.open_edit("v1").unwrap();
        page.set_field("title", "Intro (updated)");
        let request = page.submit().unwrap();
        assert!(matches!(
            &request.effect,
            Effect::Update { payload, .. } if !payload.is_multipart()
        ));
        block_on(run(&mut page, &store, request));

        let video = page.record("v1").unwrap();
        assert_eq!(video.title, "Intro (updated)");
        assert_eq!(video.image, "https://cdn.example.com/t.jpg");
        assert_eq!(
            page.feedback().unwrap().message,
            "Video updated successfully."
        );
    }
}

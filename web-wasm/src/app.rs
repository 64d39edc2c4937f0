//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use lifeline_admin_common::{
    Category, Contact, GalleryPhoto, Location, MemoryStores, PersonDetail, PressRelease, Resource,
    ResourceKind, SlideImage, Video,
};

use crate::api::FetchService;
use crate::components::{
    header::Header, resource_page::resource_page, settings_panel::SettingsPanel,
};
use crate::settings::{self, Backend};

/// ページに渡す通信先
#[derive(Clone)]
struct Source {
    backend: Backend,
    api_root: String,
    stores: MemoryStores,
}

impl Source {
    fn page<R: Resource>(&self) -> AnyView {
        match self.backend {
            Backend::Http => resource_page::<R, _, _>(
                FetchService::<R>::new(self.api_root.clone()),
                FetchService::<Category>::new(self.api_root.clone()),
            )
            .into_any(),
            Backend::Memory => {
                resource_page::<R, _, _>(self.stores.store::<R>(), self.stores.store::<Category>())
                    .into_any()
            }
        }
    }
}

/// 選択中のリソースのページ
///
/// タブか接続先が変わるたびに作り直し、初回読み込みからやり直す。
fn resource_view(kind: ResourceKind, source: &Source) -> AnyView {
    match kind {
        ResourceKind::Video => source.page::<Video>(),
        ResourceKind::Gallery => source.page::<GalleryPhoto>(),
        ResourceKind::Category => source.page::<Category>(),
        ResourceKind::Contact => source.page::<Contact>(),
        ResourceKind::Location => source.page::<Location>(),
        ResourceKind::PersonDetail => source.page::<PersonDetail>(),
        ResourceKind::PressRelease => source.page::<PressRelease>(),
        ResourceKind::SlideImage => source.page::<SlideImage>(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let active = RwSignal::new(ResourceKind::Video);
    let api_root = RwSignal::new(settings::load_api_root());
    let backend = RwSignal::new(settings::load_backend());
    // タブを切り替えてもブラウザ内ストアの内容は残す
    let stores = MemoryStores::new();

    let current = move || {
        let source = Source {
            backend: backend.get(),
            api_root: api_root.get(),
            stores: stores.clone(),
        };
        resource_view(active.get(), &source)
    };

    view! {
        <div class="container">
            <Header active=active />
            <SettingsPanel api_root=api_root backend=backend />
            <main>{current}</main>
        </div>
    }
}

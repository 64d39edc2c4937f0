//! Lifeline Admin Common Library
//!
//! CLIとWeb(WASM)で共有されるリソース定義、サービス契約、ページ状態

pub mod draft;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod kind;
pub mod memory;
pub mod page;
pub mod payload;
pub mod resource;
pub mod schema;
pub mod service;
pub mod types;

pub use draft::{Attachment, Draft};
pub use error::{Error, Result};
pub use kind::ResourceKind;
pub use memory::{InMemoryStore, MemoryStores};
pub use page::{Editor, Effect, Feedback, Outcome, Page, PageState, Request, Severity, Ticket};
pub use payload::{Mode, Payload};
pub use resource::{LabelContext, Resource};
pub use schema::{AttachmentSpec, FieldKind, FieldSpec, ResourceSchema};
pub use service::ResourceService;
pub use types::{
    category_label, Category, Contact, GalleryPhoto, Location, PersonDetail, PressRelease,
    SlideImage, Video,
};

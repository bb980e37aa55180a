//! Page-load wide-event beacon.
//!
//! Builds one `page-load` event per page from whatever browser capabilities are
//! available, and a companion `page-unload` event carrying the same
//! `page_load_id`. Capabilities are read through [`capability::BrowserContext`],
//! page-lifetime state lives in [`session::PageSession`], and events leave
//! through an [`event_sink::EventSink`].

pub mod assets;
pub mod builder;
pub mod capability;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod timing;
pub mod unload;

pub use builder::PageLoadEventBuilder;
pub use dispatch::LoadListener;
pub use dispatch::SharedSink;
pub use dispatch::UnloadListener;
pub use session::PageSession;
pub use unload::UnloadEventBuilder;

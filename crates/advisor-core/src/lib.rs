//! Core call path for the advisor demo console: one instruction in, one
//! completion call out, plus the session-local state the page relies on.

pub mod assistant;
pub mod briefing;
pub mod clients;
pub mod format;
pub mod session;
pub mod version;

pub use assistant::Assistant;
pub use clients::{ClientDataSource, DemoBook, PracticeSnapshot};
pub use format::expand_paragraphs;
pub use session::{QuickAction, SessionState, SessionStore};

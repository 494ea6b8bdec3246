//! wfn-core: REST client, session handling and the generic list editor behind
//! the Wfn nonprofit console.
pub mod api;
pub mod editor;
pub mod error;
pub mod inactivity;
pub mod models;
pub mod observability;
pub mod report;
pub mod session;
pub mod summary;

pub use api::{ApiClient, ApiSettings, Attachment, Authorized, Payload};
pub use editor::{Confirmation, Deletion, DraftRecord, EditMode, ListEditor, Resource};
pub use error::{ApiError, EditorError, SessionError, StoreError};
pub use inactivity::{ActivityEvent, InactivityMonitor, MonitorState};
pub use session::{MemoryTokenStore, SessionManager, TokenStore};

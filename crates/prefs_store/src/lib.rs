mod error;
mod paths;
mod schema;
mod store;

pub use error::PrefsStoreError;
pub use paths::{prefs_dir, prefs_path, PREFS_DIR, PREFS_FILE};
pub use schema::PrefsRecord;
pub use store::PrefsStore;

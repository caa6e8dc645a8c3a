use std::fs;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::PrefsStoreError;
use crate::schema::PrefsRecord;

/// Single-record preferences file. The only durable datum the shell keeps is
/// whether onboarding has ever been completed.
pub struct PrefsStore {
    path: PathBuf,
    record: PrefsRecord,
}

impl PrefsStore {
    /// Opens the preferences file, falling back to defaults when it does not
    /// exist yet. Present-but-malformed files are an error, not a reset.
    pub fn open_or_default(path: &Path) -> Result<Self, PrefsStoreError> {
        let path = path.to_path_buf();

        let record = match fs::read_to_string(&path) {
            Ok(raw) => {
                let record: PrefsRecord = serde_json::from_str(&raw)
                    .map_err(|source| PrefsStoreError::json_parse(&path, source))?;
                validate_record(&path, &record)?;
                record
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                PrefsRecord::v1(false, now_rfc3339()?)
            }
            Err(source) => {
                return Err(PrefsStoreError::io("reading preferences file", &path, source));
            }
        };

        Ok(Self { path, record })
    }

    #[must_use]
    pub fn onboarding_complete(&self) -> bool {
        self.record.onboarding_complete
    }

    /// Marks onboarding as completed and persists the record. Idempotent:
    /// re-recording rewrites the file with a fresh timestamp.
    pub fn record_onboarding_complete(&mut self) -> Result<(), PrefsStoreError> {
        self.record.onboarding_complete = true;
        self.record.updated_at = now_rfc3339()?;
        self.save()
    }

    fn save(&self) -> Result<(), PrefsStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                PrefsStoreError::io("creating preferences directory", parent, source)
            })?;
        }

        let mut raw = serde_json::to_string_pretty(&self.record)
            .map_err(|source| PrefsStoreError::json_serialize(&self.path, source))?;
        raw.push('\n');

        fs::write(&self.path, raw)
            .map_err(|source| PrefsStoreError::io("writing preferences file", &self.path, source))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn updated_at(&self) -> &str {
        &self.record.updated_at
    }
}

fn validate_record(path: &Path, record: &PrefsRecord) -> Result<(), PrefsStoreError> {
    if record.version != 1 {
        return Err(PrefsStoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: record.version,
        });
    }

    if OffsetDateTime::parse(&record.updated_at, &Rfc3339).is_err() {
        return Err(PrefsStoreError::InvalidTimestamp {
            path: path.to_path_buf(),
            field: "updated_at",
            value: record.updated_at.clone(),
        });
    }

    Ok(())
}

fn now_rfc3339() -> Result<String, PrefsStoreError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(PrefsStoreError::ClockFormat)
}

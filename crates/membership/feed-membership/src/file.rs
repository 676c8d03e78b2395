//! Reads and rewrites the membership file on disk.

use std::{fs, path::PathBuf};

use atproto_identity_resolver::Identity;
use tracing::{Level, event};

use crate::{
    editor::{self, AddOutcome, RemoveOutcome},
    errors::MembershipError,
};

/// What happened to the membership file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

impl Change {
    /// True if the file content was (or, on a dry run, would have been) changed
    pub fn modified(&self) -> bool {
        matches!(self, Change::Added | Change::Removed)
    }
}

/// The membership file.
///
/// The whole file is read, edited in memory and written back in one go. There
/// is no locking, concurrent runs against the same file race on the write.
#[derive(Clone, Debug)]
pub struct MembershipFile {
    path: PathBuf,
    dry_run: bool,
}

impl MembershipFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dry_run: false,
        }
    }

    /// Compute edits but never write them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// File name used in status messages, e.g. `membership.ts`
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn load(&self) -> Result<String, MembershipError> {
        fs::read_to_string(&self.path).map_err(|source| MembershipError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, content: &str) -> Result<(), MembershipError> {
        if self.dry_run {
            event!(Level::INFO, "dry run, not writing {}", self.path.display());
            return Ok(());
        }
        fs::write(&self.path, content).map_err(|source| MembershipError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Adds the identity's DID to the marked list.
    pub fn add(&self, identity: &Identity) -> Result<Change, MembershipError> {
        let content = self.load()?;
        match editor::add_member(&content, &identity.did)? {
            AddOutcome::AlreadyPresent => Ok(Change::AlreadyPresent),
            AddOutcome::Added(updated) => {
                self.store(&updated)?;
                event!(
                    Level::INFO,
                    "added {identity} to {}",
                    self.path.display()
                );
                Ok(Change::Added)
            }
        }
    }

    /// Removes the identity's DID entry from the marked list.
    pub fn remove(&self, identity: &Identity) -> Result<Change, MembershipError> {
        let content = self.load()?;
        match editor::remove_member(&content, &identity.did)? {
            RemoveOutcome::NotPresent => Ok(Change::NotPresent),
            RemoveOutcome::Removed(updated) => {
                self.store(&updated)?;
                event!(
                    Level::INFO,
                    "removed {identity} from {}",
                    self.path.display()
                );
                Ok(Change::Removed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTENT: &str = "export const membership = [\n  // DID_ADDITIONS\n]\n";

    fn identity() -> Identity {
        Identity {
            handle: "alice.bsky.social".into(),
            did: "did:plc:xum72mip7ti5niwqbgpvaqn4".into(),
        }
    }

    fn membership_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONTENT.as_bytes()).unwrap();
        file
    }

    #[test]
    fn add_writes_file() {
        let tmp = membership_file();
        let file = MembershipFile::new(tmp.path());

        assert_eq!(file.add(&identity()).unwrap(), Change::Added);
        assert_eq!(
            fs::read_to_string(tmp.path()).unwrap(),
            "export const membership = [\n  // DID_ADDITIONS\n  'did:plc:xum72mip7ti5niwqbgpvaqn4',\n]\n"
        );
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let tmp = membership_file();
        let file = MembershipFile::new(tmp.path()).with_dry_run(true);

        let change = file.add(&identity()).unwrap();
        assert_eq!(change, Change::Added);
        assert!(change.modified());
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), CONTENT);
    }

    #[test]
    fn remove_missing_entry_is_not_present() {
        let tmp = membership_file();
        let file = MembershipFile::new(tmp.path());

        let change = file.remove(&identity()).unwrap();
        assert_eq!(change, Change::NotPresent);
        assert!(!change.modified());
        assert_eq!(fs::read_to_string(tmp.path()).unwrap(), CONTENT);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = MembershipFile::new(dir.path().join("membership.ts"));

        assert!(matches!(
            file.add(&identity()),
            Err(MembershipError::Io { .. })
        ));
        assert_eq!(file.display_name(), "membership.ts");
    }
}

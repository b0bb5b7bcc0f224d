//! File system change events.

use std::path::PathBuf;
use std::time::Instant;

use notify::event::{EventKind, ModifyKind, RenameMode};

/// Kind of change observed for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Path was created.
    Created,
    /// Path contents were modified.
    Modified,
    /// Path is the destination of a rename.
    Renamed,
    /// Path was removed.
    Deleted,
}

impl ChangeKind {
    /// Map a raw notify event kind onto a change kind.
    ///
    /// Returns `None` for kinds that carry no content change (access events).
    #[must_use]
    pub const fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) | EventKind::Remove(_) => {
                Some(Self::Deleted)
            }
            EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Renamed),
            EventKind::Modify(_) | EventKind::Any | EventKind::Other => Some(Self::Modified),
            EventKind::Access(_) => None,
        }
    }
}

/// A single observed change, consumed once by the dispatch pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Absolute path the change applies to.
    pub path: PathBuf,
    /// What happened to the path.
    pub kind: ChangeKind,
    /// When the change was observed.
    pub at: Instant,
}

impl ChangeEvent {
    /// Create an event observed now.
    #[must_use]
    pub fn new(path: PathBuf, kind: ChangeKind) -> Self {
        Self {
            path,
            kind,
            at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

    #[test]
    fn test_create_maps_to_created() {
        let kind = ChangeKind::from_notify(&EventKind::Create(CreateKind::File));
        assert_eq!(kind, Some(ChangeKind::Created));
    }

    #[test]
    fn test_data_change_maps_to_modified() {
        let kind =
            ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Data(DataChange::Content)));
        assert_eq!(kind, Some(ChangeKind::Modified));

        let kind = ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::WriteTime,
        )));
        assert_eq!(kind, Some(ChangeKind::Modified));
    }

    #[test]
    fn test_rename_to_maps_to_renamed() {
        let kind =
            ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Name(RenameMode::To)));
        assert_eq!(kind, Some(ChangeKind::Renamed));
    }

    #[test]
    fn test_rename_from_maps_to_deleted() {
        let kind =
            ChangeKind::from_notify(&EventKind::Modify(ModifyKind::Name(RenameMode::From)));
        assert_eq!(kind, Some(ChangeKind::Deleted));
    }

    #[test]
    fn test_remove_maps_to_deleted() {
        let kind = ChangeKind::from_notify(&EventKind::Remove(RemoveKind::File));
        assert_eq!(kind, Some(ChangeKind::Deleted));
    }

    #[test]
    fn test_access_is_dropped() {
        let kind = ChangeKind::from_notify(&EventKind::Access(
            notify::event::AccessKind::Close(notify::event::AccessMode::Write),
        ));
        assert_eq!(kind, None);
    }

    #[test]
    fn test_event_carries_path_and_kind() {
        let event = ChangeEvent::new(PathBuf::from("/src/a.php"), ChangeKind::Modified);
        assert_eq!(event.path, PathBuf::from("/src/a.php"));
        assert_eq!(event.kind, ChangeKind::Modified);
    }
}

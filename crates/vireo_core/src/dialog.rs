//! User-Facing Seams for Preset Export
//!
//! The coordinator never shows UI itself; the front end supplies a
//! destination picker and an error notifier.

use std::path::PathBuf;

/// Picks where to save a preset. `None` means the user cancelled.
pub trait SaveDialog {
    fn pick_destination(&self, suggested_name: &str, extension: &str) -> Option<PathBuf>;
}

/// Surfaces errors to the user
pub trait Notifier {
    fn notify_error(&self, title: &str, message: &str);
}

/// Result of a save-to-file request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
    Failed,
}

/// Dialog that always answers with a fixed path (CLI and scripted use)
#[derive(Debug, Clone)]
pub struct FixedDestination(pub Option<PathBuf>);

impl SaveDialog for FixedDestination {
    fn pick_destination(&self, _suggested_name: &str, extension: &str) -> Option<PathBuf> {
        self.0.as_ref().map(|path| {
            if path.extension().is_none() {
                path.with_extension(extension)
            } else {
                path.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_destination_adds_extension() {
        let dialog = FixedDestination(Some(PathBuf::from("/tmp/mine")));
        assert_eq!(
            dialog.pick_destination("Rock", "eqp"),
            Some(PathBuf::from("/tmp/mine.eqp"))
        );
    }

    #[test]
    fn test_fixed_destination_keeps_extension() {
        let dialog = FixedDestination(Some(PathBuf::from("/tmp/mine.json")));
        assert_eq!(
            dialog.pick_destination("Rock", "eqp"),
            Some(PathBuf::from("/tmp/mine.json"))
        );
    }

    #[test]
    fn test_fixed_destination_cancel() {
        let dialog = FixedDestination(None);
        assert!(dialog.pick_destination("Rock", "eqp").is_none());
    }
}

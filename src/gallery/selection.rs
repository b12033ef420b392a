use std::collections::BTreeSet;

/// Browse vs. multi-select mode. The selection set only exists while selecting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    Selecting(BTreeSet<i64>),
}

/// What activating the mode-toggle control did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Browse -> Selecting with an empty set
    Entered,
    /// Selecting with nothing selected -> Browse
    Cancelled,
    /// Selecting with ids selected; deletion needs confirmation
    ConfirmDelete(Vec<i64>),
    /// A batch delete is already running
    Busy,
}

/// Label and style of the mode-toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLabel {
    pub text: String,
    /// Highlight once at least one image is selected
    pub armed: bool,
}

impl Mode {
    pub fn is_selecting(&self) -> bool {
        matches!(self, Mode::Selecting(_))
    }

    pub fn selection(&self) -> Option<&BTreeSet<i64>> {
        match self {
            Mode::Browse => None,
            Mode::Selecting(ids) => Some(ids),
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selection().map_or(0, BTreeSet::len)
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selection().is_some_and(|ids| ids.contains(&id))
    }

    /// Activate the mode-toggle control.
    pub fn toggle(self) -> (Mode, ToggleOutcome) {
        match self {
            Mode::Browse => (Mode::Selecting(BTreeSet::new()), ToggleOutcome::Entered),
            Mode::Selecting(ids) if ids.is_empty() => (Mode::Browse, ToggleOutcome::Cancelled),
            Mode::Selecting(ids) => {
                let pending = ids.iter().copied().collect();
                (Mode::Selecting(ids), ToggleOutcome::ConfirmDelete(pending))
            }
        }
    }

    /// Flip membership of `id`. No effect in browse mode.
    pub fn toggle_id(self, id: i64) -> Mode {
        match self {
            Mode::Browse => Mode::Browse,
            Mode::Selecting(mut ids) => {
                if !ids.remove(&id) {
                    ids.insert(id);
                }
                Mode::Selecting(ids)
            }
        }
    }

    pub fn toggle_label(&self) -> ToggleLabel {
        match self {
            Mode::Browse => ToggleLabel {
                text: "Select".to_string(),
                armed: false,
            },
            Mode::Selecting(ids) if ids.is_empty() => ToggleLabel {
                text: "Cancel".to_string(),
                armed: false,
            },
            Mode::Selecting(ids) => ToggleLabel {
                text: format!("Delete ({})", ids.len()),
                armed: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_cancel() {
        let (mode, outcome) = Mode::Browse.toggle();
        assert_eq!(outcome, ToggleOutcome::Entered);
        assert_eq!(mode.selected_count(), 0);

        let (mode, outcome) = mode.toggle();
        assert_eq!(outcome, ToggleOutcome::Cancelled);
        assert_eq!(mode, Mode::Browse);
    }

    #[test]
    fn toggling_same_id_twice_is_identity() {
        let (mode, _) = Mode::Browse.toggle();
        let mode = mode.toggle_id(5);
        let before = mode.clone();
        let after = mode.toggle_id(9).toggle_id(9);
        assert_eq!(before, after);
    }

    #[test]
    fn toggle_with_selection_requests_confirmation() {
        let (mode, _) = Mode::Browse.toggle();
        let mode = mode.toggle_id(7).toggle_id(3);
        let (mode, outcome) = mode.toggle();
        assert_eq!(outcome, ToggleOutcome::ConfirmDelete(vec![3, 7]));
        assert!(mode.is_selecting());
        assert_eq!(mode.selected_count(), 2);
    }

    #[test]
    fn browse_ignores_id_toggles() {
        assert_eq!(Mode::Browse.toggle_id(1), Mode::Browse);
        assert!(!Mode::Browse.is_selected(1));
    }

    #[test]
    fn label_tracks_selection() {
        assert_eq!(Mode::Browse.toggle_label().text, "Select");
        let (mode, _) = Mode::Browse.toggle();
        assert_eq!(mode.toggle_label().text, "Cancel");
        let mode = mode.toggle_id(1).toggle_id(2);
        let label = mode.toggle_label();
        assert_eq!(label.text, "Delete (2)");
        assert!(label.armed);
    }
}

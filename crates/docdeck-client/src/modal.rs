//! Sidebar suppression around confirmation/creation dialogs.
//!
//! While any dialog is open the external sidebar is forced closed; when the
//! last dialog closes the sidebar is restored to whatever it was when the
//! window opened. The capture is taken exactly once per window, so nested
//! dialog transitions cannot re-capture a forced-closed value, and a sidebar
//! that was already closed never "restores open".

#[derive(Debug, Default)]
pub struct ModalCoordinator {
    /// Sidebar visibility captured at the start of the current suppression
    /// window; `None` outside a window.
    sidebar_was_open: Option<bool>,
}

impl ModalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the sidebar flag with the current modal state. Call after
    /// every dialog transition. Only this method mutates `sidebar_open`
    /// while a window is active.
    pub fn sync(&mut self, any_modal_open: bool, sidebar_open: &mut bool) {
        if any_modal_open {
            if self.sidebar_was_open.is_none() {
                self.sidebar_was_open = Some(*sidebar_open);
                if *sidebar_open {
                    *sidebar_open = false;
                }
            }
        } else {
            if self.sidebar_was_open == Some(true) {
                *sidebar_open = true;
            }
            self.sidebar_was_open = None;
        }
    }

    pub fn in_suppression_window(&self) -> bool {
        self.sidebar_was_open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_sidebar_is_suppressed_and_restored() {
        let mut coordinator = ModalCoordinator::new();
        let mut sidebar_open = true;

        coordinator.sync(true, &mut sidebar_open);
        assert!(!sidebar_open);
        assert!(coordinator.in_suppression_window());

        coordinator.sync(false, &mut sidebar_open);
        assert!(sidebar_open);
        assert!(!coordinator.in_suppression_window());
    }

    #[test]
    fn test_closed_sidebar_stays_closed() {
        let mut coordinator = ModalCoordinator::new();
        let mut sidebar_open = false;

        coordinator.sync(true, &mut sidebar_open);
        assert!(!sidebar_open);

        coordinator.sync(false, &mut sidebar_open);
        assert!(!sidebar_open);
    }

    #[test]
    fn test_nested_opens_do_not_recapture() {
        let mut coordinator = ModalCoordinator::new();
        let mut sidebar_open = true;

        // First dialog opens, sidebar captured open and forced closed.
        coordinator.sync(true, &mut sidebar_open);
        assert!(!sidebar_open);

        // A second dialog opens on top; the forced-closed value must not
        // replace the capture.
        coordinator.sync(true, &mut sidebar_open);
        assert!(!sidebar_open);

        coordinator.sync(false, &mut sidebar_open);
        assert!(sidebar_open);
    }

    #[test]
    fn test_second_window_with_closed_sidebar() {
        let mut coordinator = ModalCoordinator::new();
        let mut sidebar_open = true;

        // First window: open -> suppressed -> restored.
        coordinator.sync(true, &mut sidebar_open);
        coordinator.sync(false, &mut sidebar_open);
        assert!(sidebar_open);

        // User closes the sidebar, then opens another dialog: closing it
        // must not reopen the sidebar.
        sidebar_open = false;
        coordinator.sync(true, &mut sidebar_open);
        coordinator.sync(false, &mut sidebar_open);
        assert!(!sidebar_open);
    }
}

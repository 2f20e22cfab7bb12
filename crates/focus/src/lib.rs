//! Bring a window to the foreground by partial title.
//!
//! The selection policy lives here and is written against [`WindowSystem`] so
//! it can run against a fake in tests. [`NativeWindows`] is the real backend:
//! Win32 on Windows, an always-failing stub elsewhere.

#[cfg(not(target_os = "windows"))]
mod other;
#[cfg(target_os = "windows")]
mod win32;

#[cfg(not(target_os = "windows"))]
pub use other::NativeWindows;
#[cfg(target_os = "windows")]
pub use win32::NativeWindows;

/// Opaque OS window handle.
pub type WindowHandle = isize;

/// Errors from the window system.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("{call} failed: {source}")]
    Os {
        call: &'static str,
        source: std::io::Error,
    },

    #[error("window management is not supported on this platform")]
    Unsupported,
}

/// A top-level window as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub visible: bool,
}

/// Access to the OS window manager.
pub trait WindowSystem {
    /// Lists top-level windows in OS enumeration order.
    fn windows(&self) -> Result<Vec<WindowInfo>, FocusError>;

    /// Restores a minimized window.
    fn restore(&self, handle: WindowHandle) -> Result<(), FocusError>;

    /// Asks the OS to make the window the foreground window.
    fn set_foreground(&self, handle: WindowHandle) -> Result<(), FocusError>;

    /// Returns the current foreground window, if any.
    fn foreground(&self) -> Result<Option<WindowHandle>, FocusError>;
}

/// What [`force_focus`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// The window is now in the foreground.
    Focused(WindowInfo),
    /// Focus was requested but the OS kept another window in front.
    Refused(WindowInfo),
    /// No visible window title starts with the query.
    NotFound,
    /// A window-system call failed; details were logged.
    Failed,
}

/// Returns the first visible window whose title starts with `partial_title`.
pub fn find_target<'a>(windows: &'a [WindowInfo], partial_title: &str) -> Option<&'a WindowInfo> {
    windows
        .iter()
        .find(|w| w.visible && w.title.starts_with(partial_title))
}

/// Restores and focuses the first visible window whose title starts with
/// `partial_title`.
///
/// Never fails: every problem is logged and reported through the outcome.
pub fn force_focus<S: WindowSystem + ?Sized>(system: &S, partial_title: &str) -> FocusOutcome {
    tracing::info!(query = partial_title, "searching for window");

    match try_focus(system, partial_title) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = ?e, "unexpected window system error");
            FocusOutcome::Failed
        }
    }
}

fn try_focus<S: WindowSystem + ?Sized>(
    system: &S,
    partial_title: &str,
) -> Result<FocusOutcome, FocusError> {
    let windows = system.windows()?;
    let Some(target) = find_target(&windows, partial_title) else {
        tracing::error!(query = partial_title, "no window title starts with query");
        return Ok(FocusOutcome::NotFound);
    };

    tracing::info!(title = %target.title, handle = target.handle, "found matching window");

    system.restore(target.handle)?;
    system.set_foreground(target.handle)?;

    if system.foreground()? == Some(target.handle) {
        tracing::info!(title = %target.title, "window is now in the foreground");
        Ok(FocusOutcome::Focused(target.clone()))
    } else {
        tracing::warn!(title = %target.title, "OS prevented the window from taking focus");
        Ok(FocusOutcome::Refused(target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Restore(WindowHandle),
        Foreground(WindowHandle),
    }

    /// Window system fake recording every mutating call.
    struct FakeWindows {
        windows: Vec<WindowInfo>,
        grant_focus: bool,
        fail_enumeration: bool,
        calls: RefCell<Vec<Call>>,
        focused: RefCell<Option<WindowHandle>>,
    }

    impl FakeWindows {
        fn new(windows: &[(WindowHandle, &str, bool)]) -> Self {
            Self {
                windows: windows
                    .iter()
                    .map(|&(handle, title, visible)| WindowInfo {
                        handle,
                        title: title.to_string(),
                        visible,
                    })
                    .collect(),
                grant_focus: true,
                fail_enumeration: false,
                calls: RefCell::new(Vec::new()),
                focused: RefCell::new(None),
            }
        }
    }

    impl WindowSystem for FakeWindows {
        fn windows(&self) -> Result<Vec<WindowInfo>, FocusError> {
            if self.fail_enumeration {
                return Err(FocusError::Os {
                    call: "EnumWindows",
                    source: std::io::Error::other("access denied"),
                });
            }
            Ok(self.windows.clone())
        }

        fn restore(&self, handle: WindowHandle) -> Result<(), FocusError> {
            self.calls.borrow_mut().push(Call::Restore(handle));
            Ok(())
        }

        fn set_foreground(&self, handle: WindowHandle) -> Result<(), FocusError> {
            self.calls.borrow_mut().push(Call::Foreground(handle));
            if self.grant_focus {
                *self.focused.borrow_mut() = Some(handle);
            }
            Ok(())
        }

        fn foreground(&self) -> Result<Option<WindowHandle>, FocusError> {
            Ok(*self.focused.borrow())
        }
    }

    #[test]
    fn earliest_prefix_match_wins() {
        let system = FakeWindows::new(&[
            (1, "Explorer", true),
            (2, "Dolphin 5.0 | Metroid", true),
            (3, "Dolphin 5.0 | Pikmin", true),
        ]);

        let outcome = force_focus(&system, "Dolphin");

        assert!(matches!(outcome, FocusOutcome::Focused(ref w) if w.handle == 2));
        assert_eq!(
            *system.calls.borrow(),
            vec![Call::Restore(2), Call::Foreground(2)]
        );
    }

    #[test]
    fn invisible_windows_are_skipped() {
        let system = FakeWindows::new(&[(1, "eden hidden", false), (2, "eden main", true)]);
        let outcome = force_focus(&system, "eden");
        assert!(matches!(outcome, FocusOutcome::Focused(ref w) if w.handle == 2));
    }

    #[test]
    fn match_is_prefix_and_case_sensitive() {
        let system = FakeWindows::new(&[(1, "My Dolphin", true), (2, "dolphin", true)]);
        assert_eq!(force_focus(&system, "Dolphin"), FocusOutcome::NotFound);
        assert!(system.calls.borrow().is_empty());
    }

    #[test]
    fn no_match_issues_no_mutation() {
        let system = FakeWindows::new(&[(1, "Explorer", true)]);
        assert_eq!(force_focus(&system, "RPCS3"), FocusOutcome::NotFound);
        assert!(system.calls.borrow().is_empty());
    }

    #[test]
    fn refused_focus_is_reported() {
        let mut system = FakeWindows::new(&[(7, "RPCS3 0.0.30", true)]);
        system.grant_focus = false;

        let outcome = force_focus(&system, "RPCS3");

        assert!(matches!(outcome, FocusOutcome::Refused(ref w) if w.handle == 7));
        assert_eq!(
            *system.calls.borrow(),
            vec![Call::Restore(7), Call::Foreground(7)]
        );
    }

    #[test]
    fn enumeration_failure_is_swallowed() {
        let mut system = FakeWindows::new(&[(1, "eden", true)]);
        system.fail_enumeration = true;

        assert_eq!(force_focus(&system, "eden"), FocusOutcome::Failed);
        assert!(system.calls.borrow().is_empty());
    }

    #[test]
    fn find_target_empty_query_matches_first_visible() {
        let windows = vec![
            WindowInfo {
                handle: 1,
                title: "hidden".into(),
                visible: false,
            },
            WindowInfo {
                handle: 2,
                title: "shown".into(),
                visible: true,
            },
        ];
        assert_eq!(find_target(&windows, "").map(|w| w.handle), Some(2));
    }
}

//! Fallback backend for platforms without a supported window manager API.

use crate::{FocusError, WindowHandle, WindowInfo, WindowSystem};

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeWindows;

impl WindowSystem for NativeWindows {
    fn windows(&self) -> Result<Vec<WindowInfo>, FocusError> {
        Err(FocusError::Unsupported)
    }

    fn restore(&self, _handle: WindowHandle) -> Result<(), FocusError> {
        Err(FocusError::Unsupported)
    }

    fn set_foreground(&self, _handle: WindowHandle) -> Result<(), FocusError> {
        Err(FocusError::Unsupported)
    }

    fn foreground(&self) -> Result<Option<WindowHandle>, FocusError> {
        Err(FocusError::Unsupported)
    }
}

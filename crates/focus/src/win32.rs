//! Win32 window system backend.

use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
    SW_RESTORE, SetForegroundWindow, ShowWindow,
};

use crate::{FocusError, WindowHandle, WindowInfo, WindowSystem};

/// The desktop of the current session.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeWindows;

/// Reads the title of a window, empty when it has none.
///
/// # Safety
/// `hwnd` must be a window handle handed out by the OS.
unsafe fn window_title(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }

    let mut buf: Vec<u16> = vec![0; len as usize + 1];
    let copied = unsafe { GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32) };
    String::from_utf16_lossy(&buf[..copied.max(0) as usize])
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // Safety: `windows()` passes a pointer to a Vec that outlives EnumWindows.
    let out = unsafe { &mut *(lparam as *mut Vec<WindowInfo>) };
    let visible = unsafe { IsWindowVisible(hwnd) } != 0;
    let title = unsafe { window_title(hwnd) };

    out.push(WindowInfo {
        handle: hwnd as WindowHandle,
        title,
        visible,
    });
    1
}

impl WindowSystem for NativeWindows {
    fn windows(&self) -> Result<Vec<WindowInfo>, FocusError> {
        let mut out: Vec<WindowInfo> = Vec::new();
        let ok = unsafe {
            EnumWindows(
                Some(collect_window),
                &mut out as *mut Vec<WindowInfo> as LPARAM,
            )
        };
        if ok == 0 {
            return Err(FocusError::Os {
                call: "EnumWindows",
                source: std::io::Error::last_os_error(),
            });
        }
        Ok(out)
    }

    fn restore(&self, handle: WindowHandle) -> Result<(), FocusError> {
        // Return value is the previous visibility, not a status.
        unsafe { ShowWindow(handle as HWND, SW_RESTORE) };
        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> Result<(), FocusError> {
        if unsafe { SetForegroundWindow(handle as HWND) } == 0 {
            tracing::debug!(handle, "SetForegroundWindow was rejected");
        }
        Ok(())
    }

    fn foreground(&self) -> Result<Option<WindowHandle>, FocusError> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.is_null() {
            Ok(None)
        } else {
            Ok(Some(hwnd as WindowHandle))
        }
    }
}

//! シェルクローム（タスクバー）アダプター
//!
//! Shell_TrayWndとスタートボタンの表示・非表示を切り替える。
//! ウィンドウが見つからない場合は何もしない。

use kl_domain::port::driven::ShellChrome;

/// プラットフォーム中立のハンドル
#[cfg(windows)]
pub type ShellChromeAdapter = WindowsShellChrome;
#[cfg(not(windows))]
pub type ShellChromeAdapter = NonWindowsShellChrome;

#[cfg(windows)]
#[derive(Debug, Default)]
pub struct WindowsShellChrome;

#[cfg(windows)]
impl WindowsShellChrome {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl ShellChrome for WindowsShellChrome {
    fn hide(&self) {
        windows_impl::set_taskbar_visible(false);
    }

    fn restore(&self) {
        windows_impl::set_taskbar_visible(true);
    }
}

#[cfg(not(windows))]
#[derive(Debug, Default)]
pub struct NonWindowsShellChrome;

#[cfg(not(windows))]
impl NonWindowsShellChrome {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
impl ShellChrome for NonWindowsShellChrome {
    fn hide(&self) {}

    fn restore(&self) {}
}

#[cfg(windows)]
mod windows_impl {
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, ShowWindow, SW_HIDE, SW_SHOW};

    const TASKBAR_CLASS: &str = "Shell_TrayWnd";
    const START_BUTTON_CLASS: &str = "Button";
    const START_BUTTON_TITLE: &str = "Start";

    pub(super) fn set_taskbar_visible(visible: bool) {
        let command = if visible { SW_SHOW } else { SW_HIDE };

        let class = to_wide(TASKBAR_CLASS);
        if let Ok(handle) = unsafe { FindWindowW(PCWSTR(class.as_ptr()), PCWSTR::null()) } {
            let _ = unsafe { ShowWindow(handle, command) };
        }

        let class = to_wide(START_BUTTON_CLASS);
        let title = to_wide(START_BUTTON_TITLE);
        if let Ok(handle) =
            unsafe { FindWindowW(PCWSTR(class.as_ptr()), PCWSTR(title.as_ptr())) }
        {
            let _ = unsafe { ShowWindow(handle, command) };
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        let mut wide: Vec<u16> = s.encode_utf16().collect();
        wide.push(0);
        wide
    }
}

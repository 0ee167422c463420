//! スクリーンキーボード起動アダプター
//!
//! TabTip.exeを既知のインストール場所から順に探して起動する。
//! 見つからない・起動できない場合は常設のosk.exeへフォールバックする。
//! 起動完了は待たない。

use kl_domain::port::driven::KeyboardLauncher;
use kl_domain::DomainError;

/// プラットフォーム中立のハンドル
#[cfg(windows)]
pub type TouchKeyboardAdapter = WindowsTouchKeyboard;
#[cfg(not(windows))]
pub type TouchKeyboardAdapter = NonWindowsTouchKeyboard;

#[cfg(windows)]
#[derive(Debug, Default)]
pub struct WindowsTouchKeyboard;

#[cfg(windows)]
impl WindowsTouchKeyboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl KeyboardLauncher for WindowsTouchKeyboard {
    fn show(&self) -> Result<(), DomainError> {
        windows_impl::show()
    }
}

#[cfg(not(windows))]
#[derive(Debug, Default)]
pub struct NonWindowsTouchKeyboard;

#[cfg(not(windows))]
impl NonWindowsTouchKeyboard {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
impl KeyboardLauncher for NonWindowsTouchKeyboard {
    fn show(&self) -> Result<(), DomainError> {
        Err(DomainError::ProcessLaunchFailed(
            "on-screen keyboard is not available on this platform".into(),
        ))
    }
}

#[cfg(windows)]
mod windows_impl {
    use kl_domain::DomainError;
    use std::path::PathBuf;

    const TABTIP_SUBPATH: &str = r"Microsoft Shared\ink\TabTip.exe";
    const TABTIP_LITERAL_PATHS: &[&str] = &[
        r"C:\Program Files\Common Files\Microsoft Shared\ink\TabTip.exe",
        r"C:\Program Files (x86)\Common Files\Microsoft Shared\ink\TabTip.exe",
    ];
    const OSK_FALLBACK: &str = "osk.exe";
    const TABTIP_AUTO_INVOKE_KEY: &str = r"Software\Microsoft\TabletTip\1.7";
    const TABTIP_AUTO_INVOKE_VALUE: &str = "EnableDesktopModeAutoInvoke";

    pub(super) fn show() -> Result<(), DomainError> {
        // TabTipがデスクトップセッションでも開けるようにする。
        // 失敗しても起動自体は試す。
        enable_desktop_auto_invoke();

        if let Some(path) = tab_tip_path() {
            if shell_open(&path.to_string_lossy()).is_ok() {
                return Ok(());
            }
        }
        // フォールバック: 常設のアクセシビリティキーボード
        shell_open(OSK_FALLBACK)
    }

    /// 既知のインストール場所を順に探し、存在する最初のTabTip.exeを返す
    fn tab_tip_path() -> Option<PathBuf> {
        use windows::Win32::UI::Shell::{
            FOLDERID_ProgramFilesCommon, FOLDERID_ProgramFilesCommonX86,
        };

        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(common) = known_folder_path(&FOLDERID_ProgramFilesCommon) {
            candidates.push(common.join(TABTIP_SUBPATH));
        }
        if let Some(common_x86) = known_folder_path(&FOLDERID_ProgramFilesCommonX86) {
            candidates.push(common_x86.join(TABTIP_SUBPATH));
        }
        candidates.extend(TABTIP_LITERAL_PATHS.iter().map(PathBuf::from));
        candidates.into_iter().find(|path| path.exists())
    }

    fn enable_desktop_auto_invoke() {
        use windows::core::PCWSTR;
        use windows::Win32::Foundation::ERROR_SUCCESS;
        use windows::Win32::System::Registry::{
            RegCloseKey, RegCreateKeyExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER, KEY_SET_VALUE,
            REG_DWORD, REG_OPTION_NON_VOLATILE,
        };

        let path = to_wide(TABTIP_AUTO_INVOKE_KEY);
        let mut key = HKEY::default();
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(path.as_ptr()),
                Some(0),
                None,
                REG_OPTION_NON_VOLATILE,
                KEY_SET_VALUE,
                None,
                &mut key,
                None,
            )
        };
        if status != ERROR_SUCCESS {
            return;
        }
        let name = to_wide(TABTIP_AUTO_INVOKE_VALUE);
        let value = 1u32.to_le_bytes();
        let _ = unsafe {
            RegSetValueExW(key, PCWSTR(name.as_ptr()), Some(0), REG_DWORD, Some(&value))
        };
        let _ = unsafe { RegCloseKey(key) };
    }

    /// ShellExecuteWで起動する。32以下の戻り値はエラーコード。
    fn shell_open(target: &str) -> Result<(), DomainError> {
        use windows::core::PCWSTR;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

        let operation = to_wide("open");
        let file = to_wide(target);
        let result = unsafe {
            ShellExecuteW(
                None,
                PCWSTR(operation.as_ptr()),
                PCWSTR(file.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };
        if result.0 as isize <= 32 {
            return Err(DomainError::ProcessLaunchFailed(format!(
                "ShellExecuteW failed for {}: code {}",
                target, result.0 as isize
            )));
        }
        Ok(())
    }

    fn known_folder_path(id: &windows::core::GUID) -> Option<PathBuf> {
        use windows::core::PWSTR;
        use windows::Win32::System::Com::CoTaskMemFree;
        use windows::Win32::UI::Shell::{SHGetKnownFolderPath, KF_FLAG_DEFAULT};

        unsafe {
            let raw: PWSTR = SHGetKnownFolderPath(id, KF_FLAG_DEFAULT, None).ok()?;
            let path = pwstr_to_string(raw);
            CoTaskMemFree(Some(raw.0 as _));
            if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            }
        }
    }

    fn pwstr_to_string(pwstr: windows::core::PWSTR) -> String {
        unsafe {
            if pwstr.is_null() {
                return String::new();
            }
            let mut len = 0usize;
            while *pwstr.0.add(len) != 0 {
                len += 1;
            }
            let slice = std::slice::from_raw_parts(pwstr.0, len);
            String::from_utf16_lossy(slice)
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        let mut wide: Vec<u16> = s.encode_utf16().collect();
        wide.push(0);
        wide
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;
    use kl_domain::port::driven::KeyboardLauncher;

    #[test]
    fn launch_is_unsupported_off_windows() {
        let adapter = NonWindowsTouchKeyboard::new();
        assert!(matches!(
            adapter.show(),
            Err(DomainError::ProcessLaunchFailed(_))
        ));
    }
}

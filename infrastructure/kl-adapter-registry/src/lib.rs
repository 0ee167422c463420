//! KiosklocK設定レジストリアダプター
//!
//! HKCU\SOFTWARE\KiosklocK のキオスクフラグとホームページURLを読み書きする。
//! フラグはREG_DWORD、欠損値はfalse扱い。ホームページはHKCU→HKLMの順で探す。

use kl_domain::model::KioskFlags;
use kl_domain::port::driven::FlagsRepository;
use kl_domain::DomainError;

/// 設定キーのパス（インストーラと共有するビット単位の契約）
pub const KIOSK_REG_PATH: &str = r"SOFTWARE\KiosklocK";

pub const VALUE_KIOSK_MODE: &str = "KioskMode";
pub const VALUE_FULLSCREEN: &str = "Fullscreen";
pub const VALUE_DISABLE_TASKBAR: &str = "DisableTaskbar";
pub const VALUE_HOMEPAGE: &str = "Homepage";

/// レジストリにURLが無い場合の既定ホームページ
pub const DEFAULT_HOMEPAGE: &str = "https://kiosklock.github.io/welcome.html";

/// プラットフォーム中立のハンドル
#[cfg(windows)]
pub type RegistryAdapter = WindowsRegistryAdapter;
#[cfg(not(windows))]
pub type RegistryAdapter = NonWindowsRegistryAdapter;

#[cfg(windows)]
#[derive(Debug, Default)]
pub struct WindowsRegistryAdapter;

#[cfg(windows)]
impl WindowsRegistryAdapter {
    pub fn new() -> Self {
        Self
    }

    /// ホームページURL。HKCU→HKLMの順で探し、無ければ既定URL。
    pub fn homepage_url(&self) -> String {
        windows_impl::read_homepage().unwrap_or_else(|| DEFAULT_HOMEPAGE.to_string())
    }

    /// ホームページURLをHKCUへ保存する
    pub fn set_homepage_url(&self, url: &str) -> Result<(), DomainError> {
        if url.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "homepage URL must not be empty".into(),
            ));
        }
        windows_impl::write_homepage(url.trim())
    }
}

#[cfg(windows)]
impl FlagsRepository for WindowsRegistryAdapter {
    fn load_flags(&self) -> Result<KioskFlags, DomainError> {
        windows_impl::read_flags()
    }

    fn persist_kiosk_disabled(&self) -> Result<(), DomainError> {
        windows_impl::write_kiosk_mode(false)
    }
}

#[cfg(not(windows))]
#[derive(Debug, Default)]
pub struct NonWindowsRegistryAdapter;

#[cfg(not(windows))]
impl NonWindowsRegistryAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn homepage_url(&self) -> String {
        DEFAULT_HOMEPAGE.to_string()
    }

    pub fn set_homepage_url(&self, _url: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(not(windows))]
impl FlagsRepository for NonWindowsRegistryAdapter {
    fn load_flags(&self) -> Result<KioskFlags, DomainError> {
        Ok(KioskFlags::default())
    }

    fn persist_kiosk_disabled(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(windows)]
mod windows_impl {
    use super::{
        KIOSK_REG_PATH, VALUE_DISABLE_TASKBAR, VALUE_FULLSCREEN, VALUE_HOMEPAGE, VALUE_KIOSK_MODE,
    };
    use kl_domain::model::KioskFlags;
    use kl_domain::DomainError;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{
        ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_PATH_NOT_FOUND, ERROR_SUCCESS,
    };
    use windows::Win32::System::Registry::{
        RegCloseKey, RegCreateKeyExW, RegGetValueW, RegOpenKeyExW, RegSetValueExW, HKEY,
        HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_DWORD,
        REG_OPTION_NON_VOLATILE, REG_SZ, RRF_RT_REG_DWORD, RRF_RT_REG_SZ,
    };

    pub(super) fn read_flags() -> Result<KioskFlags, DomainError> {
        let key = match open_config_key_readonly(HKEY_CURRENT_USER) {
            Ok(Some(key)) => key,
            // キーが無いのは未設定と同じ。全フラグfalseで返す。
            Ok(None) => return Ok(KioskFlags::default()),
            Err(e) => return Err(e),
        };

        let flags = KioskFlags {
            kiosk_mode: read_bool_value(key, VALUE_KIOSK_MODE),
            fullscreen: read_bool_value(key, VALUE_FULLSCREEN),
            taskbar_hidden: read_bool_value(key, VALUE_DISABLE_TASKBAR),
        };
        let _ = unsafe { RegCloseKey(key) };
        Ok(flags)
    }

    pub(super) fn write_kiosk_mode(enabled: bool) -> Result<(), DomainError> {
        let key = open_or_create_config_key()?;
        let value = (enabled as u32).to_le_bytes();
        let name = to_wide(VALUE_KIOSK_MODE);
        let status = unsafe {
            RegSetValueExW(key, PCWSTR(name.as_ptr()), Some(0), REG_DWORD, Some(&value))
        };
        let _ = unsafe { RegCloseKey(key) };
        if status != ERROR_SUCCESS {
            return Err(map_status(status, "write KioskMode"));
        }
        Ok(())
    }

    pub(super) fn read_homepage() -> Option<String> {
        for root in [HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE] {
            let key = match open_config_key_readonly(root) {
                Ok(Some(key)) => key,
                _ => continue,
            };
            let url = read_string_value(key, VALUE_HOMEPAGE);
            let _ = unsafe { RegCloseKey(key) };
            if let Some(url) = url {
                let trimmed = url.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    pub(super) fn write_homepage(url: &str) -> Result<(), DomainError> {
        let key = open_or_create_config_key()?;
        let name = to_wide(VALUE_HOMEPAGE);
        let data = to_wide(url);
        let status = unsafe {
            RegSetValueExW(
                key,
                PCWSTR(name.as_ptr()),
                Some(0),
                REG_SZ,
                Some(std::slice::from_raw_parts(
                    data.as_ptr() as *const u8,
                    data.len() * 2,
                )),
            )
        };
        let _ = unsafe { RegCloseKey(key) };
        if status != ERROR_SUCCESS {
            return Err(map_status(status, "write Homepage"));
        }
        Ok(())
    }

    /// 設定キーを読み取り用に開く。存在しなければOk(None)。
    fn open_config_key_readonly(root: HKEY) -> Result<Option<HKEY>, DomainError> {
        let path = to_wide(KIOSK_REG_PATH);
        let mut key = HKEY::default();
        let status = unsafe {
            RegOpenKeyExW(
                root,
                PCWSTR(path.as_ptr()),
                Some(0),
                KEY_QUERY_VALUE,
                &mut key,
            )
        };
        if status == ERROR_SUCCESS {
            return Ok(Some(key));
        }
        if status == ERROR_FILE_NOT_FOUND || status == ERROR_PATH_NOT_FOUND {
            return Ok(None);
        }
        Err(map_status(status, "open config key"))
    }

    fn open_or_create_config_key() -> Result<HKEY, DomainError> {
        let path = to_wide(KIOSK_REG_PATH);
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
            return Err(map_status(status, "create config key"));
        }
        Ok(key)
    }

    /// DWORD値をboolとして読む。欠損・型不一致はfalse。
    fn read_bool_value(key: HKEY, name: &str) -> bool {
        let name = to_wide(name);
        let mut value: u32 = 0;
        let mut size = std::mem::size_of::<u32>() as u32;
        let status = unsafe {
            RegGetValueW(
                key,
                PCWSTR::null(),
                PCWSTR(name.as_ptr()),
                RRF_RT_REG_DWORD,
                None,
                Some(&mut value as *mut _ as *mut _),
                Some(&mut size),
            )
        };
        status == ERROR_SUCCESS && value != 0
    }

    fn read_string_value(key: HKEY, name: &str) -> Option<String> {
        let name = to_wide(name);
        let mut size_bytes: u32 = 0;
        let status = unsafe {
            RegGetValueW(
                key,
                PCWSTR::null(),
                PCWSTR(name.as_ptr()),
                RRF_RT_REG_SZ,
                None,
                None,
                Some(&mut size_bytes),
            )
        };
        if status != ERROR_SUCCESS || size_bytes == 0 {
            return None;
        }

        let mut buffer: Vec<u16> = vec![0u16; (size_bytes as usize / 2).max(1)];
        let status = unsafe {
            RegGetValueW(
                key,
                PCWSTR::null(),
                PCWSTR(name.as_ptr()),
                RRF_RT_REG_SZ,
                None,
                Some(buffer.as_mut_ptr() as *mut _),
                Some(&mut size_bytes),
            )
        };
        if status != ERROR_SUCCESS {
            return None;
        }
        // size_bytesは終端nullを含む
        let char_len = (size_bytes as usize / 2).saturating_sub(1);
        buffer.truncate(char_len);
        Some(String::from_utf16_lossy(&buffer))
    }

    fn map_status(
        status: windows::Win32::Foundation::WIN32_ERROR,
        context: &str,
    ) -> DomainError {
        if status == ERROR_ACCESS_DENIED {
            return DomainError::RegistryAccessDenied(format!(
                "access denied ({}): status={}",
                context, status.0
            ));
        }
        DomainError::ConfigLoadFailed(format!("{} failed: status={}", context, status.0))
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

    #[test]
    fn flags_default_to_all_off() {
        let adapter = NonWindowsRegistryAdapter::new();
        let flags = adapter.load_flags().expect("load");
        assert_eq!(flags, KioskFlags::default());
    }

    #[test]
    fn homepage_falls_back_to_default() {
        let adapter = NonWindowsRegistryAdapter::new();
        assert_eq!(adapter.homepage_url(), DEFAULT_HOMEPAGE);
    }

    #[test]
    fn persisting_kiosk_exit_is_a_noop() {
        let adapter = NonWindowsRegistryAdapter::new();
        assert!(adapter.persist_kiosk_disabled().is_ok());
    }
}

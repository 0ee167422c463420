//! グローバル低レベルキーボードフックアダプター
//!
//! WH_KEYBOARD_LLフックを設置し、キーダウンごとに共有の判定表を参照する。
//! フックハンドルはプロセスで唯一であり、このクレートの静的変数だけが
//! 保持する。取得・解放はアダプター経由のみ。

use kl_domain::port::driven::GlobalKeyHook;
use kl_domain::DomainError;
use std::sync::Arc;

/// 緊急脱出通知の送り先
pub type EmergencySink = Arc<dyn Fn() + Send + Sync>;

/// プラットフォーム中立のハンドル
#[cfg(windows)]
pub type KeyboardHookAdapter = WindowsKeyboardHook;
#[cfg(not(windows))]
pub type KeyboardHookAdapter = NonWindowsKeyboardHook;

#[cfg(windows)]
pub struct WindowsKeyboardHook {
    on_emergency: EmergencySink,
}

#[cfg(windows)]
impl WindowsKeyboardHook {
    pub fn new(on_emergency: EmergencySink) -> Self {
        Self { on_emergency }
    }
}

#[cfg(windows)]
impl GlobalKeyHook for WindowsKeyboardHook {
    fn install(&self) -> Result<(), DomainError> {
        windows_impl::install(self.on_emergency.clone())
    }

    fn uninstall(&self) {
        windows_impl::uninstall();
    }

    fn is_installed(&self) -> bool {
        windows_impl::is_installed()
    }
}

#[cfg(windows)]
impl Drop for WindowsKeyboardHook {
    fn drop(&mut self) {
        // 所有者が消えるときにハンドルを残さない
        windows_impl::uninstall();
    }
}

#[cfg(not(windows))]
pub struct NonWindowsKeyboardHook {
    _on_emergency: EmergencySink,
    installed: std::sync::atomic::AtomicBool,
}

#[cfg(not(windows))]
impl NonWindowsKeyboardHook {
    pub fn new(on_emergency: EmergencySink) -> Self {
        Self {
            _on_emergency: on_emergency,
            installed: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

#[cfg(not(windows))]
impl GlobalKeyHook for NonWindowsKeyboardHook {
    fn install(&self) -> Result<(), DomainError> {
        self.installed
            .store(true, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn uninstall(&self) {
        self.installed
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn is_installed(&self) -> bool {
        self.installed.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(windows)]
mod windows_impl {
    use super::EmergencySink;
    use kl_domain::model::{KeyCombo, Modifiers};
    use kl_domain::service::shortcut_policy::{self, Verdict};
    use kl_domain::DomainError;
    use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
    use std::sync::Mutex;
    use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        GetAsyncKeyState, VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT,
        WH_KEYBOARD_LL, WM_KEYDOWN, WM_SYSKEYDOWN,
    };

    // プロセス唯一のフックハンドル。0は未設置。
    static HOOK_HANDLE: AtomicIsize = AtomicIsize::new(0);
    // 解除とコールバックの競合に備えた停止フラグ。
    // 無効時はコールバックが判定表を一切評価しない。
    static POLICY_ARMED: AtomicBool = AtomicBool::new(false);
    static EMERGENCY_SINK: Mutex<Option<EmergencySink>> = Mutex::new(None);

    pub(super) fn install(sink: EmergencySink) -> Result<(), DomainError> {
        if HOOK_HANDLE.load(Ordering::Acquire) != 0 {
            // 二重設置はハンドルのリークとイベント二重配送になる
            return Ok(());
        }
        set_sink(Some(sink));
        let module = unsafe { GetModuleHandleW(None) }.map_err(|e| {
            set_sink(None);
            DomainError::HookInstallFailed(format!("GetModuleHandleW failed: {}", e.message()))
        })?;
        let hook = unsafe {
            SetWindowsHookExW(
                WH_KEYBOARD_LL,
                Some(low_level_keyboard_proc),
                Some(module.into()),
                0,
            )
        }
        .map_err(|e| {
            set_sink(None);
            DomainError::HookInstallFailed(format!("SetWindowsHookExW failed: {}", e.message()))
        })?;
        HOOK_HANDLE.store(hook.0 as isize, Ordering::Release);
        POLICY_ARMED.store(true, Ordering::Release);
        Ok(())
    }

    pub(super) fn uninstall() {
        POLICY_ARMED.store(false, Ordering::Release);
        let raw = HOOK_HANDLE.swap(0, Ordering::AcqRel);
        if raw != 0 {
            let _ = unsafe { UnhookWindowsHookEx(HHOOK(raw as *mut core::ffi::c_void)) };
        }
        set_sink(None);
    }

    pub(super) fn is_installed() -> bool {
        HOOK_HANDLE.load(Ordering::Acquire) != 0
    }

    fn set_sink(sink: Option<EmergencySink>) {
        let mut guard = match EMERGENCY_SINK.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = sink;
    }

    fn key_down(vk_code: i32) -> bool {
        unsafe { (GetAsyncKeyState(vk_code) as u16 & 0x8000) != 0 }
    }

    /// フック層は1コールバックにつき1キーしか確実に受け取れないため、
    /// 修飾キー状態は非同期キー状態の照会で補う。
    fn probed_modifiers() -> Modifiers {
        Modifiers::from_flags(
            key_down(VK_CONTROL.0 as i32),
            key_down(VK_MENU.0 as i32),
            key_down(VK_SHIFT.0 as i32),
            key_down(VK_LWIN.0 as i32) || key_down(VK_RWIN.0 as i32),
        )
    }

    fn notify_emergency() {
        let sink = {
            let guard = match EMERGENCY_SINK.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.clone()
        };
        if let Some(sink) = sink {
            sink();
        }
    }

    /// システム全体のキー入力と同じ経路で実行される。
    /// Block経路ではログを含め余計な仕事をしない。ブロックもI/Oもしない。
    unsafe extern "system" fn low_level_keyboard_proc(
        ncode: i32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        if ncode >= 0 && POLICY_ARMED.load(Ordering::Acquire) {
            let message = wparam.0 as u32;
            if message == WM_KEYDOWN || message == WM_SYSKEYDOWN {
                let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
                let combo = KeyCombo::new(info.vkCode, probed_modifiers());
                match shortcut_policy::verdict(&combo) {
                    Verdict::Block => return LRESULT(1),
                    // 確認ダイアログはコントローラの責務。キーは通す。
                    Verdict::EmergencyExit => notify_emergency(),
                    Verdict::Allow => {}
                }
            }
        }
        CallNextHookEx(None, ncode, wparam, lparam)
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn install_and_uninstall_are_idempotent() {
        let hook = NonWindowsKeyboardHook::new(Arc::new(|| {}));
        assert!(!hook.is_installed());
        hook.install().expect("install");
        hook.install().expect("install twice");
        assert!(hook.is_installed());
        hook.uninstall();
        hook.uninstall();
        assert!(!hook.is_installed());
    }

    #[test]
    fn sink_is_held_without_being_invoked() {
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = fired.clone();
        let hook = NonWindowsKeyboardHook::new(Arc::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        hook.install().expect("install");
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}

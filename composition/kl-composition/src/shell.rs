//! ホストシェル用ランタイム配線。
//! シェル実行ファイルの構成ルート。

use kl_adapter_clock::ClockAdapter;
use kl_adapter_hook::KeyboardHookAdapter;
use kl_adapter_keyboard::TouchKeyboardAdapter;
use kl_adapter_registry::RegistryAdapter;
use kl_adapter_shell::ShellChromeAdapter;
use kl_app::{FocusBridge, LockdownController, LockdownDeps};
use kl_domain::model::KioskFlags;
use kl_domain::port::driven::{
    Clock, FlagsRepository, GlobalKeyHook, KeyboardLauncher, LifecycleLog, ShellChrome,
};
use std::sync::{Arc, Weak};

/// LifecycleLogポートをkl-log-utilsへつなぐアダプタ
#[derive(Debug, Default)]
pub struct LifecycleLogWriter;

impl LifecycleLog for LifecycleLogWriter {
    fn write(&self, component: &str, message: &str) {
        kl_log_utils::write_lifecycle_line(component, message);
    }
}

/// シェル実行ファイル用の依存関係
pub struct ShellRuntime {
    flags: KioskFlags,
    registry: RegistryAdapter,
    chrome: Arc<ShellChromeAdapter>,
    controller: Arc<LockdownController>,
    focus: FocusBridge,
}

impl ShellRuntime {
    /// レジストリのスナップショットからランタイムを組み立てる
    pub fn new() -> Self {
        let registry = RegistryAdapter::new();
        let log: Arc<dyn LifecycleLog + Send + Sync> = Arc::new(LifecycleLogWriter);
        let flags = match registry.load_flags() {
            Ok(flags) => flags,
            Err(err) => {
                // 設定が読めない場合はロックしない側へ倒す
                log.write(
                    "config",
                    &format!("kiosk flags unavailable, using defaults: {}", err),
                );
                KioskFlags::default()
            }
        };

        let chrome = Arc::new(ShellChromeAdapter::new());
        let chrome_dep: Arc<dyn ShellChrome + Send + Sync> = chrome.clone();
        let log_dep = log.clone();
        // 緊急脱出の通知はフック→コントローラの循環になるためWeakで渡す
        let controller = Arc::new_cyclic(|weak: &Weak<LockdownController>| {
            let sink_target = weak.clone();
            let hook: Arc<dyn GlobalKeyHook + Send + Sync> =
                Arc::new(KeyboardHookAdapter::new(Arc::new(move || {
                    if let Some(controller) = sink_target.upgrade() {
                        controller.notify_emergency_exit();
                    }
                })));
            LockdownController::new(
                flags,
                LockdownDeps {
                    hook,
                    chrome: chrome_dep,
                    log: log_dep,
                },
            )
        });

        let launcher: Arc<dyn KeyboardLauncher + Send + Sync> =
            Arc::new(TouchKeyboardAdapter::new());
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(ClockAdapter::new());
        let focus = FocusBridge::new(launcher, clock, log);

        Self {
            flags,
            registry,
            chrome,
            controller,
            focus,
        }
    }

    /// セッションのフラグスナップショット
    pub fn flags(&self) -> KioskFlags {
        self.flags
    }

    /// ロックダウンコントローラ取得
    pub fn controller(&self) -> &Arc<LockdownController> {
        &self.controller
    }

    /// フォーカスブリッジ取得
    pub fn focus_bridge(&self) -> &FocusBridge {
        &self.focus
    }

    /// ホームページURL（HKCU→HKLM→既定値）
    pub fn homepage_url(&self) -> String {
        self.registry.homepage_url()
    }

    /// タスクバーを表示へ戻す（toggle_taskbarメッセージ用）
    pub fn show_taskbar(&self) {
        self.chrome.restore();
    }

    /// 確認済みの脱出後にキオスクモードを無効として永続化する
    pub fn persist_kiosk_disabled(&self) {
        if let Err(err) = self.registry.persist_kiosk_disabled() {
            kl_log_utils::write_lifecycle_line(
                "config",
                &format!("failed to persist kiosk exit: {}", err),
            );
        }
    }
}

impl Default for ShellRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kl_domain::port::driving::LockdownUseCase;

    #[test]
    fn runtime_starts_disabled() {
        let runtime = ShellRuntime::new();
        assert!(!runtime.controller().state().is_active());
    }
}

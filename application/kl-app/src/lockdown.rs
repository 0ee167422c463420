//! ロックダウン制御（アプリ層）。
//!
//! キオスクロックダウンの状態機械。グローバルフック・シェルクローム・
//! 緊急脱出の確認往復をここで束ねる。

use crate::window_gate;
use kl_domain::model::{KeyCombo, KioskFlags, LockdownState, SystemCommand};
use kl_domain::port::driven::{GlobalKeyHook, LifecycleLog, ShellChrome};
use kl_domain::port::driving::LockdownUseCase;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

const COMPONENT: &str = "lockdown";

type EmergencyListener = Box<dyn Fn() + Send + Sync>;

/// LockdownControllerの依存
pub struct LockdownDeps {
    pub hook: Arc<dyn GlobalKeyHook + Send + Sync>,
    pub chrome: Arc<dyn ShellChrome + Send + Sync>,
    pub log: Arc<dyn LifecycleLog + Send + Sync>,
}

/// キオスクロックダウンの状態機械。
/// 状態遷移はactivate/deactivateのみで、どちらも冪等。
/// deactivateはブロック中のキーを処理しているハンドラ内からも安全に呼べる。
pub struct LockdownController {
    flags: KioskFlags,
    active: AtomicBool,
    deps: LockdownDeps,
    emergency_listener: Mutex<Option<EmergencyListener>>,
}

impl LockdownController {
    pub fn new(flags: KioskFlags, deps: LockdownDeps) -> Self {
        Self {
            flags,
            active: AtomicBool::new(false),
            deps,
            emergency_listener: Mutex::new(None),
        }
    }

    /// セッションのフラグスナップショット
    pub fn flags(&self) -> KioskFlags {
        self.flags
    }

    /// 緊急脱出イベントの通知先を登録する。
    /// ホストは確認UIを出し、結果をresolve_emergency_exitで返す。
    pub fn set_emergency_listener(&self, listener: impl Fn() + Send + Sync + 'static) {
        *self.lock_listener() = Some(Box::new(listener));
    }

    /// グローバルフックからの緊急脱出通知。
    /// ここでは解除しない。確認なしの解除経路を作らないための間接化。
    pub fn notify_emergency_exit(&self) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        self.deps.log.write(COMPONENT, "emergency exit requested");
        if let Some(listener) = self.lock_listener().as_ref() {
            listener();
        }
    }

    fn lock_listener(&self) -> MutexGuard<'_, Option<EmergencyListener>> {
        match self.emergency_listener.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LockdownUseCase for LockdownController {
    fn activate(&self) {
        if !self.flags.kiosk_mode {
            self.deps
                .log
                .write(COMPONENT, "kiosk mode off; lockdown stays disabled");
            return;
        }
        if self.active.swap(true, Ordering::SeqCst) {
            return; // 既に有効
        }
        if let Err(err) = self.deps.hook.install() {
            // フックが入らなくてもウィンドウ層のみで続行する（縮退運転）
            self.deps.log.write(
                COMPONENT,
                &format!("global hook unavailable, continuing degraded: {}", err),
            );
        }
        if self.flags.wants_chrome_hidden() {
            self.deps.chrome.hide();
        }
        self.deps.log.write(COMPONENT, "lockdown active");
    }

    fn deactivate(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return; // 既に無効
        }
        // 戻る前にフックハンドルを解放する（遅延解除はしない）
        self.deps.hook.uninstall();
        self.deps.chrome.restore();
        self.deps.log.write(COMPONENT, "lockdown released");
    }

    fn state(&self) -> LockdownState {
        if self.active.load(Ordering::SeqCst) {
            LockdownState::Active
        } else {
            LockdownState::Disabled
        }
    }

    fn handle_command_key(&self, combo: &KeyCombo) -> bool {
        window_gate::command_key_consumed(self.state(), combo)
    }

    fn handle_system_command(&self, raw_command: u32) -> bool {
        window_gate::system_command_consumed(self.state(), SystemCommand::from_raw(raw_command))
    }

    fn resolve_emergency_exit(&self, confirmed: bool) {
        if confirmed {
            self.deps.log.write(COMPONENT, "emergency exit confirmed");
            self.deactivate();
        } else {
            self.deps.log.write(COMPONENT, "emergency exit cancelled");
        }
    }
}

impl Drop for LockdownController {
    fn drop(&mut self) {
        // どの終了経路でもハンドルを残さない
        self.deps.hook.uninstall();
    }
}

//! 埋め込みコンテンツからのフォーカス通知ブリッジ。
//!
//! ページの再レンダリングでフォーカス通知が数ミリ秒間隔で連発しても、
//! スクリーンキーボードのプロセスを多重起動しないことがこの部品の存在理由。

use kl_domain::port::driven::{Clock, KeyboardLauncher, LifecycleLog};
use kl_domain::service::throttle::ThrottleGate;
use std::sync::Arc;

/// スクリーンキーボード起動のクールダウン（ミリ秒）
pub const KEYBOARD_COOLDOWN_MS: u64 = 500;

const COMPONENT: &str = "focus";

/// フォーカス通知を受けてスクリーンキーボード起動へつなぐ。
/// 起動は必ずThrottleGate越しに行う。直接KeyboardLauncherを叩かない。
pub struct FocusBridge {
    throttle: ThrottleGate,
    launcher: Arc<dyn KeyboardLauncher + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    log: Arc<dyn LifecycleLog + Send + Sync>,
}

impl FocusBridge {
    pub fn new(
        launcher: Arc<dyn KeyboardLauncher + Send + Sync>,
        clock: Arc<dyn Clock + Send + Sync>,
        log: Arc<dyn LifecycleLog + Send + Sync>,
    ) -> Self {
        Self {
            throttle: ThrottleGate::new(),
            launcher,
            clock,
            log,
        }
    }

    /// 編集可能要素がフォーカスを得たという外部通知。
    pub fn on_focus_signal(&self) {
        if !self
            .throttle
            .try_fire(self.clock.as_ref(), KEYBOARD_COOLDOWN_MS)
        {
            return; // クールダウン中の抑止は正常系
        }
        if let Err(err) = self.launcher.show() {
            // キーボードが起動できなくてもホストは落とさない
            self.log.write(
                COMPONENT,
                &format!("on-screen keyboard launch failed: {}", err),
            );
        }
    }
}

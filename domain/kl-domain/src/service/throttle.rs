//! 連続発火抑止ゲート。
//!
//! フックコールバック経路とUIスレッド経路の両方から叩かれ得るため、
//! タイムスタンプはロックで守る。同一プロセス内でも、将来コールバックが
//! 別スレッドで配送される環境に備える。

use crate::port::driven::Clock;
use std::sync::Mutex;

/// クールダウン付き発火ゲート
#[derive(Debug, Default)]
pub struct ThrottleGate {
    last_fire_ms: Mutex<Option<u64>>,
}

impl ThrottleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前回の発火からcooldown_ms以上経過していればタイムスタンプを
    /// 更新してtrueを返す。未経過ならfalseで副作用なし。
    /// 抑止は正常系であってエラーではない。
    pub fn try_fire(&self, clock: &dyn Clock, cooldown_ms: u64) -> bool {
        let mut last = match self.last_fire_ms.lock() {
            Ok(guard) => guard,
            // ポイズンしても壊れるのはタイムスタンプだけなので回復して続行
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = clock.now_ms();
        if let Some(prev) = *last {
            if now.saturating_sub(prev) < cooldown_ms {
                return false;
            }
        }
        *last = Some(now);
        true
    }
}

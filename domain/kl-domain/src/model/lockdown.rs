//! ロックダウン状態

/// ロックダウンの状態。
/// 遷移は明示的なactivate/deactivateのみで、並行に入ることはない
/// （論理的な所有者はホストウィンドウのライフサイクル）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockdownState {
    Disabled,
    Active,
}

impl LockdownState {
    pub fn is_active(&self) -> bool {
        matches!(self, LockdownState::Active)
    }
}

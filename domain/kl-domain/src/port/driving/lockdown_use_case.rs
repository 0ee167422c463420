//! ロックダウンユースケースポート

use crate::model::{KeyCombo, LockdownState};

/// ホストウィンドウから見たロックダウン操作。
pub trait LockdownUseCase {
    /// ロックダウンを有効化する。キオスクモードが無効なら何もしない。冪等。
    fn activate(&self);

    /// ロックダウンを解除する。冪等で、ハンドラ実行中からも安全に呼べる。
    fn deactivate(&self);

    /// 現在の状態
    fn state(&self) -> LockdownState;

    /// ウィンドウローカル層: アクセラレータキー判定。消費したらtrue。
    fn handle_command_key(&self, combo: &KeyCombo) -> bool;

    /// ウィンドウローカル層: WM_SYSCOMMAND判定。抑止したらtrue。
    fn handle_system_command(&self, raw_command: u32) -> bool;

    /// 緊急脱出の確認結果を反映する。確認された場合のみ解除する。
    fn resolve_emergency_exit(&self, confirmed: bool);
}

//! ウィンドウローカル層の判定（純関数）。
//!
//! アクセラレータキー経路とWM_SYSCOMMAND経路の両方を
//! (ロックダウン状態, メッセージ内容) だけで判定する。内部状態は持たない。

use kl_domain::model::{KeyCombo, LockdownState, SystemCommand};
use kl_domain::service::shortcut_policy::{self, Verdict};

/// アクセラレータキーを消費すべきか。
/// Block判定のみ消費する。緊急脱出の検出と通知はフック層が担う。
pub fn command_key_consumed(state: LockdownState, combo: &KeyCombo) -> bool {
    if !state.is_active() {
        return false;
    }
    matches!(shortcut_policy::verdict(combo), Verdict::Block)
}

/// システムコマンドを抑止すべきか。
/// 移動・サイズ変更・最小化・閉じるはロックダウン中は無条件で抑止する。
/// キーボードショートカットと違い、条件付きで許可することはない。
pub fn system_command_consumed(state: LockdownState, command: Option<SystemCommand>) -> bool {
    state.is_active() && command.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kl_domain::model::{vk, Modifiers, SC_CLOSE, SC_MINIMIZE, SC_MOVE, SC_SIZE};

    fn alt_f4() -> KeyCombo {
        KeyCombo::new(vk::F4, Modifiers::none().with_alt())
    }

    #[test]
    fn blocked_key_consumed_only_while_active() {
        assert!(command_key_consumed(LockdownState::Active, &alt_f4()));
        assert!(!command_key_consumed(LockdownState::Disabled, &alt_f4()));
    }

    #[test]
    fn allowed_key_is_never_consumed() {
        let plain = KeyCombo::new(0x41, Modifiers::none());
        assert!(!command_key_consumed(LockdownState::Active, &plain));
        assert!(!command_key_consumed(LockdownState::Disabled, &plain));
    }

    #[test]
    fn emergency_combo_is_not_consumed_here() {
        // 緊急脱出はこの層の管轄外（通知はフック層が上げる）
        let combo = KeyCombo::new(
            vk::KEY_E,
            Modifiers::none().with_ctrl().with_shift().with_alt(),
        );
        assert!(!command_key_consumed(LockdownState::Active, &combo));
    }

    #[test]
    fn close_command_suppressed_only_while_active() {
        let close = SystemCommand::from_raw(SC_CLOSE);
        assert!(system_command_consumed(LockdownState::Active, close));
        assert!(!system_command_consumed(LockdownState::Disabled, close));
    }

    #[test]
    fn all_four_system_commands_suppressed_while_active() {
        for raw in [SC_MOVE, SC_SIZE, SC_MINIMIZE, SC_CLOSE] {
            assert!(system_command_consumed(
                LockdownState::Active,
                SystemCommand::from_raw(raw)
            ));
        }
    }

    #[test]
    fn unrelated_window_messages_pass_through() {
        assert!(!system_command_consumed(
            LockdownState::Active,
            SystemCommand::from_raw(0xF030)
        ));
        assert!(!system_command_consumed(LockdownState::Active, None));
    }
}

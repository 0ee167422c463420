//! ショートカット判定（純関数）。
//!
//! グローバルフック層とウィンドウメッセージ層が共有する唯一の判定表。
//! 層ごとに表を複製しない。観測の粒度が違っても意味は同じにする。

use crate::model::{vk, KeyCombo};

/// キー観測に対する判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 次のハンドラへ通過させる
    Allow,
    /// 消費してどこにも渡さない
    Block,
    /// 緊急脱出通知を上げる（キー自体は通過させる）
    EmergencyExit,
}

/// 判定表。
///
/// 緊急脱出 Ctrl+Shift+Alt+E は汎用ルール（メタ捕捉・素のAlt抑止）より
/// 先に判定する。順序を入れ替えると脱出ハッチ自体が塞がる。
pub fn verdict(combo: &KeyCombo) -> Verdict {
    let m = combo.modifiers();

    if combo.key() == vk::KEY_E && m.ctrl() && m.shift() && m.alt() && !m.meta() {
        return Verdict::EmergencyExit;
    }

    // メタ（Win）キー単体、およびメタ併用は個別照合なしで全て抑止
    if combo.key() == vk::LWIN || combo.key() == vk::RWIN || m.meta() {
        return Verdict::Block;
    }

    match combo.key() {
        // Alt+F4 / Alt+Tab / Alt+Shift+Tab
        vk::F4 | vk::TAB if m.alt() => Verdict::Block,
        // Ctrl+Esc / Ctrl+Shift+Esc
        vk::ESCAPE if m.ctrl() => Verdict::Block,
        // Ctrl+Alt+Delete
        vk::DELETE if m.ctrl() && m.alt() => Verdict::Block,
        // Print Screen・F11・F12・メニューキーは修飾の有無を問わず抑止
        vk::SNAPSHOT | vk::F11 | vk::F12 | vk::APPS => Verdict::Block,
        // 素のAltも抑止する。OSのメニューアクティベーション副作用を止める
        // 意図的に強い規則で、緩めてはいけない。
        vk::MENU => Verdict::Block,
        _ => Verdict::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;

    fn combo(key: u32, modifiers: Modifiers) -> KeyCombo {
        KeyCombo::new(key, modifiers)
    }

    fn none() -> Modifiers {
        Modifiers::none()
    }

    #[test]
    fn meta_keys_alone_block() {
        assert_eq!(verdict(&combo(vk::LWIN, none())), Verdict::Block);
        assert_eq!(verdict(&combo(vk::RWIN, none())), Verdict::Block);
    }

    #[test]
    fn meta_with_any_key_blocks_without_exact_match() {
        // Win+D / Win+R のような既知の組み合わせ
        assert_eq!(verdict(&combo(0x44, none().with_meta())), Verdict::Block);
        assert_eq!(verdict(&combo(0x52, none().with_meta())), Verdict::Block);
        // 未知のメタ組み合わせでも抑止される
        assert_eq!(verdict(&combo(0x37, none().with_meta())), Verdict::Block);
        assert_eq!(
            verdict(&combo(vk::TAB, none().with_meta())),
            Verdict::Block
        );
    }

    #[test]
    fn alt_f4_blocks() {
        assert_eq!(verdict(&combo(vk::F4, none().with_alt())), Verdict::Block);
    }

    #[test]
    fn alt_tab_and_alt_shift_tab_block() {
        assert_eq!(verdict(&combo(vk::TAB, none().with_alt())), Verdict::Block);
        assert_eq!(
            verdict(&combo(vk::TAB, none().with_alt().with_shift())),
            Verdict::Block
        );
    }

    #[test]
    fn ctrl_esc_and_ctrl_shift_esc_block() {
        assert_eq!(
            verdict(&combo(vk::ESCAPE, none().with_ctrl())),
            Verdict::Block
        );
        assert_eq!(
            verdict(&combo(vk::ESCAPE, none().with_ctrl().with_shift())),
            Verdict::Block
        );
    }

    #[test]
    fn ctrl_alt_delete_blocks() {
        assert_eq!(
            verdict(&combo(vk::DELETE, none().with_ctrl().with_alt())),
            Verdict::Block
        );
        // Deleteキー単体は通す
        assert_eq!(verdict(&combo(vk::DELETE, none())), Verdict::Allow);
    }

    #[test]
    fn print_screen_blocks_bare_and_with_alt() {
        assert_eq!(verdict(&combo(vk::SNAPSHOT, none())), Verdict::Block);
        assert_eq!(
            verdict(&combo(vk::SNAPSHOT, none().with_alt())),
            Verdict::Block
        );
    }

    #[test]
    fn function_and_menu_keys_block() {
        assert_eq!(verdict(&combo(vk::F11, none())), Verdict::Block);
        assert_eq!(verdict(&combo(vk::F12, none())), Verdict::Block);
        assert_eq!(verdict(&combo(vk::APPS, none())), Verdict::Block);
    }

    #[test]
    fn bare_alt_blocks() {
        // 素のAlt抑止は意図した挙動（OSメニュー起動の副作用対策）
        assert_eq!(verdict(&combo(vk::MENU, none())), Verdict::Block);
        // 左右別コードも正規化されて同じ判定になる
        assert_eq!(verdict(&combo(vk::LMENU, none())), Verdict::Block);
        assert_eq!(verdict(&combo(vk::RMENU, none())), Verdict::Block);
    }

    #[test]
    fn emergency_combo_yields_emergency_exit() {
        assert_eq!(
            verdict(&combo(vk::KEY_E, none().with_ctrl().with_shift().with_alt())),
            Verdict::EmergencyExit
        );
    }

    #[test]
    fn emergency_combo_wins_over_generic_alt_rules() {
        // 修飾キーを押し込む途中のAlt自体は素のAltルールで抑止される
        assert_eq!(
            verdict(&combo(vk::MENU, none().with_ctrl().with_shift())),
            Verdict::Block
        );
        // それでも最後のEは緊急脱出として分類される
        assert_eq!(
            verdict(&combo(vk::KEY_E, none().with_ctrl().with_shift().with_alt())),
            Verdict::EmergencyExit
        );
    }

    #[test]
    fn emergency_requires_the_exact_combination() {
        // 修飾が1つでも欠ければ緊急脱出ではない
        assert_eq!(
            verdict(&combo(vk::KEY_E, none().with_ctrl().with_shift())),
            Verdict::Allow
        );
        assert_eq!(
            verdict(&combo(vk::KEY_E, none().with_ctrl().with_alt())),
            Verdict::Allow
        );
        // メタも押されていればメタ捕捉が優先される
        assert_eq!(
            verdict(&combo(
                vk::KEY_E,
                none().with_ctrl().with_shift().with_alt().with_meta()
            )),
            Verdict::Block
        );
    }

    #[test]
    fn unlisted_combinations_are_allowed() {
        // 表に無い観測はすべてAllow
        assert_eq!(verdict(&combo(0x41, none())), Verdict::Allow);
        assert_eq!(verdict(&combo(0x43, none().with_ctrl())), Verdict::Allow);
        assert_eq!(verdict(&combo(vk::TAB, none())), Verdict::Allow);
        assert_eq!(verdict(&combo(vk::ESCAPE, none())), Verdict::Allow);
        // F1やCtrl+F5は過去の版で塞がれていたが、現行の表には含まれない
        assert_eq!(verdict(&combo(0x70, none())), Verdict::Allow);
        assert_eq!(verdict(&combo(0x74, none().with_ctrl())), Verdict::Allow);
    }
}

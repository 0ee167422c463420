//! キオスク設定スナップショット

/// 永続設定から読み取るキオスクフラグ。
/// セッション中は不変のスナップショットとして扱う（ライブリロードなし）。
/// 欠損値はすべてfalse。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KioskFlags {
    /// キオスクモード有効
    pub kiosk_mode: bool,
    /// 全画面表示
    pub fullscreen: bool,
    /// タスクバーを隠す
    pub taskbar_hidden: bool,
}

impl KioskFlags {
    /// ロックダウン有効化時にシェルクロームを隠すべきか
    pub fn wants_chrome_hidden(&self) -> bool {
        self.fullscreen || self.taskbar_hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_off() {
        let flags = KioskFlags::default();
        assert!(!flags.kiosk_mode);
        assert!(!flags.fullscreen);
        assert!(!flags.taskbar_hidden);
        assert!(!flags.wants_chrome_hidden());
    }

    #[test]
    fn either_display_flag_hides_chrome() {
        let fullscreen = KioskFlags {
            kiosk_mode: true,
            fullscreen: true,
            taskbar_hidden: false,
        };
        let taskbar = KioskFlags {
            kiosk_mode: true,
            fullscreen: false,
            taskbar_hidden: true,
        };
        assert!(fullscreen.wants_chrome_hidden());
        assert!(taskbar.wants_chrome_hidden());
    }
}

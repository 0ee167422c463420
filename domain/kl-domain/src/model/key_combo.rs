//! キー組み合わせモデル
//!
//! 仮想キーコード空間はWin32のVK値をビット単位の契約とする。
//! 他プラットフォームへ移植する場合はこの対応表だけを差し替え、
//! 判定表（service::shortcut_policy）には手を入れない。

/// 仮想キーコード定数（Win32 VK空間）
pub mod vk {
    pub const TAB: u32 = 0x09;
    pub const SHIFT: u32 = 0x10;
    pub const CONTROL: u32 = 0x11;
    /// Altキー
    pub const MENU: u32 = 0x12;
    pub const ESCAPE: u32 = 0x1B;
    /// Print Screen
    pub const SNAPSHOT: u32 = 0x2C;
    pub const DELETE: u32 = 0x2E;
    pub const KEY_E: u32 = 0x45;
    pub const LWIN: u32 = 0x5B;
    pub const RWIN: u32 = 0x5C;
    /// コンテキストメニューキー
    pub const APPS: u32 = 0x5D;
    pub const F4: u32 = 0x73;
    pub const F11: u32 = 0x7A;
    pub const F12: u32 = 0x7B;
    pub const LSHIFT: u32 = 0xA0;
    pub const RSHIFT: u32 = 0xA1;
    pub const LCONTROL: u32 = 0xA2;
    pub const RCONTROL: u32 = 0xA3;
    pub const LMENU: u32 = 0xA4;
    pub const RMENU: u32 = 0xA5;
}

/// 左右別の修飾キーVKを汎用コードへ正規化する。
/// 低レベルフックは左右別コードで通知してくるため、判定前に揃える。
pub fn normalize_vk(code: u32) -> u32 {
    match code {
        vk::LSHIFT | vk::RSHIFT => vk::SHIFT,
        vk::LCONTROL | vk::RCONTROL => vk::CONTROL,
        vk::LMENU | vk::RMENU => vk::MENU,
        other => other,
    }
}

/// 修飾キーのビットセット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    const CTRL: u8 = 0b0001;
    const ALT: u8 = 0b0010;
    const SHIFT: u8 = 0b0100;
    const META: u8 = 0b1000;

    /// 修飾キーなし
    pub fn none() -> Self {
        Self(0)
    }

    pub fn from_flags(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if shift {
            bits |= Self::SHIFT;
        }
        if meta {
            bits |= Self::META;
        }
        Self(bits)
    }

    pub fn with_ctrl(self) -> Self {
        Self(self.0 | Self::CTRL)
    }

    pub fn with_alt(self) -> Self {
        Self(self.0 | Self::ALT)
    }

    pub fn with_shift(self) -> Self {
        Self(self.0 | Self::SHIFT)
    }

    pub fn with_meta(self) -> Self {
        Self(self.0 | Self::META)
    }

    pub fn ctrl(&self) -> bool {
        self.0 & Self::CTRL != 0
    }

    pub fn alt(&self) -> bool {
        self.0 & Self::ALT != 0
    }

    pub fn shift(&self) -> bool {
        self.0 & Self::SHIFT != 0
    }

    /// Win（メタ）キー
    pub fn meta(&self) -> bool {
        self.0 & Self::META != 0
    }

    /// いずれかの修飾キーが押されているか
    pub fn any(&self) -> bool {
        self.0 != 0
    }
}

/// 1回のキー観測（主キー＋修飾キー状態）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    key: u32,
    modifiers: Modifiers,
}

impl KeyCombo {
    /// 主キーは構築時に正規化する
    pub fn new(key: u32, modifiers: Modifiers) -> Self {
        Self {
            key: normalize_vk(key),
            modifiers,
        }
    }

    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_sided_modifiers_to_generic() {
        assert_eq!(normalize_vk(vk::LMENU), vk::MENU);
        assert_eq!(normalize_vk(vk::RMENU), vk::MENU);
        assert_eq!(normalize_vk(vk::LCONTROL), vk::CONTROL);
        assert_eq!(normalize_vk(vk::RCONTROL), vk::CONTROL);
        assert_eq!(normalize_vk(vk::LSHIFT), vk::SHIFT);
        assert_eq!(normalize_vk(vk::RSHIFT), vk::SHIFT);
    }

    #[test]
    fn normalize_keeps_other_codes_untouched() {
        assert_eq!(normalize_vk(vk::F4), vk::F4);
        assert_eq!(normalize_vk(vk::LWIN), vk::LWIN);
        assert_eq!(normalize_vk(0x41), 0x41);
    }

    #[test]
    fn combo_normalizes_primary_key() {
        let combo = KeyCombo::new(vk::RMENU, Modifiers::none());
        assert_eq!(combo.key(), vk::MENU);
    }

    #[test]
    fn modifier_bits_are_independent() {
        let m = Modifiers::none().with_ctrl().with_shift();
        assert!(m.ctrl());
        assert!(m.shift());
        assert!(!m.alt());
        assert!(!m.meta());
        assert!(m.any());
        assert!(!Modifiers::none().any());
    }

    #[test]
    fn from_flags_matches_builders() {
        assert_eq!(
            Modifiers::from_flags(true, true, false, false),
            Modifiers::none().with_ctrl().with_alt()
        );
        assert_eq!(
            Modifiers::from_flags(false, false, true, true),
            Modifiers::none().with_shift().with_meta()
        );
    }
}

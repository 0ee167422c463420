//! システムコマンド（WM_SYSCOMMAND）モデル

/// システムコマンドコード（WM_SYSCOMMANDのwParam、ビット単位の契約）
pub const SC_SIZE: u32 = 0xF000;
pub const SC_MOVE: u32 = 0xF010;
pub const SC_MINIMIZE: u32 = 0xF020;
pub const SC_CLOSE: u32 = 0xF060;

/// ウィンドウクロームに対するシステムコマンドのうち、
/// ロックダウン対象の4種。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Move,
    Size,
    Minimize,
    Close,
}

impl SystemCommand {
    /// WM_SYSCOMMANDのwParamから種別を判定する。
    /// 下位4ビットはシステムの内部情報のためマスクする。
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw & 0xFFF0 {
            SC_MOVE => Some(Self::Move),
            SC_SIZE => Some(Self::Size),
            SC_MINIMIZE => Some(Self::Minimize),
            SC_CLOSE => Some(Self::Close),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_four_guarded_commands() {
        assert_eq!(SystemCommand::from_raw(SC_MOVE), Some(SystemCommand::Move));
        assert_eq!(SystemCommand::from_raw(SC_SIZE), Some(SystemCommand::Size));
        assert_eq!(
            SystemCommand::from_raw(SC_MINIMIZE),
            Some(SystemCommand::Minimize)
        );
        assert_eq!(SystemCommand::from_raw(SC_CLOSE), Some(SystemCommand::Close));
    }

    #[test]
    fn masks_low_bits_before_matching() {
        // マウス操作由来のwParamは下位4ビットに付加情報を持つ
        assert_eq!(
            SystemCommand::from_raw(SC_CLOSE | 0x0002),
            Some(SystemCommand::Close)
        );
        assert_eq!(
            SystemCommand::from_raw(SC_MOVE | 0x000F),
            Some(SystemCommand::Move)
        );
    }

    #[test]
    fn other_commands_are_none() {
        // SC_MAXIMIZE・SC_RESTOREなどは対象外
        assert_eq!(SystemCommand::from_raw(0xF030), None);
        assert_eq!(SystemCommand::from_raw(0xF120), None);
        assert_eq!(SystemCommand::from_raw(0), None);
    }
}

//! キオスク設定リポジトリポート

use crate::error::DomainError;
use crate::model::KioskFlags;

/// キオスクフラグの永続ストレージポート
pub trait FlagsRepository {
    /// フラグのスナップショットを読込（欠損値はfalse扱い）
    fn load_flags(&self) -> Result<KioskFlags, DomainError>;

    /// キオスクモードを無効として永続化する。
    /// 確認済みの緊急脱出後にのみ呼ぶ。セッション中のスナップショットは変えない。
    fn persist_kiosk_disabled(&self) -> Result<(), DomainError>;
}

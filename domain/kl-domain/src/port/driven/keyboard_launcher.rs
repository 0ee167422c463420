//! スクリーンキーボード起動ポート

use crate::error::DomainError;

/// スクリーンキーボードの起動。
/// 起動完了は待たない（fire-and-forget）。
pub trait KeyboardLauncher {
    fn show(&self) -> Result<(), DomainError>;
}

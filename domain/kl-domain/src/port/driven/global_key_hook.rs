//! グローバルキーフックポート

use crate::error::DomainError;

/// プロセス全体の低レベルキーボードフック。
///
/// フックハンドルはプロセスで唯一であり、実装クレートだけが設置・解除する。
/// 二重設置はハンドルのリークとイベントの二重配送になるため、
/// 実装側で冪等にすること。
pub trait GlobalKeyHook {
    /// フックを設置する。設置済みなら何もしない。
    fn install(&self) -> Result<(), DomainError>;

    /// フックを解除する。未設置なら何もしない。
    /// 戻った時点でハンドルが解放済みであることを保証する（遅延解除なし）。
    fn uninstall(&self);

    /// フックが設置済みか
    fn is_installed(&self) -> bool;
}

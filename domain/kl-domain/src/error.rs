//! ドメインエラー型
//!
//! 標準ライブラリのみ使用（外部エラーハンドリングクレートなし）

use std::fmt;

/// ドメイン層のエラー型
/// 各バリアントは特定の失敗シナリオを表現
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// グローバルフックの設置失敗（同時フック数上限・権限不足など）
    HookInstallFailed(String),

    /// 外部プロセス起動失敗
    ProcessLaunchFailed(String),

    /// レジストリアクセス拒否
    RegistryAccessDenied(String),

    /// 設定値が無効
    InvalidConfig(String),

    /// 設定の読み込み失敗
    ConfigLoadFailed(String),

    /// ファイルI/Oエラー
    IoError(String),

    /// 不明なエラー
    Unknown(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HookInstallFailed(msg) => {
                write!(f, "Hook install failed: {}", msg)
            }
            Self::ProcessLaunchFailed(msg) => {
                write!(f, "Process launch failed: {}", msg)
            }
            Self::RegistryAccessDenied(msg) => {
                write!(f, "Registry access denied: {}", msg)
            }
            Self::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            Self::ConfigLoadFailed(msg) => {
                write!(f, "Configuration load failed: {}", msg)
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {}", msg)
            }
            Self::Unknown(msg) => {
                write!(f, "Unknown error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

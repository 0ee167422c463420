//! kl-app: アプリケーション層。
//! ロックダウン制御・フォーカスブリッジ・ウィンドウゲートのユースケースを
//! ドメインポートの上に実装する。

pub mod focus;
pub mod lockdown;
pub mod window_gate;

pub use focus::{FocusBridge, KEYBOARD_COOLDOWN_MS};
pub use lockdown::{LockdownController, LockdownDeps};

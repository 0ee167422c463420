//! KiosklocK 共通UIライブラリ
//!
//! ネイティブMessageBoxによる通知と、緊急脱出の確認プロンプトを提供。

pub mod message_box;

pub use message_box::{prompt_exit_kiosk, show_error_msgbox, show_info_msgbox};

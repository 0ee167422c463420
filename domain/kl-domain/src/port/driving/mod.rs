//! 駆動ポート（入力インターフェース）。
//!
//! ホストアプリケーションから見たユースケースを定義する。

mod lockdown_use_case;

pub use lockdown_use_case::*;

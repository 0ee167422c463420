//! kl-composition: 実行ファイル向けのコンポジションルート。
//! ドメイン／アプリケーション／各種アダプタをここで配線し、apps/* はこのクレートだけに依存する。

pub mod shell;

// apps/* が内側レイヤーの型に触れる必要がある場合は、ここから辿れるようにする。
// （apps が kl-domain等を直接依存しないため）
pub use kl_app as app;
pub use kl_domain as domain;
pub use kl_ui_common as ui_common;

// 利便性のための再エクスポート（appsはアダプタクレートではなくこれらを使用）
pub use kl_app::{FocusBridge, LockdownController};
pub use kl_domain::model::KioskFlags;
pub use kl_domain::port::driving::LockdownUseCase;
pub use shell::ShellRuntime;

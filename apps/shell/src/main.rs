#![cfg_attr(windows, windows_subsystem = "windows")]
//! KiosklocK ホストシェル（WebView）
//!
//! 全画面ホストウィンドウに埋め込みブラウザを載せ、ロックダウン制御と
//! フォーカス→スクリーンキーボード起動の配線を行う。

#[cfg(windows)]
mod app;

#[cfg(windows)]
fn main() {
    app::run();
}

#[cfg(not(windows))]
fn main() {
    kl_log_utils::write_lifecycle_line("shell", "unsupported platform; exiting");
    eprintln!("kiosklock-shell runs on Windows only");
    std::process::exit(1);
}

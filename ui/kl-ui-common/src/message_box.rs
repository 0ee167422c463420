//! ネイティブMessageBox補助（Windowsのみ）

use kl_log_utils::write_lifecycle_line;

const COMPONENT: &str = "ui";
const APP_TITLE: &str = "KiosklocK";
const EXIT_PROMPT_TITLE: &str = "Kiosk Mode";
const EXIT_PROMPT_MESSAGE: &str = "Exit kiosk mode?";

#[cfg(windows)]
mod win_flags {
    use windows::Win32::UI::WindowsAndMessaging::{
        MESSAGEBOX_STYLE, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONQUESTION, MB_OK, MB_YESNO,
    };

    pub const ERROR: MESSAGEBOX_STYLE = MESSAGEBOX_STYLE(MB_OK.0 | MB_ICONERROR.0);
    pub const INFO: MESSAGEBOX_STYLE = MESSAGEBOX_STYLE(MB_OK.0 | MB_ICONINFORMATION.0);
    pub const YES_NO_QUESTION: MESSAGEBOX_STYLE = MESSAGEBOX_STYLE(MB_YESNO.0 | MB_ICONQUESTION.0);
}

fn log_dialog(kind: &str, title: &str, msg: &str, result: Option<&str>) {
    let mut message = format!("{}: {} - {}", kind, title, msg.replace('\n', "\\n"));
    if let Some(res) = result {
        message.push_str(&format!(" result={}", res));
    }
    write_lifecycle_line(COMPONENT, &message);
}

#[cfg(windows)]
fn show_message_box(
    title: &str,
    msg: &str,
    flags: windows::Win32::UI::WindowsAndMessaging::MESSAGEBOX_STYLE,
) -> windows::Win32::UI::WindowsAndMessaging::MESSAGEBOX_RESULT {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging::MessageBoxW;

    let title_w: Vec<u16> = OsStr::new(title)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    let text_w: Vec<u16> = OsStr::new(msg)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    unsafe { MessageBoxW(None, PCWSTR(text_w.as_ptr()), PCWSTR(title_w.as_ptr()), flags) }
}

pub fn show_error_msgbox(msg: &str) {
    log_dialog("error", APP_TITLE, msg, None);
    #[cfg(windows)]
    {
        let _ = show_message_box(APP_TITLE, msg, win_flags::ERROR);
    }
}

pub fn show_info_msgbox(msg: &str) {
    log_dialog("info", APP_TITLE, msg, None);
    #[cfg(windows)]
    {
        let _ = show_message_box(APP_TITLE, msg, win_flags::INFO);
    }
}

/// 緊急脱出の確認プロンプト。Yesでtrue。
/// 非Windowsでは常にfalse（誤検知でロックが外れる方向には倒さない）。
pub fn prompt_exit_kiosk() -> bool {
    #[cfg(windows)]
    {
        use windows::Win32::UI::WindowsAndMessaging::IDYES;

        let res = show_message_box(
            EXIT_PROMPT_TITLE,
            EXIT_PROMPT_MESSAGE,
            win_flags::YES_NO_QUESTION,
        );
        let decision = if res == IDYES { "yes" } else { "no" };
        log_dialog("prompt", EXIT_PROMPT_TITLE, EXIT_PROMPT_MESSAGE, Some(decision));
        res == IDYES
    }

    #[cfg(not(windows))]
    {
        log_dialog("prompt", EXIT_PROMPT_TITLE, EXIT_PROMPT_MESSAGE, Some("no"));
        false
    }
}

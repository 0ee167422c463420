//! シェル本体。ウィンドウ構築・WebView配線・イベントループ。

use clap::Parser;
use kl_composition::domain::model::{KeyCombo, KioskFlags, Modifiers};
use kl_composition::ui_common::{prompt_exit_kiosk, show_error_msgbox};
use kl_composition::{LockdownController, LockdownUseCase, ShellRuntime};
use kl_log_utils::write_lifecycle_line;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::{Arc, OnceLock};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopProxy};
use tao::platform::windows::WindowExtWindows;
use tao::window::{Fullscreen, Window, WindowBuilder};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, SetWindowLongPtrW, GWLP_WNDPROC, WM_KEYDOWN, WM_SYSCOMMAND, WM_SYSKEYDOWN,
    WNDPROC,
};
use wry::http::Request;
use wry::{WebView, WebViewBuilder};

const COMPONENT: &str = "shell";

/// 運用時の上書きフラグ
#[derive(Debug, Parser)]
#[command(name = "kiosklock-shell", about = "KiosklocK kiosk browser shell")]
struct Args {
    /// 表示するURL（レジストリ設定を上書き）
    #[arg(long)]
    url: Option<String>,

    /// 全画面化せずウィンドウ表示する（動作確認用）
    #[arg(long)]
    windowed: bool,
}

#[derive(Debug, Clone, Copy)]
enum UserEvent {
    EmergencyExit,
}

/// ページへ渡す設定オブジェクト
#[derive(Debug, Serialize)]
struct PageConfig {
    kiosk: bool,
    fullscreen: bool,
}

// サブクラス化したWndProcが参照する共有状態
static PREV_WNDPROC: AtomicIsize = AtomicIsize::new(0);
static CONTROLLER: OnceLock<Arc<LockdownController>> = OnceLock::new();

// 編集可能要素のフォーカスで 'focus' を通知するスクリプト。
// ヘルパーはキオスク時のみ生やす。
const FOCUS_SCRIPT: &str = r#"
window.__KIOSK__ = __KIOSK_CONFIG__;
window.addEventListener('load', () => {
    document.body.addEventListener('focusin', (e) => {
        const t = e.target;
        if (t.tagName === 'INPUT' || t.tagName === 'TEXTAREA' || t.contentEditable === 'true') {
            window.ipc.postMessage('focus');
        }
    }, true);
    if (window.__KIOSK__.kiosk) {
        window.exitKiosk = () => window.ipc.postMessage('exit_kiosk');
        window.toggleTaskbar = () => window.ipc.postMessage('toggle_taskbar');
    }
});
"#;

// キオスク用のページ側制限（コンテキストメニューと開発ツール系ショートカット）
const KIOSK_RESTRICTIONS_SCRIPT: &str = r#"
document.addEventListener('contextmenu', (e) => e.preventDefault());
document.addEventListener('keydown', (e) => {
    if (e.key === 'F12' ||
        (e.ctrlKey && e.shiftKey && (e.key === 'I' || e.key === 'J')) ||
        (e.ctrlKey && e.key === 'u')) {
        e.preventDefault();
    }
});
"#;

pub fn run() {
    let args = Args::parse();
    let runtime = ShellRuntime::new();
    let flags = runtime.flags();
    write_lifecycle_line(
        COMPONENT,
        &format!(
            "starting (kiosk={}, fullscreen={}, taskbar_hidden={})",
            flags.kiosk_mode, flags.fullscreen, flags.taskbar_hidden
        ),
    );

    let event_loop: EventLoop<UserEvent> = EventLoop::with_user_event();
    let proxy = event_loop.create_proxy();

    let controller = runtime.controller().clone();
    let _ = CONTROLLER.set(controller.clone());
    {
        // フック経路からは通知だけ受け、確認はUIスレッドで行う
        let proxy = proxy.clone();
        controller.set_emergency_listener(move || {
            let _ = proxy.send_event(UserEvent::EmergencyExit);
        });
    }

    let fullscreen = flags.kiosk_mode && flags.fullscreen && !args.windowed;
    let window = match WindowBuilder::new()
        .with_title("KiosklocK")
        .with_decorations(false)
        .with_maximized(!fullscreen)
        .with_fullscreen(fullscreen.then(|| Fullscreen::Borderless(None)))
        .with_always_on_top(flags.kiosk_mode && !args.windowed)
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(err) => {
            show_error_msgbox(&format!("window build failed: {err}"));
            return;
        }
    };

    install_window_gate(&window);

    let homepage = args.url.unwrap_or_else(|| runtime.homepage_url());
    let runtime = Rc::new(runtime);
    let webview_cell: Rc<RefCell<Option<WebView>>> = Rc::new(RefCell::new(None));

    let ipc_runtime = runtime.clone();
    let ipc_proxy = proxy.clone();
    let ipc_webview = webview_cell.clone();
    let webview = match WebViewBuilder::new(&window)
        .with_devtools(false)
        .with_initialization_script(&build_init_script(&flags))
        .with_url(&homepage)
        .with_ipc_handler(move |req: Request<String>| {
            handle_ipc(req.body(), &ipc_runtime, &ipc_proxy, &ipc_webview);
        })
        .build()
    {
        Ok(webview) => webview,
        Err(err) => {
            show_error_msgbox(&format!("WebView build failed: {err}"));
            return;
        }
    };
    *webview_cell.borrow_mut() = Some(webview);

    controller.activate();

    let loop_controller = controller;
    let loop_runtime = runtime;
    let loop_window = window;
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if loop_controller.state().is_active() {
                    // ロックダウン中は閉じさせない
                    write_lifecycle_line(COMPONENT, "close request suppressed while locked");
                } else {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::UserEvent(UserEvent::EmergencyExit) => {
                if loop_controller.state().is_active() {
                    if prompt_exit_kiosk() {
                        loop_controller.resolve_emergency_exit(true);
                        loop_runtime.persist_kiosk_disabled();
                        restore_window(&loop_window);
                    } else {
                        loop_controller.resolve_emergency_exit(false);
                    }
                }
            }
            Event::LoopDestroyed => {
                // どの終了経路でもフックを残さない
                loop_controller.deactivate();
            }
            _ => {}
        }
    });
}

fn build_init_script(flags: &KioskFlags) -> String {
    let config = PageConfig {
        kiosk: flags.kiosk_mode,
        fullscreen: flags.fullscreen,
    };
    let config_json = serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string());
    let mut script = String::from(FOCUS_SCRIPT);
    if flags.kiosk_mode {
        script.push_str(KIOSK_RESTRICTIONS_SCRIPT);
    }
    script.replace("__KIOSK_CONFIG__", &config_json)
}

fn handle_ipc(
    body: &str,
    runtime: &Rc<ShellRuntime>,
    proxy: &EventLoopProxy<UserEvent>,
    webview: &Rc<RefCell<Option<WebView>>>,
) {
    match body {
        "focus" => runtime.focus_bridge().on_focus_signal(),
        "refresh" => {
            if let Some(webview) = webview.borrow().as_ref() {
                let _ = webview.evaluate_script("window.location.reload()");
            }
        }
        // ページ起点の脱出要求も緊急キーと同じ確認フローへ通す
        "exit_kiosk" => {
            if runtime.controller().state().is_active() {
                let _ = proxy.send_event(UserEvent::EmergencyExit);
            }
        }
        "toggle_taskbar" => {
            if runtime.flags().kiosk_mode && runtime.flags().taskbar_hidden {
                runtime.show_taskbar();
            }
        }
        other => {
            write_lifecycle_line(COMPONENT, &format!("ignoring unknown web message: {}", other));
        }
    }
}

/// ロックダウン解除後にウィンドウを通常表示へ戻す
fn restore_window(window: &Window) {
    window.set_fullscreen(None);
    window.set_always_on_top(false);
    window.set_decorations(true);
}

/// ホストウィンドウのWndProcをサブクラス化してウィンドウローカル層を差し込む。
/// フレームワークがキーを解決する前のWM_SYSCOMMAND・キーダウンをここで見る。
fn install_window_gate(window: &Window) {
    let hwnd = HWND(window.hwnd() as _);
    let prev = unsafe { SetWindowLongPtrW(hwnd, GWLP_WNDPROC, window_gate_proc as isize) };
    PREV_WNDPROC.store(prev, Ordering::Release);
}

fn gate_modifiers() -> Modifiers {
    fn down(vk_code: i32) -> bool {
        unsafe { (GetKeyState(vk_code) as u16 & 0x8000) != 0 }
    }
    Modifiers::from_flags(
        down(VK_CONTROL.0 as i32),
        down(VK_MENU.0 as i32),
        down(VK_SHIFT.0 as i32),
        down(VK_LWIN.0 as i32) || down(VK_RWIN.0 as i32),
    )
}

unsafe extern "system" fn window_gate_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if let Some(controller) = CONTROLLER.get() {
        match msg {
            WM_SYSCOMMAND => {
                if controller.handle_system_command(wparam.0 as u32) {
                    return LRESULT(0);
                }
            }
            WM_KEYDOWN | WM_SYSKEYDOWN => {
                let combo = KeyCombo::new(wparam.0 as u32, gate_modifiers());
                if controller.handle_command_key(&combo) {
                    return LRESULT(0);
                }
            }
            _ => {}
        }
    }
    let prev: WNDPROC = std::mem::transmute(PREV_WNDPROC.load(Ordering::Acquire));
    CallWindowProcW(prev, hwnd, msg, wparam, lparam)
}

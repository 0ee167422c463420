//! ライフサイクルログポート

/// ライフサイクルログの書き込み。
/// フックコールバックなど遅延に敏感な経路からは呼ばない。
pub trait LifecycleLog {
    fn write(&self, component: &str, message: &str);
}

//! シェルクロームポート

/// OSシェルのクローム（タスクバー等）の表示制御
pub trait ShellChrome {
    /// クロームを隠す
    fn hide(&self);

    /// クロームを復元する
    fn restore(&self);
}

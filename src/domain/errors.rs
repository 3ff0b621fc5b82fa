/// 予約期間のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// 終了時刻が開始時刻より後でない
    EndNotAfterStart,
}

/// ページネーション指定のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// ページサイズが0
    SizeIsZero,
}

/// ステータス遷移のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// 既に終端ステータス（APPROVED / REJECTED）に到達している
    ///
    /// 現在のステータスの文字列表現を保持する。
    AlreadyDecided(&'static str),
}

/// カテゴリ文字列のパースエラー
///
/// 受け付けない`state`の入力値をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStateError(pub String);

impl std::fmt::Display for UnknownStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown state: {}", self.0)
    }
}

/*
============================================================================
GDI+セッション管理モジュール (session.rs)
============================================================================

【ファイル概要】
GDI+サブシステムの初期化とシャットダウンをRAIIパターンで管理するモジュール。
GDI+は、高品質な2Dグラフィックス、テキスト、画像を描画するためのAPIで、
プロセス開始時に一度だけ初期化し、終了時にシャットダウンする必要があります。

【使用方法】
アプリケーション起動時に `GdiplusSession::new()` でガードを作成し、
アプリケーションの生存期間中保持してください。ガードがスコープを抜けると
自動的に `GdiplusShutdown` が呼ばれます。

【制約】
プロセス内で同時に複数のセッションを構築した場合の動作はGDI+側で未定義
です。1プロセス1セッションの維持は呼び出し側の責任です（このモジュールは
再入可能な初期化パスを公開しません）。
 */

use windows::Win32::Graphics::GdiPlus::{
    GdiplusShutdown, GdiplusStartup, GdiplusStartupInput, GdiplusStartupOutput,
};

use crate::error::{GdiplusError, gdiplus_check};

/// GDI+サブシステムのRAIIガード
///
/// 構築時に `GdiplusStartup` を呼び出してトークンを保持し、破棄時に
/// `GdiplusShutdown` を無条件に呼び出します。シャットダウンは
/// デストラクタから決してpanicしません。
#[derive(Debug)]
pub struct GdiplusSession {
    token: usize,
}

impl GdiplusSession {
    /// GDI+を初期化し、セッションガードを作成する
    ///
    /// # 戻り値
    /// * `Ok(GdiplusSession)` - 初期化に成功した場合。
    /// * `Err(GdiplusError)` - `GdiplusStartup` が失敗した場合。
    pub fn new() -> Result<Self, GdiplusError> {
        // `token` はシャットダウン時に必要となる
        let mut token: usize = 0;
        let startup_input = GdiplusStartupInput {
            GdiplusVersion: 1,
            ..Default::default()
        };
        let mut startup_output = GdiplusStartupOutput::default();

        let status = unsafe { GdiplusStartup(&mut token, &startup_input, &mut startup_output) };
        gdiplus_check(status)?;

        tracing::debug!("✅ GDI+ を初期化しました (token: {})", token);

        Ok(Self { token })
    }
}

impl Drop for GdiplusSession {
    fn drop(&mut self) {
        // シャットダウンの失敗は通知手段がないため、そのまま処理を終える
        unsafe {
            GdiplusShutdown(self.token);
        }
        tracing::debug!("GDI+ をシャットダウンしました");
    }
}

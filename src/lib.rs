/*
============================================================================
gdiputils - GDI+ アダプテーションレイヤーライブラリ (lib.rs)
============================================================================

【ライブラリ概要】
アプリケーションのUI層とGDI+（Windows標準の2Dイメージングライブラリ）の間を
仲介する薄いアダプテーションレイヤーです。GDI+のライフタイム管理、ステータス
コードからエラー型への変換、UI層との型変換（色・矩形・整列）、そして
アスペクト比維持スケーリングやアルファブレンド付きのイメージ描画ヘルパーを
提供します。

【主要機能一覧】
1. 🎨 セッション管理：GdiplusStartup/GdiplusShutdown のRAIIガード
2. ⚠️ ステータス変換：GDI+ステータスコード → 型付きエラー（固定文字列テーブル）
3. 🔄 型変換：COLORREF→ARGB色、RECT→RectF、整列列挙型→StringAlignment
4. 🖼️ イメージ描画：引き伸ばし／アスペクト比維持／原寸の3ポリシー + アルファ減衰
5. 📂 イメージ読み込み：ファイルパスから、または任意のバイトストリームから
6. 🔍 エンコーダー検索：MIMEタイプによるCLSID検索と、それを使った保存
7. 🧱 ピクセル変換：GpBitmap → image::RgbaImage の独立コピー

【技術仕様・アーキテクチャ】
┌─ 言語：Rust 2024 Edition
├─ GDI+連携：windows クレートのフラットAPI（Win32_Graphics_GdiPlus）
├─ エラー処理：thiserror による型付きエラー + Result伝播（panicフリー設計）
├─ ログ：tracing（デバッグレベル中心、呼び出し側でsubscriberを設定）
├─ 画像処理：image クレート（GDI+ビットマップからの独立ピクセルコピー）
└─ リソース管理：Drop trait によるGDI+オブジェクトの確実な解放

【モジュール構成・依存関係図】
                    lib.rs（クレートルート）
                        |
        +---------------+---------------+---------------+
        |               |               |               |
     error.rs       session.rs      convert.rs       image.rs
   （エラー変換）  （セッション管理） （型変換）    （イメージハンドル）
                                                        |
                                        +---------------+---------------+
                                        |               |               |
                                     draw.rs        loader.rs      encoder.rs
                                   （描画処理）   （読み込み）  （エンコーダー検索）
                                                        |
                                                    pixels.rs
                                                 （ピクセル変換）

【プラットフォームについて】
GDI+のフラットAPIを呼び出す関数はすべて #[cfg(windows)] でゲートされています。
純粋なデータ変換（色・矩形・整列・描画先矩形の計算・カラーマトリックス生成）と
エラー型はプラットフォーム非依存でコンパイル・テストできます。

【スレッドモデル】
全操作は同期・単発のGDI+呼び出しです。GDI+自体のスレッド安全性（の有無）は
ライブラリ側に委ねられており、このクレートでは仲介しません。

============================================================================
*/

/*
============================================================================
エラー型とステータス変換
============================================================================
*/
pub mod error;
pub use error::{GdiplusError, gdiplus_check, gdiplus_status_string};

/*
============================================================================
GDI+セッション管理（RAIIガード）
============================================================================
*/
#[cfg(windows)]
pub mod session;
#[cfg(windows)]
pub use session::GdiplusSession;

/*
============================================================================
UI層との型変換
============================================================================
*/
pub mod convert;
pub use convert::{
    HorizontalAlignment, VerticalAlignment, alignment_to_string_alignment, colorref_to_color,
    colorref_to_color_with_alpha, rect_to_rectf, vertical_alignment_to_string_alignment,
};

/*
============================================================================
イメージハンドル（所有権付きGpImage/GpBitmapラッパー）
============================================================================
*/
#[cfg(windows)]
pub mod image;
#[cfg(windows)]
pub use image::{Bitmap, GdiplusImage, Image};

/*
============================================================================
イメージ描画（スケーリングポリシー + アルファブレンド）
============================================================================
*/
pub mod draw;
#[cfg(windows)]
pub use draw::draw_image;
pub use draw::{alpha_color_matrix, fit_destination_rect};

/*
============================================================================
イメージ読み込み（ファイル / ストリーム）
============================================================================
*/
#[cfg(windows)]
pub mod loader;
#[cfg(windows)]
pub use loader::{load_image_from_file, load_image_from_stream};

/*
============================================================================
エンコーダー検索と保存
============================================================================
*/
#[cfg(windows)]
pub mod encoder;
#[cfg(windows)]
pub use encoder::{get_encoder_clsid, save_image_to_file};

/*
============================================================================
ピクセル変換（GpBitmap → image::RgbaImage）
============================================================================
*/
#[cfg(windows)]
pub mod pixels;
#[cfg(windows)]
pub use pixels::bitmap_to_rgba_image;

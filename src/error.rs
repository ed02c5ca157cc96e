/*
============================================================================
エラー型とGDI+ステータス変換モジュール (error.rs)
============================================================================

【ファイル概要】
GDI+のフラットAPIが返すステータスコード（Status）を、このライブラリの
型付きエラー（GdiplusError）へ変換するモジュールです。ステータス名の
固定文字列テーブルと、Win32エラー時のOSエラーメッセージ取得も担当します。

【主要機能】
1.  **型付きエラー (`GdiplusError`)**:
    -   ライブラリ全体の失敗を表す thiserror ベースの列挙型。
2.  **ステータスチェック (`gdiplus_check`)**:
    -   Status(0) (Ok) なら成功、それ以外はエラーに変換して返す。
    -   Win32Error (コード7) の場合のみ、GetLastError のOSエラー説明文を
        メッセージに埋め込む。
3.  **ステータス名テーブル (`gdiplus_status_string`)**:
    -   22種類のステータスコードを表示用文字列に変換する固定テーブル。
    -   範囲外のコードは "Unknown (code N)" 形式にフォールバック。

【互換性に関する注意】
ステータス名テーブルと "GDI+ error: ..." / "Unknown (code N)" の書式は、
ログを解析する既存ツールとの互換契約です。文言を変更しないでください
（テストで文字列そのものを固定しています）。

【AI解析用：依存関係】
- プロジェクト内のほぼ全てのモジュール: GDI+呼び出しの戻り値検査のために
  `gdiplus_check` を呼び出す。
 */

use thiserror::Error;
use windows::Win32::Graphics::GdiPlus::Status;

#[cfg(windows)]
use windows::{
    Win32::{
        Foundation::GetLastError,
        System::Diagnostics::Debug::{
            FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW,
        },
    },
    core::PWSTR,
};

/// GDI+アダプテーションレイヤーのエラー型
///
/// ライブラリの失敗はすべてこの列挙型で表現されます。`Status` と `Win32` の
/// 表示書式はステータス名テーブルと合わせて互換契約の一部です。
#[derive(Error, Debug)]
pub enum GdiplusError {
    /// GDI+ APIがOk以外のステータスを返した（Win32Errorを除く）
    #[error("GDI+ error: {}", gdiplus_status_string(*.0))]
    Status(Status),

    /// Win32Errorステータス（OSの最終エラー説明文付き）
    #[error("Win32 Error: {0}")]
    Win32(String),

    /// 読み込み対象のファイルが存在しない
    #[error("画像 \"{0}\" を読み込めません (ファイルが存在しません)")]
    ImageNotFound(String),

    /// 指定されたMIMEタイプに一致するエンコーダーが登録されていない
    #[error("エンコーダーが見つかりません: {0}")]
    EncoderNotFound(String),

    /// エンコーダー一覧のサイズ取得が空を返した
    #[error("GetImageEncodersSize() failure!")]
    EncoderEnumeration,

    /// インメモリストリームの作成に失敗した (SHCreateMemStream)
    #[error("メモリストリームの作成に失敗しました (SHCreateMemStream)")]
    StreamCreation,

    /// APIは成功を返したが、イメージポインタがnullだった
    #[error("イメージは正常に作成されましたが、ポインタがnullです")]
    NullImage,

    /// バイトストリーム読み取り中のIOエラー
    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

/// GDI+ステータスコードを検査し、失敗ならエラーに変換する
///
/// # 引数
/// * `code` - GDI+ APIが返したステータスコード。
///
/// # 戻り値
/// * `Ok(())` - コードが Status(0) (Ok) の場合。
/// * `Err(GdiplusError)` - それ以外。Win32Error (コード7) の場合は
///   呼び出しスレッドの GetLastError をOSエラー説明文に変換して埋め込みます。
///
/// # 使用例
/// ```ignore
/// gdiplus_check(unsafe { GdipCreateSolidFill(color.Argb, &mut brush) })?;
/// ```
pub fn gdiplus_check(code: Status) -> Result<(), GdiplusError> {
    // Status(0) は Ok
    if code == Status(0) {
        return Ok(());
    }

    // Win32Error (コード7) だけはOS側の詳細エラーを取得して付加する
    if code == Status(7) {
        return Err(GdiplusError::Win32(last_os_error_message()));
    }

    Err(GdiplusError::Status(code))
}

/// GDI+ステータスコードを表示用文字列に変換する
///
/// テーブルはGDI+のステータス列挙の定義順そのままです。範囲外のコード
/// （負値を含む）は "Unknown (code N)" 形式で返します。
pub fn gdiplus_status_string(code: Status) -> String {
    static STATUS_STRINGS: [&str; 22] = [
        "Ok",
        "Generic Error",
        "Invalid Parameter",
        "Out Of Memory",
        "Object Busy",
        "Insufficient Buffer",
        "Not Implemented",
        "Win32 Error",
        "Wrong State",
        "Aborted",
        "File Not Found",
        "Value Overflow",
        "Access Denied",
        "Unknown Image Format",
        "Font Family Not Found",
        "Font Style Not Found",
        "Not TrueType Font",
        "Unsupported Gdi+ Version",
        "Gdi+ Not Initialized",
        "Property Not Found",
        "Property Not Supported",
        "Profile Not Found",
    ];

    match usize::try_from(code.0) {
        Ok(index) if index < STATUS_STRINGS.len() => STATUS_STRINGS[index].to_string(),
        _ => format!("Unknown (code {})", code.0),
    }
}

/// 呼び出しスレッドの最終OSエラーを説明文に変換する
#[cfg(windows)]
fn last_os_error_message() -> String {
    format_os_error_message(unsafe { GetLastError() }.0)
}

/// Windows以外ではOSエラーの変換手段がないため、固定文字列のみ返す
#[cfg(not(windows))]
fn last_os_error_message() -> String {
    String::from("FormatOSErrorMessage failed!")
}

/// OSエラーコードをローカライズされた説明文に変換する
///
/// `FormatMessageW` でシステムメッセージテーブルを引きます。変換自体が
/// 失敗した場合は固定のプレースホルダー文字列を返します（この文言も
/// 互換契約の一部）。末尾のCR/LFは1行に埋め込めるよう取り除きます。
#[cfg(windows)]
pub fn format_os_error_message(err_code: u32) -> String {
    let mut buffer = [0u16; 512];

    let length = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            err_code,
            0, // 言語指定なし（システムの既定の言語検索順に従う）
            PWSTR(buffer.as_mut_ptr()),
            buffer.len() as u32,
            None,
        )
    };

    if length == 0 {
        return String::from("FormatOSErrorMessage failed!");
    }

    String::from_utf16_lossy(&buffer[..length as usize])
        .trim_end()
        .to_string()
}

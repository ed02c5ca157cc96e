/*
============================================================================
エンコーダー検索・保存モジュール (encoder.rs)
============================================================================

【ファイル概要】
システムに登録されているGDI+イメージエンコーダーをMIMEタイプで検索し、
そのCLSIDを返すモジュールです。検索したCLSIDを使ってイメージをファイルに
保存するヘルパーも提供します。

【検索仕様】
-   `GdipGetImageEncodersSize` で件数とバッファサイズを取得し、
    `GdipGetImageEncoders` で一覧を取得します。
-   一覧を先頭から線形走査し、MIMEタイプが完全一致（大文字小文字を
    区別するバイナリ比較）した最初のエンコーダーのCLSIDを返します。
-   一致がなければ `EncoderNotFound` エラーになります（出力を未設定の
    まま黙って返すことはしません）。
 */

use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use windows::{
    Win32::Graphics::GdiPlus::{
        GdipGetImageEncoders, GdipGetImageEncodersSize, GdipSaveImageToFile, ImageCodecInfo,
    },
    core::{GUID, PCWSTR},
};

use crate::error::{GdiplusError, gdiplus_check};
use crate::image::GdiplusImage;

/// MIMEタイプに一致するイメージエンコーダーのCLSIDを検索する
///
/// # 引数
/// * `mime_type` - 検索するMIMEタイプ（例: "image/png", "image/jpeg"）。
///
/// # 戻り値
/// * `Ok(GUID)` - 一致したエンコーダーのCLSID。
/// * `Err(GdiplusError::EncoderEnumeration)` - エンコーダー一覧が空の場合。
/// * `Err(GdiplusError::EncoderNotFound)` - 一致するエンコーダーがない場合。
pub fn get_encoder_clsid(mime_type: &str) -> Result<GUID, GdiplusError> {
    let mut num_encoders = 0u32;
    let mut buffer_size = 0u32;
    gdiplus_check(unsafe { GdipGetImageEncodersSize(&mut num_encoders, &mut buffer_size) })?;

    if buffer_size == 0 {
        return Err(GdiplusError::EncoderEnumeration);
    }

    // ImageCodecInfo のアライメントを保証するため、バイト列ではなく
    // ImageCodecInfo の配列としてバッファを確保する（一覧の末尾には
    // 文字列データが続くため、要素数はバッファサイズから切り上げる）
    let entry_size = std::mem::size_of::<ImageCodecInfo>();
    let entry_count = (buffer_size as usize).div_ceil(entry_size);
    let mut buffer = vec![ImageCodecInfo::default(); entry_count];

    gdiplus_check(unsafe {
        GdipGetImageEncoders(num_encoders, buffer_size, buffer.as_mut_ptr())
    })?;

    // 先頭から線形走査して最初の完全一致を返す
    for codec_info in &buffer[..num_encoders as usize] {
        if codec_info.MimeType.is_null() {
            continue;
        }
        let codec_mime = unsafe { codec_info.MimeType.to_string() }.unwrap_or_default();
        if codec_mime == mime_type {
            return Ok(codec_info.Clsid);
        }
    }

    Err(GdiplusError::EncoderNotFound(mime_type.to_string()))
}

/// イメージを指定のMIMEタイプでファイルに保存する
///
/// # 引数
/// * `image` - 保存するイメージ。
/// * `file_name` - 保存先のファイルパス。
/// * `mime_type` - 保存形式のMIMEタイプ（登録済みエンコーダーが必要）。
///
/// エンコーダーパラメータ（品質設定など）は指定せず、各エンコーダーの
/// 既定値で保存します。
pub fn save_image_to_file<I: GdiplusImage>(
    image: &I,
    file_name: &Path,
    mime_type: &str,
) -> Result<(), GdiplusError> {
    let clsid = get_encoder_clsid(mime_type)?;

    let file_name_wide: Vec<u16> = file_name
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    gdiplus_check(unsafe {
        GdipSaveImageToFile(
            image.as_image_ptr(),
            PCWSTR(file_name_wide.as_ptr()),
            &clsid,
            ptr::null(),
        )
    })?;

    tracing::debug!(
        "✅ イメージを保存しました: {} ({})",
        file_name.display(),
        mime_type
    );

    Ok(())
}

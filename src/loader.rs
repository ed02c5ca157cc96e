/*
============================================================================
イメージ読み込みモジュール (loader.rs)
============================================================================

【ファイル概要】
ファイルパスまたは任意のバイトストリームからGDI+イメージを読み込む
モジュールです。

【主要機能】
1.  **ファイルからの読み込み (`load_image_from_file`)**:
    -   存在チェック → `GdipLoadImageFromFile` → ステータス検査。
    -   ファイルが存在しない場合は、デコードを試みる前にパス入りの
        エラーで即座に失敗します。
2.  **ストリームからの読み込み (`load_image_from_stream`)**:
    -   バイト列を `SHCreateMemStream` でCOMの `IStream` にラップし、
        `GdipCreateBitmapFromStream` でデコードします。
    -   デコード結果は同サイズの新規ビットマップへ描画コピーされ、
        元のバイト列から独立したハンドルとして返されます（元の
        ストリームを閉じたり書き換えたりしても結果は有効なまま）。

【処理フロー（ストリーム読み込み）】
1. MIMEタイプのコーデック登録を確認（未登録なら即エラー）
2. ストリームを最後まで読み取り、バイト列を取得
3. `SHCreateMemStream` でインメモリの `IStream` を作成
4. `GdipCreateBitmapFromStream` でデコード
5. 同サイズの32bpp ARGBビットマップを作成し、デコード結果を描画コピー
6. 中間のデコード結果を解放し、コピーを返す
 */

use std::io::Read;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use windows::{
    Win32::{
        Graphics::GdiPlus::{
            GdipCreateBitmapFromStream, GdipDeleteGraphics, GdipDrawImageRectI,
            GdipGetImageGraphicsContext, GdipLoadImageFromFile, GpBitmap, GpGraphics, GpImage,
        },
        System::Com::IStream,
        UI::Shell::SHCreateMemStream,
    },
    core::PCWSTR,
};

use crate::encoder::get_encoder_clsid;
use crate::error::{GdiplusError, gdiplus_check};
use crate::image::{Bitmap, GdiplusImage, Image};

/// ファイルパスからイメージを読み込む
///
/// # 引数
/// * `file_name` - 読み込むイメージファイルのパス。
///
/// # 戻り値
/// * `Ok(Image)` - デコードに成功した場合。
/// * `Err(GdiplusError::ImageNotFound)` - ファイルが存在しない場合
///   （デコードは試みません）。
/// * `Err(GdiplusError)` - ファイルは存在するがデコードに失敗した場合
///   （コーデック固有のステータスがそのまま表面化します）。
pub fn load_image_from_file(file_name: &Path) -> Result<Image, GdiplusError> {
    // 存在しないパスはデコード前に即座に失敗させる
    if !file_name.exists() {
        return Err(GdiplusError::ImageNotFound(
            file_name.display().to_string(),
        ));
    }

    // パスをUTF-16 + Null終端でWindows API互換文字列に変換
    let file_name_wide: Vec<u16> = file_name
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut image: *mut GpImage = ptr::null_mut();
    gdiplus_check(unsafe { GdipLoadImageFromFile(PCWSTR(file_name_wide.as_ptr()), &mut image) })?;

    // ポインタがnullでないことを確認
    if image.is_null() {
        return Err(GdiplusError::NullImage);
    }

    tracing::debug!("✅ イメージを読み込みました: {}", file_name.display());

    Ok(Image::from_raw(image))
}

/// バイトストリームからイメージを読み込み、独立したビットマップを返す
///
/// # 引数
/// * `stream` - イメージデータを供給する任意のバイトソース。
/// * `mime_type` - 期待するイメージ形式のMIMEタイプ（例: "image/png"）。
///   登録済みコーデックに一致しない場合は読み取り前にエラーになります。
///
/// # 戻り値
/// デコード結果と同じピクセルサイズの新規ビットマップ。元のストリームや
/// バイト列のライフタイムから独立しています。
pub fn load_image_from_stream<R: Read>(
    stream: &mut R,
    mime_type: &str,
) -> Result<Bitmap, GdiplusError> {
    // 対象のMIMEタイプにコーデックが登録されているか先に確認する
    get_encoder_clsid(mime_type)?;

    // ストリームを最後まで読み取る
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;

    // バイト列からインメモリのCOMストリーム(`IStream`)を作成する。
    // `SHCreateMemStream` は渡されたデータを内部でコピーし、ストリーム
    // オブジェクトの解放時に自動的にメモリも解放される。
    let mem_stream: IStream =
        unsafe { SHCreateMemStream(Some(data.as_slice())) }.ok_or(GdiplusError::StreamCreation)?;

    // `IStream` からGDI+ビットマップをデコードする
    let mut decoded: *mut GpBitmap = ptr::null_mut();
    gdiplus_check(unsafe { GdipCreateBitmapFromStream(&mem_stream, &mut decoded) })?;
    if decoded.is_null() {
        return Err(GdiplusError::NullImage);
    }
    let decoded = Bitmap::from_raw(decoded);

    // デコード結果を同サイズの新規ビットマップへ描画コピーする
    // （元のストリームから切り離された防御的コピー）
    let width = decoded.width()?;
    let height = decoded.height()?;
    let copy = Bitmap::new(width as i32, height as i32)?;

    let mut graphics: *mut GpGraphics = ptr::null_mut();
    gdiplus_check(unsafe { GdipGetImageGraphicsContext(copy.as_image_ptr(), &mut graphics) })?;

    // 矩形指定で描画することで、解像度メタデータの影響を受けずに
    // ピクセル等倍のコピーになる
    let status = unsafe {
        GdipDrawImageRectI(
            graphics,
            decoded.as_image_ptr(),
            0,
            0,
            width as i32,
            height as i32,
        )
    };
    unsafe {
        GdipDeleteGraphics(graphics);
    }
    gdiplus_check(status)?;

    tracing::debug!(
        "✅ ストリームからイメージを読み込みました ({}x{}, {})",
        width,
        height,
        mime_type
    );

    Ok(copy)
}

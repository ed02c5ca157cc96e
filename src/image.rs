/*
============================================================================
イメージハンドル管理モジュール (image.rs)
============================================================================

【ファイル概要】
GDI+のネイティブハンドル（GpImage / GpBitmap）を所有権付きでラップする
モジュールです。ハンドルはDropで確実に `GdipDisposeImage` へ渡され、
リソースリークを防止します。

【主要機能】
1.  **`GdiplusImage` トレイト**: イメージとして扱える型の共通インターフェース。
    -   ネイティブポインタの取得と、幅・高さの問い合わせ（デフォルト実装）。
2.  **`Image` 構造体**: デコード済みイメージ（GpImage）の所有ハンドル。
3.  **`Bitmap` 構造体**: 描画可能なビットマップ（GpBitmap）の所有ハンドル。
    -   `Bitmap::new` で32bpp ARGBの空サーフェスを作成。

【所有権モデル】
各ハンドルは一意所有で、共有可変状態はありません。ハンドルの利用は
GDI+セッションの生存期間内に限られます（セッションより長生きさせない
ことは呼び出し側の責任）。
 */

use std::ptr;

use windows::Win32::Graphics::GdiPlus::{
    GdipCreateBitmapFromScan0, GdipDisposeImage, GdipGetImageHeight, GdipGetImageWidth, GpBitmap,
    GpImage, PixelFormatAlpha, PixelFormatCanonical, PixelFormatGDI, Status,
};

use crate::error::{GdiplusError, gdiplus_check};

// 32bpp ARGB (PixelFormat32bppARGB) のピクセルフォーマット値
// 下位バイトがフォーマットインデックス(10)、次のバイトがビット深度(32)
pub(crate) const PIXEL_FORMAT_32BPP_ARGB: u32 =
    10 | (32 << 8) | PixelFormatAlpha | PixelFormatGDI | PixelFormatCanonical;

/// GDI+イメージとして描画・保存・問い合わせできる型の共通トレイト
pub trait GdiplusImage {
    /// ネイティブのGpImageポインタを取得する
    ///
    /// 返されたポインタの利用はこのハンドルの生存期間内に限られます。
    fn as_image_ptr(&self) -> *mut GpImage;

    /// イメージの幅（ピクセル）を取得する
    fn width(&self) -> Result<u32, GdiplusError> {
        let mut width = 0u32;
        gdiplus_check(unsafe { GdipGetImageWidth(self.as_image_ptr(), &mut width) })?;
        Ok(width)
    }

    /// イメージの高さ（ピクセル）を取得する
    fn height(&self) -> Result<u32, GdiplusError> {
        let mut height = 0u32;
        gdiplus_check(unsafe { GdipGetImageHeight(self.as_image_ptr(), &mut height) })?;
        Ok(height)
    }
}

/// デコード済みイメージ（GpImage）の所有ハンドル
#[derive(Debug)]
pub struct Image {
    native: *mut GpImage,
}

impl Image {
    /// ネイティブポインタから所有ハンドルを作成する（null以外であること）
    pub(crate) fn from_raw(native: *mut GpImage) -> Self {
        Self { native }
    }
}

impl GdiplusImage for Image {
    fn as_image_ptr(&self) -> *mut GpImage {
        self.native
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        let status = unsafe { GdipDisposeImage(self.native) };
        if status != Status(0) {
            tracing::error!("❌ GDI+ イメージの解放に失敗しました (status: {:?})", status);
        }
    }
}

/// 描画可能なビットマップ（GpBitmap）の所有ハンドル
#[derive(Debug)]
pub struct Bitmap {
    native: *mut GpBitmap,
}

impl Bitmap {
    /// 指定サイズの32bpp ARGBビットマップを新規作成する
    ///
    /// # 引数
    /// * `width` - 幅（ピクセル）。1以上であること。
    /// * `height` - 高さ（ピクセル）。1以上であること。
    pub fn new(width: i32, height: i32) -> Result<Self, GdiplusError> {
        let mut bitmap: *mut GpBitmap = ptr::null_mut();
        gdiplus_check(unsafe {
            GdipCreateBitmapFromScan0(
                width,
                height,
                0, // stride 0: GDI+側でバッファを確保させる
                PIXEL_FORMAT_32BPP_ARGB as i32,
                None,
                &mut bitmap,
            )
        })?;

        if bitmap.is_null() {
            return Err(GdiplusError::NullImage);
        }

        Ok(Self { native: bitmap })
    }

    /// ネイティブポインタから所有ハンドルを作成する（null以外であること）
    pub(crate) fn from_raw(native: *mut GpBitmap) -> Self {
        Self { native }
    }

    /// ネイティブのGpBitmapポインタを取得する
    pub(crate) fn as_bitmap_ptr(&self) -> *mut GpBitmap {
        self.native
    }
}

impl GdiplusImage for Bitmap {
    fn as_image_ptr(&self) -> *mut GpImage {
        // GpBitmap は GpImage の派生なのでそのままキャストできる
        self.native as *mut GpImage
    }
}

impl Drop for Bitmap {
    fn drop(&mut self) {
        let status = unsafe { GdipDisposeImage(self.native as *mut GpImage) };
        if status != Status(0) {
            tracing::error!(
                "❌ GDI+ ビットマップの解放に失敗しました (status: {:?})",
                status
            );
        }
    }
}

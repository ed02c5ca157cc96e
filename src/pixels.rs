/*
============================================================================
ピクセル変換モジュール (pixels.rs)
============================================================================

【ファイル概要】
GDI+ビットマップのピクセルデータを `image` クレートの `RgbaImage` に
コピーするモジュール。GDI+側はBGRA並びなので、コピー時にRGBA並びへ
入れ替えます。返されたバッファは元のビットマップから完全に独立しています。
 */

use image::{Rgba, RgbaImage};
use windows::Win32::Graphics::GdiPlus::{
    BitmapData, GdipBitmapLockBits, GdipBitmapUnlockBits, Rect,
};

use crate::error::{GdiplusError, gdiplus_check};
use crate::image::{Bitmap, GdiplusImage, PIXEL_FORMAT_32BPP_ARGB};

// ImageLockModeRead 相当のロックフラグ
const LOCK_MODE_READ: u32 = 0x0001;

/// GDI+ビットマップのピクセルを `RgbaImage` にコピーする
///
/// # 引数
/// * `bitmap` - コピー元のビットマップ。
///
/// # 処理フロー
/// 1. `GdipBitmapLockBits` で全領域を32bpp ARGBとして読み取りロック
/// 2. スキャンラインを走査し、BGRA→RGBAの入れ替えを行いながらコピー
/// 3. `GdipBitmapUnlockBits` でロックを解除
pub fn bitmap_to_rgba_image(bitmap: &Bitmap) -> Result<RgbaImage, GdiplusError> {
    let width = bitmap.width()?;
    let height = bitmap.height()?;

    let lock_rect = Rect {
        X: 0,
        Y: 0,
        Width: width as i32,
        Height: height as i32,
    };

    let mut bitmap_data = BitmapData::default();
    gdiplus_check(unsafe {
        GdipBitmapLockBits(
            bitmap.as_bitmap_ptr(),
            &lock_rect,
            LOCK_MODE_READ,
            PIXEL_FORMAT_32BPP_ARGB as i32,
            &mut bitmap_data,
        )
    })?;

    let mut img_buffer = RgbaImage::new(width, height);

    unsafe {
        let scan0 = bitmap_data.Scan0 as *const u8;
        // Stride は負になる場合がある（ボトムアップ形式）ため isize で扱う
        let stride = bitmap_data.Stride as isize;

        for y in 0..height {
            let row = scan0.offset(y as isize * stride);
            for x in 0..width {
                let src = row.offset(x as isize * 4);

                // GDI+はBGRA並びなのでRGBA並びに変換
                let b = *src;
                let g = *src.offset(1);
                let r = *src.offset(2);
                let a = *src.offset(3);

                img_buffer.put_pixel(x, y, Rgba([r, g, b, a]));
            }
        }

        GdipBitmapUnlockBits(bitmap.as_bitmap_ptr(), &mut bitmap_data);
    }

    Ok(img_buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::tests::SESSION;
    use crate::loader::load_image_from_stream;
    use image::ImageOutputFormat;
    use once_cell::sync::Lazy;
    use std::io::Cursor;

    #[test]
    fn test_new_bitmap_exports_as_transparent() {
        Lazy::force(&SESSION);

        // 新規ビットマップは全ピクセルが透明（ARGB = 0）
        let bitmap = Bitmap::new(2, 2).expect("ビットマップ作成に失敗");
        let pixels = bitmap_to_rgba_image(&bitmap).expect("ピクセル変換に失敗");
        assert_eq!(pixels.dimensions(), (2, 2));
        assert_eq!(*pixels.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*pixels.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_export_preserves_channel_order() {
        Lazy::force(&SESSION);

        // 単色（不透明なオレンジ）のPNGを経由してチャンネル並びを確認する
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 128, 0, 255]));
        let mut bytes = Vec::new();
        src.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("PNGエンコードに失敗");

        let bitmap = load_image_from_stream(&mut Cursor::new(bytes), "image/png")
            .expect("ストリーム読み込みに失敗");
        let exported = bitmap_to_rgba_image(&bitmap).expect("ピクセル変換に失敗");

        assert_eq!(*exported.get_pixel(0, 0), Rgba([255, 128, 0, 255]));
        assert_eq!(*exported.get_pixel(1, 1), Rgba([255, 128, 0, 255]));
    }
}

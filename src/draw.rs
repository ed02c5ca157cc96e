/*
============================================================================
イメージ描画モジュール (draw.rs)
============================================================================

【ファイル概要】
イメージを指定矩形へ合成描画するモジュールです。3つの排他的な
スケーリングポリシーと、カラーマトリックスによる一様なアルファ減衰を
サポートします。

【スケーリングポリシー】（先に一致した方が優先）
1.  **アスペクト比維持** (`keep_aspect_ratio`、イメージ・描画先とも正サイズ):
    -   アスペクト比を保ったまま描画先に収まる最大サイズに縮小し、
        余った軸の中央に配置します。
2.  **引き伸ばし** (`stretched`、または前提を満たさないアスペクト比維持):
    -   アスペクト比を無視して描画先矩形いっぱいに描画します。
3.  **原寸** (両フラグともfalse):
    -   描画先矩形の左上に原寸で描画します（幅・高さは無視）。

【アルファブレンド】
alpha_blend < 255 の場合のみ、5x5単位カラーマトリックスの(3,3)成分を
alpha/255 に置き換えたImageAttributesを描画呼び出しに添付します。
 */

use windows::Win32::Graphics::GdiPlus::{ColorMatrix, RectF};

#[cfg(windows)]
use std::ptr;

#[cfg(windows)]
use windows::Win32::Graphics::GdiPlus::{
    ColorAdjustTypeDefault, ColorMatrixFlagsDefault, GdipCreateImageAttributes,
    GdipDisposeImageAttributes, GdipDrawImageRectRect, GdipSetImageAttributesColorMatrix,
    GpGraphics, GpImageAttributes, UnitPixel,
};

#[cfg(windows)]
use crate::error::GdiplusError;
#[cfg(windows)]
use crate::error::gdiplus_check;
#[cfg(windows)]
use crate::image::GdiplusImage;

// 5x5の単位カラーマトリックス（行優先のフラット配列）
const IDENTITY_COLOR_MATRIX: [f32; 25] = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 0.0, 1.0, //
];

/// アルファ減衰用のカラーマトリックスを作成する
///
/// 単位マトリックスの(3,3)成分（アルファ行の対角成分）だけを
/// `alpha_blend / 255` に置き換えたマトリックスを返します。これを
/// 描画時に適用すると、イメージ既存のアルファチャンネルが一様に
/// 減衰されます。
pub fn alpha_color_matrix(alpha_blend: u8) -> ColorMatrix {
    let mut m = IDENTITY_COLOR_MATRIX;
    m[3 * 5 + 3] = f32::from(alpha_blend) / 255.0;
    ColorMatrix { m }
}

/// スケーリングポリシーに従って実際の描画先矩形を計算する
///
/// # 引数
/// * `img_width` / `img_height` - イメージの原寸（ピクセル）。
/// * `dst_rect` - 要求された描画先矩形。
/// * `stretched` - 描画先いっぱいに引き伸ばすかどうか。
/// * `keep_aspect_ratio` - アスペクト比を維持するかどうか。
///
/// # 計算内容
/// アスペクト比維持時は、イメージのアスペクト比 Rs と描画先の Rd を比較し、
/// Rs > Rd なら幅を基準に高さを 1/k 倍（k = Rs/Rd）して垂直方向の中央へ、
/// Rs < Rd なら高さを基準に幅を k 倍して水平方向の中央へ配置します。
pub fn fit_destination_rect(
    img_width: f32,
    img_height: f32,
    dst_rect: &RectF,
    stretched: bool,
    keep_aspect_ratio: bool,
) -> RectF {
    if stretched || keep_aspect_ratio {
        let dst_width = dst_rect.Width;
        let dst_height = dst_rect.Height;

        // アスペクト比維持は全辺が正のサイズを持つときだけ成立する
        if keep_aspect_ratio
            && img_width > 0.0
            && img_height > 0.0
            && dst_width > 0.0
            && dst_height > 0.0
        {
            let rs = img_width / img_height;
            let rd = dst_width / dst_height;
            let k = rs / rd;

            let mut dx = dst_rect.X;
            let mut dy = dst_rect.Y;
            let new_dst_width;
            let new_dst_height;

            if rs > rd {
                // イメージの方が横長: 幅を合わせ、高さを縮めて垂直中央へ
                new_dst_width = dst_width;
                new_dst_height = dst_height / k;
                dy += (dst_height - new_dst_height) / 2.0;
            } else if rs < rd {
                // イメージの方が縦長: 高さを合わせ、幅を縮めて水平中央へ
                new_dst_width = dst_width * k;
                new_dst_height = dst_height;
                dx += (dst_width - new_dst_width) / 2.0;
            } else {
                // アスペクト比が一致: 描画先矩形をそのまま使う
                new_dst_width = dst_width;
                new_dst_height = dst_height;
            }

            RectF {
                X: dx,
                Y: dy,
                Width: new_dst_width,
                Height: new_dst_height,
            }
        } else {
            *dst_rect
        }
    } else {
        // 原寸描画: 描画先の左上だけを使い、サイズはイメージの原寸
        RectF {
            X: dst_rect.X,
            Y: dst_rect.Y,
            Width: img_width,
            Height: img_height,
        }
    }
}

/// イメージを描画先矩形へ合成描画する
///
/// # 引数
/// * `graphics` - 描画先のGDI+グラフィックスコンテキスト。
/// * `image` - 描画するイメージ。
/// * `dst_rect` - 要求された描画先矩形。
/// * `alpha_blend` - 一様なアルファ減衰値 (0〜255、255で減衰なし)。
/// * `stretched` - 描画先いっぱいに引き伸ばすかどうか。
/// * `keep_aspect_ratio` - アスペクト比を維持するかどうか。
///
/// # 安全性
/// `graphics` は有効なGpGraphicsポインタであること。呼び出しは
/// GDI+セッションの生存期間内で行うこと。
#[cfg(windows)]
pub fn draw_image<I: GdiplusImage>(
    graphics: *mut GpGraphics,
    image: &I,
    dst_rect: &RectF,
    alpha_blend: u8,
    stretched: bool,
    keep_aspect_ratio: bool,
) -> Result<(), GdiplusError> {
    let img_width = image.width()? as f32;
    let img_height = image.height()? as f32;

    // GDI+ 1.0（XP世代）では、ImageAttributesを添付すると
    // Image::SelectActiveFrame の選択が無視され、常にフレーム0が描画される。
    // アニメーションGIF等のフレーム選択を壊さないため、アルファ減衰が
    // 不要なとき（alpha_blend == 255）はImageAttributesを一切作らず
    // nullを渡す。GDI+ 1.1以降では問題は再現しないが、この分岐は互換の
    // ために維持している。
    let mut img_attrs: *mut GpImageAttributes = ptr::null_mut();

    if alpha_blend < 255 {
        gdiplus_check(unsafe { GdipCreateImageAttributes(&mut img_attrs) })?;

        let color_matrix = alpha_color_matrix(alpha_blend);
        let status = unsafe {
            GdipSetImageAttributesColorMatrix(
                img_attrs,
                ColorAdjustTypeDefault,
                true.into(),
                &color_matrix,
                ptr::null(),
                ColorMatrixFlagsDefault,
            )
        };
        if let Err(e) = gdiplus_check(status) {
            unsafe {
                GdipDisposeImageAttributes(img_attrs);
            }
            return Err(e);
        }
    }

    let draw_rect = fit_destination_rect(
        img_width,
        img_height,
        dst_rect,
        stretched,
        keep_aspect_ratio,
    );

    let status = unsafe {
        GdipDrawImageRectRect(
            graphics,
            image.as_image_ptr(),
            draw_rect.X,
            draw_rect.Y,
            draw_rect.Width,
            draw_rect.Height,
            0.0, // ソースは常にイメージ全体
            0.0,
            img_width,
            img_height,
            UnitPixel,
            img_attrs,
            None,
            ptr::null_mut(),
        )
    };

    if !img_attrs.is_null() {
        unsafe {
            GdipDisposeImageAttributes(img_attrs);
        }
    }

    gdiplus_check(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keep_aspect_wide_image_centers_vertically() {
        // 200x100 (2:1) を 100x100 (1:1) へ: 幅100、高さ50、上端オフセット25
        let dst = RectF {
            X: 0.0,
            Y: 0.0,
            Width: 100.0,
            Height: 100.0,
        };
        let fitted = fit_destination_rect(200.0, 100.0, &dst, false, true);
        assert_eq!(fitted.X, 0.0);
        assert_eq!(fitted.Y, 25.0);
        assert_eq!(fitted.Width, 100.0);
        assert_eq!(fitted.Height, 50.0);
    }

    #[test]
    fn test_fit_keep_aspect_tall_image_centers_horizontally() {
        // 100x200 (1:2) を 100x100 (1:1) へ: 幅50、高さ100、左端オフセット25
        let dst = RectF {
            X: 0.0,
            Y: 0.0,
            Width: 100.0,
            Height: 100.0,
        };
        let fitted = fit_destination_rect(100.0, 200.0, &dst, false, true);
        assert_eq!(fitted.X, 25.0);
        assert_eq!(fitted.Y, 0.0);
        assert_eq!(fitted.Width, 50.0);
        assert_eq!(fitted.Height, 100.0);
    }

    #[test]
    fn test_fit_keep_aspect_equal_ratio_uses_destination() {
        let dst = RectF {
            X: 5.0,
            Y: 7.0,
            Width: 80.0,
            Height: 40.0,
        };
        let fitted = fit_destination_rect(160.0, 80.0, &dst, false, true);
        assert_eq!(fitted.X, 5.0);
        assert_eq!(fitted.Y, 7.0);
        assert_eq!(fitted.Width, 80.0);
        assert_eq!(fitted.Height, 40.0);
    }

    #[test]
    fn test_fit_keep_aspect_offset_destination() {
        // 描画先が原点以外でも中央寄せのオフセットが加算される
        let dst = RectF {
            X: 10.0,
            Y: 20.0,
            Width: 100.0,
            Height: 100.0,
        };
        let fitted = fit_destination_rect(200.0, 100.0, &dst, false, true);
        assert_eq!(fitted.X, 10.0);
        assert_eq!(fitted.Y, 45.0); // 20 + (100 - 50) / 2
    }

    #[test]
    fn test_fit_keep_aspect_zero_dimension_falls_back_to_stretch() {
        // イメージの高さが0: アスペクト比維持の前提を満たさず引き伸ばしへ
        let dst = RectF {
            X: 0.0,
            Y: 0.0,
            Width: 100.0,
            Height: 100.0,
        };
        let fitted = fit_destination_rect(200.0, 0.0, &dst, false, true);
        assert_eq!(fitted.Width, 100.0);
        assert_eq!(fitted.Height, 100.0);
    }

    #[test]
    fn test_fit_stretched_fills_destination() {
        let dst = RectF {
            X: 3.0,
            Y: 4.0,
            Width: 50.0,
            Height: 60.0,
        };
        let fitted = fit_destination_rect(200.0, 100.0, &dst, true, false);
        assert_eq!(fitted.X, 3.0);
        assert_eq!(fitted.Y, 4.0);
        assert_eq!(fitted.Width, 50.0);
        assert_eq!(fitted.Height, 60.0);
    }

    #[test]
    fn test_fit_natural_size_ignores_destination_size() {
        // 両フラグfalse: 描画先の左上に原寸
        let dst = RectF {
            X: 30.0,
            Y: 40.0,
            Width: 10.0,
            Height: 10.0,
        };
        let fitted = fit_destination_rect(200.0, 100.0, &dst, false, false);
        assert_eq!(fitted.X, 30.0);
        assert_eq!(fitted.Y, 40.0);
        assert_eq!(fitted.Width, 200.0);
        assert_eq!(fitted.Height, 100.0);
    }

    #[test]
    fn test_alpha_color_matrix_attenuation_factor() {
        let matrix = alpha_color_matrix(128);
        // (3,3)成分だけが alpha/255 になる
        assert_eq!(matrix.m[3 * 5 + 3], 128.0 / 255.0);
        // 他の対角成分は1のまま
        assert_eq!(matrix.m[0], 1.0);
        assert_eq!(matrix.m[1 * 5 + 1], 1.0);
        assert_eq!(matrix.m[2 * 5 + 2], 1.0);
        assert_eq!(matrix.m[4 * 5 + 4], 1.0);
        // 非対角成分は0のまま
        assert_eq!(matrix.m[1], 0.0);
        assert_eq!(matrix.m[3 * 5 + 4], 0.0);
    }

    #[test]
    fn test_alpha_color_matrix_zero() {
        let matrix = alpha_color_matrix(0);
        assert_eq!(matrix.m[3 * 5 + 3], 0.0);
    }
}

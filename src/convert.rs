/*
============================================================================
UI層との型変換モジュール (convert.rs)
============================================================================

【ファイル概要】
UI層のプリミティブ型（COLORREF・RECT・整列列挙型）とGDI+の型
（Color・RectF・StringAlignment）を相互変換する純粋関数群です。
状態を持たず、全関数がプラットフォーム非依存でテストできます。

【ビット配置に関する注意】
COLORREF は 0x00BBGGRR 並び（下位バイトが赤）、GDI+ の Color.Argb は
0xAARRGGBB 並びです。変換はビット単位で正確に行われ、テストで
リテラル16進値と照合しています。
 */

use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::GdiPlus::{
    Color, RectF, StringAlignment, StringAlignmentCenter, StringAlignmentFar, StringAlignmentNear,
};

/// テキストの水平方向整列（UI層側の列挙型）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// テキストの垂直方向整列（UI層側の列挙型）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// COLORREF をGDI+のARGB色に変換する（アルファは上位バイトから取得）
///
/// COLORREF の上位バイト（ビット24〜31）をアルファ値として解釈します。
/// 標準のCOLORREFは上位バイトが0のため、アルファ付きの値を扱う場合に
/// 使用します。不透明にしたい場合は `colorref_to_color_with_alpha` で
/// 明示的に 255 を指定してください。
pub fn colorref_to_color(val: COLORREF) -> Color {
    let alpha = ((val.0 >> 24) & 0xFF) as u8;
    colorref_to_color_with_alpha(val, alpha)
}

/// COLORREF をGDI+のARGB色に変換する（アルファは引数で明示指定）
///
/// # 引数
/// * `val` - 0x00BBGGRR 並びの色値。上位バイトは無視されます。
/// * `alpha` - 変換後のアルファ値 (0〜255)。
pub fn colorref_to_color_with_alpha(val: COLORREF, alpha: u8) -> Color {
    // COLORREF: 下位から R, G, B の順に並ぶ
    let red = val.0 & 0xFF;
    let green = (val.0 >> 8) & 0xFF;
    let blue = (val.0 >> 16) & 0xFF;

    Color {
        Argb: (u32::from(alpha) << 24) | (red << 16) | (green << 8) | blue,
    }
}

/// Win32のRECT（left/top/right/bottom）をGDI+のRectF（X/Y/幅/高さ）に変換する
///
/// 整数から浮動小数点への昇格以外の丸めは行いません。
pub fn rect_to_rectf(rect: &RECT) -> RectF {
    RectF {
        X: rect.left as f32,
        Y: rect.top as f32,
        Width: (rect.right - rect.left) as f32,
        Height: (rect.bottom - rect.top) as f32,
    }
}

/// 水平方向整列をGDI+のStringAlignmentに変換する
///
/// GDI+側は Near/Center/Far の3値で、左右の区別は呼び出し側の軸の
/// 解釈に委ねられます（左→Near、右→Far）。
pub fn alignment_to_string_alignment(val: HorizontalAlignment) -> StringAlignment {
    match val {
        HorizontalAlignment::Left => StringAlignmentNear,
        HorizontalAlignment::Right => StringAlignmentFar,
        HorizontalAlignment::Center => StringAlignmentCenter,
    }
}

/// 垂直方向整列をGDI+のStringAlignmentに変換する（上→Near、下→Far）
pub fn vertical_alignment_to_string_alignment(val: VerticalAlignment) -> StringAlignment {
    match val {
        VerticalAlignment::Top => StringAlignmentNear,
        VerticalAlignment::Bottom => StringAlignmentFar,
        VerticalAlignment::Center => StringAlignmentCenter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorref_to_color_literal_fixture() {
        // 0x80112233: A=0x80, B=0x11, G=0x22, R=0x33 → ARGB 0x80332211
        let color = colorref_to_color(COLORREF(0x80112233));
        assert_eq!(color.Argb, 0x80332211);

        // 各チャンネルをビット単位で確認する
        assert_eq!((color.Argb >> 24) & 0xFF, 0x80); // A
        assert_eq!((color.Argb >> 16) & 0xFF, 0x33); // R
        assert_eq!((color.Argb >> 8) & 0xFF, 0x22); // G
        assert_eq!(color.Argb & 0xFF, 0x11); // B
    }

    #[test]
    fn test_colorref_to_color_zero_alpha() {
        // 標準のCOLORREF（上位バイト0）はアルファ0になる
        let color = colorref_to_color(COLORREF(0x000000FF));
        assert_eq!(color.Argb, 0x00FF0000); // 透明な赤
    }

    #[test]
    fn test_colorref_with_explicit_alpha_overrides_high_byte() {
        // 上位バイト 0x12 は無視され、引数の 0xFF が使われる
        let color = colorref_to_color_with_alpha(COLORREF(0x12FF0000), 0xFF);
        assert_eq!(color.Argb, 0xFF0000FF); // 不透明な青
    }

    #[test]
    fn test_colorref_round_trip_channels() {
        let color = colorref_to_color_with_alpha(COLORREF(0x00C08040), 0x20);
        assert_eq!(color.Argb, 0x204080C0); // A=0x20, R=0x40, G=0x80, B=0xC0
    }

    #[test]
    fn test_rect_to_rectf() {
        let rect = RECT {
            left: 10,
            top: 20,
            right: 110,
            bottom: 70,
        };
        let rectf = rect_to_rectf(&rect);
        assert_eq!(rectf.X, 10.0);
        assert_eq!(rectf.Y, 20.0);
        assert_eq!(rectf.Width, 100.0);
        assert_eq!(rectf.Height, 50.0);
    }

    #[test]
    fn test_rect_to_rectf_negative_origin() {
        let rect = RECT {
            left: -30,
            top: -5,
            right: 0,
            bottom: 5,
        };
        let rectf = rect_to_rectf(&rect);
        assert_eq!(rectf.X, -30.0);
        assert_eq!(rectf.Y, -5.0);
        assert_eq!(rectf.Width, 30.0);
        assert_eq!(rectf.Height, 10.0);
    }

    #[test]
    fn test_alignment_mapping_is_total() {
        assert_eq!(
            alignment_to_string_alignment(HorizontalAlignment::Left),
            StringAlignmentNear
        );
        assert_eq!(
            alignment_to_string_alignment(HorizontalAlignment::Center),
            StringAlignmentCenter
        );
        assert_eq!(
            alignment_to_string_alignment(HorizontalAlignment::Right),
            StringAlignmentFar
        );
    }

    #[test]
    fn test_vertical_alignment_mapping_is_total() {
        assert_eq!(
            vertical_alignment_to_string_alignment(VerticalAlignment::Top),
            StringAlignmentNear
        );
        assert_eq!(
            vertical_alignment_to_string_alignment(VerticalAlignment::Center),
            StringAlignmentCenter
        );
        assert_eq!(
            vertical_alignment_to_string_alignment(VerticalAlignment::Bottom),
            StringAlignmentFar
        );
    }
}

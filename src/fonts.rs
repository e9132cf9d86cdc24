use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// Bundled font name looked up in the resource directory first.
const BUNDLED_FONT: &str = "cjk.ttf";

/// System fonts with CJK coverage, most common first.
const SYSTEM_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Medium.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
];

fn candidates(resource_dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    std::iter::once(resource_dir.join(BUNDLED_FONT)).chain(SYSTEM_FONTS.iter().map(PathBuf::from))
}

/// Append the first readable CJK font as a fallback to both families.
/// Returns whether one was installed.
pub fn install_cjk_fallback(ctx: &egui::Context, resource_dir: &Path) -> bool {
    let Some((path, bytes)) = candidates(resource_dir)
        .find_map(|p| std::fs::read(&p).ok().map(|bytes| (p, bytes)))
    else {
        log::warn!("No CJK font found; Chinese text cannot be rendered");
        return false;
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
    log::info!("Using {} for CJK text", path.display());
    true
}

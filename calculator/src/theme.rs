//! Calculator palettes
//!
//! Three colour themes, each with a light and a dark variant chosen from the
//! system appearance.

use calccore::ThemeName;
use egui::{Color32, Rounding, Stroke, Visuals};

/// Colours for one theme variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub button: Color32,
    pub operator: Color32,
    pub special: Color32,
}

const fn rgb(hex: u32) -> Color32 {
    Color32::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const fn palette(background: u32, text: u32, button: u32, operator: u32, special: u32) -> Palette {
    Palette {
        background: rgb(background),
        text: rgb(text),
        button: rgb(button),
        operator: rgb(operator),
        special: rgb(special),
    }
}

const LIGHT_BLUE: Palette = palette(0xE3F2FD, 0x1E3A5F, 0xBBDEFB, 0x90CAF9, 0x64B5F6);
const DARK_BLUE: Palette = palette(0x021727, 0xE3F2FD, 0x2C9FF1, 0x06548C, 0x18BAF0);
const LIGHT_ORANGE: Palette = palette(0xFFF7E0, 0x5D4037, 0xFFDAB9, 0xFFA07A, 0xFFB347);
const DARK_ORANGE: Palette = palette(0x2A1902, 0xFFF7E0, 0xFFB300, 0x915603, 0xD86C13);
const LIGHT_PINK: Palette = palette(0xFFF0F5, 0x2D004E, 0xFFDDE1, 0xFFB6C1, 0xE77283);
const DARK_PINK: Palette = palette(0x270117, 0xFFF0F5, 0xDF3498, 0xAE0066, 0xD81B60);

impl Palette {
    pub fn for_theme(theme: ThemeName, dark: bool) -> Self {
        match (theme, dark) {
            (ThemeName::Blue, false) => LIGHT_BLUE,
            (ThemeName::Blue, true) => DARK_BLUE,
            (ThemeName::Orange, false) => LIGHT_ORANGE,
            (ThemeName::Orange, true) => DARK_ORANGE,
            (ThemeName::Pink, false) => LIGHT_PINK,
            (ThemeName::Pink, true) => DARK_PINK,
        }
    }

    /// Apply the palette to an egui context
    pub fn apply(&self, ctx: &egui::Context, dark: bool) {
        let mut visuals = if dark { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = self.background;
        visuals.panel_fill = self.background;
        visuals.faint_bg_color = self.background;
        visuals.extreme_bg_color = self.background;
        visuals.override_text_color = Some(self.text);

        visuals.window_stroke = Stroke::new(1.0, self.text);

        let widget = |ws: &mut egui::style::WidgetVisuals, fill: Color32| {
            ws.bg_fill = fill;
            ws.weak_bg_fill = fill;
            ws.fg_stroke = Stroke::new(1.0, self.text);
            ws.rounding = Rounding::same(8.0);
        };
        widget(&mut visuals.widgets.noninteractive, self.background);
        widget(&mut visuals.widgets.inactive, self.button);
        widget(&mut visuals.widgets.hovered, self.operator);
        widget(&mut visuals.widgets.active, self.special);
        widget(&mut visuals.widgets.open, self.operator);

        ctx.set_visuals(visuals);
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(
    ui: &mut egui::Ui,
    palette: &Palette,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(palette.background)
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

/// Strip Cmd+/Cmd- so they never zoom the window.
pub fn consume_zoom_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals))
        });
    });
}

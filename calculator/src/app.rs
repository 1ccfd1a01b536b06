//! Calculator application

use calccore::persist::PREFS_FILE;
use calccore::storage::{config_dir, JsonFileStore};
use calccore::{CalculatorEngine, Key, Persistence, ThemeName};
use egui::Context;
use tracing::{info, warn};

use crate::keypad::{key_for_char, key_for_label, role_for_label, ButtonRole, KEYPAD};
use crate::theme::{consume_zoom_keys, menu_bar, Palette};

const DISPLAY_HEIGHT: f32 = 72.0;
const BUTTON_HEIGHT: f32 = 52.0;
const BUTTON_FONT: f32 = 24.0;

pub struct CalculatorApp {
    engine: CalculatorEngine,
    persistence: Persistence<JsonFileStore>,
    theme: ThemeName,
    dark: bool,
    palette: Palette,
    show_about: bool,
    was_focused: bool,
}

impl CalculatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = JsonFileStore::open_or_empty(config_dir("calculator").join(PREFS_FILE));
        let mut persistence = Persistence::new(store);

        let mut engine = CalculatorEngine::new();
        persistence.restore_once(&mut engine);
        let theme = persistence.load_theme();

        let dark = cc.integration_info.system_theme == Some(eframe::Theme::Dark);
        let palette = Palette::for_theme(theme, dark);
        palette.apply(&cc.egui_ctx, dark);

        Self {
            engine,
            persistence,
            theme,
            dark,
            palette,
            show_about: false,
            was_focused: true,
        }
    }

    fn set_theme(&mut self, ctx: &Context, theme: ThemeName) {
        self.theme = theme;
        self.palette = Palette::for_theme(theme, self.dark);
        self.palette.apply(ctx, self.dark);
        if let Err(e) = self.persistence.save_theme(theme) {
            warn!(error = %e, "failed to save theme");
        }
    }

    fn save_state(&mut self) {
        if let Err(e) = self.persistence.save(&self.engine) {
            warn!(error = %e, "failed to save calculator state");
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        consume_zoom_keys(ctx);

        let keys: Vec<Key> = ctx.input(|i| {
            let mut keys = Vec::new();
            for event in &i.events {
                match event {
                    egui::Event::Text(text) => keys.extend(text.chars().filter_map(key_for_char)),
                    egui::Event::Key { key: egui::Key::Enter, pressed: true, .. } => keys.push(Key::Equals),
                    egui::Event::Key { key: egui::Key::Escape, pressed: true, .. } => keys.push(Key::Clear),
                    _ => {}
                }
            }
            keys
        });

        for key in keys {
            self.engine.press(key);
        }
    }

    /// Persist whenever the window goes to the background.
    fn watch_focus(&mut self, ctx: &Context) {
        let focused = ctx.input(|i| i.focused);
        if self.was_focused && !focused {
            info!("window lost focus, saving state");
            self.save_state();
        }
        self.was_focused = focused;
    }

    fn render_display(&self, ui: &mut egui::Ui) {
        let text = self.engine.display();
        // shrink long numbers so all 15 characters stay visible
        let size = if text.len() > 9 { 28.0 } else { 44.0 };
        egui::Frame::none()
            .fill(self.palette.background)
            .inner_margin(egui::Margin::symmetric(8.0, 4.0))
            .show(ui, |ui| {
                ui.set_min_height(DISPLAY_HEIGHT);
                ui.set_max_height(DISPLAY_HEIGHT);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(text)
                            .font(egui::FontId::proportional(size))
                            .color(self.palette.text),
                    );
                });
            });
    }

    fn render_button(&self, ui: &mut egui::Ui, label: &str, width: f32) -> bool {
        let fill = match role_for_label(label) {
            ButtonRole::Digit => self.palette.button,
            ButtonRole::Operator => self.palette.operator,
            ButtonRole::Special => self.palette.special,
        };
        let size = if label.chars().count() > 1 { BUTTON_FONT * 0.85 } else { BUTTON_FONT };
        let button = egui::Button::new(
            egui::RichText::new(label)
                .size(size)
                .color(self.palette.text),
        )
        .fill(fill);
        ui.add_sized([width, BUTTON_HEIGHT], button).clicked()
    }

    fn render_keypad(&mut self, ui: &mut egui::Ui) {
        let btn_w = (ui.available_width() - 18.0) / 4.0;
        for row in KEYPAD {
            ui.horizontal(|ui| {
                for label in row {
                    if self.render_button(ui, label, btn_w) {
                        if let Some(key) = key_for_label(label) {
                            self.engine.press(key);
                        }
                    }
                }
            });
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about calculator")
            .collapsible(false)
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("calculator");
                    ui.label(concat!("version ", env!("CARGO_PKG_VERSION")));
                });
                ui.add_space(4.0);
                ui.separator();
                ui.label("keys:");
                ui.label("  0-9 . + - * / ^");
                ui.label("  Enter or = to evaluate");
                ui.label("  r root, n sign, Esc or c clear");
                ui.add_space(4.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.watch_focus(ctx);

        let palette = self.palette;
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, &palette, |ui| {
                ui.menu_button("theme", |ui| {
                    for theme in ThemeName::ALL {
                        if ui.selectable_label(self.theme == theme, theme.name()).clicked() {
                            self.set_theme(ctx, theme);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.background).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| {
                self.render_display(ui);
                ui.add_space(8.0);
                self.render_keypad(ui);
            });

        if self.show_about {
            self.render_about(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_state();
    }
}

use crate::app::App;
use eframe::egui;

// Slate background, one accent for the button and focus, red for failures.
const ACCENT: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);
const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const PANEL_BG: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
const FIELD_BG: egui::Color32 = egui::Color32::from_rgb(31, 41, 55);
const LABEL_TEXT: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);

/// Form labels and placeholder values, in field order.
const FIELDS: [(&str, &str); 3] = [
    ("Enter Stock Names (comma separated):", "AAPL,MSFT,GOOGL"),
    ("Enter Weights (comma separated, total = 1.0):", "0.4,0.3,0.3"),
    ("Enter Expected Annual Returns (e.g. 0.10, 0.08):", "0.10,0.08,0.12"),
];

pub struct GuiApp {
    app: App,
}

impl GuiApp {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    fn apply_theme(ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = PANEL_BG;
        visuals.window_fill = FIELD_BG;
        visuals.extreme_bg_color = FIELD_BG;
        visuals.window_rounding = egui::Rounding::same(6.0);
        visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
        visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
        ctx.set_visuals(visuals);
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let values = [
                &mut self.app.tickers,
                &mut self.app.weights,
                &mut self.app.returns,
            ];
            for ((label, hint), value) in FIELDS.iter().zip(values) {
                ui.label(egui::RichText::new(*label).color(LABEL_TEXT));
                ui.add(
                    egui::TextEdit::singleline(value)
                        .desired_width(400.0)
                        .hint_text(*hint),
                );
            }

            ui.add_space(10.0);
            let button = egui::Button::new(
                egui::RichText::new("Calculate Portfolio").strong().color(egui::Color32::WHITE),
            )
            .fill(ACCENT);
            if ui.add(button).clicked() {
                self.app.calculate();
            }
            ui.add_space(10.0);
        });
    }

    fn render_result(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut self.app.report.as_str())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .desired_rows(25),
            );
        });
    }

    /// Modal stand-in: the form is disabled while this window is open.
    fn render_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.app.error_msg.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(msg).color(ERROR_RED));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    dismissed = ui.button("OK").clicked();
                });
            });

        if dismissed {
            self.app.dismiss_error();
        }
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        Self::apply_theme(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let enabled = self.app.error_msg.is_none();
            ui.add_enabled_ui(enabled, |ui| {
                self.render_form(ui);
                self.render_result(ui);
            });
        });

        self.render_error_dialog(ctx);
    }
}

//! Home Page
//! Welcome text, logo and a short balloon animation on entry.

use egui::{Color32, Pos2, Rect, RichText, Stroke, TextureHandle};
use std::path::Path;
use thiserror::Error;

/// Seconds a balloon launch stays on screen
pub const BALLOON_DURATION: f64 = 4.0;
const BALLOON_COUNT: usize = 24;
const BALLOON_RADIUS: f32 = 18.0;

const BALLOON_COLORS: [Color32; 6] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(46, 204, 113),
    Color32::from_rgb(52, 152, 219),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(230, 126, 34),
];

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("Failed to load logo: {0}")]
    Image(#[from] image::ImageError),
}

/// Deterministic fraction in [0, 1) for balloon `index`.
fn spread(index: usize, salt: f64) -> f64 {
    ((index as f64 + 1.0) * (0.618_033_988_75 + salt)).fract()
}

/// Rising balloons, launched each time the home page is entered.
#[derive(Default)]
pub struct Balloons {
    started_at: Option<f64>,
}

impl Balloons {
    pub fn launch(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.started_at
            .is_some_and(|start| now - start < BALLOON_DURATION)
    }

    /// Screen position of balloon `index` after `elapsed` seconds, or `None`
    /// once it has floated out of `screen`.
    pub fn position(index: usize, elapsed: f64, screen: Rect) -> Option<Pos2> {
        let x = screen.left() + spread(index, 0.0) as f32 * screen.width();
        // Staggered starts, each balloon crossing the screen in 1.5..3s
        let delay = spread(index, 0.1);
        let travel = 1.5 + spread(index, 0.2) * 1.5;
        let progress = ((elapsed - delay) / travel).max(0.0) as f32;

        let distance = screen.height() + 4.0 * BALLOON_RADIUS;
        let y = screen.bottom() + 2.0 * BALLOON_RADIUS - progress * distance;
        let sway = (elapsed as f32 * 2.0 + index as f32).sin() * 12.0;

        (y > screen.top() - 2.0 * BALLOON_RADIUS).then(|| Pos2::new(x + sway, y))
    }

    pub fn paint(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let Some(start) = self.started_at else {
            return;
        };
        if !self.is_active(now) {
            self.started_at = None;
            return;
        }

        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("balloons"),
        ));

        for i in 0..BALLOON_COUNT {
            if let Some(center) = Self::position(i, now - start, screen) {
                let color = BALLOON_COLORS[i % BALLOON_COLORS.len()];
                let tail = center + egui::vec2(0.0, BALLOON_RADIUS * 2.2);
                painter.line_segment(
                    [center + egui::vec2(0.0, BALLOON_RADIUS), tail],
                    Stroke::new(1.0, Color32::GRAY),
                );
                painter.circle_filled(center, BALLOON_RADIUS, color.gamma_multiply(0.9));
            }
        }

        ctx.request_repaint();
    }
}

/// Static welcome page.
pub struct HomePage {
    logo: Option<TextureHandle>,
    logo_attempted: bool,
    pending_launch: bool,
    pub balloons: Balloons,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            logo: None,
            logo_attempted: false,
            pending_launch: true,
            balloons: Balloons::default(),
        }
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play the balloon animation on the next frame.
    pub fn celebrate(&mut self) {
        self.pending_launch = true;
    }

    fn load_logo(ctx: &egui::Context, path: &Path) -> Result<TextureHandle, LogoError> {
        let rgba = image::open(path)?.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        Ok(ctx.load_texture("logo", color_image, egui::TextureOptions::LINEAR))
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, logo_path: &Path, logo_width: f32) {
        if !self.logo_attempted {
            self.logo_attempted = true;
            match Self::load_logo(ctx, logo_path) {
                Ok(texture) => self.logo = Some(texture),
                Err(e) => log::warn!("{} ({})", e, logo_path.display()),
            }
        }
        if self.pending_launch {
            self.pending_launch = false;
            self.balloons.launch(ctx.input(|i| i.time));
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(RichText::new("☕ Welcome to the Starbucks Nutrition Explorer!").size(28.0));
            ui.add_space(10.0);

            match &self.logo {
                Some(texture) => {
                    let [w, h] = texture.size();
                    let height = logo_width * h as f32 / w.max(1) as f32;
                    ui.image(egui::load::SizedTexture::new(
                        texture.id(),
                        egui::vec2(logo_width, height),
                    ));
                }
                None => {
                    ui.label(RichText::new("[logo unavailable]").color(Color32::GRAY));
                }
            }

            ui.add_space(10.0);
            ui.label(RichText::new("👋 Hello!").size(20.0).strong());
            ui.label(
                "Welcome to this interactive app that helps you explore Starbucks' \
                 nutritional facts with ease.",
            );
            ui.separator();

            ui.label(RichText::new("🔍 What You Can Do:").strong());
            for line in [
                "🍩 Discover insights on calories, fat, sodium and carbohydrates",
                "📊 Visualize distributions and patterns using histograms, boxplots, and scatterplots",
                "⚙ Filter data by beverage category and nutritional ranges",
                "📁 Navigate between different sections using the sidebar",
            ] {
                ui.label(format!("  • {}", line));
            }
            ui.separator();

            ui.label(RichText::new("✨ Why This App?").strong());
            ui.label(
                "Whether you're a health-conscious customer, a data analyst, or just curious \
                 about your favorite drink, this app gives you a clear look at what's inside \
                 those Starbucks cups ☕.",
            );
            ui.add_space(8.0);
            ui.label(RichText::new("✅ Powered by Rust + egui").color(Color32::from_rgb(40, 167, 69)));
        });

        self.balloons.paint(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(1200.0, 800.0))
    }

    #[test]
    fn test_balloons_start_below_screen() {
        for i in 0..BALLOON_COUNT {
            let pos = Balloons::position(i, 0.0, screen()).expect("visible at launch");
            assert!(pos.y > screen().bottom());
        }
    }

    #[test]
    fn test_balloons_leave_before_duration_ends() {
        for i in 0..BALLOON_COUNT {
            assert!(Balloons::position(i, BALLOON_DURATION, screen()).is_none());
        }
    }

    #[test]
    fn test_launch_is_time_bounded() {
        let mut balloons = Balloons::default();
        assert!(!balloons.is_active(0.0));
        balloons.launch(10.0);
        assert!(balloons.is_active(11.0));
        assert!(!balloons.is_active(10.0 + BALLOON_DURATION));
    }

    #[test]
    fn test_missing_logo_is_error() {
        let ctx = egui::Context::default();
        let dir = tempfile::tempdir().expect("temp dir");
        let result = HomePage::load_logo(&ctx, &dir.path().join("logo.png"));
        assert!(result.is_err());
    }
}

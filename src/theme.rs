use eframe::egui::{self, Color32, Context, Rounding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_THEME: &str = "eduai_light";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    pub background: String,
    pub panel: String,
    pub text: String,
    pub muted_text: String,
    pub accent: String,
    pub accent_soft: String,
    pub success: String,
    pub danger: String,
    pub border: String,
    pub radius: f32,
    pub font_size_base: f32,
}

impl ThemeConfig {
    pub fn accent(&self) -> Color32 {
        parse_color(&self.accent)
    }

    pub fn accent_soft(&self) -> Color32 {
        parse_color(&self.accent_soft)
    }

    pub fn muted(&self) -> Color32 {
        parse_color(&self.muted_text)
    }

    pub fn success(&self) -> Color32 {
        parse_color(&self.success)
    }

    pub fn danger(&self) -> Color32 {
        parse_color(&self.danger)
    }

    pub fn border(&self) -> Color32 {
        parse_color(&self.border)
    }

    pub fn card_fill(&self) -> Color32 {
        parse_color(&self.panel)
    }
}

pub fn presets_file(base: &Path) -> PathBuf {
    base.join("themes").join("presets.json")
}

/// Writes the built-in presets on first run.
pub fn ensure_theme_files(base: &Path) -> io::Result<()> {
    let path = presets_file(base);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    if !path.exists() {
        let json = serde_json::to_string_pretty(&default_presets())?;
        fs::write(&path, json)?;
    }
    Ok(())
}

pub fn load_presets(base: &Path) -> Vec<ThemeConfig> {
    let path = presets_file(base);
    let contents = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return default_presets(),
    };
    match serde_json::from_str::<Vec<ThemeConfig>>(&contents) {
        Ok(list) if !list.is_empty() => list,
        Ok(_) => default_presets(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid theme presets; using built-ins");
            default_presets()
        }
    }
}

/// Picks `preferred` from the presets, else the default light theme.
pub fn select_theme(presets: &[ThemeConfig], preferred: Option<&str>) -> ThemeConfig {
    preferred
        .and_then(|name| presets.iter().find(|p| p.name == name))
        .or_else(|| presets.iter().find(|p| p.name == DEFAULT_THEME))
        .or_else(|| presets.first())
        .cloned()
        .unwrap_or_else(|| default_presets().remove(0))
}

pub fn apply_theme(theme: &ThemeConfig, ctx: &Context) {
    let mut style = (*ctx.style()).clone();
    let mut visuals = if is_dark(theme) {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    let background = parse_color(&theme.background);
    let panel = parse_color(&theme.panel);
    let text = parse_color(&theme.text);

    visuals.panel_fill = background;
    visuals.window_fill = panel;
    visuals.extreme_bg_color = panel;
    visuals.override_text_color = Some(text);
    visuals.selection.bg_fill = theme.accent();
    visuals.hyperlink_color = theme.accent();

    visuals.widgets.noninteractive.bg_fill = panel;
    visuals.widgets.noninteractive.bg_stroke.color = theme.border();
    visuals.widgets.inactive.bg_fill = background;
    visuals.widgets.inactive.weak_bg_fill = background;
    visuals.widgets.hovered.bg_fill = theme.accent_soft();
    visuals.widgets.hovered.weak_bg_fill = theme.accent_soft();
    visuals.widgets.hovered.bg_stroke.color = theme.accent();
    visuals.widgets.active.bg_fill = theme.accent();
    visuals.widgets.active.weak_bg_fill = theme.accent();

    let rounding = Rounding::same(theme.radius);
    visuals.window_rounding = rounding;
    visuals.widgets.noninteractive.rounding = rounding;
    visuals.widgets.inactive.rounding = rounding;
    visuals.widgets.hovered.rounding = rounding;
    visuals.widgets.active.rounding = rounding;

    let base = theme.font_size_base;
    style.text_styles = [
        (egui::TextStyle::Small, egui::FontId::proportional(base - 3.0)),
        (egui::TextStyle::Body, egui::FontId::proportional(base)),
        (egui::TextStyle::Button, egui::FontId::proportional(base)),
        (egui::TextStyle::Heading, egui::FontId::proportional(base + 10.0)),
        (egui::TextStyle::Monospace, egui::FontId::monospace(base - 1.0)),
    ]
    .into();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.visuals = visuals;
    ctx.set_style(style);
}

fn is_dark(theme: &ThemeConfig) -> bool {
    let bg = parse_color(&theme.background);
    let luminance =
        0.2126 * (bg.r() as f32) + 0.7152 * (bg.g() as f32) + 0.0722 * (bg.b() as f32);
    luminance < 128.0
}

/// `#rrggbb` or `#rrggbbaa`; anything else is light grey.
pub fn parse_color(hex: &str) -> Color32 {
    let h = hex.trim_start_matches('#');
    let Ok(raw) = u32::from_str_radix(h, 16) else {
        return Color32::LIGHT_GRAY;
    };
    match h.len() {
        6 => Color32::from_rgb((raw >> 16) as u8, (raw >> 8) as u8, raw as u8),
        8 => Color32::from_rgba_unmultiplied(
            (raw >> 24) as u8,
            (raw >> 16) as u8,
            (raw >> 8) as u8,
            raw as u8,
        ),
        _ => Color32::LIGHT_GRAY,
    }
}

pub fn default_presets() -> Vec<ThemeConfig> {
    vec![
        ThemeConfig {
            name: DEFAULT_THEME.to_string(),
            background: "#f8fafc".to_string(),
            panel: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            muted_text: "#64748b".to_string(),
            accent: "#2563eb".to_string(),
            accent_soft: "#dbeafe".to_string(),
            success: "#16a34a".to_string(),
            danger: "#ef4444".to_string(),
            border: "#e2e8f0".to_string(),
            radius: 10.0,
            font_size_base: 15.0,
        },
        ThemeConfig {
            name: "slate_dark".to_string(),
            background: "#0f172a".to_string(),
            panel: "#1e293b".to_string(),
            text: "#e2e8f0".to_string(),
            muted_text: "#94a3b8".to_string(),
            accent: "#3b82f6".to_string(),
            accent_soft: "#1e3a8a".to_string(),
            success: "#22c55e".to_string(),
            danger: "#f87171".to_string(),
            border: "#334155".to_string(),
            radius: 10.0,
            font_size_base: 15.0,
        },
        ThemeConfig {
            name: "high_contrast".to_string(),
            background: "#000000".to_string(),
            panel: "#0d0d0d".to_string(),
            text: "#ffffff".to_string(),
            muted_text: "#c7c7c7".to_string(),
            accent: "#ffcc00".to_string(),
            accent_soft: "#4d3b00".to_string(),
            success: "#00ff66".to_string(),
            danger: "#ff4d4d".to_string(),
            border: "#ffffff".to_string(),
            radius: 0.0,
            font_size_base: 18.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_written_once_and_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        ensure_theme_files(dir.path()).unwrap();
        let mut presets = load_presets(dir.path());
        assert_eq!(presets, default_presets());

        presets.truncate(1);
        fs::write(
            presets_file(dir.path()),
            serde_json::to_string(&presets).unwrap(),
        )
        .unwrap();
        ensure_theme_files(dir.path()).unwrap();
        assert_eq!(load_presets(dir.path()).len(), 1);
    }

    #[test]
    fn broken_presets_fall_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        ensure_theme_files(dir.path()).unwrap();
        fs::write(presets_file(dir.path()), "[{]").unwrap();
        assert_eq!(load_presets(dir.path()), default_presets());
    }

    #[test]
    fn select_prefers_named_then_default() {
        let presets = default_presets();
        assert_eq!(select_theme(&presets, Some("slate_dark")).name, "slate_dark");
        assert_eq!(select_theme(&presets, Some("gone")).name, DEFAULT_THEME);
        assert_eq!(select_theme(&[], None).name, DEFAULT_THEME);
    }

    #[test]
    fn colors_parse() {
        assert_eq!(parse_color("#2563eb"), Color32::from_rgb(0x25, 0x63, 0xeb));
        assert_eq!(parse_color("zzz"), Color32::LIGHT_GRAY);
        assert_eq!(parse_color("#12345"), Color32::LIGHT_GRAY);
    }

    #[test]
    fn darkness_follows_background() {
        let presets = default_presets();
        assert!(!is_dark(&presets[0]));
        assert!(is_dark(&presets[1]));
    }
}

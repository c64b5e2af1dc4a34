use crate::config::ThemeName;
use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub track: Srgba<f64>,
    pub progress: Srgba<f64>,
    pub progress_active: Srgba<f64>,
    pub handle_core: Srgba<f64>,
    pub glow: Srgba<f64>,
    pub text: Srgba<f64>,
    pub unit: Srgba<f64>,
}

impl ThemeColors {
    pub fn palette(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Midnight | ThemeName::System => Self {
                track: hex(0x374151, 1.0),
                progress: hex(0x3b82f6, 1.0),
                progress_active: hex(0x1d4ed8, 1.0),
                handle_core: hex(0xffffff, 1.0),
                glow: hex(0x3b82f6, 0.3),
                text: hex(0xffffff, 1.0),
                unit: hex(0x60a5fa, 1.0),
            },
            ThemeName::Helium => Self {
                track: hex(0xe2e8e6, 1.0),
                progress: hex(0x3b787b, 1.0),
                progress_active: hex(0x033129, 1.0),
                handle_core: hex(0xffffff, 1.0),
                glow: hex(0x90c9c4, 0.35),
                text: hex(0x1e2a28, 1.0),
                unit: hex(0x3b787b, 1.0),
            },
            ThemeName::Seafoam => Self {
                track: hex(0xc5dfd3, 1.0),
                progress: hex(0x6baba5, 1.0),
                progress_active: hex(0x3b787b, 1.0),
                handle_core: hex(0xf6fdfc, 1.0),
                glow: hex(0x6baba5, 0.3),
                text: hex(0x033129, 1.0),
                unit: hex(0x4a5754, 1.0),
            },
        }
    }

    /// Named themes use their own palette; `system` asks the GTK theme.
    pub fn from_context(context: &gtk::StyleContext, theme: ThemeName) -> Self {
        let fallback = Self::palette(theme);
        if theme != ThemeName::System {
            return fallback;
        }

        Self {
            track: Self::lookup_color(context, "borders", fallback.track, Some(1.0)),
            progress: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.progress,
                None,
            ),
            progress_active: Self::lookup_color(
                context,
                "accent_color",
                fallback.progress_active,
                None,
            ),
            glow: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.glow,
                Some(0.3),
            ),
            text: Self::lookup_color(context, "theme_fg_color", fallback.text, None),
            unit: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.unit,
                None,
            ),
            ..fallback
        }
    }

    /// Named color from the GTK theme, optionally with its alpha replaced.
    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha: Option<f64>,
    ) -> Srgba<f64> {
        let Some(rgba) = context.lookup_color(name) else {
            return fallback;
        };
        let mut color: Srgba<f64> =
            Srgba::new(rgba.red(), rgba.green(), rgba.blue(), rgba.alpha()).into_format();
        if let Some(alpha) = alpha {
            color.alpha = alpha;
        }
        color
    }
}

fn hex(rgb: u32, alpha: f64) -> Srgba<f64> {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f64 / 255.0;
    Srgba::new(channel(16), channel(8), channel(0), alpha)
}

impl ThemeName {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Midnight => "theme-midnight",
            Self::Helium => "theme-helium",
            Self::Seafoam => "theme-seafoam",
            Self::System => "theme-system",
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.helium-dial {
    background: none;
    background-color: transparent;
}
.helium-window.theme-midnight {
    background-image: linear-gradient(to bottom, #000000, #111827);
}
.helium-window.theme-midnight label {
    color: #ffffff;
}
.helium-window.theme-helium {
    background-image: linear-gradient(to bottom, #f6fdfc, #ffffff);
}
.helium-window.theme-helium label {
    color: #1e2a28;
}
.helium-window.theme-seafoam {
    background-image: linear-gradient(to bottom, #f6fdfc, #c5dfd3);
}
.helium-window.theme-seafoam label {
    color: #033129;
}
.helium-brand {
    font-size: 24px;
    font-weight: bold;
    letter-spacing: 4px;
}
.helium-caption {
    font-size: 13px;
    opacity: 0.7;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_channels() {
        let c = hex(0x3b82f6, 0.5);
        let (r, g, b, a) = c.into_components();
        assert!((r - 0x3b as f64 / 255.0).abs() < 1e-12);
        assert!((g - 0x82 as f64 / 255.0).abs() < 1e-12);
        assert!((b - 0xf6 as f64 / 255.0).abs() < 1e-12);
        assert_eq!(a, 0.5);
    }

    #[test]
    fn test_every_theme_has_a_css_class() {
        use strum::IntoEnumIterator;
        let classes: Vec<_> = ThemeName::iter().map(|t| t.css_class()).collect();
        assert_eq!(classes.len(), 4);
        assert!(classes.iter().all(|c| c.starts_with("theme-")));
    }
}

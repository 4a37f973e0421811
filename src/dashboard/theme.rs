use serde::Serialize;

/// Branding constants handed to whatever draws the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub page_title: &'static str,
    pub page_icon: &'static str,
    pub tagline: &'static str,
    pub primary_color: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub sidebar_color: &'static str,
    pub font_family: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_title: "Voice of the Patient Pulseboard",
            page_icon: "💊",
            tagline: "Real-time insights in service of every patient across every county.",
            primary_color: "#FF0050",
            background_color: "#FAF9F6",
            text_color: "#1C1C1C",
            sidebar_color: "#FFFFFF",
            font_family: "'Segoe UI', sans-serif",
        }
    }
}

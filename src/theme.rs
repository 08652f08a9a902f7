use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub primary_color: String,
    pub primary_text_color: String,
    pub secondary_text_color: String,
    pub tertiary_text_color: String,
    pub grid_color: String,
    pub surface: String,
    pub muted_surface: String,
    pub track_color: String,
    pub error_color: String,
    pub background: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            primary_color: "#3b82f6".to_string(),
            primary_text_color: "#1f2937".to_string(),
            secondary_text_color: "#6b7280".to_string(),
            tertiary_text_color: "#9ca3af".to_string(),
            grid_color: "#e5e7eb".to_string(),
            surface: "#ffffff".to_string(),
            muted_surface: "#f9fafb".to_string(),
            track_color: "#e5e7eb".to_string(),
            error_color: "#dc2626".to_string(),
            background: "#ffffff".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            primary_color: "#60a5fa".to_string(),
            primary_text_color: "#f3f4f6".to_string(),
            secondary_text_color: "#d1d5db".to_string(),
            tertiary_text_color: "#9ca3af".to_string(),
            grid_color: "#374151".to_string(),
            surface: "#1f2937".to_string(),
            muted_surface: "#111827".to_string(),
            track_color: "#374151".to_string(),
            error_color: "#f87171".to_string(),
            background: "#111827".to_string(),
        }
    }

    /// Looks up a named theme. Unknown names yield `None` so callers can fall
    /// back to `modern`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" | "light" | "default" => Some(Self::modern()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_named_themes() {
        assert_eq!(Theme::by_name("Dark"), Some(Theme::dark()));
        assert_eq!(Theme::by_name(" modern "), Some(Theme::modern()));
        assert!(Theme::by_name("neon").is_none());
    }
}

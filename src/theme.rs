#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub node_fill: String,
    pub node_border_color: String,
    pub node_border_width: f32,
    pub line_color: String,
    pub line_width: f32,
    pub decoration_color: String,
    pub decoration_width: f32,
    pub background: String,
}

impl Theme {
    /// Black outlines and small sans-serif labels on white.
    pub fn classic() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 8.5,
            text_color: "#000000".to_string(),
            node_fill: "none".to_string(),
            node_border_color: "#444444".to_string(),
            node_border_width: 1.0,
            line_color: "#1F77B4".to_string(),
            line_width: 1.2,
            decoration_color: "#FF7F0E".to_string(),
            decoration_width: 1.5,
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 10.0,
            text_color: "#1C2430".to_string(),
            node_fill: "#F8FAFF".to_string(),
            node_border_color: "#C7D2E5".to_string(),
            node_border_width: 1.2,
            line_color: "#7A8AA6".to_string(),
            line_width: 1.4,
            decoration_color: "#3B4A63".to_string(),
            decoration_width: 1.6,
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

//! Color themes and the built-in palette catalog

use serde::{Deserialize, Serialize};

/// Name given to themes that do not come from the catalog
pub const CUSTOM_THEME_NAME: &str = "custom";

/// A palette plus background and default text colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapTheme {
    /// Catalog name, or `"custom"`
    pub name: String,
    /// Ordered palette colors
    pub colors: Vec<String>,
    /// Canvas background color
    pub background: String,
    /// Default text color
    pub text: String,
}

impl Default for MindMapTheme {
    fn default() -> Self {
        Self {
            name: CUSTOM_THEME_NAME.to_string(),
            colors: Vec::new(),
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
        }
    }
}

impl MindMapTheme {
    /// Look up a catalog theme by name (case-insensitive)
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        COLOR_SCHEMES
            .iter()
            .find(|scheme| scheme.name == wanted)
            .map(ColorScheme::to_theme)
    }

    /// Palette color for a branch index, cycling through the palette
    #[must_use]
    pub fn color_for(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            None
        } else {
            Some(self.colors[index % self.colors.len()].as_str())
        }
    }
}

/// Static palette definition
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    /// Lowercase catalog name
    pub name: &'static str,
    /// Six palette colors
    pub colors: [&'static str; 6],
    /// Background color
    pub background: &'static str,
    /// Text color
    pub text: &'static str,
}

impl ColorScheme {
    /// Materialize into an owned theme
    #[must_use]
    pub fn to_theme(&self) -> MindMapTheme {
        MindMapTheme {
            name: self.name.to_string(),
            colors: self.colors.iter().map(|c| (*c).to_string()).collect(),
            background: self.background.to_string(),
            text: self.text.to_string(),
        }
    }
}

/// Built-in palettes
pub const COLOR_SCHEMES: &[ColorScheme] = &[
    ColorScheme {
        name: "professional",
        colors: ["#2563eb", "#dc2626", "#16a34a", "#ea580c", "#9333ea", "#0891b2"],
        background: "#ffffff",
        text: "#000000",
    },
    ColorScheme {
        name: "vibrant",
        colors: ["#f43f5e", "#10b981", "#3b82f6", "#a855f7", "#eab308", "#ec4899"],
        background: "#ffffff",
        text: "#000000",
    },
    ColorScheme {
        name: "pastel",
        colors: ["#fca5a5", "#86efac", "#93c5fd", "#fde047", "#fdba74", "#e9d5ff"],
        background: "#ffffff",
        text: "#1f2937",
    },
    ColorScheme {
        name: "dark",
        colors: ["#60a5fa", "#f472b6", "#a3e635", "#fbbf24", "#c084fc", "#22d3ee"],
        background: "#1f2937",
        text: "#f9fafb",
    },
    ColorScheme {
        name: "ocean",
        colors: ["#0284c7", "#0891b2", "#0ea5e9", "#06b6d4", "#14b8a6", "#0369a1"],
        background: "#ffffff",
        text: "#0c4a6e",
    },
    ColorScheme {
        name: "sunset",
        colors: ["#f97316", "#fb923c", "#fbbf24", "#fcd34d", "#fed7aa", "#fb7185"],
        background: "#fffbeb",
        text: "#7c2d12",
    },
    ColorScheme {
        name: "forest",
        colors: ["#16a34a", "#22c55e", "#4ade80", "#84cc16", "#a3e635", "#bef264"],
        background: "#f0fdf4",
        text: "#14532d",
    },
    ColorScheme {
        name: "candy",
        colors: ["#ec4899", "#f472b6", "#f9a8d4", "#c084fc", "#e879f9", "#f0abfc"],
        background: "#fdf2f8",
        text: "#831843",
    },
    ColorScheme {
        name: "neon",
        colors: ["#0ff", "#f0f", "#ff0", "#0f0", "#f00", "#00f"],
        background: "#000000",
        text: "#ffffff",
    },
    ColorScheme {
        name: "monochrome",
        colors: ["#374151", "#4b5563", "#6b7280", "#9ca3af", "#d1d5db", "#e5e7eb"],
        background: "#ffffff",
        text: "#111827",
    },
    ColorScheme {
        name: "autumn",
        colors: ["#dc2626", "#ea580c", "#d97706", "#ca8a04", "#65a30d", "#16a34a"],
        background: "#fef3c7",
        text: "#78350f",
    },
    ColorScheme {
        name: "sakura",
        colors: ["#fbbf24", "#fb923c", "#f472b6", "#e879f9", "#c084fc", "#a78bfa"],
        background: "#fdf2f8",
        text: "#701a75",
    },
    ColorScheme {
        name: "fragrance",
        colors: ["#e268a9", "#a284dd", "#f78181", "#dda3cf", "#fecde4", "#e85464"],
        background: "#ffffff",
        text: "#813f84",
    },
];

/// Names of all built-in palettes, in catalog order
#[must_use]
pub fn scheme_names() -> Vec<&'static str> {
    COLOR_SCHEMES.iter().map(|s| s.name).collect()
}

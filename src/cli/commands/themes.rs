//! Themes command handler

use mindmap_export::core::models::COLOR_SCHEMES;

/// Print every palette with its colors
pub fn run() {
    println!("\n=== Themes ===\n");
    for scheme in COLOR_SCHEMES {
        println!(
            "{:<12} {}  (background {}, text {})",
            scheme.name,
            scheme.colors.join(" "),
            scheme.background,
            scheme.text
        );
    }
}

//! Reusable Dioxus RSX components for the electricity map UI.

mod back_button;
mod error_display;
mod mix_mode_selector;
mod time_slider;
mod zone_panel;
mod zone_selector;

pub use back_button::BackButton;
pub use error_display::ErrorDisplay;
pub use mix_mode_selector::MixModeSelector;
pub use time_slider::TimeSlider;
pub use zone_panel::ZonePanel;
pub use zone_selector::ZoneSelector;

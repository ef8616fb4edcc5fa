//! Resolved color palettes for the TUI

use ratatui::style::Color;

/// All colors the views draw with, resolved for one mode
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Phase tag colors along the discovery-to-impact arc
    pub phase_method: Color,
    pub phase_adoption: Color,
    pub phase_impact: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Color::Rgb(0xd8, 0xde, 0xe9),
            text_muted: Color::Rgb(0x6b, 0x72, 0x80),
            primary: Color::Rgb(0x88, 0xc0, 0xd0),
            accent: Color::Rgb(0xb4, 0x8e, 0xad),
            border: Color::Rgb(0x3b, 0x42, 0x52),
            success: Color::Rgb(0xa3, 0xbe, 0x8c),
            warning: Color::Rgb(0xeb, 0xcb, 0x8b),
            error: Color::Rgb(0xbf, 0x61, 0x6a),
            phase_method: Color::Rgb(0x81, 0xa1, 0xc1),
            phase_adoption: Color::Rgb(0xb4, 0x8e, 0xad),
            phase_impact: Color::Rgb(0xd0, 0x87, 0x70),
        }
    }

    pub fn light() -> Self {
        Self {
            text: Color::Rgb(0x2e, 0x34, 0x40),
            text_muted: Color::Rgb(0x7a, 0x82, 0x8e),
            primary: Color::Rgb(0x1f, 0x6f, 0x8b),
            accent: Color::Rgb(0x8f, 0x5e, 0x85),
            border: Color::Rgb(0xc2, 0xc8, 0xd0),
            success: Color::Rgb(0x47, 0x7a, 0x3c),
            warning: Color::Rgb(0xa3, 0x77, 0x1c),
            error: Color::Rgb(0xa5, 0x40, 0x42),
            phase_method: Color::Rgb(0x2f, 0x5f, 0x8f),
            phase_adoption: Color::Rgb(0x8f, 0x5e, 0x85),
            phase_impact: Color::Rgb(0xa8, 0x5a, 0x3a),
        }
    }

    pub fn resolve(light_mode: bool) -> Self {
        if light_mode {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn phase_color(&self, phase: crate::data::EventPhase) -> Color {
        match phase {
            crate::data::EventPhase::Method => self.phase_method,
            crate::data::EventPhase::Adoption => self.phase_adoption,
            crate::data::EventPhase::Impact => self.phase_impact,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses a CSS hex color (`#rgb` or `#rrggbb`).
    pub fn from_css_hex(text: &str) -> ChartResult<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        let channels = match digits.len() {
            3 => {
                let mut channels = [0.0_f64; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let nibble = c
                        .to_digit(16)
                        .ok_or_else(|| bad_color(text))?;
                    *slot = f64::from(nibble * 16 + nibble) / 255.0;
                }
                channels
            }
            6 => {
                let mut channels = [0.0_f64; 3];
                for (index, slot) in channels.iter_mut().enumerate() {
                    let byte = u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
                        .map_err(|_| bad_color(text))?;
                    *slot = f64::from(byte) / 255.0;
                }
                channels
            }
            _ => return Err(bad_color(text)),
        };
        Ok(Self::rgb(channels[0], channels[1], channels[2]))
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn bad_color(text: &str) -> ChartError {
    ChartError::InvalidData(format!("`{text}` is not a css hex color"))
}

/// One command of a vector path in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Circular arc to `(x, y)` with radius `r`.
    ArcTo { r: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
    Close,
}

impl PathCommand {
    pub fn validate(self) -> ChartResult<()> {
        let coordinates = match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => [x, y, 0.0],
            Self::ArcTo { r, x, y, .. } => {
                if !r.is_finite() || r < 0.0 {
                    return Err(ChartError::InvalidGeometry(
                        "arc radius must be finite and >= 0".to_owned(),
                    ));
                }
                [x, y, r]
            }
            Self::Close => return Ok(()),
        };
        for value in coordinates {
            if !value.is_finite() {
                return Err(ChartError::InvalidGeometry(
                    "path coordinates must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Draw command for one stroked/filled path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub stroke_width: f64,
    pub color: Color,
    pub filled: bool,
}

impl PathPrimitive {
    #[must_use]
    pub fn stroked(commands: Vec<PathCommand>, stroke_width: f64, color: Color) -> Self {
        Self {
            commands,
            stroke_width,
            color,
            filled: false,
        }
    }

    #[must_use]
    pub fn filled(commands: Vec<PathCommand>, color: Color) -> Self {
        Self {
            commands,
            stroke_width: 0.0,
            color,
            filled: true,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.filled && (!self.stroke_width.is_finite() || self.stroke_width <= 0.0) {
            return Err(ChartError::InvalidGeometry(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        for command in &self.commands {
            command.validate()?;
        }
        self.color.validate()
    }
}

/// Draw command for one axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for value in [self.x, self.y, self.width, self.height] {
            if !value.is_finite() {
                return Err(ChartError::InvalidGeometry(
                    "rect parameters must be finite".to_owned(),
                ));
            }
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidGeometry(
                "rect dimensions must be >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(cx: f64, cy: f64, radius: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for value in [self.cx, self.cy, self.radius, self.stroke_width] {
            if !value.is_finite() {
                return Err(ChartError::InvalidGeometry(
                    "circle parameters must be finite".to_owned(),
                ));
            }
        }
        if self.radius < 0.0 {
            return Err(ChartError::InvalidGeometry(
                "circle radius must be >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidGeometry(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidGeometry(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

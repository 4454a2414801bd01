use piston_window::character::CharacterCache;
use piston_window::*;

/// RGBA, each channel in `0.0..=1.0`.
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [1.0, 1.0, 1.0, 1.0];
pub const LABEL_COLOR: Color = [0.0, 0.0, 0.0, 1.0];
pub const LABEL_FONT_SIZE: u32 = 12;

/// Drawing surface the simulation renders onto.
pub trait Canvas {
    /// Reset `[x, y, w, h]` to the background.
    fn clear_rect(&mut self, rect: [f64; 4]);

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color);

    /// Draw `text` with its baseline at `at[1]`, horizontally centered on `at[0]`.
    fn fill_text_centered(&mut self, text: &str, at: [f64; 2], font_size: u32, color: Color);
}

/// [`Canvas`] over a piston 2D frame. Text is skipped when no font loaded.
pub struct PistonCanvas<'a, 'b> {
    transform: math::Matrix2d,
    draw_state: DrawState,
    g: &'a mut G2d<'b>,
    glyphs: Option<&'a mut Glyphs>,
}

impl<'a, 'b> PistonCanvas<'a, 'b> {
    pub fn new(
        transform: math::Matrix2d,
        draw_state: DrawState,
        g: &'a mut G2d<'b>,
        glyphs: Option<&'a mut Glyphs>,
    ) -> Self {
        PistonCanvas {
            transform,
            draw_state,
            g,
            glyphs,
        }
    }
}

impl Canvas for PistonCanvas<'_, '_> {
    fn clear_rect(&mut self, rect: [f64; 4]) {
        rectangle(BACKGROUND, rect, self.transform, self.g);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) {
        ellipse(
            color,
            ellipse::circle(center[0], center[1], radius),
            self.transform,
            self.g,
        );
    }

    fn fill_text_centered(&mut self, text: &str, at: [f64; 2], font_size: u32, color: Color) {
        let Some(glyphs) = self.glyphs.as_deref_mut() else {
            return;
        };
        let width = glyphs.width(font_size, text).unwrap_or(0.0);
        let result = Text::new_color(color, font_size).draw(
            text,
            glyphs,
            &self.draw_state,
            self.transform.trans(at[0] - width / 2.0, at[1]),
            self.g,
        );
        if let Err(err) = result {
            log::trace!("failed to draw {text:?}: {err:?}");
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear([f64; 4]),
        Circle {
            center: [f64; 2],
            radius: f64,
            color: Color,
        },
        Text {
            text: String,
            at: [f64; 2],
        },
    }

    /// Canvas that remembers every call, for asserting on a frame.
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl Canvas for RecordingCanvas {
        fn clear_rect(&mut self, rect: [f64; 4]) {
            self.calls.push(DrawCall::Clear(rect));
        }

        fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color,
            });
        }

        fn fill_text_centered(&mut self, text: &str, at: [f64; 2], _font_size: u32, _color: Color) {
            self.calls.push(DrawCall::Text {
                text: text.to_string(),
                at,
            });
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Canvas program drawing the map and turning pointer input into picker messages.
#![allow(clippy::cast_precision_loss)]

use super::messages::{CanvasMessage, Message};
use crate::map::{MapSurface, MarkerHandle};
use crate::map::projection::TILE_SIZE;
use crate::ui::design_tokens::{border, opacity, palette, sizing, spacing, typography};
use crate::ui::state::DragState;
use iced::advanced::image::Image;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{image, Action};
use iced::{mouse, Color, Point, Radians, Rectangle, Renderer, Size, Theme, Vector};

/// Average glyph width relative to the font size, for sizing label plates.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Pointer state kept by the canvas between events.
#[derive(Debug, Default)]
pub struct PointerState {
    drag: DragState,
    last_size: Option<Size>,
}

/// Draws one map surface and its marker.
pub struct MapCanvas<'a> {
    surface: &'a MapSurface,
    marker: Option<&'a MarkerHandle>,
}

impl<'a> MapCanvas<'a> {
    #[must_use]
    pub fn new(surface: &'a MapSurface, marker: Option<&'a MarkerHandle>) -> Self {
        Self { surface, marker }
    }
}

fn publish(message: CanvasMessage) -> Option<Action<Message>> {
    Some(Action::publish(Message::Canvas(message)).and_capture())
}

/// Reports the canvas size the first time it is seen and whenever it changes.
fn resized(last_size: &mut Option<Size>, size: Size) -> Option<Action<Message>> {
    if *last_size == Some(size) {
        return None;
    }
    *last_size = Some(size);
    Some(Action::publish(Message::Canvas(CanvasMessage::Resized(size))))
}

/// Invisible canvas laid out where the map will go, so the container size is
/// known before any map surface exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerSensor;

impl canvas::Program<Message> for ContainerSensor {
    type State = Option<Size>;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            iced::Event::Window(_) => resized(state, bounds.size()),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        _renderer: &Renderer,
        _theme: &Theme,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        Vec::new()
    }
}

impl canvas::Program<Message> for MapCanvas<'_> {
    type State = PointerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        let size = bounds.size();

        match event {
            iced::Event::Window(_) => resized(&mut state.last_size, size),
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                state.drag.start(position);
                Some(Action::capture())
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if !state.drag.is_pressed() {
                    return None;
                }
                let position = cursor.position_from(bounds.position())?;
                let delta = state.drag.track(position, sizing::CLICK_DRAG_THRESHOLD)?;
                publish(CanvasMessage::Dragged {
                    delta,
                    bounds: size,
                })
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if !state.drag.is_pressed() {
                    return None;
                }
                let was_dragging = state.drag.is_dragging;
                match state.drag.release() {
                    Some(position) => publish(CanvasMessage::Clicked {
                        position,
                        bounds: size,
                    }),
                    None if was_dragging => publish(CanvasMessage::DragEnded),
                    None => None,
                }
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) => {
                let was_dragging = state.drag.is_dragging;
                state.drag.stop();
                if was_dragging {
                    publish(CanvasMessage::DragEnded)
                } else {
                    None
                }
            }
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let anchor = cursor.position_in(bounds)?;
                let amount = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => *y,
                };
                if amount == 0.0 {
                    return None;
                }
                publish(CanvasMessage::Scrolled {
                    anchor,
                    zoom_in: amount > 0.0,
                    bounds: size,
                })
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let view = self.surface.view().with_viewport(bounds.size());

        frame.fill(
            &Path::rectangle(Point::ORIGIN, bounds.size()),
            palette::TILE_PLACEHOLDER,
        );

        let tile_size = Size::new(TILE_SIZE as f32, TILE_SIZE as f32);
        for placed in view.visible_tiles() {
            let Some(handle) = self.surface.tiles().peek(&placed.id) else {
                continue;
            };
            frame.draw_image(
                Rectangle::new(placed.origin, tile_size),
                Image {
                    handle: handle.clone(),
                    filter_method: image::FilterMethod::Linear,
                    rotation: Radians(0.0),
                    border_radius: Default::default(),
                    opacity: 1.0,
                    snap: true,
                },
            );
        }

        if let Some(marker) = self.marker {
            let position = view.screen_position(marker.point());
            draw_marker(&mut frame, position, marker.label());
        }

        draw_attribution(&mut frame, bounds.size(), self.surface.source().attribution());

        // Grabbing feedback while the map is being dragged
        if state.drag.is_dragging {
            frame.stroke(
                &Path::rectangle(Point::ORIGIN, bounds.size()),
                Stroke::default()
                    .with_width(border::WIDTH_MD)
                    .with_color(palette::PRIMARY_500),
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.drag.is_dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

fn label_plate(frame: &mut Frame, origin: Point, content: &str, size: f32, background: Color) -> Point {
    let width = content.chars().count() as f32 * size * GLYPH_WIDTH_RATIO + 2.0 * spacing::XXS;
    let height = size + spacing::XXS;
    frame.fill(
        &Path::rectangle(origin, Size::new(width, height)),
        background,
    );
    Point::new(origin.x + spacing::XXS, origin.y + spacing::XXS / 2.0)
}

fn draw_marker(frame: &mut Frame, position: Point, label: &str) {
    let dot = Path::circle(position, sizing::MARKER_RADIUS);
    frame.fill(&dot, palette::PRIMARY_500);
    frame.stroke(
        &dot,
        Stroke::default()
            .with_width(border::WIDTH_MD)
            .with_color(palette::WHITE),
    );

    let size = typography::CAPTION;
    let plate_origin = position
        + Vector::new(
            sizing::MARKER_RADIUS + spacing::XXS,
            -(sizing::MARKER_RADIUS + size + spacing::XXS),
        );
    let text_origin = label_plate(
        frame,
        plate_origin,
        label,
        size,
        Color {
            a: opacity::SURFACE,
            ..palette::WHITE
        },
    );
    frame.fill_text(Text {
        content: label.to_string(),
        position: text_origin,
        color: palette::GRAY_900,
        size: size.into(),
        ..Text::default()
    });
}

fn draw_attribution(frame: &mut Frame, size: Size, attribution: &str) {
    let text_size = typography::CAPTION;
    let width = attribution.chars().count() as f32 * text_size * GLYPH_WIDTH_RATIO
        + 2.0 * spacing::XXS;
    let origin = Point::new(
        (size.width - width).max(0.0),
        size.height - text_size - spacing::XXS,
    );
    let text_origin = label_plate(
        frame,
        origin,
        attribution,
        text_size,
        Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::WHITE
        },
    );
    frame.fill_text(Text {
        content: attribution.to_string(),
        position: text_origin,
        color: palette::GRAY_700,
        size: text_size.into(),
        ..Text::default()
    });
}

//! Window-level viewer state (zoom, fullscreen) and keyboard mapping

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Home,
    End,
    Escape,
    Plus,
    Minus,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Previous,
    Next,
    First,
    Last,
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
    ExitFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerContext {
    pub fullscreen: bool,
    pub zoom: f32,
}

impl Default for ViewerContext {
    fn default() -> Self {
        Self {
            fullscreen: false,
            zoom: 1.0,
        }
    }
}

impl ViewerContext {
    /// Map a key press to an action. Escape only means something in fullscreen.
    pub fn action_for(&self, key: Key) -> Option<ViewerAction> {
        match key {
            Key::Left => Some(ViewerAction::Previous),
            Key::Right => Some(ViewerAction::Next),
            Key::Home => Some(ViewerAction::First),
            Key::End => Some(ViewerAction::Last),
            Key::Plus => Some(ViewerAction::ZoomIn),
            Key::Minus => Some(ViewerAction::ZoomOut),
            Key::F => Some(ViewerAction::ToggleFullscreen),
            Key::Escape if self.fullscreen => Some(ViewerAction::ExitFullscreen),
            Key::Escape => None,
        }
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
        self.zoom
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }
}

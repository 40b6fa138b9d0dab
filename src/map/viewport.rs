use std::f64::consts::PI;
use std::{fmt, ops};

/// Tile edge length the zoom levels are defined against
pub const TILE_SIZE: f64 = 512.;
pub const MIN_ZOOM: f64 = 5.;
pub const MAX_ZOOM: f64 = 18.;
pub const DEFAULT_ZOOM: f64 = 12.;
/// MIT, between Boston and Cambridge
pub const DEFAULT_CENTER: (f64, f64) = (-71.09415, 42.36027);
/// Web Mercator cuts off here to keep the world square
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Pixels(f64);

impl Pixels {
    pub fn new(val: f64) -> Self {
        Self(val)
    }
}

impl ops::Deref for Pixels {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Turns a geographic position (x longitude, y latitude) into a pixel position in the
/// current view. Closures work too, which is how a host with its own map can plug in.
pub trait Projection {
    fn project(&self, location: geo::Point<f64>) -> (Pixels, Pixels);
}

impl<F> Projection for F
where
    F: Fn(geo::Point<f64>) -> (Pixels, Pixels),
{
    fn project(&self, location: geo::Point<f64>) -> (Pixels, Pixels) {
        self(location)
    }
}

/// The visible part of a Web Mercator map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    center: geo::Point<f64>,
    zoom: f64,
    width: u32,
    height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(
            geo::Point::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            DEFAULT_ZOOM,
            1024,
            768,
        )
    }
}

impl Viewport {
    /// zoom is clamped to `MIN_ZOOM..=MAX_ZOOM`
    pub fn new(center: geo::Point<f64>, zoom: f64, width: u32, height: u32) -> Viewport {
        Viewport {
            center,
            zoom: clamp_zoom(zoom),
            width,
            height,
        }
    }

    pub fn center(&self) -> geo::Point<f64> {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn apply(&mut self, event: ViewportEvent) {
        match event {
            ViewportEvent::Move { center } => self.center = center,
            ViewportEvent::Zoom { zoom } => self.zoom = clamp_zoom(zoom),
            ViewportEvent::Resize { width, height } => {
                self.width = width;
                self.height = height;
            }
            ViewportEvent::MoveEnd => {}
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    /// Position on the whole world map at this zoom, origin at the top left
    fn world_pixels(&self, location: geo::Point<f64>) -> (f64, f64) {
        let size = self.world_size();
        let lat = location.y().max(-MAX_LATITUDE).min(MAX_LATITUDE);
        let sin = lat.to_radians().sin();
        let x = (location.x() + 180.) / 360. * size;
        let y = (0.5 - ((1. + sin) / (1. - sin)).ln() / (4. * PI)) * size;
        (x, y)
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        DEFAULT_ZOOM
    } else {
        zoom.max(MIN_ZOOM).min(MAX_ZOOM)
    }
}

impl Projection for Viewport {
    fn project(&self, location: geo::Point<f64>) -> (Pixels, Pixels) {
        let (x, y) = self.world_pixels(location);
        let (center_x, center_y) = self.world_pixels(self.center);
        (
            Pixels(x - center_x + f64::from(self.width) / 2.),
            Pixels(y - center_y + f64::from(self.height) / 2.),
        )
    }
}

/// What the user did to the map
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    Move { center: geo::Point<f64> },
    Zoom { zoom: f64 },
    Resize { width: u32, height: u32 },
    /// A pan or zoom gesture finished
    MoveEnd,
}

/// Owns the viewport and repaints after every change. Each listener is called once per event,
/// after the event has been applied.
pub struct ViewportNotifier<'l> {
    viewport: Viewport,
    listeners: Vec<Box<dyn FnMut(ViewportEvent, &Viewport) + 'l>>,
}

impl<'l> ViewportNotifier<'l> {
    pub fn new(viewport: Viewport) -> Self {
        ViewportNotifier {
            viewport,
            listeners: vec![],
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn on_change(&mut self, listener: impl FnMut(ViewportEvent, &Viewport) + 'l) {
        self.listeners.push(Box::new(listener));
    }

    pub fn notify(&mut self, event: ViewportEvent) {
        self.viewport.apply(event);
        tracing::trace!(?event, "viewport changed");
        for listener in self.listeners.iter_mut() {
            listener(event, &self.viewport);
        }
    }
}

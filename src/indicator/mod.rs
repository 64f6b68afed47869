// SPDX-License-Identifier: MPL-2.0
//! Visual description of the activity indicator.
//!
//! Nothing in here is interpreted by the presenter: a [`VisualParams`] is
//! handed to the renderer unchanged when the overlay is mounted. The one
//! exception is a frame-based indicator, whose frames are pushed by the
//! [`FrameSequencer`] while the overlay is mounted.

mod frames;
mod sequencer;

use crate::config::defaults;
use crate::domain::timing::FrameInterval;
use iced_core::{Color, Size};

pub use frames::{Frame, FrameSet, LOADER_ASSET_NAMES};
pub use sequencer::FrameSequencer;

/// Where the optional message sits relative to the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessagePlacement {
    /// Above the indicator.
    Above,
    /// Below the indicator.
    #[default]
    Below,
}

/// Layout of a frame-based indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Placement of the message label.
    pub message_placement: MessagePlacement,
    /// Draw frames in a square box sized by the indicator width.
    pub square: bool,
}

impl FrameLayout {
    /// Size of the box frames are drawn into.
    #[must_use]
    pub fn frame_size(&self, size: Size) -> Size {
        if self.square {
            Size::new(size.width, size.width)
        } else {
            size
        }
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            message_placement: MessagePlacement::Above,
            square: true,
        }
    }
}

/// Image-sequence animation played while the overlay is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimation {
    /// Frames in display order.
    pub frames: FrameSet,
    /// Time between two frames.
    pub interval: FrameInterval,
    /// Index of the first frame pushed by the sequencer.
    ///
    /// The frame at index 0 is the poster the renderer draws at mount time,
    /// so sequencing normally starts at 1.
    pub start_cursor: usize,
    /// Layout of the frames and the message.
    pub layout: FrameLayout,
}

impl FrameAnimation {
    /// Creates an animation with the default interval, start cursor and layout.
    #[must_use]
    pub fn new(frames: FrameSet) -> Self {
        Self {
            frames,
            interval: FrameInterval::default(),
            start_cursor: defaults::DEFAULT_FRAME_START_CURSOR,
            layout: FrameLayout::default(),
        }
    }

    /// Sets the frame interval.
    #[must_use]
    pub fn with_interval(mut self, interval: FrameInterval) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the first frame pushed by the sequencer.
    #[must_use]
    pub fn with_start_cursor(mut self, cursor: usize) -> Self {
        self.start_cursor = cursor;
        self
    }

    /// Sets the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Frame drawn as soon as the overlay is mounted.
    #[must_use]
    pub fn poster(&self) -> Option<&Frame> {
        self.frames.get(0)
    }
}

/// Kind of indicator drawn in the overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum IndicatorKind {
    /// Shape animation owned entirely by the renderer.
    #[default]
    Spinner,
    /// Image frames advanced by the [`FrameSequencer`].
    Frames(FrameAnimation),
}

impl IndicatorKind {
    /// Returns the frame animation, if this indicator is frame-based.
    #[must_use]
    pub fn animation(&self) -> Option<&FrameAnimation> {
        match self {
            IndicatorKind::Spinner => None,
            IndicatorKind::Frames(animation) => Some(animation),
        }
    }
}

/// Everything the renderer needs to draw the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualParams {
    /// Size of the indicator.
    pub size: Size,
    /// Indicator and message color.
    pub color: Color,
    /// Padding around the indicator.
    pub padding: f32,
    /// Message shown next to the indicator.
    pub message: Option<String>,
    /// Font size of the message.
    pub message_font_size: f32,
    /// Indicator kind.
    pub indicator: IndicatorKind,
    /// Whether a tap on the indicator force-closes the overlay.
    pub closeable: bool,
    /// Whether the backdrop swallows input to the content below.
    pub blocking_screen: bool,
    /// Backdrop color (alpha is taken from `background_alpha`).
    pub background_color: Color,
    /// Backdrop opacity.
    pub background_alpha: f32,
}

impl VisualParams {
    /// Backdrop color with the configured opacity applied.
    #[must_use]
    pub fn backdrop_color(&self) -> Color {
        Color {
            a: self.background_alpha.clamp(0.0, 1.0),
            ..self.background_color
        }
    }

    /// Returns the message only if there is something to display.
    #[must_use]
    pub fn visible_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    /// Where the message goes for this indicator.
    #[must_use]
    pub fn message_placement(&self) -> MessagePlacement {
        self.indicator
            .animation()
            .map_or(MessagePlacement::Below, |animation| {
                animation.layout.message_placement
            })
    }
}

impl Default for VisualParams {
    fn default() -> Self {
        Self {
            size: Size::new(defaults::DEFAULT_INDICATOR_SIZE, defaults::DEFAULT_INDICATOR_SIZE),
            color: Color::WHITE,
            padding: defaults::DEFAULT_PADDING,
            message: None,
            message_font_size: defaults::DEFAULT_MESSAGE_FONT_SIZE,
            indicator: IndicatorKind::default(),
            closeable: defaults::DEFAULT_CLOSEABLE,
            blocking_screen: defaults::DEFAULT_BLOCKING_SCREEN,
            background_color: Color::BLACK,
            background_alpha: defaults::DEFAULT_BACKGROUND_ALPHA,
        }
    }
}

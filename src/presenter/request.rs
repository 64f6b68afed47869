// SPDX-License-Identifier: MPL-2.0
//! Show requests.

use crate::domain::timing::{DisplayThreshold, MinimumDisplayTime};
use crate::indicator::{FrameAnimation, IndicatorKind, VisualParams};
use iced_core::{Color, Size};
use std::fmt;
use std::sync::Arc;

/// Callback run when the user force-closes the overlay.
pub type ForceCloseCallback = Arc<dyn Fn() + Send + Sync>;

/// One request to show the blocking overlay.
///
/// Immutable once built. The presenter holds it for one show/hide cycle and
/// drops it when it returns to idle.
#[derive(Clone, Default)]
pub struct PresentationRequest {
    display_threshold: DisplayThreshold,
    minimum_display_time: MinimumDisplayTime,
    visual: VisualParams,
    on_force_close: Option<ForceCloseCallback>,
}

impl PresentationRequest {
    /// Starts a request with default timing and visuals.
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Delay before the overlay is mounted.
    #[must_use]
    pub fn display_threshold(&self) -> DisplayThreshold {
        self.display_threshold
    }

    /// Minimum time the overlay stays mounted.
    #[must_use]
    pub fn minimum_display_time(&self) -> MinimumDisplayTime {
        self.minimum_display_time
    }

    /// Parameters handed to the renderer.
    #[must_use]
    pub fn visual(&self) -> &VisualParams {
        &self.visual
    }

    /// Returns whether a force-close callback is attached.
    #[must_use]
    pub fn has_force_close_callback(&self) -> bool {
        self.on_force_close.is_some()
    }

    pub(crate) fn notify_force_close(&self) {
        if let Some(callback) = &self.on_force_close {
            callback();
        }
    }
}

impl fmt::Debug for PresentationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationRequest")
            .field("display_threshold", &self.display_threshold)
            .field("minimum_display_time", &self.minimum_display_time)
            .field("visual", &self.visual)
            .field("on_force_close", &self.on_force_close.is_some())
            .finish()
    }
}

/// Builder for [`PresentationRequest`]. Omitted fields keep their defaults.
///
/// # Example
///
/// ```
/// use iced_blocker::presenter::PresentationRequest;
///
/// let request = PresentationRequest::builder()
///     .display_threshold_ms(500)
///     .minimum_display_time_ms(1000)
///     .message("Uploading")
///     .build();
///
/// assert_eq!(request.display_threshold().value(), 500);
/// assert_eq!(request.visual().visible_message(), Some("Uploading"));
/// ```
#[derive(Clone, Default)]
#[must_use]
pub struct RequestBuilder {
    request: PresentationRequest,
}

impl RequestBuilder {
    pub fn display_threshold(mut self, threshold: DisplayThreshold) -> Self {
        self.request.display_threshold = threshold;
        self
    }

    pub fn display_threshold_ms(self, millis: u32) -> Self {
        self.display_threshold(DisplayThreshold::new(millis))
    }

    pub fn minimum_display_time(mut self, minimum: MinimumDisplayTime) -> Self {
        self.request.minimum_display_time = minimum;
        self
    }

    pub fn minimum_display_time_ms(self, millis: u32) -> Self {
        self.minimum_display_time(MinimumDisplayTime::new(millis))
    }

    /// Replaces every visual parameter at once.
    pub fn visual(mut self, visual: VisualParams) -> Self {
        self.request.visual = visual;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.request.visual.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.request.visual.color = color;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.request.visual.padding = padding;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.request.visual.message = Some(message.into());
        self
    }

    pub fn message_font_size(mut self, size: f32) -> Self {
        self.request.visual.message_font_size = size;
        self
    }

    pub fn indicator(mut self, indicator: IndicatorKind) -> Self {
        self.request.visual.indicator = indicator;
        self
    }

    /// Uses a frame-based indicator.
    pub fn frames(self, animation: FrameAnimation) -> Self {
        self.indicator(IndicatorKind::Frames(animation))
    }

    pub fn closeable(mut self, closeable: bool) -> Self {
        self.request.visual.closeable = closeable;
        self
    }

    pub fn blocking_screen(mut self, blocking: bool) -> Self {
        self.request.visual.blocking_screen = blocking;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.request.visual.background_color = color;
        self
    }

    pub fn background_alpha(mut self, alpha: f32) -> Self {
        self.request.visual.background_alpha = alpha;
        self
    }

    /// Runs `callback` if the user force-closes the overlay.
    pub fn on_force_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.request.on_force_close = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> PresentationRequest {
        self.request
    }
}

//! A widget that shows one bitmap stretched to its rectangle.

use crate::css::stylesheet::StyleSet;
use crate::event::Event;
use crate::geometry::Rect;
use crate::image::{Image, ImageError, ImageSource, ImageUrl};
use crate::render::Surface;
use crate::widget::{Widget, WidgetBase};

pub struct ImageBox {
    base: WidgetBase,
    image: Option<Image>,
}

impl ImageBox {
    pub fn new(image: Option<Image>) -> Self {
        Self { base: WidgetBase::new(StyleSet::new()), image }
    }

    /// Load the bitmap at `url` through `source`.
    pub fn open(url: &str, source: &dyn ImageSource) -> Result<Self, ImageError> {
        let image = source.load(&ImageUrl::parse(url))?;
        Ok(Self::new(Some(image)))
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.base.set_rect(rect);
        self
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Image) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }
}

impl Widget for ImageBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&mut self, surface: &mut dyn Surface) {
        if let (Some(rect), Some(image)) = (self.base.rect(), &self.image) {
            surface.blit_image(image, rect, true);
        }
    }

    fn handle_events(&mut self, _events: &[Event]) {}
}

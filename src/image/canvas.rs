//! `imageproc` drawing targets for the owned rasters, so lines, markers and
//! text are drawn in place without converting frames to `image` buffers.
use super::traits::ImageView;
use super::{GrayImage, RgbFrame};
use image::Luma;
use imageproc::drawing::Canvas;

impl Canvas for GrayImage {
    type Pixel = Luma<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (ImageView::width(self) as u32, ImageView::height(self) as u32)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Luma<u8> {
        Luma([self.get(x as usize, y as usize)])
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Luma<u8>) {
        self.set(x as usize, y as usize, color.0[0]);
    }
}

impl Canvas for RgbFrame {
    type Pixel = image::Rgb<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (ImageView::width(self) as u32, ImageView::height(self) as u32)
    }

    fn get_pixel(&self, x: u32, y: u32) -> image::Rgb<u8> {
        image::Rgb(self.get(x as usize, y as usize))
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: image::Rgb<u8>) {
        self.set(x as usize, y as usize, color.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::draw_line_segment_mut;

    #[test]
    fn imageproc_draws_into_owned_rasters() {
        let mut mask = GrayImage::new(12, 6);
        draw_line_segment_mut(&mut mask, (0.0, 3.0), (20.0, 3.0), Luma([255]));
        assert_eq!(mask.count_nonzero(), 12);

        let mut frame = RgbFrame::filled(4, 4, [0, 0, 0]);
        frame.draw_pixel(1, 2, image::Rgb([7, 8, 9]));
        assert_eq!(frame.get(1, 2), [7, 8, 9]);
        assert_eq!(Canvas::dimensions(&frame), (4, 4));
    }
}

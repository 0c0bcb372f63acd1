/*

    Rasterize the overlay surface into an RGB image
    and save it as .png

    Rectangles are drawn as 1 pixel outlines in their stroke
    color, filled only when the fill is not transparent.
    Parts outside of the image are clipped.

    @date: Oct, 2025
    @author: Bartu
*/

use std::path::{Path, PathBuf};
use std::io::BufWriter;
use std::fs::File;

use crate::overlay::{Color, OverlayItem, OverlayRectangle};
use crate::prelude::*;


#[derive(Clone)]
pub struct ImageData {
    pixel_colors : Vec<Vector3>, // Vector of RGB per pixel
    width : usize,
    height: usize,
    name: String,
}


impl ImageData {

    pub fn new(width: usize, height: usize, name: String, pixel_colors: Vec<Vector3>) -> Self {
        debug_assert_eq!(pixel_colors.len(), width * height);
        ImageData {
            pixel_colors,
            width,
            height,
            name,
        }
    }

    pub fn new_from_background(resolution: [usize; 2], name: String, background: Vector3) -> Self {
        // Create a new image of specified background color
        // Set background to Vector3::ZERO for black background
        let (width, height) = (resolution[0], resolution[1]);
        let pixel_colors = vec![background; width * height];
        Self::new(width, height, name, pixel_colors)
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3> {
        if x < self.width && y < self.height {
            Some(self.pixel_colors[y * self.width + x])
        } else {
            None
        }
    }

    fn put_pixel(&mut self, x: Int, y: Int, color: &Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        // Straight alpha blend over what is already there
        let alpha = color.a as Float / 255.0;
        let idx = y * self.width + x;
        self.pixel_colors[idx] = color.to_vector3() * alpha + self.pixel_colors[idx] * (1.0 - alpha);
    }

    pub fn draw_rectangle(&mut self, rect: &OverlayRectangle) {
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.x.saturating_add(rect.width), rect.y.saturating_add(rect.height));
        // Only walk the part of the rectangle that can land in the image
        let (cx0, cx1) = (x0.max(0), x1.min(self.width as Int - 1));
        let (cy0, cy1) = (y0.max(0), y1.min(self.height as Int - 1));

        if !rect.fill.is_transparent() {
            for y in cy0..=cy1 {
                for x in cx0..=cx1 {
                    self.put_pixel(x, y, &rect.fill);
                }
            }
        }

        for x in cx0..=cx1 {
            self.put_pixel(x, y0, &rect.stroke);
            if y1 != y0 { self.put_pixel(x, y1, &rect.stroke); }
        }
        for y in cy0.max(y0.saturating_add(1))..=cy1.min(y1.saturating_sub(1)) {
            self.put_pixel(x0, y, &rect.stroke);
            if x1 != x0 { self.put_pixel(x1, y, &rect.stroke); }
        }
    }

    /// Draw items in order, later items on top
    pub fn draw_overlay(&mut self, items: &[OverlayItem]) {
        for item in items {
            self.draw_rectangle(&item.rectangle());
        }
    }

    pub fn flatten_color(self) -> Vec<Float> {
        // Return [R1, G1, B1, R2, G2, B2, ...] vector
        // where each triplet is RGB color of a pixel.
        self.pixel_colors.into_iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }

    /// Clamp colors and return a flattened array of R G B values per pixel
    pub fn to_rgb(self) -> Vec<u8> {
        self.flatten_color().into_iter().map(|x| x.clamp(0.0, 255.0).round() as u8).collect()
    }

    pub fn check_extension(&self, path: &Path, extension: &str) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(extension)
    }

    pub fn get_png_fullpath(&self, path: &str) -> PathBuf {
        // Check if provided path is a folder
        // if so, create a .png under this folder
        // otherwise use the provided path as is
        let extension = "png";
        let path = Path::new(path);
        let mut finalpath: PathBuf = path.to_path_buf();
        if path.is_dir() {
            // create <imagename>.png under this directory
            finalpath = path.join(self.name.clone());
        }

        if !self.check_extension(&finalpath, extension){
            finalpath.set_extension(extension);
            warn!(">> Extension changed to .{}, final path is {}", extension, finalpath.display());
        }
        finalpath
    }

    pub fn save_png(self, path: &str) -> Result<PathBuf, Box<dyn std::error::Error>>{
        // Path is either a folder name or
        // full path including <imagename>.png
        // If full path is not provided it will use
        // stored image name.
        //
        // DISCLAIMER: This function is based on https://docs.rs/png/0.18.0/png/
        let path: PathBuf = self.get_png_fullpath(path);

        let file = File::create(&path)?;
        let w = BufWriter::new(file);
        let mut encoder = png::Encoder::new(w, self.width as u32, self.height as u32);

        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        let data = self.to_rgb();
        writer.write_image_data(&data)?; // Save
        info!("Image saved to {}", path.display());
        Ok(path)
    }
}

//////////////////////////////////////////////////////////////////////
// drawing tilings with cairo

use std::fs::File;
use std::path::Path;

use crate::errors::*;
use crate::tiling::EuclideanTiling;
use crate::{Point2d, Vec2d, Vec3d};

// homogeneous coordinates smaller than this are points at infinity
const W_EPSILON: f64 = 1e-12;

pub const DEFAULT_EDGE_COLOR: u32 = 0x313E4A;
pub const DEFAULT_FACE_COLORS: [u32; 3] = [0x477984, 0xEEAA4D, 0xC03C44];

//////////////////////////////////////////////////////////////////////
// 24-bit 0xRRGGBB to components in [0, 1]

pub fn hex_to_rgb(value: u32) -> Vec3d {
    Vec3d::new(((value >> 16) & 255) as f64,
               ((value >> 8) & 255) as f64,
               (value & 255) as f64) / 255.0
}

//////////////////////////////////////////////////////////////////////
// (x, y, w) -> (x/w, y/w)

pub fn project_to_plane(v: &Vec3d) -> Result<Point2d> {

    if v.z.abs() < W_EPSILON {
        bail!(ErrorKind::Numeric(
            format!("can't project point at infinity {:?}", v)));
    }

    Ok(Point2d::new(v.x / v.z, v.y / v.z))

}

//////////////////////////////////////////////////////////////////////
// pull every vertex toward the centroid by margin, leaving a gap
// between neighboring tiles. a vertex closer to the centroid than
// margin stops at the centroid instead of passing through it.
//
// also returns how many vertices were clamped that way.

pub fn inset_corners_counted(points: &[Point2d], margin: f64) -> (Vec<Point2d>, usize) {

    if points.is_empty() {
        return (Vec::new(), 0);
    }

    let centroid = points.iter().fold(Vec2d::zeros(), |acc, p| acc + p.coords)
        / (points.len() as f64);

    let centroid = Point2d::from(centroid);

    let mut clamped = 0;

    let inset = points.iter().map(|p| {

        let v = p - centroid;
        let r = v.norm();

        if r == 0.0 {
            return *p;
        }

        let t = 1.0 - margin / r;

        if t < 0.0 {
            clamped += 1;
            centroid
        } else {
            centroid + t * v
        }

    }).collect();

    (inset, clamped)

}

pub fn inset_corners(points: &[Point2d], margin: f64) -> Vec<Point2d> {
    inset_corners_counted(points, margin).0
}

//////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: i32,
    pub height: i32,
    pub extent: f64,       // world units spanning the image height
    pub depth: usize,      // word length cutoff for the traversal
    pub line_width: f64,   // world units
    pub margin: f64,       // inset, world units
    pub edge_color: u32,
    pub face_colors: Option<Vec<u32>>, // None: stroke only
    pub background: u32,
}

impl Default for RenderSettings {

    fn default() -> Self {
        RenderSettings {
            width: 1200,
            height: 960,
            extent: 10.0,
            depth: 30,
            line_width: 0.2,
            margin: 0.3,
            edge_color: DEFAULT_EDGE_COLOR,
            face_colors: Some(DEFAULT_FACE_COLORS.to_vec()),
            background: 0x000000,
        }
    }

}

impl RenderSettings {

    pub fn validate(&self) -> Result<()> {

        let mut problems = Vec::new();

        if self.width <= 0 || self.height <= 0 {
            problems.push(format!("image size {}x{} must be positive", self.width, self.height));
        }

        if !(self.extent > 0.0) {
            problems.push(format!("extent {} must be positive", self.extent));
        }

        if !(self.line_width >= 0.0) {
            problems.push(format!("line width {} must be non-negative", self.line_width));
        }

        if !(self.margin >= 0.0) {
            problems.push(format!("margin {} must be non-negative", self.margin));
        }

        if !problems.is_empty() {
            bail!(ErrorKind::Configuration(problems.join(", ")));
        }

        Ok(())

    }

}

//////////////////////////////////////////////////////////////////////

trait CairoVecOps {

    fn setcolor(&self, v: &Vec3d);
    fn drawpoly(&self, poly: &[Point2d]);

}

impl CairoVecOps for cairo::Context {

    fn setcolor(&self, v: &Vec3d) {
        self.set_source_rgb(v[0], v[1], v[2]);
    }

    fn drawpoly(&self, poly: &[Point2d]) {
        for (i, p) in poly.iter().enumerate() {
            if i == 0 {
                self.move_to(p[0], p[1]);
            } else {
                self.line_to(p[0], p[1]);
            }
        }
        self.close_path();
    }

}

//////////////////////////////////////////////////////////////////////
// draw every tile of the tiling onto a new image surface.
//
// world origin lands at the image center; y points up, so the
// transform flips vertically.

pub fn render_to_surface(tiling: &EuclideanTiling,
                         settings: &RenderSettings) -> Result<(cairo::ImageSurface, usize)> {

    settings.validate()?;

    let faces = tiling.faces()?;

    if let Some(colors) = &settings.face_colors {
        if colors.len() < faces.len() {
            bail!(ErrorKind::Configuration(
                format!("{} face color(s) given for {} face(s)", colors.len(), faces.len())));
        }
    }

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32,
                                              settings.width,
                                              settings.height)?;

    let ctx = cairo::Context::new(&surface);

    ctx.setcolor(&hex_to_rgb(settings.background));
    ctx.paint();

    let scl = settings.height as f64 / settings.extent;

    ctx.translate(0.5 * settings.width as f64, 0.5 * settings.height as f64);
    ctx.scale(scl, -scl);

    ctx.set_line_width(settings.line_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let edge_color = hex_to_rgb(settings.edge_color);

    let mut count = 0;
    let mut clamped = 0;

    for (face_idx, record) in tiling.tiles(settings.depth)? {

        let shape = record.shape.iter()
            .map(project_to_plane)
            .collect::<Result<Vec<_>>>()?;

        let (shape, nclamped) = inset_corners_counted(&shape, settings.margin);
        clamped += nclamped;

        ctx.drawpoly(&shape);

        if let Some(colors) = &settings.face_colors {
            ctx.setcolor(&hex_to_rgb(colors[face_idx]));
            ctx.fill_preserve();
        }

        ctx.setcolor(&edge_color);
        ctx.stroke();

        count += 1;

    }

    if clamped > 0 {
        warn!("margin {} exceeds the size of some tiles, {} vertices clamped to centroids",
              settings.margin, clamped);
    }

    info!("drew {} tiles for {}", count, tiling.spec().cox_mat);

    drop(ctx);

    Ok((surface, count))

}

//////////////////////////////////////////////////////////////////////
// write a surface to disk. PNG goes straight through cairo, anything
// else is converted to an RgbImage and handed to the image crate.

fn is_png(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        None => true,
        Some(ext) => ext.eq_ignore_ascii_case("png"),
    }
}

pub fn write_surface(mut surface: cairo::ImageSurface, path: &Path) -> Result<()> {

    if is_png(path) {

        let mut file = File::create(path)
            .chain_err(|| format!("can't create {:}", path.display()))?;

        surface.write_to_png(&mut file)
            .map_err(|e| format!("writing {:}: {:?}", path.display(), e))?;

        return Ok(());

    }

    surface.flush();

    let width = surface.get_width() as u32;
    let height = surface.get_height() as u32;
    let stride = surface.get_stride() as usize;

    let data = surface.get_data()?;

    // surfaces here are opaque (background is painted first), so the
    // premultiplied ARGB words can be read off directly
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        let offset = (y as usize) * stride + 4 * (x as usize);
        let px = u32::from_ne_bytes([data[offset], data[offset + 1],
                                     data[offset + 2], data[offset + 3]]);
        image::Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    });

    img.save(path)?;

    Ok(())

}

// render + write, returns the number of tiles drawn
pub fn render(tiling: &EuclideanTiling,
              settings: &RenderSettings,
              path: &Path) -> Result<usize> {

    let (surface, count) = render_to_surface(tiling, settings)?;

    write_surface(surface, path)?;

    info!("wrote {:}", path.display());

    Ok(count)

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;
    use crate::tiling::TilingSpec;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_hex_to_rgb() {

        let c = hex_to_rgb(0x477984);

        assert_abs_diff_eq!(c, Vec3d::new(0x47 as f64, 0x79 as f64, 0x84 as f64) / 255.0,
                            epsilon = 1e-12);
        assert_abs_diff_eq!(c, Vec3d::new(0.278, 0.475, 0.518), epsilon = 1.0 / 255.0);

        assert_eq!(hex_to_rgb(0xFFFFFF), Vec3d::repeat(1.0));
        assert_eq!(hex_to_rgb(0), Vec3d::zeros());

    }

    #[test]
    fn test_project() {

        let p = project_to_plane(&Vec3d::new(2.0, -4.0, 2.0)).unwrap();
        assert_eq!(p, Point2d::new(1.0, -2.0));

        let err = project_to_plane(&Vec3d::new(1.0, 1.0, 0.0)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Numeric(_)));

    }

    #[test]
    fn test_inset_zero_is_identity() {

        let square = vec![Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0),
                          Point2d::new(2.0, 2.0), Point2d::new(0.0, 2.0)];

        let inset = inset_corners(&square, 0.0);

        for (a, b) in inset.iter().zip(&square) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }

        // fundamental faces of (3,3,3) with one active mirror: two triangles
        let tiling = EuclideanTiling::new(
            TilingSpec::from_symbol((3, 3, 3), [1.0, 0.0, 0.0]).unwrap()).unwrap();

        let seeds: Vec<_> = tiling.tiles(0).unwrap().collect();
        assert_eq!(seeds.len(), 2);

        for (idx, record) in &seeds {

            let face = &tiling.faces().unwrap()[*idx];
            assert_eq!(record.shape, face.points);

            let projected = record.shape.iter()
                .map(project_to_plane)
                .collect::<Result<Vec<_>>>()
                .unwrap();

            assert_eq!(projected.len(), 3);

            let inset = inset_corners(&projected, 0.0);

            for (a, v) in inset.iter().zip(&face.points) {
                assert_abs_diff_eq!(*a, Point2d::new(v.x / v.z, v.y / v.z), epsilon = 1e-12);
            }

        }

    }

    #[test]
    fn test_inset_clamps_at_centroid() {

        let tri = vec![Point2d::new(-1.0, 0.0), Point2d::new(1.0, 0.0), Point2d::new(0.0, 3.0)];

        // centroid is (0, 1); the base vertices are sqrt(2) away, the apex 2
        let (inset, clamped) = inset_corners_counted(&tri, 1.8);

        assert_eq!(clamped, 2);
        assert_abs_diff_eq!(inset[0], Point2d::new(0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(inset[2], Point2d::new(0.0, 1.2), epsilon = 1e-12);

    }

    #[test]
    fn test_settings_validation() {

        assert!(RenderSettings::default().validate().is_ok());

        let bad = RenderSettings { width: 0, margin: -1.0, ..Default::default() };
        let err = bad.validate().unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::Configuration(_)));
        assert!(err.to_string().contains("margin"));

    }

    #[test]
    fn test_too_few_colors() {

        let tiling = EuclideanTiling::new(
            TilingSpec::from_symbol((3, 3, 3), [1.0, 1.0, 0.0]).unwrap()).unwrap();

        let settings = RenderSettings {
            width: 16, height: 16, depth: 1,
            face_colors: Some(vec![0x477984]),
            ..Default::default()
        };

        let err = render_to_surface(&tiling, &settings).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Configuration(_)));

    }

    #[test]
    fn test_tile_count_matches_traversal() {

        let tiling = EuclideanTiling::new(
            TilingSpec::from_symbol((2, 3, 6), [1.0, 0.0, 1.0]).unwrap()).unwrap();

        let settings = RenderSettings { width: 32, height: 24, depth: 4, ..Default::default() };

        let (surface, count) = render_to_surface(&tiling, &settings).unwrap();

        assert_eq!(count, tiling.tiles(4).unwrap().count());
        assert_eq!(surface.get_width(), 32);
        assert_eq!(surface.get_height(), 24);

    }

    proptest! {
        #[test]
        fn proptest_inset_moves_by_margin(
            n in 3usize..10, radius in 1.0f64..10.0, frac in 0.0f64..0.99,
        ) {
            // regular polygon centered at (3, -2)
            let center = Vec2d::new(3.0, -2.0);
            let poly: Vec<Point2d> = (0..n).map(|k| {
                let theta = 2.0 * crate::PI * (k as f64) / (n as f64);
                Point2d::from(center + radius * Vec2d::new(theta.cos(), theta.sin()))
            }).collect();

            let margin = frac * radius;
            let (inset, clamped) = inset_corners_counted(&poly, margin);

            prop_assert_eq!(clamped, 0);
            for (a, b) in inset.iter().zip(&poly) {
                prop_assert!(((a - b).norm() - margin).abs() < 1e-9);
                prop_assert!(((a.coords - center).norm() - (radius - margin)).abs() < 1e-9);
            }
        }
    }

}

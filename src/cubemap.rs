use std::path::Path;

use strum::{EnumIter, IntoEnumIterator};

use crate::math::Vec3;

/// The six cubemap faces, named from a viewer at the cube center.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter)]
pub enum CubeFace {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl CubeFace {
    /// Returns the file stem the face is loaded from.
    pub fn file_stem(self) -> &'static str {
        match self {
            CubeFace::Right => "right",
            CubeFace::Left => "left",
            CubeFace::Top => "top",
            CubeFace::Bottom => "bottom",
            CubeFace::Front => "front",
            CubeFace::Back => "back",
        }
    }
}

/// Environment light stored as six equally sized 8-bit RGB images, sampled
/// by direction.
pub struct Cubemap {
    faces: [Vec<u8>; 6],
    width: usize,
    height: usize,
    channels: usize,
}

impl Cubemap {
    /// Loads `{right,left,top,bottom,front,back}.jpg` from `dir`.
    ///
    /// All six faces have to decode to the same dimensions.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let mut faces: [Vec<u8>; 6] = Default::default();
        let mut dims = None;
        for face in CubeFace::iter() {
            let path = dir.join(format!("{}.jpg", face.file_stem()));
            let img = image::open(&path)
                .map_err(|why| format!("Couldn't load image '{}': {:?}", path.display(), why))?
                .to_rgb8();
            let (w, h) = img.dimensions();
            match dims {
                None => dims = Some((w, h)),
                Some(d) if d != (w, h) => {
                    return Err(format!(
                        "Face '{}' is {}x{}, expected {}x{}",
                        path.display(),
                        w,
                        h,
                        d.0,
                        d.1
                    ));
                }
                Some(_) => (),
            }
            faces[face as usize] = img.into_raw();
        }

        let (width, height) = dims.unwrap();
        Ok(Self {
            faces,
            width: width as usize,
            height: height as usize,
            channels: 3,
        })
    }

    /// Wraps already decoded face buffers, indexed by [CubeFace].
    pub fn from_raw(faces: [Vec<u8>; 6], width: usize, height: usize, channels: usize) -> Self {
        debug_assert!(channels >= 3);
        debug_assert!(faces.iter().all(|f| f.len() == width * height * channels));
        Self {
            faces,
            width,
            height,
            channels,
        }
    }

    /// Returns the face resolution as (width, height).
    pub fn face_res(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Samples the environment color along `dir`, linearized to [0, 1].
    ///
    /// The dominant component of `dir` picks the face, the remaining two map
    /// to a nearest-pixel texel on it.
    pub fn sample(&self, dir: Vec3) -> Vec3 {
        let abs_x = dir.x.abs();
        let abs_y = dir.y.abs();
        let abs_z = dir.z.abs();

        let (face, u, v) = if abs_x > abs_y && abs_x > abs_z {
            if dir.x > 0.0 {
                (CubeFace::Right, -dir.z / abs_x, -dir.y / abs_x)
            } else {
                (CubeFace::Left, dir.z / abs_x, -dir.y / abs_x)
            }
        } else if abs_y > abs_x && abs_y > abs_z {
            if dir.y > 0.0 {
                (CubeFace::Top, dir.x / abs_y, dir.z / abs_y)
            } else {
                (CubeFace::Bottom, dir.x / abs_y, -dir.z / abs_y)
            }
        } else if dir.z > 0.0 {
            (CubeFace::Front, dir.x / abs_z, -dir.y / abs_z)
        } else {
            (CubeFace::Back, -dir.x / abs_z, -dir.y / abs_z)
        };

        let u = 0.5 * (u.clamp(-1.0, 1.0) + 1.0);
        let v = 0.5 * (v.clamp(-1.0, 1.0) + 1.0);

        let x = (u * (self.width - 1) as f32) as usize;
        let y = (v * (self.height - 1) as f32) as usize;

        let offset = (y * self.width + x) * self.channels;
        let texel = &self.faces[face as usize][offset..offset + 3];
        Vec3::new(
            f32::from(texel[0]) / 255.0,
            f32::from(texel[1]) / 255.0,
            f32::from(texel[2]) / 255.0,
        )
    }
}

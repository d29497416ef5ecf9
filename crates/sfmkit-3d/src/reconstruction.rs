use std::collections::{BTreeMap, HashMap};

use crate::io::colmap::{ColmapCamera, ColmapImage};

/// A structure-from-motion reconstruction: cameras and the images observed by them.
///
/// Images are kept ordered by id so that every pass over the reconstruction
/// visits them in the same order.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    /// Cameras indexed by camera id.
    pub cameras: HashMap<u32, ColmapCamera>,
    /// Images indexed by image id, in ascending id order.
    pub images: BTreeMap<u32, ColmapImage>,
}

impl Reconstruction {
    /// Index cameras and images by their ids.
    ///
    /// When an id appears more than once the last record wins.
    pub fn new(
        cameras: impl IntoIterator<Item = ColmapCamera>,
        images: impl IntoIterator<Item = ColmapImage>,
    ) -> Self {
        Self {
            cameras: cameras.into_iter().map(|c| (c.camera_id, c)).collect(),
            images: images.into_iter().map(|i| (i.image_id, i)).collect(),
        }
    }

    /// The camera that captured `image`, if it is part of the reconstruction.
    pub fn camera_for(&self, image: &ColmapImage) -> Option<&ColmapCamera> {
        self.cameras.get(&image.camera_id)
    }

    /// Number of cameras.
    pub fn num_cameras(&self) -> usize {
        self.cameras.len()
    }

    /// Number of images.
    pub fn num_images(&self) -> usize {
        self.images.len()
    }
}

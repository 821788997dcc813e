// badgetrim/src/processors/fill.rs
use super::classifier::BackgroundClassifier;
use crate::core::{BackgroundMask, PixelGrid};
use std::collections::VecDeque;

/// Breadth-first fill seeded from the image border.
///
/// Every edge pixel accepted by `seed` starts the fill; expansion then walks
/// 4-connected neighbours accepted by `expand`. Pixels are marked visited when
/// pushed so nothing is queued twice. Background-colored regions that never
/// touch the border stay unmarked.
pub fn flood_fill<S, E>(grid: &PixelGrid, seed: &S, expand: &E) -> BackgroundMask
where
    S: BackgroundClassifier + ?Sized,
    E: BackgroundClassifier + ?Sized,
{
    let image = grid.as_image();
    let (width, height) = image.dimensions();
    let mut mask = BackgroundMask::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let w = width as usize;
    let mut visited = vec![false; w * height as usize];
    let mut queue = VecDeque::new();

    let mut try_seed = |x: u32, y: u32, queue: &mut VecDeque<(u32, u32)>| {
        let idx = y as usize * w + x as usize;
        if !visited[idx] && seed.is_background(image.get_pixel(x, y)) {
            visited[idx] = true;
            queue.push_back((x, y));
        }
    };

    for x in 0..width {
        try_seed(x, 0, &mut queue);
        try_seed(x, height - 1, &mut queue);
    }
    for y in 0..height {
        try_seed(0, y, &mut queue);
        try_seed(width - 1, y, &mut queue);
    }

    let seeded = queue.len();

    while let Some((x, y)) = queue.pop_front() {
        mask.mark(x, y);

        let neighbours = [
            (x.checked_add(1), Some(y)),
            (x.checked_sub(1), Some(y)),
            (Some(x), y.checked_add(1)),
            (Some(x), y.checked_sub(1)),
        ];

        for (nx, ny) in neighbours {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            if nx >= width || ny >= height {
                continue;
            }

            let idx = ny as usize * w + nx as usize;
            if visited[idx] || !expand.is_background(image.get_pixel(nx, ny)) {
                continue;
            }

            visited[idx] = true;
            queue.push_back((nx, ny));
        }
    }

    log::debug!(
        "Flood fill over {}x{}: {} border seeds, {} background pixels",
        width,
        height,
        seeded,
        mask.count()
    );

    mask
}

/// Border-connected region under a single classifier.
pub fn border_connected<C>(grid: &PixelGrid, classifier: &C) -> BackgroundMask
where
    C: BackgroundClassifier + ?Sized,
{
    flood_fill(grid, classifier, classifier)
}

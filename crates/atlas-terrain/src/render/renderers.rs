//! Renderers that turn fields and classified grids into images or text.

use super::image::MapImage;
use crate::classify::{CategoryId, CategoryRegistry};
use crate::grid::{ClassifiedGrid, NoiseField};

/// Color for categories missing from the registry.
pub const UNKNOWN_CATEGORY_COLOR: (u8, u8, u8) = (255, 0, 255);

/// Glyph for categories missing from the registry.
pub const UNKNOWN_CATEGORY_GLYPH: char = '?';

/// Paint one opaque pixel per cell using `color_of` for each category.
pub fn render_classified<C, F>(grid: &ClassifiedGrid<C>, mut color_of: F) -> MapImage
where
    C: Copy,
    F: FnMut(C) -> (u8, u8, u8),
{
    let (width, height) = grid.dimensions();
    let mut image = MapImage::new(width, height);
    for (y, row) in grid.rows().enumerate() {
        for (x, &category) in row.iter().enumerate() {
            let (r, g, b) = color_of(category);
            image.set_pixel(x as u32, y as u32, r, g, b, 255);
        }
    }
    image
}

/// Paint a registry-backed grid with each category's configured color.
pub fn render_with_registry(
    grid: &ClassifiedGrid<CategoryId>,
    registry: &CategoryRegistry,
) -> MapImage {
    render_classified(grid, |id| category_color(id, registry))
}

/// Return the RGB color of `id`, or [`UNKNOWN_CATEGORY_COLOR`].
pub fn category_color(id: CategoryId, registry: &CategoryRegistry) -> (u8, u8, u8) {
    registry
        .get(id)
        .map_or(UNKNOWN_CATEGORY_COLOR, |def| def.color)
}

/// Map a normalized value to a gray level (0 = black, 1 = white).
pub fn value_to_gray(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Grayscale view of a noise field.
pub fn render_noise_grayscale(field: &NoiseField) -> MapImage {
    let (width, height) = field.dimensions();
    let mut image = MapImage::new(width, height);
    for (y, row) in field.rows().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            let v = value_to_gray(value);
            image.set_pixel(x as u32, y as u32, v, v, v, 255);
        }
    }
    image
}

/// One line of glyphs per grid row, rows separated by `\n`.
pub fn render_glyphs(grid: &ClassifiedGrid<CategoryId>, registry: &CategoryRegistry) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|&id| {
            registry
                .get(id)
                .map_or(UNKNOWN_CATEGORY_GLYPH, |def| def.glyph)
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CategoryDef;
    use crate::grid::Grid;

    fn registry() -> (CategoryRegistry, CategoryId, CategoryId) {
        let mut reg = CategoryRegistry::new();
        let water = reg
            .register(CategoryDef::new("water", (20, 50, 180), '~'))
            .unwrap();
        let land = reg
            .register(CategoryDef::new("land", (100, 180, 60), '.'))
            .unwrap();
        (reg, water, land)
    }

    #[test]
    fn test_render_with_registry_uses_category_colors() {
        let (reg, water, land) = registry();
        let grid = Grid::from_cells(2, 1, vec![water, land]);
        let image = render_with_registry(&grid, &reg);
        assert_eq!(image.get_pixel(0, 0), (20, 50, 180, 255));
        assert_eq!(image.get_pixel(1, 0), (100, 180, 60, 255));
        assert_eq!(image.unique_color_count(), 2);
    }

    #[test]
    fn test_unknown_category_is_magenta() {
        let (reg, _, _) = registry();
        let grid = Grid::from_cells(1, 1, vec![CategoryId(42)]);
        let image = render_with_registry(&grid, &reg);
        let (r, g, b, _) = image.get_pixel(0, 0);
        assert_eq!((r, g, b), UNKNOWN_CATEGORY_COLOR);
    }

    #[test]
    fn test_grayscale_extremes() {
        let field = Grid::from_cells(3, 1, vec![0.0, 0.5, 1.0]);
        let image = render_noise_grayscale(&field);
        assert_eq!(image.get_pixel(0, 0), (0, 0, 0, 255));
        assert_eq!(image.get_pixel(1, 0), (128, 128, 128, 255));
        assert_eq!(image.get_pixel(2, 0), (255, 255, 255, 255));
    }

    #[test]
    fn test_render_glyphs_rows() {
        let (reg, water, land) = registry();
        let grid = Grid::from_cells(3, 2, vec![water, land, land, land, water, CategoryId(9)]);
        assert_eq!(render_glyphs(&grid, &reg), "~..\n.~?");
    }

    #[test]
    fn test_render_classified_with_closure() {
        let grid = Grid::from_cells(2, 2, vec![true, false, false, true]);
        let image = render_classified(&grid, |land| if land { (0, 255, 0) } else { (0, 0, 255) });
        assert_eq!(image.get_pixel(1, 1), (0, 255, 0, 255));
        assert_eq!(image.get_pixel(0, 1), (0, 0, 255, 255));
    }
}

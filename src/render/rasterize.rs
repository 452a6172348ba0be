use crate::models::{BLACK, ModuleMatrix, PixelBuffer, WHITE};

/// One pixel per module, at the matrix's own size
pub fn rasterize(matrix: &ModuleMatrix) -> PixelBuffer {
    let (width, height) = (matrix.width(), matrix.height());
    let mut buffer = PixelBuffer::new(width, height, WHITE);
    for y in 0..height {
        for x in 0..width {
            if matrix.get(x, y) {
                buffer.set(x, y, BLACK);
            }
        }
    }
    buffer
}

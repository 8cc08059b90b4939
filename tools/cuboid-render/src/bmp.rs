// BMP output (32-bit BGRA, top-down).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use isocuboid::Surface;

/// Save a surface as a 32-bit top-down BMP file.
pub fn save_bmp(path: &Path, surface: &Surface) -> io::Result<()> {
    let w = surface.width();
    let h = surface.height();
    let row_size = w * 4;
    let image_size = row_size * h;
    let file_size = 14 + 40 + image_size;

    let mut f = BufWriter::new(File::create(path)?);

    // BMP file header (14 bytes)
    f.write_all(b"BM")?;
    f.write_all(&file_size.to_le_bytes())?;
    f.write_all(&[0u8; 4])?; // reserved
    f.write_all(&(14u32 + 40).to_le_bytes())?; // pixel data offset

    // BITMAPINFOHEADER (40 bytes)
    f.write_all(&40u32.to_le_bytes())?;
    f.write_all(&w.to_le_bytes())?;
    f.write_all(&(-(h as i32)).to_le_bytes())?; // negative height = top-down
    f.write_all(&1u16.to_le_bytes())?; // planes
    f.write_all(&32u16.to_le_bytes())?; // bits per pixel
    f.write_all(&0u32.to_le_bytes())?; // BI_RGB
    f.write_all(&image_size.to_le_bytes())?;
    f.write_all(&[0u8; 8])?; // resolution
    f.write_all(&0u32.to_le_bytes())?; // colors used
    f.write_all(&0u32.to_le_bytes())?; // important colors

    let mut row = vec![0u8; row_size as usize];
    for y in 0..h {
        for (dst, p) in row.chunks_exact_mut(4).zip(surface.row(y)) {
            dst.copy_from_slice(&[p.b, p.g, p.r, p.a]);
        }
        f.write_all(&row)?;
    }
    f.flush()
}

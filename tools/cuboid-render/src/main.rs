// Preview renderer for the isometric cuboid overlay.
//
// Usage:
//   cuboid-render [options] -o <output.bmp>
//   cuboid-render [options] --print-config

mod bmp;
mod logging;

use std::error::Error;
use std::path::Path;
use std::process;
use std::thread;

use isocuboid::{
    CancelToken, ColorRgb, CuboidConfig, FillStyle, IsometricCuboidEffect, LabelFace,
    PositionOffset, RectI, Rgba8, Shape, Surface, SurfaceMut,
};

const CHECKER_SIZE: u32 = 8;

struct Options {
    config: CuboidConfig,
    width: u32,
    height: u32,
    selection: Option<RectI>,
    checker: bool,
    threads: usize,
    font: Option<String>,
    output: Option<String>,
    print_config: bool,
}

fn main() {
    logging::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if opts.print_config {
        match serde_json::to_string_pretty(&opts.config.sanitized()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let Some(output) = opts.output.clone() else {
        eprintln!("error: missing -o <output.bmp>");
        eprintln!();
        print_usage();
        process::exit(1);
    };

    if let Err(e) = run(&opts, Path::new(&output)) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("cuboid-render - render the isometric cuboid overlay to a BMP file");
    eprintln!();
    eprintln!("Usage: cuboid-render [options] -o <output.bmp>");
    eprintln!("       cuboid-render [options] --print-config");
    eprintln!();
    eprintln!("Image:");
    eprintln!("  --size WxH              image size (default 400x400)");
    eprintln!("  --selection x,y,w,h     selection rectangle (default: whole image)");
    eprintln!("  --checker               checkerboard source instead of white");
    eprintln!("  --threads N             compositing threads (default: available cores)");
    eprintln!("  --font <file.ttf>       TrueType face for labels (feature \"font\")");
    eprintln!();
    eprintln!("Configuration (applied over --config <file.json>):");
    eprintln!("  --height N  --left N  --right N");
    eprintln!("  --shape cuboid|pyramid");
    eprintln!("  --fill none|solid|shaded   --fill-color RRGGBB");
    eprintln!("  --edge-width N             --edge-color RRGGBB");
    eprintln!("  --hidden                   draw hidden edges dotted");
    eprintln!("  --dimensions               draw dimension lines and labels");
    eprintln!("  --offset dx,dy             position offset in [-1, 1]");
    eprintln!("  --aliased                  disable anti-aliasing");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options {
        config: CuboidConfig::default(),
        width: 400,
        height: 400,
        selection: None,
        checker: false,
        threads: thread::available_parallelism().map_or(1, |n| n.get()),
        font: None,
        output: None,
        print_config: false,
    };

    // The config file is the base every flag overrides, wherever it appears.
    if let Some(i) = args.iter().position(|a| a == "--config") {
        let path = args.get(i + 1).ok_or("--config needs a file")?;
        let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
        opts.config = serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))?;
    }

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--config" => {
                next_value(args, &mut i, flag)?;
            }
            "-o" => opts.output = Some(next_value(args, &mut i, flag)?.to_string()),
            "--print-config" => opts.print_config = true,
            "--size" => {
                let (w, h) = parse_size(next_value(args, &mut i, flag)?)?;
                opts.width = w;
                opts.height = h;
            }
            "--selection" => opts.selection = Some(parse_rect(next_value(args, &mut i, flag)?)?),
            "--checker" => opts.checker = true,
            "--threads" => opts.threads = parse_num::<usize>(flag, next_value(args, &mut i, flag)?)?.max(1),
            "--font" => opts.font = Some(next_value(args, &mut i, flag)?.to_string()),
            "--height" => opts.config.height = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--left" => opts.config.left_depth = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--right" => opts.config.right_depth = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--shape" => {
                opts.config.shape = match next_value(args, &mut i, flag)? {
                    "cuboid" => Shape::Cuboid,
                    "pyramid" => Shape::Pyramid,
                    other => return Err(format!("unknown shape: {other}")),
                }
            }
            "--fill" => {
                opts.config.fill_style = match next_value(args, &mut i, flag)? {
                    "none" => FillStyle::None,
                    "solid" => FillStyle::Solid,
                    "shaded" => FillStyle::Shaded,
                    other => return Err(format!("unknown fill style: {other}")),
                }
            }
            "--fill-color" => opts.config.fill_color = parse_color(next_value(args, &mut i, flag)?)?,
            "--edge-width" => opts.config.edge_width = parse_num(flag, next_value(args, &mut i, flag)?)?,
            "--edge-color" => opts.config.edge_color = parse_color(next_value(args, &mut i, flag)?)?,
            "--hidden" => opts.config.draw_hidden_edges = true,
            "--dimensions" => opts.config.draw_footprint_dimensions = true,
            "--offset" => {
                let parts = parse_list::<f64>(flag, next_value(args, &mut i, flag)?)?;
                let [dx, dy] = parts[..] else {
                    return Err("--offset needs dx,dy".into());
                };
                opts.config.position_offset = PositionOffset::new(dx, dy);
            }
            "--aliased" => opts.config.anti_alias = false,
            other => return Err(format!("unknown option: {other}")),
        }
        i += 1;
    }
    Ok(opts)
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_num<T: std::str::FromStr>(flag: &str, s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("invalid value for {flag}: {s}"))
}

fn parse_list<T: std::str::FromStr>(flag: &str, s: &str) -> Result<Vec<T>, String> {
    s.split(',').map(|p| parse_num(flag, p.trim())).collect()
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("invalid size: {s}"))?;
    Ok((parse_num("--size", w)?, parse_num("--size", h)?))
}

fn parse_rect(s: &str) -> Result<RectI, String> {
    let parts = parse_list::<i32>("--selection", s)?;
    let [x, y, w, h] = parts[..] else {
        return Err("--selection needs x,y,w,h".into());
    };
    if w < 0 || h < 0 {
        return Err(format!("invalid selection: {s}"));
    }
    Ok(RectI::from_xywh(x, y, w as u32, h as u32))
}

fn parse_color(s: &str) -> Result<ColorRgb, String> {
    let hex = s.trim_start_matches('#');
    let v = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid color: {s}"))?;
    if hex.len() != 6 {
        return Err(format!("invalid color: {s}"));
    }
    Ok(ColorRgb::from_opaque_int(v))
}

fn source_surface(width: u32, height: u32, checker: bool) -> Surface {
    let white = Rgba8::new_opaque(255, 255, 255);
    let mut s = Surface::filled(width, height, white);
    if checker {
        let gray = Rgba8::new_opaque(204, 204, 204);
        for y in 0..height {
            for x in 0..width {
                if ((x / CHECKER_SIZE) + (y / CHECKER_SIZE)) % 2 == 1 {
                    s.set(x as i32, y as i32, gray);
                }
            }
        }
    }
    s
}

#[cfg(feature = "font")]
fn label_face(font: Option<&str>) -> Result<LabelFace, Box<dyn Error>> {
    match font {
        Some(path) => Ok(LabelFace::from_font_data(std::fs::read(path)?, 0)?),
        None => Ok(LabelFace::default()),
    }
}

#[cfg(not(feature = "font"))]
fn label_face(font: Option<&str>) -> Result<LabelFace, Box<dyn Error>> {
    match font {
        Some(path) => Err(format!("{path}: TrueType labels need the \"font\" feature").into()),
        None => Ok(LabelFace::default()),
    }
}

fn run(opts: &Options, output: &Path) -> Result<(), Box<dyn Error>> {
    let selection = opts
        .selection
        .unwrap_or_else(|| RectI::from_xywh(0, 0, opts.width, opts.height));
    let effect = IsometricCuboidEffect::with_label_face(selection, label_face(opts.font.as_deref())?);
    effect.set_render_info(&opts.config);

    let src = source_surface(opts.width, opts.height, opts.checker);
    let mut dst = Surface::new(opts.width, opts.height);
    let cancel = CancelToken::new();

    let threads = opts.threads as u32;
    let rows_per_band = ((opts.height + threads - 1) / threads).max(1);
    let bands = dst.bands_mut(rows_per_band);
    log::info!(
        "rendering {}x{} in {} bands, selection ({}, {}) {}x{}",
        opts.width,
        opts.height,
        bands.len(),
        selection.x1,
        selection.y1,
        selection.width(),
        selection.height()
    );

    thread::scope(|scope| -> Result<(), Box<dyn Error>> {
        let workers: Vec<_> = bands
            .into_iter()
            .map(|mut band| {
                let (effect, src, cancel) = (&effect, &src, &cancel);
                scope.spawn(move || {
                    let rect = band.bounds();
                    effect.render_tile(src, &mut band, rect, cancel)
                })
            })
            .collect();
        for worker in workers {
            worker
                .join()
                .map_err(|_| "compositing thread panicked")??;
        }
        Ok(())
    })?;

    bmp::save_bmp(output, &dst)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_flags_override_defaults() {
        let opts = parse_args(&args(
            "--size 300x200 --shape pyramid --fill shaded --fill-color c86432 --offset 0.5,-0.25 --aliased -o out.bmp",
        ))
        .unwrap();
        assert_eq!((opts.width, opts.height), (300, 200));
        assert_eq!(opts.config.shape, Shape::Pyramid);
        assert_eq!(opts.config.fill_style, FillStyle::Shaded);
        assert_eq!(opts.config.fill_color, ColorRgb::new(200, 100, 50));
        assert_eq!(opts.config.position_offset, PositionOffset::new(0.5, -0.25));
        assert!(!opts.config.anti_alias);
        assert_eq!(opts.output.as_deref(), Some("out.bmp"));
    }

    #[test]
    fn test_selection_and_errors() {
        let opts = parse_args(&args("--selection 10,20,30,40")).unwrap();
        assert_eq!(opts.selection, Some(RectI::new(10, 20, 40, 60)));
        assert!(parse_args(&args("--shape sphere")).is_err());
        assert!(parse_args(&args("--height")).is_err());
        assert!(parse_args(&args("--offset 1")).is_err());
        assert!(parse_args(&args("--bogus")).is_err());
        assert!(parse_color("12345").is_err());
    }
}

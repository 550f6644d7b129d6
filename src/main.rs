mod wanderer;

use std::{env, time::Instant};
use anyhow::{Context, Result};
use render::{debug_font, file::Save, Affine, Bitmap, Color, FontBitmaps, Surface, V2f, V2i};
use scene::{overlay::DEBUG_TINT, Layer, Overlay, SceneConfig, Screen};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;
use wanderer::Wanderer;

const DEFAULT_OUTPUT: &str = "frame.png";
const DEFAULT_FRAMES: u32 = 240;
const SHAKE_FRAME: u32 = 60;
const CHECKER_SIZE: i32 = 20;
const FONT_HEIGHT: i32 = 16;
const HUD_BACKDROP: Color = Color::argb8(160, 0, 0, 0);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => SceneConfig::load(&path).with_context(|| format!("loading config from {}", path))?,
        None => SceneConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_owned());
    let frames: u32 = match args.next() {
        Some(n) => n.parse().with_context(|| format!("frame count {:?} is not a number", n))?,
        None => DEFAULT_FRAMES,
    };
    let font = match args.next() {
        Some(path) => Some(FontBitmaps::new(&path, FONT_HEIGHT).with_context(|| format!("loading font {}", path))?),
        None => None,
    };

    let mut screen: Screen<Bitmap> = Screen::from_config(&config)?;
    let mut overlay: Overlay<Bitmap> = Overlay::from_config(&config)?;
    let view = V2i::from(config.view);
    let mut target = Bitmap::with_dimensions(view.x, view.y);

    let world = V2f::from(config.world);
    let background = checkerboard(config.world.into());
    let mut wanderer = Wanderer::new(config.focus.into(), V2f::new(97.0, 61.0), world);
    let dt = 1.0 / config.shake.frame_rate;
    if config.screen.debug {
        screen.set_pointer(Some(V2f::from(view) * 0.5));
    }

    let started = Instant::now();
    for frame in 0..frames {
        let frame_started = Instant::now();

        wanderer.update(dt);
        if let Some(viewport) = screen.viewport_mut() {
            viewport.follow(&wanderer);
        }
        if frame == SHAKE_FRAME {
            screen.shake();
        }
        screen.update();

        screen.fill(Color::BLACK);
        screen.draw_world_image(&background, &Affine::IDENTITY);
        wanderer.draw(&mut screen);

        overlay.fill(if overlay.is_debug() { DEBUG_TINT } else { Color::TRANSPARENT });
        let mut hud = format!("frame {}", frame);
        if let Some(viewport) = screen.viewport() {
            hud.push('\n');
            hud.push_str(&viewport.to_string());
        }
        let hud_size = V2f::from(debug_font::measure(&hud) + V2i::diag(2));
        overlay.draw_rect(V2f::ZERO, hud_size, true, HUD_BACKDROP);
        overlay.debug_print_at(&hud, V2i::new(1, 1));
        if let Some(font) = &font {
            let p = view - V2i::new(font.width("scene"), font.height()) - V2i::diag(2);
            overlay.draw_text("scene", font, p, Color::YELLOW);
        }

        target.fill(Color::BLACK);
        let layers: [&mut dyn Layer<Bitmap>; 2] = [&mut screen, &mut overlay];
        for layer in layers {
            layer.render(&mut target);
        }

        trace!(frame, %wanderer, elapsed_us = frame_started.elapsed().as_micros() as u64, "frame done");
    }

    let elapsed = started.elapsed();
    info!(
        frames,
        total_ms = elapsed.as_secs_f64() * 1000.0,
        avg_ms = elapsed.as_secs_f64() * 1000.0 / f64::from(frames.max(1)),
        "rendered",
    );

    target.save(&output).with_context(|| format!("writing {}", output))?;
    info!(path = %output, "last frame written");
    Ok(())
}

/// World-sized backdrop so scrolling is visible.
fn checkerboard(size: V2i) -> Bitmap {
    let mut bmp = Bitmap::with_dimensions(size.x, size.y);
    for y in 0..size.y {
        for x in 0..size.x {
            let dark = (x / CHECKER_SIZE + y / CHECKER_SIZE) % 2 == 0;
            bmp[(x, y)] = if dark { Color::GREY } else { Color::BLACK }.into();
        }
    }
    let border = V2f::from(size);
    bmp.draw_rect(V2f::ZERO, border, false, Color::PURPLE);
    debug!(size = %size, "checkerboard built");
    bmp
}

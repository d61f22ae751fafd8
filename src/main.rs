//! mojogen: translate SDL3 C headers into Mojo binding modules.
//!
//! Each header is fetched (or read locally), scanned once for recognizable
//! declarations, and written out as one Mojo module; an aggregate
//! `__init__.mojo` re-exports everything and carries the shared library
//! bootstrap. Translation is intentionally partial: anything outside the
//! supported declaration shapes is skipped silently.

mod doc;
mod fetch;
mod ident;
mod prelude;
mod recognize;
mod special;
mod translate;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

const DEFAULT_REPO: &str =
    "https://raw.githubusercontent.com/libsdl-org/SDL/refs/heads/release-3.2.x/include/SDL3/";

/// Headers translated by default, in output order.
const INCLUDES: &[&str] = &[
    "SDL_audio.h",
    "SDL_blendmode.h",
    "SDL_camera.h",
    "SDL_clipboard.h",
    "SDL_error.h",
    "SDL_events.h",
    "SDL_filesystem.h",
    "SDL_gamepad.h",
    "SDL_gpu.h",
    "SDL_guid.h",
    "SDL_haptic.h",
    "SDL_hints.h",
    "SDL_init.h",
    "SDL_iostream.h",
    "SDL_joystick.h",
    "SDL_keyboard.h",
    "SDL_keycode.h",
    "SDL_mouse.h",
    "SDL_pen.h",
    "SDL_pixels.h",
    "SDL_power.h",
    "SDL_properties.h",
    "SDL_rect.h",
    "SDL_render.h",
    "SDL_scancode.h",
    "SDL_sensor.h",
    "SDL_storage.h",
    "SDL_surface.h",
    "SDL_time.h",
    "SDL_timer.h",
    "SDL_touch.h",
    "SDL_version.h",
    "SDL_video.h",
];

#[derive(Parser)]
#[command(name = "mojogen", about = "Generate Mojo bindings from SDL3 header files")]
struct Cli {
    /// Header names to translate. Defaults to the built-in SDL3 list, or to
    /// every SDL_*.h in --input when that is given.
    headers: Vec<String>,

    /// Output directory, removed and recreated on every run
    #[arg(short = 'o', long, default_value = "out")]
    output: PathBuf,

    /// Base URL for upstream header retrieval
    #[arg(long, default_value = DEFAULT_REPO)]
    repo: String,

    /// Read headers from a local directory instead of the network
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let headers: Vec<String> = if !cli.headers.is_empty() {
        cli.headers.clone()
    } else if let Some(dir) = cli.input.as_deref() {
        fetch::discover_local(dir)?
    } else {
        INCLUDES.iter().map(|h| h.to_string()).collect()
    };

    if cli.output.exists() {
        fs::remove_dir_all(&cli.output)
            .with_context(|| format!("failed to clear {}", cli.output.display()))?;
    }
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;

    let mut modules = Vec::new();
    for header in &headers {
        let source = match cli.input.as_deref() {
            Some(dir) => fetch::read_local(dir, header)?,
            None => fetch::fetch_remote(&cli.repo, header)?,
        };
        let translated = translate::translate_header(&source)
            .with_context(|| format!("failed to translate {header}"))?;

        let module = module_name(header);
        let out_path = cli.output.join(format!("{module}.mojo"));
        fs::write(&out_path, &translated)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        println!("translating {}", out_path.display());
        modules.push(module);
    }

    let init_path = cli.output.join("__init__.mojo");
    fs::write(&init_path, prelude::init_module(&modules))
        .with_context(|| format!("failed to write {}", init_path.display()))?;
    Ok(())
}

/// `SDL_video.h` → `sdl_video`
fn module_name(header: &str) -> String {
    let lower = header.to_lowercase();
    lower.strip_suffix(".h").unwrap_or(&lower).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_lowercases_and_strips() {
        assert_eq!(module_name("SDL_video.h"), "sdl_video");
        assert_eq!(module_name("SDL_GPU.h"), "sdl_gpu");
    }

    #[test]
    fn module_name_without_extension() {
        assert_eq!(module_name("Makefile"), "makefile");
    }
}

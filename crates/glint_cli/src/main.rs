use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{load_scene, SceneFile};
use glint_renderer::render_scene;

mod cli;

use cli::{describe_camera, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting glint");

    let file = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, using the built-in demo scene");
            SceneFile::demo()
        }
    };

    if args.dump_scene {
        let mut file = file;
        args.apply(&mut file.camera, &mut file.render);
        println!("{}", serde_json::to_string_pretty(&file)?);
        return Ok(());
    }

    let (scene, mut camera, mut config) = file.into_parts().context("Invalid scene")?;
    args.apply(&mut camera, &mut config);
    log::info!("{} shapes, {}", scene.len(), describe_camera(&camera));

    let image = render_scene(&scene, &camera, &config).context("Render failed")?;

    image
        .to_rgb_image(config.gamma)
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Saved to {}", args.output.display());

    Ok(())
}

/*

    Track screen-space bounding boxes of 3D scene nodes
    while the scene is rotated and the camera is dollied.

    Loads a scene description, replays the input events it
    lists and saves the final overlay as a .png image.

    @date: Oct, 2025
    @author: Bartu

*/

use std::env;
use tracing::{info, warn, error, debug};

use bbox_overlay::image::ImageData;
use bbox_overlay::json_parser::parse_scene_json;
use bbox_overlay::scene::Scene;

fn main()  -> Result<(), Box<dyn std::error::Error>> {

    // Logging on console
    tracing_subscriber::fmt::init();

    // Parse args
    let args: Vec<String> = env::args().collect();
    let json_path: String = if args.len() == 1 {
        warn!("No arguments were provided, setting default scene path...");
        String::from("./inputs/ui_2d3d.json")
    } else if args.len() == 2 {
        args[1].clone()
    } else {
        error!("Usage: {} <filename>.json", args[0]);
        std::process::exit(1);
    };

    // Parse JSON
    info!("Loading scene from {}...", json_path);
    let root = parse_scene_json(&json_path).map_err(|e| {
        error!("Failed to load scene: {}", e);
        e
    })?;
    debug!("Scene is loaded successfully.\n {:#?}", root);

    let mut scene = Scene::from_root(&root);
    scene.replay(&root.events.all());

    for (i, rect) in scene.overlay().bounds().iter().enumerate() {
        let label = scene.nodes().get(i).map(|n| n.label()).unwrap_or("?");
        info!("{:>10}: x={} y={} w={} h={}", label, rect.x, rect.y, rect.width, rect.height);
    }

    // Write overlay to .png file
    let mut im = ImageData::new_from_background(root.window.size, root.overlay.image_name.clone(), root.overlay.background_color);
    im.draw_overlay(scene.overlay().items());
    im.save_png(&root.overlay.image_name)?;

    info!("Finished execution.");
    Ok(())
}

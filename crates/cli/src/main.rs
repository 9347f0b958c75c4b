use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use planar::Vec2;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;

use provenance::Provenance;
use scene::{Report, Scene};

#[derive(Parser)]
#[command(name = "planar")]
#[command(about = "Evaluate boolean expressions over planar regions")]
struct Cmd {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Resolve a scene and print its report; with --out, also write it plus a provenance sidecar
    Eval {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Point membership and boundary density for a resolved scene
    Contains {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Eval { scene, out } => eval(&scene, out.as_deref()),
        Action::Contains { scene, x, y } => contains(&scene, x, y),
        Action::Report => report(),
    }
}

fn eval(scene_path: &Path, out: Option<&Path>) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    let shape = scene.evaluate()?;
    tracing::info!(scene = %scene_path.display(), kind = shape.kind(), "resolved");
    let report = Report::of(&shape);
    let body = serde_json::to_string_pretty(&report)?;
    println!("{body}");

    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating output dir {}", parent.display()))?;
            }
        }
        std::fs::write(out, &body).with_context(|| format!("writing {}", out.display()))?;
        let sidecar = Provenance::capture(serde_json::json!({
            "command": "eval",
            "shapes": scene.shapes.keys().collect::<Vec<_>>(),
        }))
        .with_input(scene_path)
        .write_sidecar(out)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote report");
    }
    Ok(())
}

fn contains(scene_path: &Path, x: f64, y: f64) -> Result<()> {
    let shape = Scene::load(scene_path)?.evaluate()?;
    let p = Vec2::new(x, y);
    let obj = serde_json::json!({
        "point": [x, y],
        "kind": shape.kind(),
        "contains": shape.contains_point(p),
        "density": shape.winding(p),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", Provenance::capture(serde_json::json!({})).to_json()?);
    Ok(())
}

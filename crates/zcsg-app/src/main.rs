//! ZCSG 命令行工具入口
//!
//! 用法：`zcsg [SCENE.zcsg] [--output OUT.zcsg] [--verbose]`
//!
//! 读取（或构建演示）场景，输出包围盒信息，展平后可选地保存。

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use zcsg_core::prelude::*;
use zcsg_file::Scene;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "zcsg", version, about = "Inspect and flatten CSG scenes")]
struct Options {
    /// Scene file to load (builds a demo scene when omitted)
    input: Option<PathBuf>,

    /// Write the flattened scene to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// 构建演示场景：两个长方体、镜像副本、减去圆柱，底板被多处共享
fn create_demo_scene() -> Scene {
    let plate = CsgNode::primitive(Primitive::cuboid_at_origin(Vector3::new(20.0, 10.0, 2.0)))
        .with_name("plate")
        .into_ref();
    let post = CsgNode::primitive(Primitive::cuboid(Vector3::new(2.0, 2.0, 8.0))).into_ref();
    let post = translate(&post, Vector3::new(4.0, 5.0, 6.0), "post");
    let hole = CsgNode::primitive(Primitive::cylinder(1.5, 4.0, Alignment::Z)).into_ref();
    let hole = translate(&hole, Vector3::new(14.0, 5.0, 1.0), "hole");

    let bracket = &(&plate + &post) - &hole;
    let mirrored = mirror_across_x(&bracket, -1.0, "bracket-mirrored");

    let mut scene = Scene::new("demo bracket");
    scene.add(bracket);
    scene.add(mirrored);
    scene
}

fn report(label: &str, scene: &Scene) {
    info!(
        "{label}: {} nodes, {} shared instances",
        scene.node_count(),
        scene.shared_instance_count()
    );

    if let Some(root) = scene.root() {
        let bbox = root.bounding_box();
        let size = root.size();
        let center = root.center();
        info!(
            "bounds [{:.3}, {:.3}, {:.3}] - [{:.3}, {:.3}, {:.3}]",
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z
        );
        info!("size {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
        info!("center ({:.3}, {:.3}, {:.3})", center.x, center.y, center.z);
        tracing::debug!("structure:\n{}", root);
    } else {
        info!("{label}: scene is empty");
    }
}

fn main() -> Result<()> {
    let options = Options::parse();

    // 初始化日志
    let level = if options.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(level).finish()
    )?;

    info!("Starting ZCSG...");

    let scene = match &options.input {
        Some(path) => Scene::open(path)
            .with_context(|| format!("failed to open scene {}", path.display()))?,
        None => create_demo_scene(),
    };
    info!("Scene \"{}\" ({})", scene.metadata.title, scene.metadata.units);
    report("input", &scene);

    let mut flat = scene.flattened().context("failed to flatten scene")?;
    report("flattened", &flat);

    if let Some(path) = &options.output {
        flat.save_as(path)
            .with_context(|| format!("failed to save scene {}", path.display()))?;
        info!("Saved flattened scene to {}", path.display());
    }

    Ok(())
}

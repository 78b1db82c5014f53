//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapter::config::DEFAULT_CONFIG_PATH;
use crate::domain::entities::node_attribute::RotateOrder;
use crate::domain::services::joint_snap::SnapAxes;

/// ディレクトリ内のシーンファイルを一括処理するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "scenebatch")]
#[command(about = "Batch-process 3D scene files through a host application session", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Scene directory (overrides config)
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Output root directory (overrides config)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Only process scenes with this logical name (repeatable)
    #[arg(long = "only")]
    pub only: Vec<String>,

    /// Write a JSON batch report to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Dry run mode - list planned work without starting the host
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// シーンごとの処理
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Export the rig animation of every scene to FBX
    Export,

    /// Reload references whose path contains a token from a replacement file
    FixReferences {
        /// Substring identifying the broken reference path
        #[arg(long)]
        search: Option<String>,

        /// Replacement reference file
        #[arg(long)]
        replace: Option<PathBuf>,
    },

    /// Render a preview of the playback range and assemble an animated GIF
    Render {
        /// Repair references containing this token before rendering
        #[arg(long, requires = "replace")]
        search: Option<String>,

        #[arg(long, requires = "search")]
        replace: Option<PathBuf>,
    },

    /// Set the rotate order of every joint
    RotateOrder {
        #[arg(long, default_value = "xzy")]
        order: RotateOrder,

        /// Keep the visual orientation while changing the order
        #[arg(long)]
        preserve: bool,
    },

    /// Turn off segment scale compensate on joints
    DisableSsc {
        /// Joint name (repeatable, default: every joint)
        #[arg(long = "joint")]
        joints: Vec<String>,
    },

    /// Move a joint to another joint's world position
    SnapJoint {
        #[arg(long)]
        target: String,

        #[arg(long)]
        source: String,

        /// Axes to snap, e.g. "xz"
        #[arg(long, default_value = "xyz", value_parser = SnapAxes::parse)]
        axes: SnapAxes,
    },
}

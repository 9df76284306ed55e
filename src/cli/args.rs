//! CLI argument definitions and `ParsedCommand` construction.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    /// No arguments at all.
    Help,
    Version,
    /// Ad-hoc launch from flags.
    LaunchFlags(LaunchFlags),
    /// Subcommands working on the profile store.
    Cli {
        command: CliCommand,
        config_override: Option<PathBuf>,
    },
}

/// Subcommands working on the profile store.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Launch a game defined in the profile store.
    Launch(LaunchArgs),
    /// List games in the profile store.
    #[command(
        long_about = "List games in the profile store, one per line.\n\nWith CATEGORY only games whose `category` key matches exactly are printed."
    )]
    List(ListArgs),
    /// List the categories used in the profile store.
    Categories,
}

/// Arguments for `launch`.
#[derive(Debug, Clone, Args)]
pub struct LaunchArgs {
    /// Section name of the game in the profile store.
    pub game: String,
    /// Print the resolved command and environment as JSON instead of running it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Arguments for `list`.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Only list games of this category.
    pub category: Option<String>,
}

/// Flags for an ad-hoc launch without the profile store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct LaunchFlags {
    /// Command or path to the game (a Steam or Lutris id with --steam/--lutris).
    #[arg(value_name = "GAME")]
    pub game: Option<String>,
    /// Additional game arguments, separated by single spaces.
    #[arg(short = 'a', long = "args", value_name = "ARGUMENTS", allow_hyphen_values = true)]
    pub args: Option<String>,
    /// Run the game with gamemode.
    #[arg(short = 'g', long)]
    pub gamemode: bool,
    /// Run the game with MangoHud.
    #[arg(short = 'm', long)]
    pub mangohud: bool,
    /// Pass --dlsym to MangoHud (OpenGL games that load GL late).
    #[arg(long)]
    pub dlsym: bool,
    /// Limit game fps (needs libstrangle).
    #[arg(short = 'f', long = "fps", value_name = "FPS")]
    pub fps: Option<u32>,
    /// Vsync mode for libstrangle: opengl or vulkan.
    #[arg(long, value_name = "MODE")]
    pub vsync: Option<String>,
    /// Frame rate cap applied through DXVK_FRAME_RATE.
    #[arg(long = "fps-dxvk", value_name = "FPS")]
    pub fps_dxvk: Option<String>,
    /// Wine or Proton to use: `wine`, `proton`, or a path to a runtime (needs --prefix).
    #[arg(short = 'w', long, value_name = "WINE")]
    pub wine: Option<String>,
    /// Path to the Wine prefix.
    #[arg(short = 'p', long, value_name = "WINE_PREFIX")]
    pub prefix: Option<PathBuf>,
    /// Wine sync method: none, esync or fsync (needs --wine).
    #[arg(short = 's', long, value_name = "WINE_SYNC")]
    pub sync: Option<String>,
    /// Enable Wine fullscreen FSR (needs --wine).
    #[arg(long)]
    pub fsr: bool,
    /// Enable DXVK state cache settings in the prefix (needs --wine).
    #[arg(short = 'd', long)]
    pub dxvk: bool,
    /// Render on the discrete NVIDIA GPU (PRIME offload).
    #[arg(long)]
    pub prime: bool,
    /// Run GAME as a jar with `java -jar`.
    #[arg(long, conflicts_with_all = ["steam", "lutris", "flatpak"])]
    pub java: bool,
    /// Treat GAME as a Steam app id.
    #[arg(long, conflicts_with_all = ["lutris", "flatpak"])]
    pub steam: bool,
    /// Treat GAME as a Lutris game id.
    #[arg(long, conflicts_with = "flatpak")]
    pub lutris: bool,
    /// Run GAME as a Flatpak application id.
    #[arg(long)]
    pub flatpak: bool,
    /// Working directory of the game process.
    #[arg(short = 'C', long = "working-dir", value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
    /// Print the resolved command and environment as JSON instead of running it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "game-run",
    author,
    about = "Simple game runner from the command line",
    long_about = None,
    disable_version_flag = true
)]
pub struct GameRunArgs {
    /// Print program version.
    #[arg(short = 'v', long = "version")]
    pub version: bool,
    /// Path to the profile store (overrides GAME_RUN_CONFIG).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_override: Option<PathBuf>,
    #[command(flatten)]
    pub flags: LaunchFlags,
    /// Profile store commands.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl GameRunArgs {
    /// Decide what the invocation asks for.
    pub fn into_command(self) -> ParsedCommand {
        if self.version {
            return ParsedCommand::Version;
        }

        match self.command {
            Some(command) => ParsedCommand::Cli {
                command,
                config_override: self.config_override,
            },
            None if self.flags == LaunchFlags::default() && self.config_override.is_none() => {
                ParsedCommand::Help
            }
            None => ParsedCommand::LaunchFlags(self.flags),
        }
    }
}

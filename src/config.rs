//! Console configuration.

use bevy::prelude::*;

/// Console settings.
///
/// Insert before adding [`ConsolePlugin`](crate::ConsolePlugin) to override
/// the defaults. Later edits of the resource are pushed into the running
/// [`Console`](crate::core::Console) each frame.
///
/// # Examples
///
/// ```ignore
/// App::new()
///     .insert_resource(ConsoleConfig {
///         pause_enabled: true,
///         ..default()
///     })
///     .add_plugins(ConsolePlugin);
/// ```
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct ConsoleConfig {
    /// Enable the console at startup.
    pub enabled: bool,
    /// Allow enabling in release builds.
    pub enabled_on_release_build: bool,
    /// Pause virtual time while the console is open.
    pub pause_enabled: bool,
    /// Font size for the renderer.
    pub font_size: u32,
    /// Maximum remembered command lines.
    pub history_capacity: usize,
    /// Maximum output lines, `0` for unbounded.
    pub max_output_lines: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            enabled_on_release_build: false,
            pause_enabled: false,
            font_size: 14,
            history_capacity: 100,
            max_output_lines: 1000,
        }
    }
}

/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `pinnie init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Pinnie configuration
# Location: ~/.config/pinnie/config.toml

[hotkey]
# Key that pins or unpins the window under the mouse cursor.
# Letters, digits, F1-F24, or names like "Space", "Enter", "PageUp".
key = "T"
# Any of "ctrl", "alt", "shift", "win".
modifiers = ["ctrl", "win"]

[overlay]
# Border drawn around every pinned window.
show_border = true
border_thickness = 4
corner_radius = 8
border_color = "#ffffff"
# Floating icon shown above pinned windows (hidden while maximized).
show_icon = true
# PNG or GIF file. Leave unset to use the built-in pin badge.
# icon_path = "C:\\Users\\me\\Pictures\\cat.png"
# Icon height in pixels (16-256).
icon_size = 50
# "left", "center", or "right".
icon_position = "center"

[logging]
# Enable file logging to ~/.config/pinnie/logs/pinnie.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation (0 disables rotation).
max_file_mb = 10
# Rotated files to keep next to the live log.
backups = 1
"##
    .to_string()
}

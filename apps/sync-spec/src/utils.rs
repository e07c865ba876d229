//! Small helpers shared by the binary and printers.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

/// Colors on stderr unless `NO_COLOR` is set or stderr is not a terminal.
pub fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// `ERROR:` prefix for fatal diagnostics.
pub fn error_prefix() -> String {
    if stderr_colors() {
        "ERROR:".red().bold().to_string()
    } else {
        "ERROR:".to_string()
    }
}

/// Display `p` relative to the working directory when that is shorter.
pub fn rel_to_wd(p: &Path) -> String {
    if p.is_relative() {
        return p.to_string_lossy().to_string();
    }
    std::env::current_dir()
        .ok()
        .and_then(|wd| pathdiff::diff_paths(p, wd))
        .filter(|rel| rel.as_os_str().len() < p.as_os_str().len())
        .unwrap_or_else(|| p.to_path_buf())
        .to_string_lossy()
        .to_string()
}

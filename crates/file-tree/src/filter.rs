//! Which entries the tree shows.

use std::path::Path;

/// File extensions listed in the tree (lowercase, without the dot).
const SHOWN_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "tsx", "jsx", "html", "css", "scss", "json", "md", "yaml", "yml", "xml",
    "sql", "sh", "rs", "go", "java", "cpp", "c", "h", "hpp", "txt", "log", "php", "rb", "swift",
    "kt", "scala", "r", "vim", "lua", "pl", "tcl", "dockerfile", "toml", "ini", "cfg", "conf",
];

/// Build and cache directories. Dot-prefixed ones are skipped anyway.
const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    "build",
    "dist",
    "target",
];

const ALWAYS_SHOWN_FILES: &[&str] = &["Makefile", "README", "LICENSE", "Dockerfile"];

/// Whether an entry named by `path` belongs in the tree.
///
/// Directories are hidden when dot-prefixed or a known build/cache dir.
/// Files are shown when their extension is known, when they have no
/// extension at all, or when they are a well-known project file.
pub fn is_shown(path: &Path, is_dir: bool) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return false,
    };

    if is_dir {
        return !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref());
    }

    if ALWAYS_SHOWN_FILES.contains(&name.as_ref()) {
        return true;
    }
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            SHOWN_EXTENSIONS.contains(&ext.as_str())
        }
        None => true,
    }
}

//! Entry-file discovery for Next.js app directories.

use std::path::Path;

use walkdir::WalkDir;

/// Filenames that start a route: pages and layouts in any supported
/// source flavor.
const ENTRY_FILES: [&str; 8] = [
    "page.tsx",
    "page.ts",
    "page.jsx",
    "page.js",
    "layout.tsx",
    "layout.ts",
    "layout.jsx",
    "layout.js",
];

/// Discover routing entry files under an app directory, sorted for
/// deterministic output.
pub fn discover_entry_files(app_dir: &Path) -> Vec<String> {
    let mut entries: Vec<String> = WalkDir::new(app_dir)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            ENTRY_FILES.contains(&name.as_ref())
        })
        .map(|e| e.path().to_string_lossy().into_owned())
        .collect();

    entries.sort();
    entries
}

/// Check if a directory should be skipped during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') && name.len() > 1 {
        return true;
    }
    matches!(
        name.as_ref(),
        "node_modules" | "dist" | "build" | "coverage"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discovers_pages_and_layouts() {
        let dir = std::env::temp_dir().join(format!("renderscope-discovery-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let app = dir.join("app");
        write(&app, "page.tsx", "");
        write(&app, "layout.tsx", "");
        write(&app, "blog/page.tsx", "");
        write(&app, "blog/post.tsx", ""); // not an entry
        write(&app, "node_modules/pkg/page.tsx", ""); // ignored dir
        write(&app, ".next/page.tsx", ""); // hidden dir

        let entries = discover_entry_files(&app);
        fs::remove_dir_all(&dir).unwrap();

        let names: Vec<&str> = entries
            .iter()
            .map(|e| e.strip_prefix(&format!("{}/", app.display())).unwrap())
            .collect();
        assert_eq!(names, vec!["blog/page.tsx", "layout.tsx", "page.tsx"]);
    }
}

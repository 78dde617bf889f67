//! Packaging a built app directory together with an issue.
//!
//! ```text
//! build/ + newsletter.json ──→ export_web ──→ out/ (copy, issue, #/preview route)
//!                                   └────────→ zip_dir ──→ out.zip
//! build/assets/*.css|*.js + issue ──→ single_file ──→ one HTML page
//! ```

use crate::error::{ExportError, ExportResult};
use pulse_common::{escape_html, escape_script_close, FileSystem, RealFileSystem};
use pulse_schema::Newsletter;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Issue file name inside a web bundle
pub const BUNDLED_ISSUE: &str = "newsletter.json";

/// Global the built app reads an inlined issue from
pub const ISSUE_GLOBAL: &str = "__PULSE_NEWSLETTER__";

/// Sends a bare or root hash to the read-only preview route
pub const PREVIEW_ROUTE_SCRIPT: &str = "<script>(function(){\n  if(!location.hash || location.hash===\"#/\" || location.hash===\"#\") location.hash=\"#/preview\";\n})();</script>\n";

/// Result of a web bundle export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebExport {
    pub out_dir: PathBuf,
    /// Files copied from the build
    pub copied: usize,
    /// Whether the preview route script was added to `index.html`
    pub route_patched: bool,
}

/// Inject [`PREVIEW_ROUTE_SCRIPT`] before `</body>`, unless the page already
/// handles `location.hash` itself
pub fn force_preview_route(html: &str) -> Option<String> {
    if html.contains("location.hash") {
        return None;
    }
    let mut patched = html.to_string();
    match html.rfind("</body>") {
        Some(pos) => patched.insert_str(pos, PREVIEW_ROUTE_SCRIPT),
        None => patched.push_str(PREVIEW_ROUTE_SCRIPT),
    }
    Some(patched)
}

/// Fail fast when the build or the issue is missing
pub fn check_inputs(fs: &dyn FileSystem, build_dir: &Path, issue_file: &Path) -> ExportResult<()> {
    if !fs.is_dir(build_dir) {
        return Err(ExportError::MissingBuild(build_dir.to_path_buf()));
    }
    if !fs.exists(issue_file) || fs.is_dir(issue_file) {
        return Err(ExportError::MissingIssue(issue_file.to_path_buf()));
    }
    Ok(())
}

/// Read and validate the issue, keeping its original text
fn read_issue(fs: &dyn FileSystem, issue_file: &Path) -> ExportResult<(Newsletter, String)> {
    let json = fs.read_to_string(issue_file)?;
    let doc = Newsletter::import_json(&json)?;
    Ok((doc, json))
}

/// First `.ext` file (by name) directly inside `dir`
pub fn first_asset(fs: &dyn FileSystem, dir: &Path, ext: &str) -> ExportResult<PathBuf> {
    let missing = || ExportError::MissingAsset {
        dir: dir.to_path_buf(),
        ext: format!(".{}", ext),
    };
    if !fs.is_dir(dir) {
        return Err(missing());
    }
    fs.list_files(dir)?
        .into_iter()
        .find(|p| p.extension().map(|e| e == ext).unwrap_or(false))
        .ok_or_else(missing)
}

/// Copy the build into `out_dir` (replacing it), add the issue as
/// `newsletter.json` and route `index.html` to the preview.
#[instrument(skip_all, fields(build = %build_dir.display(), out = %out_dir.display()))]
pub fn export_web(build_dir: &Path, issue_file: &Path, out_dir: &Path) -> ExportResult<WebExport> {
    check_inputs(&RealFileSystem, build_dir, issue_file)?;
    let (_, json) = read_issue(&RealFileSystem, issue_file)?;

    if out_dir.exists() {
        fs::remove_dir_all(out_dir)?;
    }
    let copied = copy_dir(build_dir, out_dir)?;
    fs::write(out_dir.join(BUNDLED_ISSUE), json)?;

    let index = out_dir.join("index.html");
    let mut route_patched = false;
    if index.is_file() {
        if let Some(patched) = force_preview_route(&fs::read_to_string(&index)?) {
            fs::write(&index, patched)?;
            route_patched = true;
        }
    }

    info!(copied, route_patched, "Exported web bundle");
    Ok(WebExport {
        out_dir: out_dir.to_path_buf(),
        copied,
        route_patched,
    })
}

fn copy_dir(from: &Path, to: &Path) -> ExportResult<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|err| ExportError::Generic(err.to_string()))?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// One HTML page holding the build's stylesheet and script plus the issue
#[instrument(skip_all, fields(build = %build_dir.display()))]
pub fn single_file(fs: &dyn FileSystem, build_dir: &Path, issue_file: &Path) -> ExportResult<String> {
    check_inputs(fs, build_dir, issue_file)?;
    let assets = build_dir.join("assets");
    let css_path = first_asset(fs, &assets, "css")?;
    let js_path = first_asset(fs, &assets, "js")?;
    let css = fs.read_to_string(&css_path)?;
    let js = fs.read_to_string(&js_path)?;
    let (doc, json) = read_issue(fs, issue_file)?;
    debug!(css = %css_path.display(), js = %js_path.display(), "Inlining build assets");

    let title = if doc.meta.title.trim().is_empty() {
        "Newsletter"
    } else {
        doc.meta.title.trim()
    };

    Ok(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>\n{css}\n</style>\n</head>\n<body>\n\
         <div id=\"root\"></div>\n\
         <script>window.{global} = {json}; location.hash=\"#/preview\";</script>\n\
         <script type=\"module\">\n{js}\n</script>\n</body>\n</html>\n",
        title = escape_html(title),
        css = css.replace("</style", "<\\/style"),
        global = ISSUE_GLOBAL,
        json = escape_script_close(json.trim()),
        js = escape_script_close(&js),
    ))
}

/// Zip every file under `dir` into `zip_path` with `/`-separated entry names
#[instrument(skip_all, fields(dir = %dir.display(), zip = %zip_path.display()))]
pub fn zip_dir(dir: &Path, zip_path: &Path) -> ExportResult<usize> {
    if !dir.is_dir() {
        return Err(ExportError::MissingBuild(dir.to_path_buf()));
    }
    if let Some(parent) = zip_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = ZipWriter::new(File::create(zip_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files = 0;

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(entry.path().strip_prefix(dir).map_err(|err| err.to_string())?);
        if entry.file_type().is_dir() {
            writer.add_directory(format!("{}/", name), options)?;
        } else {
            writer.start_file(name, options)?;
            io::copy(&mut File::open(entry.path())?, &mut writer)?;
            files += 1;
        }
    }
    writer.finish()?;

    info!(files, "Wrote archive");
    Ok(files)
}

fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// [`export_web`] followed by [`zip_dir`] of the result
pub fn export_web_zip(
    build_dir: &Path,
    issue_file: &Path,
    out_dir: &Path,
    zip_path: &Path,
) -> ExportResult<WebExport> {
    let web = export_web(build_dir, issue_file, out_dir)?;
    zip_dir(&web.out_dir, zip_path)?;
    Ok(web)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pulse_common::MockFileSystem;
    use pulse_schema::SequentialIds;

    fn issue_json() -> String {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap();
        let mut doc = Newsletter::empty(&mut SequentialIds::new("b"), now);
        doc.meta.title = "Pulse </script> Weekly".into();
        doc.to_json_pretty().unwrap()
    }

    fn build_fs() -> MockFileSystem {
        let mut fs = MockFileSystem::new();
        fs.add_file("build/index.html", "<html><body><div id=\"root\"></div></body></html>");
        fs.add_file("build/assets/z-vendor.js", "console.log('vendor')");
        fs.add_file("build/assets/app.js", "const end = '</script>';");
        fs.add_file("build/assets/app.css", "body{margin:0}");
        fs.add_file("newsletter.json", issue_json());
        fs
    }

    #[test]
    fn test_route_script_goes_before_body_close() {
        let patched = force_preview_route("<html><body><p>x</p></body></html>").unwrap();
        assert!(patched.ends_with(&format!("{}</body></html>", PREVIEW_ROUTE_SCRIPT)));
        assert!(patched.contains("location.hash=\"#/preview\""));
    }

    #[test]
    fn test_route_script_skipped_when_page_handles_hash() {
        let html = "<script>if (location.hash) go()</script></body>";
        assert_eq!(force_preview_route(html), None);
    }

    #[test]
    fn test_route_script_appended_without_body() {
        let patched = force_preview_route("<div></div>").unwrap();
        assert_eq!(patched, format!("<div></div>{}", PREVIEW_ROUTE_SCRIPT));
    }

    #[test]
    fn test_missing_build_dir() {
        let mut fs = MockFileSystem::new();
        fs.add_file("newsletter.json", issue_json());
        let err = single_file(&fs, Path::new("build"), Path::new("newsletter.json")).unwrap_err();
        assert!(matches!(err, ExportError::MissingBuild(_)));
        assert!(err.to_string().contains("Build the app first"));
    }

    #[test]
    fn test_missing_issue_file() {
        let mut fs = MockFileSystem::new();
        fs.add_dir("build");
        let err = single_file(&fs, Path::new("build"), Path::new("issue.json")).unwrap_err();
        assert!(matches!(err, ExportError::MissingIssue(_)));
    }

    #[test]
    fn test_missing_stylesheet() {
        let mut fs = MockFileSystem::new();
        fs.add_file("build/assets/app.js", "1");
        fs.add_file("newsletter.json", issue_json());
        let err = single_file(&fs, Path::new("build"), Path::new("newsletter.json")).unwrap_err();
        match err {
            ExportError::MissingAsset { ext, .. } => assert_eq!(ext, ".css"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_single_file_inlines_first_assets() {
        let html = single_file(&build_fs(), Path::new("build"), Path::new("newsletter.json")).unwrap();

        assert!(html.contains("<style>\nbody{margin:0}\n</style>"));
        assert!(html.contains("const end = '<\\/script>';"));
        assert!(!html.contains("vendor"));
        assert!(html.contains("window.__PULSE_NEWSLETTER__ = {"));
        assert!(html.contains("<title>Pulse &lt;/script&gt; Weekly</title>"));
        // Only the two wrapper scripts close
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_single_file_rejects_malformed_issue() {
        let mut fs = build_fs();
        fs.add_file("newsletter.json", "{\"meta\": 1}");
        let err = single_file(&fs, Path::new("build"), Path::new("newsletter.json")).unwrap_err();
        assert!(matches!(err, ExportError::Schema(_)));
    }

    #[test]
    fn test_entry_names_use_forward_slashes() {
        let path: PathBuf = ["assets", "img", "logo.png"].iter().collect();
        assert_eq!(entry_name(&path), "assets/img/logo.png");
    }
}

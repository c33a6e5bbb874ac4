//! Launching darktable on the migrated photos
//!
//! darktable has no command line switch for a bulk import into a library, so
//! the launcher writes a small Lua script that imports every image and asks
//! darktable to run it through `--luacmd`:
//!
//! ```text
//! darktable --library <lib> --luacmd 'dofile("<script>")' <images...>
//! ```
//!
//! The script lives in a temporary file owned by [`DarktableLauncher::launch`].
//! It is removed when that call returns, whether the launch succeeded or not.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::{debug, info};

use crate::defaults::DEFAULT_APP;
use crate::error::{Error, Result};

/// Starts darktable with a generated import script.
#[derive(Debug, Clone)]
pub struct DarktableLauncher {
    binary: String,
    envs: Vec<(String, String)>,
    script_dir: Option<PathBuf>,
}

impl Default for DarktableLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_APP)
    }
}

impl DarktableLauncher {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            envs: Vec::new(),
            script_dir: None,
        }
    }

    /// Set an extra environment variable for the launched process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Create import scripts in `dir` instead of the system temp directory.
    pub fn script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = Some(dir.into());
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Run darktable on `library`, importing `images`, and wait for it to exit.
    pub fn launch(&self, library: &Path, images: &[PathBuf]) -> Result<ExitStatus> {
        if images.is_empty() {
            return Err(Error::Launch {
                binary: self.binary.clone(),
                message: "image list must contain at least one entry".to_string(),
            });
        }

        let library = normalize_path(library)?;
        let images = images
            .iter()
            .map(|image| normalize_path(image))
            .collect::<Result<Vec<_>>>()?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("darktable-import-").suffix(".lua");
        let mut script = match &self.script_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        script.write_all(lua_script_source(&images)?.as_bytes())?;
        script.flush()?;
        debug!("Wrote import script {}", script.path().display());

        let args = build_command(&library, script.path(), &images)?;
        info!(
            "Launching {} with library: {}",
            self.binary,
            library.display()
        );

        let status = Command::new(&self.binary)
            .args(&args)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|e| Error::Launch {
                binary: self.binary.clone(),
                message: e.to_string(),
            })?;

        Ok(status)
    }
}

/// Arguments passed to darktable, excluding the binary itself.
pub fn build_command(library: &Path, script: &Path, images: &[PathBuf]) -> Result<Vec<OsString>> {
    let script_literal = serde_json::to_string(&script.to_string_lossy())?;
    let mut args: Vec<OsString> = vec![
        "--library".into(),
        library.as_os_str().to_os_string(),
        "--luacmd".into(),
        format!("dofile({})", script_literal).into(),
    ];
    args.extend(images.iter().map(|image| image.as_os_str().to_os_string()));
    Ok(args)
}

/// Lua source importing each image into the open library.
pub fn lua_script_source(images: &[PathBuf]) -> Result<String> {
    let entries = images
        .iter()
        .map(|image| serde_json::to_string(&image.to_string_lossy()).map(|s| format!("    {}", s)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let lines = [
        "local dt = require \"darktable\"".to_string(),
        "local images = {".to_string(),
        entries.join(",\n"),
        "}".to_string(),
        String::new(),
        "for _, image in ipairs(images) do".to_string(),
        "    dt.database.import(image)".to_string(),
        "end".to_string(),
        String::new(),
    ];
    Ok(lines.join("\n"))
}

/// Expand a leading `~`, make the path absolute and resolve it when it exists.
pub fn normalize_path(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    let expanded = match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };

    Ok(absolute.canonicalize().unwrap_or(absolute))
}

//! Discovery and loading of the hand-authored template packs.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;

/// Name of the metadata file that marks a template directory.
pub const PACK_MCMETA: &str = "pack.mcmeta";
/// Directory holding clock model templates inside a template pack.
pub const MODELS_DIR: &str = "assets/minecraft/models/item/clock";
/// Root texture directory inside a template pack.
pub const TEXTURES_DIR: &str = "assets/minecraft/textures";

/// Problems with the template inputs. None of them are defaulted.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template root or a named template directory does not exist.
    #[error("template directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    /// A required template file does not exist.
    #[error("missing template file: {}", .0.display())]
    MissingFile(PathBuf),
    /// A template file exists but could not be read.
    #[error("failed to read template file {}", .path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A template file is not valid JSON of the expected shape.
    #[error("failed to parse template file {}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Clock style a template is built as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockKind {
    /// Rotating hands over a face.
    Analog,
    /// Hour and minute digits.
    Digital,
}

impl ClockKind {
    /// Parses the `meta_type` of a template, ignoring case.
    #[must_use]
    pub fn from_meta_type(meta_type: &str) -> Option<Self> {
        match meta_type.to_ascii_lowercase().as_str() {
            "analog" => Some(Self::Analog),
            "digital" => Some(Self::Digital),
            _ => None,
        }
    }

    /// Canonical `meta_type` spelling.
    #[must_use]
    pub const fn meta_type(self) -> &'static str {
        match self {
            Self::Analog => "analog",
            Self::Digital => "digital",
        }
    }
}

/// The subset of a template's `pack.mcmeta` the builders read.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TemplateMeta {
    /// Clock style requested by the template.
    #[serde(default)]
    pub meta_type: Option<String>,
    /// Client-facing pack section.
    #[serde(default)]
    pub pack: Option<TemplatePackSection>,
}

/// The `pack` section of a template's `pack.mcmeta`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TemplatePackSection {
    /// Description carried over to the generated pack.
    #[serde(default)]
    pub description: Option<Value>,
}

impl TemplateMeta {
    /// Description to carry over, or an empty string when the template has none.
    #[must_use]
    pub fn description(&self) -> Value {
        self.pack
            .as_ref()
            .and_then(|pack| pack.description.clone())
            .unwrap_or_else(|| Value::String(String::new()))
    }
}

/// Template directory discovered below the input root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplatePack {
    /// Directory name, reused as the generated pack name.
    pub name: String,
    /// Location of the template directory.
    pub dir: PathBuf,
    /// Lowercased `meta_type` read from `pack.mcmeta`.
    pub meta_type: String,
}

impl TemplatePack {
    /// Builder style for the template, if the `meta_type` is recognised.
    #[must_use]
    pub fn kind(&self) -> Option<ClockKind> {
        ClockKind::from_meta_type(&self.meta_type)
    }

    /// Name shown to players, with underscores replaced by spaces.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.replace('_', " ")
    }

    /// Loads the full `pack.mcmeta` of the template.
    pub fn load_meta(&self) -> Result<TemplateMeta, TemplateError> {
        load_pack_mcmeta(&self.dir)
    }
}

/// Lists template directories below `input_dir` in name order.
///
/// Directories without `pack.mcmeta` or without a `meta_type` are skipped with
/// a warning.
pub fn discover_templates(input_dir: &Path) -> Result<Vec<TemplatePack>, TemplateError> {
    log::info!("discovering templates in {}", input_dir.display());
    if !input_dir.is_dir() {
        return Err(TemplateError::MissingDirectory(input_dir.to_path_buf()));
    }

    let entries = fs::read_dir(input_dir).map_err(|source| TemplateError::Io {
        path: input_dir.to_path_buf(),
        source,
    })?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TemplateError::Io {
            path: input_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();

    let mut templates = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !dir.join(PACK_MCMETA).is_file() {
            log::warn!("skipping {name}: {PACK_MCMETA} not found");
            continue;
        }

        let meta = load_pack_mcmeta(&dir)?;
        let Some(meta_type) = meta.meta_type.filter(|value| !value.is_empty()) else {
            log::warn!("skipping {name}: meta_type missing in {PACK_MCMETA}");
            continue;
        };

        templates.push(TemplatePack {
            name,
            dir,
            meta_type: meta_type.to_lowercase(),
        });
    }

    Ok(templates)
}

/// Locates the template directory named `pack_name` below `input_dir`.
pub fn resolve_template_dir(input_dir: &Path, pack_name: &str) -> Result<PathBuf, TemplateError> {
    let dir = input_dir.join(pack_name);
    if !dir.is_dir() {
        return Err(TemplateError::MissingDirectory(dir));
    }
    Ok(dir)
}

/// Reads and parses `pack.mcmeta` from a template directory.
pub fn load_pack_mcmeta(template_dir: &Path) -> Result<TemplateMeta, TemplateError> {
    load_json(&template_dir.join(PACK_MCMETA))
}

/// Reads and parses a JSON model template.
pub fn load_json_template(path: &Path) -> Result<Value, TemplateError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, TemplateError> {
    if !path.is_file() {
        return Err(TemplateError::MissingFile(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| TemplateError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

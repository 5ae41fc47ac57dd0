//! `${name}` variable expansion for `path:` filter patterns.
//!
//! Variables describe the focused document and its workspace, so a filter like
//! `path:${fileDirname}/*` follows whatever file currently has focus.
//! Expansion is a single pass: text produced by one variable is never scanned
//! for further `${...}` tokens, and unrecognized names are left untouched.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Regex matching `${name}` tokens. `${/}` is the path separator alias.
static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^{}]+)\}")
        .expect("variable substitution regex is a compile-time constant and must be valid")
});

/// Focus and workspace state variables are expanded against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VariableContext {
    /// Path of the focused document, if it lives on disk
    pub active_file: Option<PathBuf>,
    /// Open workspace folders, first one is the primary folder
    pub workspace_folders: Vec<PathBuf>,
}

impl VariableContext {
    /// Create a context for a focused file in the given workspace folders.
    pub fn new(active_file: Option<PathBuf>, workspace_folders: Vec<PathBuf>) -> Self {
        Self {
            active_file,
            workspace_folders,
        }
    }

    /// Workspace folder containing the active file (innermost wins).
    pub fn file_workspace_folder(&self) -> Option<&Path> {
        let file = self.active_file.as_deref()?;
        self.workspace_folders
            .iter()
            .filter(|folder| file.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .map(PathBuf::as_path)
    }

    /// Folder of the active file, else the first workspace folder.
    pub fn workspace_folder(&self) -> Option<&Path> {
        self.file_workspace_folder()
            .or_else(|| self.workspace_folders.first().map(PathBuf::as_path))
    }

    /// Active file relative to its workspace folder, or the file itself
    /// when it lies outside every folder.
    pub fn relative_file(&self) -> Option<&Path> {
        let file = self.active_file.as_deref()?;
        match self.file_workspace_folder() {
            Some(folder) => file.strip_prefix(folder).ok(),
            None => Some(file),
        }
    }
}

/// Variables recognized inside `${...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    UserHome,
    WorkspaceFolder,
    WorkspaceFolderBasename,
    File,
    FileWorkspaceFolder,
    RelativeFile,
    RelativeFileDirname,
    FileBasename,
    FileBasenameNoExtension,
    FileExtname,
    FileDirname,
    FileDirnameBasename,
    Cwd,
    PathSeparator,
}

impl Variable {
    /// All variable names with descriptions, for help output.
    pub fn all() -> &'static [(&'static str, &'static str)] {
        &[
            ("userHome", "Home directory of the current user"),
            ("workspaceFolder", "Workspace folder of the focused file"),
            ("workspaceFolderBasename", "Name of the workspace folder"),
            ("file", "Path of the focused file"),
            ("fileWorkspaceFolder", "Workspace folder containing the focused file"),
            ("relativeFile", "Focused file relative to its workspace folder"),
            ("relativeFileDirname", "Directory of relativeFile"),
            ("fileBasename", "File name of the focused file"),
            ("fileBasenameNoExtension", "File name without its extension"),
            ("fileExtname", "Extension of the focused file, with the dot"),
            ("fileDirname", "Directory of the focused file"),
            ("fileDirnameBasename", "Name of the focused file's directory"),
            ("cwd", "Current working directory"),
            ("pathSeparator", "Platform path separator (also ${/})"),
        ]
    }

    /// Parse a variable name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "userHome" => Some(Self::UserHome),
            "workspaceFolder" => Some(Self::WorkspaceFolder),
            "workspaceFolderBasename" => Some(Self::WorkspaceFolderBasename),
            "file" => Some(Self::File),
            "fileWorkspaceFolder" => Some(Self::FileWorkspaceFolder),
            "relativeFile" => Some(Self::RelativeFile),
            "relativeFileDirname" => Some(Self::RelativeFileDirname),
            "fileBasename" => Some(Self::FileBasename),
            "fileBasenameNoExtension" => Some(Self::FileBasenameNoExtension),
            "fileExtname" => Some(Self::FileExtname),
            "fileDirname" => Some(Self::FileDirname),
            "fileDirnameBasename" => Some(Self::FileDirnameBasename),
            "cwd" => Some(Self::Cwd),
            "pathSeparator" | "/" => Some(Self::PathSeparator),
            _ => None,
        }
    }

    /// Resolve the variable against `ctx`.
    ///
    /// Anything that cannot be resolved yields an empty string.
    pub fn resolve(&self, ctx: &VariableContext) -> String {
        let file = ctx.active_file.as_deref();
        match self {
            Self::UserHome => dirs::home_dir()
                .map(|p| path_string(&p))
                .unwrap_or_default(),
            Self::WorkspaceFolder => ctx.workspace_folder().map(path_string).unwrap_or_default(),
            Self::WorkspaceFolderBasename => ctx
                .workspace_folder()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::File => file.map(path_string).unwrap_or_default(),
            Self::FileWorkspaceFolder => ctx
                .file_workspace_folder()
                .map(path_string)
                .unwrap_or_default(),
            Self::RelativeFile => ctx.relative_file().map(path_string).unwrap_or_default(),
            Self::RelativeFileDirname => ctx
                .relative_file()
                .and_then(Path::parent)
                .map(path_string)
                .unwrap_or_default(),
            Self::FileBasename => file
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::FileBasenameNoExtension => file
                .and_then(Path::file_stem)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::FileExtname => file
                .and_then(Path::extension)
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
            Self::FileDirname => file.and_then(Path::parent).map(path_string).unwrap_or_default(),
            Self::FileDirnameBasename => file
                .and_then(Path::parent)
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Cwd => std::env::current_dir()
                .ok()
                .map(|p| path_string(&p))
                .unwrap_or_default(),
            Self::PathSeparator => std::path::MAIN_SEPARATOR_STR.to_string(),
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Expand every recognized `${name}` in `template` against `ctx`.
///
/// - `${file}` becomes the focused file's path, `${/}` the separator, etc.
/// - Unknown names such as `${nope}` are left as written.
/// - Expansion is single-pass; substituted text is not expanded again.
pub fn resolve_variables(template: &str, ctx: &VariableContext) -> String {
    if !template.contains("${") {
        return template.to_string();
    }

    VARIABLE_PATTERN
        .replace_all(template, |caps: &regex::Captures| match Variable::parse(&caps[1]) {
            Some(variable) => variable.resolve(ctx),
            None => {
                log::debug!("Unknown variable ${{{}}} left as-is", &caps[1]);
                caps[0].to_string()
            }
        })
        .into_owned()
}

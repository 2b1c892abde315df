use anyhow::{Context, Result, anyhow};
use rust_embed::RustEmbed;

/// Token in the fish template replaced by the workspace root.
pub const ROOT_PLACEHOLDER: &str = "__GOENV_ROOT__";

#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

/// The activation scripts written into `<root>/bin`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScriptKind {
    /// POSIX shells; bash and zsh locate the workspace themselves.
    Primary,
    /// The fish shell.
    Fish,
}

impl ScriptKind {
    pub const ALL: [ScriptKind; 2] = [ScriptKind::Primary, ScriptKind::Fish];

    pub fn file_name(&self) -> &'static str {
        match self {
            ScriptKind::Primary => "activate",
            ScriptKind::Fish => "activate.fish",
        }
    }
}

fn get_string(path: &str) -> Result<String> {
    let file = Templates::get(path).ok_or_else(|| anyhow!("embedded template `{}` missing", path))?;
    std::str::from_utf8(file.data.as_ref())
        .with_context(|| format!("decoding embedded template `{}`", path))
        .map(|value| value.to_owned())
}

fn render_with_root(kind: ScriptKind, root: &str) -> Result<String> {
    let template = get_string(kind.file_name())?;
    Ok(template.replace(ROOT_PLACEHOLDER, root))
}

/// Render the POSIX script. Under bash and zsh it locates its workspace from
/// its own path when sourced; `root` is the fallback for every other shell.
pub fn render_primary(root: &str) -> Result<String> {
    render_with_root(ScriptKind::Primary, root)
}

/// Render the fish script with every placeholder replaced by `root` verbatim.
/// No quoting or escaping is applied.
pub fn render_alt(root: &str) -> Result<String> {
    render_with_root(ScriptKind::Fish, root)
}

pub fn render(kind: ScriptKind, root: &str) -> Result<String> {
    match kind {
        ScriptKind::Primary => render_primary(root),
        ScriptKind::Fish => render_alt(root),
    }
}

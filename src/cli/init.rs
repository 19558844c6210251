//
//  init.rs
//  Ghostbusters
//
//  Installs the pre-commit hook (husky when present, plain git otherwise).
//

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Line appended to the hook script.
const HOOK_COMMAND: &str = "ghostbusters";

const SHEBANG: &str = "#!/bin/sh\n";

#[derive(Debug, PartialEq, Eq)]
enum HookResult {
    Installed,
    AlreadyInstalled,
}

/// Install the ghostbusters pre-commit hook for the repository at `root`.
/// Prints the outcome unless `silent`.
pub fn init(root: &Path, silent: bool) -> Result<()> {
    if !root.join(".git").exists() {
        bail!("{} is not a git repository (no .git found)", root.display());
    }

    let hook = hook_path(root);
    let result = install_hook(&hook)?;

    if !silent {
        print!("{}", render(&result, &hook));
    }

    Ok(())
}

fn render(result: &HookResult, hook: &Path) -> String {
    let status = match result {
        HookResult::Installed => "installed",
        HookResult::AlreadyInstalled => "already-installed",
    };
    format!(
        "<init>\n  <hook status=\"{}\" path=\"{}\"/>\n</init>\n",
        status,
        hook.display()
    )
}

/// Husky owns the hooks when `.husky/` exists.
fn hook_path(root: &Path) -> PathBuf {
    let husky = root.join(".husky");
    if husky.is_dir() {
        husky.join("pre-commit")
    } else {
        root.join(".git").join("hooks").join("pre-commit")
    }
}

/// Append the hook command to `path`, keeping whatever is already there.
fn install_hook(path: &Path) -> Result<HookResult> {
    let current = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    if current.lines().any(|line| line.trim() == HOOK_COMMAND) {
        return Ok(HookResult::AlreadyInstalled);
    }

    let mut content = current;
    if !content.starts_with("#!") {
        content.insert_str(0, SHEBANG);
    }
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(HOOK_COMMAND);
    content.push('\n');

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    make_executable(path)?;

    Ok(HookResult::Installed)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

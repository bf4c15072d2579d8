//! Git remote and transport values toggled by the setup and cleanup phases.

use std::path::Path;

/// Host whose key is pinned and whose remote is rewritten.
pub const GITHUB_HOST: &str = "github.com";

/// Git config keys set during setup and unset during cleanup, in order.
pub const IDENTITY_EMAIL_KEY: &str = "user.email";
pub const IDENTITY_NAME_KEY: &str = "user.name";
pub const SSH_COMMAND_KEY: &str = "core.sshCommand";

/// SSH form of the origin remote: `git@github.com:<owner/name>.git`.
#[must_use]
pub fn ssh_remote(repository: &str) -> String {
    format!("git@{GITHUB_HOST}:{repository}.git")
}

/// HTTPS form of the origin remote: `https://github.com/<owner/name>`.
#[must_use]
pub fn https_remote(repository: &str) -> String {
    format!("https://{GITHUB_HOST}/{repository}")
}

/// `core.sshCommand` value pinning the deploy key and known hosts in `ssh_dir`.
#[must_use]
pub fn ssh_command(ssh_dir: &Path) -> String {
    let dir = ssh_dir.display();
    format!("ssh -i {dir}/id_rsa -o UserKnownHostsFile={dir}/known_hosts")
}

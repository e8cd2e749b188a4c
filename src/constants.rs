//! Constants shared across the installer.
//!
//! Environment variable names, defaults for the server invocation, and the file
//! names the installer reads or writes.

/// Name used for the entry when a single server is configured interactively.
pub const DEFAULT_SERVER_NAME: &str = "gitlab";

/// GitLab instance assumed when no host is given. Entries for this host omit `GITLAB_HOST`.
pub const DEFAULT_GITLAB_HOST: &str = "https://gitlab.com";

/// File name of the compiled server under `<project root>/bin`.
pub const DEFAULT_BINARY_NAME: &str = "gitlab-mcp-server";

/// Image run in container mode.
pub const DEFAULT_DOCKER_IMAGE: &str = "gitlab-mcp-server:latest";

/// Marker identifying the server's source checkout when searching for the project root.
pub const PROJECT_MARKER: &str = "go.mod";

/// Argument selecting the server's standard-I/O transport.
pub const STDIO_ARG: &str = "stdio";

/// Executable used for container mode.
pub const DOCKER_COMMAND: &str = "docker";

/// Environment variable carrying the access token.
pub const ENV_TOKEN: &str = "GITLAB_TOKEN";

/// Environment variable carrying the GitLab host URL.
pub const ENV_HOST: &str = "GITLAB_HOST";

/// Environment variable enabling read-only mode.
pub const ENV_READ_ONLY: &str = "GITLAB_READ_ONLY";

/// Suffix appended to a configuration file's name for its backup copy.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Environment variable overriding the installer config file location.
pub const CONFIG_PATH_ENV: &str = "GITLAB_MCP_INSTALLER_CONFIG";

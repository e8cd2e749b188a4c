use crate::mcp::McpServerEntry;

/// Entry used across the merge engine tests: `{command:"/bin/x", args:["stdio"], env:{GITLAB_TOKEN:"t"}}`.
pub(crate) fn sample_entry() -> McpServerEntry {
    let mut entry = McpServerEntry::new("/bin/x");
    entry.args.push("stdio".to_string());
    entry.env.insert("GITLAB_TOKEN".to_string(), "t".to_string());
    entry
}

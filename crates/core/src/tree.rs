//! The navigable command tree.
//!
//! Configuration entries are converted once, at startup, into a tree of
//! [`CommandNode`]s. Each node owns its children outright; navigation works
//! on index paths into that tree so the UI never holds borrows across
//! mutations of expand state.

use crate::config::{Config, ConfigNode, VariableConfig};

/// One node in the command tree: a folder (has children) or a runnable leaf.
#[derive(Debug, Clone)]
pub struct CommandNode {
    pub name: String,
    /// Command template; empty for folders.
    pub command: String,
    pub description: String,
    /// Toggled by the user while navigating.
    pub expanded: bool,
    /// Resolved at build time from the node override or the inherited
    /// default; never recomputed afterwards.
    pub confirm: bool,
    /// Effective variable set: globals with same-named locals overriding in
    /// place, local-only variables appended.
    pub variables: Vec<VariableConfig>,
    pub children: Vec<CommandNode>,
}

/// A row of the flattened visible-node list.
///
/// `path` holds child indices from the root down to the node, so the caller
/// can re-borrow the node (mutably, if needed) after the list is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub path: Vec<usize>,
    pub depth: usize,
}

impl CommandNode {
    /// A node is a folder iff it has at least one child.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        !self.children.is_empty()
    }

    /// Looks up a variable spec by name in the node's effective set.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&VariableConfig> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Computes the flattened list of currently visible rows.
    ///
    /// Depth-first pre-order; a folder's children are included iff the
    /// folder is expanded. The receiver itself is always included at depth
    /// 0. Recomputed on every call since expand state changes between
    /// renders.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        self.collect_visible(&mut rows, &mut Vec::new());
        rows
    }

    fn collect_visible(&self, rows: &mut Vec<VisibleRow>, path: &mut Vec<usize>) {
        rows.push(VisibleRow {
            path: path.clone(),
            depth: path.len(),
        });

        if self.expanded {
            for (i, child) in self.children.iter().enumerate() {
                path.push(i);
                child.collect_visible(rows, path);
                path.pop();
            }
        }
    }

    /// Returns the node at the given index path, or `None` if the path no
    /// longer resolves.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&CommandNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Mutable counterpart of [`CommandNode::node_at`].
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut CommandNode> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }
}

/// The whole command tree, rooted at a synthetic always-expanded folder.
#[derive(Debug, Clone)]
pub struct CommandTree {
    root: CommandNode,
}

impl CommandTree {
    /// Builds the tree from a loaded configuration.
    ///
    /// The root carries the config's name and description and holds the
    /// top-level entries as children. The global confirm setting is
    /// propagated as the inherited default; node-level overrides win.
    /// Malformed configuration is the loader's problem; empty children and
    /// variable lists are fine here.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let default_confirm = config.settings.confirm_default();

        let root = CommandNode {
            name: config.name.clone(),
            command: String::new(),
            description: config.description.clone(),
            expanded: true,
            confirm: default_confirm,
            variables: config.variables.clone(),
            children: config
                .commands
                .iter()
                .map(|entry| convert_node(entry, &config.variables, default_confirm))
                .collect(),
        };

        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut CommandNode {
        &mut self.root
    }
}

fn convert_node(
    entry: &ConfigNode,
    globals: &[VariableConfig],
    default_confirm: bool,
) -> CommandNode {
    let is_folder = !entry.children.is_empty();

    CommandNode {
        name: entry.name.clone(),
        // Folders never carry a command template
        command: if is_folder {
            String::new()
        } else {
            entry.command.clone()
        },
        description: entry.description.clone(),
        expanded: entry.expanded,
        confirm: entry.confirm.unwrap_or(default_confirm),
        variables: merge_variables(globals, &entry.variables),
        children: entry
            .children
            .iter()
            .map(|child| convert_node(child, globals, default_confirm))
            .collect(),
    }
}

/// Merges global and local variables into a node's effective set.
///
/// Global order is preserved; a local variable with the same name replaces
/// the global at its original position; local-only variables are appended in
/// their own order.
fn merge_variables(globals: &[VariableConfig], locals: &[VariableConfig]) -> Vec<VariableConfig> {
    let mut merged: Vec<VariableConfig> = globals.to_vec();

    for local in locals {
        match merged.iter_mut().find(|v| v.name == local.name) {
            Some(existing) => *existing = local.clone(),
            None => merged.push(local.clone()),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn variable(name: &str, default: &str) -> VariableConfig {
        VariableConfig {
            name: name.to_string(),
            description: String::new(),
            default: Some(default.to_string()),
            options: Vec::new(),
        }
    }

    fn leaf(name: &str, command: &str) -> ConfigNode {
        ConfigNode {
            name: name.to_string(),
            command: command.to_string(),
            ..ConfigNode::default()
        }
    }

    fn test_config() -> Config {
        Config {
            name: "Test".to_string(),
            description: String::new(),
            settings: Settings { confirm: None },
            variables: vec![variable("host", "localhost"), variable("user", "root")],
            commands: vec![
                ConfigNode {
                    name: "Group".to_string(),
                    expanded: false,
                    children: vec![leaf("First", "echo 1"), leaf("Second", "echo 2")],
                    ..ConfigNode::default()
                },
                ConfigNode {
                    confirm: Some(false),
                    ..leaf("Top", "ls")
                },
            ],
        }
    }

    #[test]
    fn test_root_is_expanded_folder() {
        let tree = CommandTree::from_config(&test_config());
        assert!(tree.root().expanded);
        assert!(tree.root().is_folder());
        assert!(tree.root().command.is_empty());
    }

    #[test]
    fn test_confirm_inheritance_and_override() {
        let tree = CommandTree::from_config(&test_config());
        // Unset global setting resolves to true and propagates
        assert!(tree.root().children[0].confirm);
        assert!(tree.root().children[0].children[0].confirm);
        // Node-level override wins
        assert!(!tree.root().children[1].confirm);
    }

    #[test]
    fn test_folder_command_is_cleared() {
        let mut config = test_config();
        config.commands[0].command = "should not survive".to_string();

        let tree = CommandTree::from_config(&config);
        assert!(tree.root().children[0].is_folder());
        assert!(tree.root().children[0].command.is_empty());
    }

    #[test]
    fn test_merge_local_overrides_global_in_place() {
        let globals = vec![variable("host", "localhost"), variable("user", "root")];
        let locals = vec![variable("port", "22"), variable("host", "example.com")];

        let merged = merge_variables(&globals, &locals);

        let names: Vec<&str> = merged.iter().map(|v| v.name.as_str()).collect();
        // Override keeps the global position; local-only appended
        assert_eq!(names, vec!["host", "user", "port"]);
        assert_eq!(merged[0].default.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_visible_rows_collapsed_folder_hides_children() {
        let tree = CommandTree::from_config(&test_config());
        let rows = tree.root().visible_rows();

        // Root + collapsed folder + top-level leaf
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], VisibleRow { path: vec![], depth: 0 });
        assert_eq!(rows[1].path, vec![0]);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].path, vec![1]);
    }

    #[test]
    fn test_visible_rows_expansion_adds_child_count() {
        let mut tree = CommandTree::from_config(&test_config());
        let before = tree.root().visible_rows().len();

        let folder = tree.root_mut().node_at_mut(&[0]).unwrap();
        let child_count = folder.children.len();
        folder.expanded = true;

        let after = tree.root().visible_rows().len();
        assert_eq!(after, before + child_count);

        // Children appear directly under the folder, one level deeper
        let rows = tree.root().visible_rows();
        assert_eq!(rows[2].path, vec![0, 0]);
        assert_eq!(rows[2].depth, 2);
    }

    #[test]
    fn test_node_at_resolves_paths() {
        let tree = CommandTree::from_config(&test_config());
        assert_eq!(tree.root().node_at(&[]).unwrap().name, "Test");
        assert_eq!(tree.root().node_at(&[0, 1]).unwrap().name, "Second");
        assert!(tree.root().node_at(&[5]).is_none());
    }
}

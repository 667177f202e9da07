//! Menu entries and selection parsing for the interactive loop.

use crate::domain::component::Catalog;

/// What the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    InstallRuntime,
    /// Install the catalog component at this index.
    Install(usize),
    /// Remove the catalog component at this index.
    Remove(usize),
    Refresh,
    Quit,
}

/// One numbered line of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
}

/// Menu lines in display order.
///
/// `1` installs the runtime; each component then gets an install and a
/// remove entry, numbered in catalog order.
#[must_use]
pub fn menu_entries(catalog: &Catalog) -> Vec<MenuEntry> {
    let mut entries = vec![MenuEntry {
        key: "1".to_string(),
        label: "Install container runtime".to_string(),
    }];
    for (i, component) in catalog.components().iter().enumerate() {
        entries.push(MenuEntry {
            key: (2 + 2 * i).to_string(),
            label: format!("Install {}", component.title),
        });
        entries.push(MenuEntry {
            key: (3 + 2 * i).to_string(),
            label: format!("Remove {}", component.title),
        });
    }
    entries.push(MenuEntry {
        key: "s".to_string(),
        label: "Refresh status".to_string(),
    });
    entries.push(MenuEntry {
        key: "q".to_string(),
        label: "Quit".to_string(),
    });
    entries
}

/// Parse one line of operator input.
///
/// Returns `None` for anything that is not a menu entry.
#[must_use]
pub fn parse_selection(input: &str, component_count: usize) -> Option<MenuAction> {
    let choice = input.trim().to_ascii_lowercase();
    match choice.as_str() {
        "q" | "quit" | "exit" => return Some(MenuAction::Quit),
        "s" | "status" => return Some(MenuAction::Refresh),
        _ => {}
    }
    let n: usize = choice.parse().ok()?;
    match n {
        1 => Some(MenuAction::InstallRuntime),
        n if n >= 2 && n < 2 + 2 * component_count => {
            let index = (n - 2) / 2;
            if n % 2 == 0 {
                Some(MenuAction::Install(index))
            } else {
                Some(MenuAction::Remove(index))
            }
        }
        _ => None,
    }
}

//! Options panel entries shown on every structural block.

use serde::Serialize;

/// What happens when an option is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionAction {
    /// Handled by the drag layer; activating it does nothing.
    None,
    /// Open the edit form for the block.
    Edit,
    /// Duplicate the block next to itself.
    Duplicate,
    /// Remove the block (after the host UI has confirmed).
    Remove,
}

/// One entry of a block's options panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralOption {
    pub code: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub action: OptionAction,
    pub classes: Vec<&'static str>,
    pub sort: u32,
}

impl StructuralOption {
    fn new(
        code: &'static str,
        title: &'static str,
        action: OptionAction,
        classes: &[&'static str],
        sort: u32,
    ) -> Self {
        Self {
            code,
            icon: "<i></i>",
            title,
            action,
            classes: classes.to_vec(),
            sort,
        }
    }
}

/// The default options of a structural block, ordered by sort order.
pub fn default_options() -> Vec<StructuralOption> {
    let mut options = vec![
        StructuralOption::new("move", "Move", OptionAction::None, &["move-structural"], 10),
        StructuralOption::new("edit", "Edit", OptionAction::Edit, &["edit-block"], 50),
        StructuralOption::new(
            "duplicate",
            "Duplicate",
            OptionAction::Duplicate,
            &["duplicate-structural"],
            60,
        ),
        StructuralOption::new(
            "remove",
            "Remove",
            OptionAction::Remove,
            &["remove-structural"],
            100,
        ),
    ];
    options.sort_by_key(|o| o.sort);
    options
}

/// Look up an option by its code.
pub fn find_option(code: &str) -> Option<StructuralOption> {
    default_options().into_iter().find(|o| o.code == code)
}

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::controller::EntryInput;
use crate::ledger::EntryKind;
use crate::view::{BudgetView, ItemRef};

const ADD_USAGE: &str = "add [inc|exp] <description> <value>";
const DELETE_USAGE: &str = "delete <inc-ID|exp-ID>";
const TYPE_USAGE: &str = "type <inc|exp>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Remove a recorded entry", DELETE_USAGE, cmd_delete),
        CommandEntry::new(
            "type",
            "Select the entry type used when `add` omits it",
            TYPE_USAGE,
            cmd_type,
        ),
        CommandEntry::new("list", "Show incomes and expenses", "list", cmd_list),
        CommandEntry::new("summary", "Show the budget totals", "summary", cmd_summary),
    ]
}

/// `add <kind> <description> <value>`, or `add <description> <value>` for the selected type.
///
/// A short form whose description is itself a type name is a missing argument.
fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, description, value) = match args {
        [kind, description, value] => (kind.parse::<EntryKind>()?, *description, *value),
        [description, _] if description.parse::<EntryKind>().is_ok() => {
            return Err(CommandError::usage(ADD_USAGE));
        }
        [description, value] => (context.controller.view().active_kind(), *description, *value),
        _ => return Err(CommandError::usage(ADD_USAGE)),
    };
    context
        .controller
        .add_item(EntryInput::parse(kind, description, value));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::usage(DELETE_USAGE));
    };
    let item = raw.parse::<ItemRef>()?;
    context.controller.delete_item(item);
    Ok(())
}

fn cmd_type(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::usage(TYPE_USAGE));
    };
    context.controller.change_type(raw.parse::<EntryKind>()?);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("list"));
    }
    context.controller.view().render_lists();
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::usage("summary"));
    }
    let snapshot = context.controller.ledger().snapshot_totals();
    context.controller.view_mut().display_budget(&snapshot);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliMode;
    use crate::config::ConfigManager;
    use crate::ledger::Percentage;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> ShellContext {
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        ShellContext::with_config_manager(CliMode::Script, manager).unwrap()
    }

    #[test]
    fn add_and_delete_flow() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        cmd_add(&mut context, &["inc", "Salary", "1000"]).unwrap();
        cmd_add(&mut context, &["exp", "Rent", "300"]).unwrap();
        cmd_add(&mut context, &["exp", "Food", "200"]).unwrap();

        let ledger = context.controller.ledger();
        assert_eq!(ledger.snapshot_totals().budget, 500.0);
        assert_eq!(
            ledger.expense_percentages(),
            vec![Percentage::Percent(30), Percentage::Percent(20)]
        );

        cmd_delete(&mut context, &["exp-0"]).unwrap();
        let snapshot = context.controller.ledger().snapshot_totals();
        assert_eq!(snapshot.expense_total, 200.0);
        assert_eq!(snapshot.budget, 800.0);
    }

    #[test]
    fn add_uses_selected_type_when_omitted() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        cmd_type(&mut context, &["exp"]).unwrap();
        cmd_add(&mut context, &["Coffee", "4.5"]).unwrap();
        assert_eq!(context.controller.ledger().len(EntryKind::Expense), 1);
    }

    #[test]
    fn invalid_values_are_ignored_without_error() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        cmd_add(&mut context, &["inc", "Salary", "lots"]).unwrap();
        cmd_add(&mut context, &["inc", "", "10"]).unwrap();
        cmd_add(&mut context, &["inc", "Refund", "-10"]).unwrap();
        assert!(context.controller.ledger().is_empty());
    }

    #[test]
    fn malformed_arguments_are_errors() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        assert!(matches!(
            cmd_add(&mut context, &["inc"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            cmd_add(&mut context, &["gift", "Cake", "5"]),
            Err(CommandError::Tracker(_))
        ));
        assert!(cmd_delete(&mut context, &["rent"]).is_err());
        assert!(cmd_delete(&mut context, &[]).is_err());
    }

    #[test]
    fn short_add_with_type_as_description_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        assert!(matches!(
            cmd_add(&mut context, &["exp", "300"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            cmd_add(&mut context, &["Income", "300"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(context.controller.ledger().is_empty());
    }

    #[test]
    fn deleting_unknown_entry_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let mut context = context(&dir);
        cmd_delete(&mut context, &["inc-9"]).unwrap();
        assert!(context.controller.ledger().is_empty());
    }
}

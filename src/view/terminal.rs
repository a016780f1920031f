use colored::Colorize;

use crate::ledger::{BudgetSnapshot, Entry, EntryKind, Percentage};

use super::{
    format::{format_amount, format_budget, percentage_label},
    BudgetView, ItemRef, NumberFormat,
};

#[derive(Debug, Clone)]
struct RenderedItem {
    item: ItemRef,
    description: String,
    value: f64,
    percentage: Option<String>,
}

/// Line-oriented view for the shell.
///
/// Keeps its own copy of the rendered rows so percentage updates can be
/// matched to expenses by position, the same way a page updates its list.
#[derive(Debug)]
pub struct TerminalView {
    format: NumberFormat,
    plain: bool,
    active_kind: EntryKind,
    month: Option<String>,
    incomes: Vec<RenderedItem>,
    expenses: Vec<RenderedItem>,
}

impl TerminalView {
    pub fn new(format: NumberFormat, plain: bool) -> Self {
        Self {
            format,
            plain,
            active_kind: EntryKind::Income,
            month: None,
            incomes: Vec::new(),
            expenses: Vec::new(),
        }
    }

    pub fn set_format(&mut self, format: NumberFormat) {
        self.format = format;
    }

    pub fn set_plain(&mut self, plain: bool) {
        self.plain = plain;
    }

    pub fn active_kind(&self) -> EntryKind {
        self.active_kind
    }

    /// Prompt reflecting the currently selected entry type.
    pub fn prompt(&self) -> String {
        let text = format!("{}> ", self.active_kind.tag());
        if self.plain {
            return text;
        }
        match self.active_kind {
            EntryKind::Income => text.bright_cyan().to_string(),
            EntryKind::Expense => text.bright_red().to_string(),
        }
    }

    /// Prints both lists as currently rendered.
    pub fn render_lists(&self) {
        self.print_section(EntryKind::Income, &self.incomes);
        self.print_section(EntryKind::Expense, &self.expenses);
    }

    fn print_section(&self, kind: EntryKind, rows: &[RenderedItem]) {
        println!("{}", self.heading(&format!("{} ({})", kind.label(), rows.len())));
        if rows.is_empty() {
            println!("  (none)");
            return;
        }
        for row in rows {
            println!("{}", self.row_line(row));
        }
    }

    fn row_line(&self, row: &RenderedItem) -> String {
        let mut line = format!(
            "  {:<8} {:<24} {:>16}",
            row.item.to_string(),
            row.description,
            self.tint(
                row.item.kind,
                &format_amount(row.value, row.item.kind, &self.format)
            )
        );
        if let Some(label) = &row.percentage {
            line.push_str(&format!("  {label:>5}"));
        }
        line
    }

    fn heading(&self, title: &str) -> String {
        let text = format!("=== {title} ===");
        if self.plain {
            text
        } else {
            text.bold().to_string()
        }
    }

    fn tint(&self, kind: EntryKind, text: &str) -> String {
        if self.plain {
            return text.to_string();
        }
        match kind {
            EntryKind::Income => text.green().to_string(),
            EntryKind::Expense => text.red().to_string(),
        }
    }

    fn rows_mut(&mut self, kind: EntryKind) -> &mut Vec<RenderedItem> {
        match kind {
            EntryKind::Income => &mut self.incomes,
            EntryKind::Expense => &mut self.expenses,
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new(NumberFormat::default(), false)
    }
}

impl BudgetView for TerminalView {
    fn add_list_item(&mut self, entry: &Entry) {
        let row = RenderedItem {
            item: ItemRef::from(entry),
            description: entry.description().to_string(),
            value: entry.value(),
            percentage: entry.percentage().map(percentage_label),
        };
        println!("Added {}", self.row_line(&row).trim_start());
        self.rows_mut(entry.kind()).push(row);
    }

    fn delete_list_item(&mut self, item: ItemRef) {
        let rows = self.rows_mut(item.kind);
        if let Some(index) = rows.iter().position(|row| row.item == item) {
            let row = rows.remove(index);
            println!("Removed {} {}", row.item, row.description);
        }
    }

    fn clear_fields(&mut self) {
        tracing::trace!("input fields cleared");
    }

    fn display_budget(&mut self, snapshot: &BudgetSnapshot) {
        let title = self.month.as_deref().unwrap_or("Budget");
        println!("{}", self.heading(title));
        println!("Available budget: {}", format_budget(snapshot, &self.format));
        println!(
            "Income:           {}",
            self.tint(
                EntryKind::Income,
                &format_amount(snapshot.income_total, EntryKind::Income, &self.format)
            )
        );
        println!(
            "Expenses:         {}  {}",
            self.tint(
                EntryKind::Expense,
                &format_amount(snapshot.expense_total, EntryKind::Expense, &self.format)
            ),
            percentage_label(snapshot.overall_percentage)
        );
    }

    fn display_percentages(&mut self, percentages: &[Percentage]) {
        for (row, percentage) in self.expenses.iter_mut().zip(percentages) {
            row.percentage = Some(percentage_label(*percentage));
        }
    }

    fn display_month(&mut self, label: &str) {
        self.month = Some(label.to_string());
    }

    fn changed_type(&mut self, kind: EntryKind) {
        self.active_kind = kind;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Expense, Income};

    #[test]
    fn percentages_follow_expense_order() {
        let mut view = TerminalView::new(NumberFormat::default(), true);
        view.add_list_item(&Entry::from(Expense::new(0, "Rent", 300.0)));
        view.add_list_item(&Entry::from(Expense::new(1, "Food", 200.0)));
        view.display_percentages(&[Percentage::Percent(30), Percentage::Percent(20)]);

        let labels: Vec<_> = view
            .expenses
            .iter()
            .filter_map(|row| row.percentage.clone())
            .collect();
        assert_eq!(labels, vec!["30%", "20%"]);
    }

    #[test]
    fn delete_removes_only_matching_kind() {
        let mut view = TerminalView::new(NumberFormat::default(), true);
        view.add_list_item(&Entry::from(Income::new(0, "Salary", 1000.0)));
        view.add_list_item(&Entry::from(Expense::new(0, "Rent", 300.0)));
        view.delete_list_item(ItemRef::new(EntryKind::Expense, 0));

        assert_eq!(view.incomes.len(), 1);
        assert!(view.expenses.is_empty());
    }

    #[test]
    fn plain_prompt_tracks_selected_type() {
        let mut view = TerminalView::new(NumberFormat::default(), true);
        assert_eq!(view.prompt(), "inc> ");
        view.changed_type(EntryKind::Expense);
        assert_eq!(view.prompt(), "exp> ");
        assert_eq!(view.active_kind(), EntryKind::Expense);
    }

    #[test]
    fn rows_show_formatted_amounts() {
        let view = TerminalView::new(NumberFormat::default(), true);
        let row = RenderedItem {
            item: ItemRef::new(EntryKind::Income, 2),
            description: "Bonus".into(),
            value: 1500.0,
            percentage: None,
        };
        let line = view.row_line(&row);
        assert!(line.contains("inc-2"));
        assert!(line.contains("+ 1,500.00"));
    }

    #[test]
    fn rows_pick_up_format_changes() {
        let mut view = TerminalView::new(NumberFormat::default(), true);
        view.add_list_item(&Entry::from(Income::new(0, "Salary", 2500.5)));
        view.set_format(NumberFormat {
            decimal_separator: ',',
            grouping_separator: ' ',
        });
        let line = view.row_line(&view.incomes[0]);
        assert!(line.contains("+ 2 500,50"), "unexpected row: {line}");
    }
}

use crate::commands::Out;
use crate::model::TargetBudget;
use crate::report::targets_table;
use crate::Result;

/// Shows the target share of income for each category.
pub fn targets(budget: &TargetBudget) -> Result<Out<TargetBudget>> {
    Ok(Out::new(targets_table(budget), budget.clone()))
}

use crate::args::GoalArgs;
use crate::commands::Out;
use crate::model::SavingsGoal;
use crate::{Config, Result};

/// Shows the savings goal or, when a value is given, replaces it. A value that is not a number
/// sets the goal to zero.
pub async fn goal(config: Config, args: GoalArgs) -> Result<Out<SavingsGoal>> {
    let mut ledger = config.ledger().await?;
    let Some(value) = args.value() else {
        let goal = ledger.savings_goal();
        let summary = ledger.summary();
        let message = format!("Savings goal is {goal}, {} reached", summary.progress);
        return Ok(Out::new(message, goal).with_report(goal.amount().value().to_string()));
    };

    let goal = ledger.set_savings_goal_from_input(value).await?;
    Ok(Out::new(format!("Savings goal set to {goal}"), goal))
}

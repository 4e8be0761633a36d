use crate::analysis::Analysis;
use crate::args::{AnalyzeArgs, ManualArgs, ReportArgs};
use crate::commands::Out;
use crate::model::TargetBudget;
use crate::report::Report;
use crate::source::InputSource;
use crate::Result;
use tracing::debug;

/// Analyzes the CSV file named in `args`, or the bundled sample data.
///
/// # Errors
/// - Returns an error if neither a file nor the sample is selected, or if the file cannot be read
///   or parsed.
pub fn analyze(budget: &TargetBudget, args: &AnalyzeArgs) -> Result<Out<Report>> {
    let source = InputSource::select(args.file().map(|p| p.to_path_buf()), args.use_sample())?;
    run(budget, &source, args.report())
}

/// Analyzes the one-month scenario given in `args`.
pub fn manual(budget: &TargetBudget, args: &ManualArgs) -> Result<Out<Report>> {
    let source = InputSource::Manual(args.scenario());
    run(budget, &source, args.report())
}

fn run(budget: &TargetBudget, source: &InputSource, args: &ReportArgs) -> Result<Out<Report>> {
    let transactions = source.resolve()?;
    let analysis = Analysis::run(&transactions, budget, args.savings_rate());
    let report = Report::new(source, args.savings_rate(), analysis);
    debug!("Rendering report as {}", args.format());
    let message = report.render(args.format())?;
    Ok(Out::new(message, report))
}

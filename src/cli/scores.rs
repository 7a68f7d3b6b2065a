use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::{ClassificationMode, MatchClass, TiePolicy, ValueMode};
use crate::matching::scoring::ScoringTable;

#[derive(Args)]
pub struct ScoresArgs {
    /// Only show this classification mode
    #[arg(long, value_enum)]
    pub classification: Option<ClassificationMode>,

    /// Only show this value mode
    #[arg(long, value_enum)]
    pub value: Option<ValueMode>,

    /// Only show this tiebreaker
    #[arg(long, value_enum)]
    pub tiebreaker: Option<TiePolicy>,
}

pub fn run(args: ScoresArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let tables = select_tables(&args);

    match format {
        OutputFormat::Text => print_text_tables(&tables),
        OutputFormat::Json => print_json_tables(&tables)?,
        OutputFormat::Tsv => print_tsv_tables(&tables),
    }

    Ok(())
}

/// Every table matching the filters, in enum order
fn select_tables(args: &ScoresArgs) -> Vec<ScoringTable> {
    let mut tables = Vec::new();
    for classification in ClassificationMode::ALL {
        if args.classification.is_some_and(|c| c != classification) {
            continue;
        }
        for value_mode in ValueMode::ALL {
            if args.value.is_some_and(|v| v != value_mode) {
                continue;
            }
            for tie_policy in TiePolicy::ALL {
                if args.tiebreaker.is_some_and(|t| t != tie_policy) {
                    continue;
                }
                tables.push(ScoringTable::new(classification, value_mode, tie_policy));
            }
        }
    }
    tables
}

fn print_text_tables(tables: &[ScoringTable]) {
    println!("Scoring Table");
    println!("{}", "=".repeat(60));

    for table in tables {
        println!(
            "\n{} / {} / {}",
            table.classification, table.value_mode, table.tie_policy
        );
        for class in MatchClass::ALL {
            println!("  {:<14} {:>3}", class.to_string(), table.unit_score(class));
        }
    }

    if tables
        .iter()
        .any(|table| table.value_mode == ValueMode::Counts)
    {
        println!("\nCounts scores are multiplied by the read support of the winning call.");
    }
}

fn print_json_tables(tables: &[ScoringTable]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = tables
        .iter()
        .map(|table| {
            let scores: serde_json::Map<String, serde_json::Value> = MatchClass::ALL
                .iter()
                .map(|class| (class.to_string(), table.unit_score(*class).into()))
                .collect();
            serde_json::json!({
                "classification": table.classification,
                "value_mode": table.value_mode,
                "tie_policy": table.tie_policy,
                "scores": scores,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_tables(tables: &[ScoringTable]) {
    let classes: Vec<String> = MatchClass::ALL.iter().map(ToString::to_string).collect();
    println!("classification\tvalue_mode\ttie_policy\t{}", classes.join("\t"));

    for table in tables {
        let scores: Vec<String> = MatchClass::ALL
            .iter()
            .map(|class| table.unit_score(*class).to_string())
            .collect();
        println!(
            "{}\t{}\t{}\t{}",
            table.classification,
            table.value_mode,
            table.tie_policy,
            scores.join("\t")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(
        classification: Option<ClassificationMode>,
        value: Option<ValueMode>,
        tiebreaker: Option<TiePolicy>,
    ) -> ScoresArgs {
        ScoresArgs {
            classification,
            value,
            tiebreaker,
        }
    }

    #[test]
    fn test_select_all_tables() {
        assert_eq!(select_tables(&args(None, None, None)).len(), 36);
    }

    #[test]
    fn test_select_filtered_tables() {
        let tables = select_tables(&args(Some(ClassificationMode::PassFail), None, None));
        assert_eq!(tables.len(), 9);
        assert!(tables
            .iter()
            .all(|t| t.classification == ClassificationMode::PassFail));

        let tables = select_tables(&args(
            Some(ClassificationMode::PassFail),
            Some(ValueMode::Flags),
            Some(TiePolicy::None),
        ));
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].unit_score(MatchClass::ExactTied), -4);
    }
}

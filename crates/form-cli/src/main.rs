use clap::{Parser, Subcommand};
use form_spec::{
    FormSchema, Locale, StepPlan, ValidationReport, answers_schema, compile_form, example_answers,
    render_text, resolve_visibility,
};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Schema-driven form toolbox",
    long_about = "Validates answer sets, renders form summaries, and emits derived artifacts for schema-driven multi-step forms"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate an answers file against a form definition.
    Validate {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Step plan JSON mapping wizard pages to schema step ids.
        #[arg(long, value_name = "PLAN")]
        plan: Option<PathBuf>,
        /// Validate only the steps behind one wizard page of the plan.
        #[arg(long, value_name = "PAGE", requires = "plan")]
        page: Option<String>,
    },
    /// Render a plain-text summary of the form against current answers.
    Show {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Optional JSON file containing current answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Locale used to resolve labels.
        #[arg(long, default_value = "pt-BR")]
        locale: Locale,
    },
    /// Emit a JSON Schema for the answer bag of the active fields.
    Schema {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Optional answers used to resolve field visibility.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
    },
    /// Emit an example answers document for the active fields.
    Example {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Optional answers used to resolve field visibility.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Validate {
            schema,
            answers,
            plan,
            page,
        } => run_validate(schema, answers, plan, page),
        Command::Show {
            schema,
            answers,
            locale,
        } => run_show(schema, answers, locale),
        Command::Schema { schema, answers } => run_schema(schema, answers),
        Command::Example { schema, answers } => run_example(schema, answers),
    }
}

fn load_form(path: &Path) -> CliResult<FormSchema> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn load_answers(path: Option<PathBuf>) -> CliResult<Value> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        }
        None => Ok(Value::Object(Map::new())),
    }
}

fn run_validate(
    schema_path: PathBuf,
    answers_path: PathBuf,
    plan_path: Option<PathBuf>,
    page: Option<String>,
) -> CliResult<()> {
    let mut form = load_form(&schema_path)?;
    if let (Some(plan_path), Some(page)) = (plan_path, page) {
        let plan_json = fs::read_to_string(plan_path)?;
        let plan: StepPlan = serde_json::from_str(&plan_json)?;
        form = plan.subset(&form, &page);
    }
    let answers = load_answers(Some(answers_path))?;

    let compiled = compile_form(&form)?;
    let report = compiled.validate(&answers);
    println!(
        "Validation result: {}",
        if report.valid { "valid" } else { "invalid" }
    );
    describe_report(&report);

    if report.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_report(report: &ValidationReport) {
    if !report.errors.is_empty() {
        println!("Errors:");
        for error in &report.errors {
            println!("  {} - {}", error.field, error.code.as_str());
        }
    }
}

fn run_show(schema_path: PathBuf, answers_path: Option<PathBuf>, locale: Locale) -> CliResult<()> {
    let form = load_form(&schema_path)?;
    let answers = load_answers(answers_path)?;
    println!("{}", render_text(&form, &answers, locale));
    Ok(())
}

fn run_schema(schema_path: PathBuf, answers_path: Option<PathBuf>) -> CliResult<()> {
    let form = load_form(&schema_path)?;
    let answers = load_answers(answers_path)?;
    let visibility = resolve_visibility(&form, &answers);
    let schema = answers_schema(&form, &visibility);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_example(schema_path: PathBuf, answers_path: Option<PathBuf>) -> CliResult<()> {
    let form = load_form(&schema_path)?;
    let answers = load_answers(answers_path)?;
    let visibility = resolve_visibility(&form, &answers);
    let example = example_answers(&form, &visibility);
    println!("{}", serde_json::to_string_pretty(&example)?);
    Ok(())
}

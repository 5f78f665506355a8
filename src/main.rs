use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use credit_engine::config::{AppConfig, DataConfig};
use credit_engine::error::AppError;
use credit_engine::telemetry;
use credit_engine::workflows::ingest::LendingImporter;
use credit_engine::workflows::lending::{
    compute_installment, CustomerId, CustomerRepository, InMemoryLendingStore, LendingService,
    LendingError, LoanApplication, LoanApplicationPayload, LoanId, NewCustomer,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "credit-desk",
    about = "Score customers and decide consumer loan applications from the command line",
    version
)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct DataArgs {
    /// Customer CSV export loaded before the command runs
    #[arg(long, global = true)]
    customers: Option<PathBuf>,
    /// Loan CSV export loaded after the customers
    #[arg(long, global = true)]
    loans: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the monthly installment for arbitrary terms
    Installment(InstallmentArgs),
    /// Report a customer's credit score with its components
    Score {
        #[arg(long)]
        customer_id: u64,
    },
    /// Decide an application without booking a loan
    Check(ApplicationArgs),
    /// Decide an application and book the loan when approved
    Apply(ApplicationArgs),
    /// Register a customer and derive the approved limit
    Register(RegisterArgs),
    /// Show a single loan with its borrower
    ViewLoan {
        #[arg(long)]
        loan_id: u64,
    },
    /// List a customer's loans with repayments left
    Loans {
        #[arg(long)]
        customer_id: u64,
    },
    /// List loaded customers
    Customers {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Args, Debug)]
struct InstallmentArgs {
    #[arg(long)]
    principal: f64,
    /// Annual rate in percent
    #[arg(long)]
    rate: f64,
    /// Tenure in months
    #[arg(long)]
    tenure: u32,
}

#[derive(Args, Debug)]
struct ApplicationArgs {
    /// Raw JSON request body; takes precedence over the individual flags
    #[arg(long)]
    json: Option<String>,
    #[arg(long)]
    customer_id: Option<String>,
    #[arg(long)]
    loan_amount: Option<String>,
    #[arg(long)]
    interest_rate: Option<String>,
    #[arg(long)]
    tenure: Option<String>,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    age: u32,
    #[arg(long)]
    phone_number: String,
    #[arg(long)]
    monthly_salary: u64,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(path) = cli.data.customers {
        config.data.customer_data_path = Some(path);
    }
    if let Some(path) = cli.data.loans {
        config.data.loan_data_path = Some(path);
    }

    let store = Arc::new(InMemoryLendingStore::new());
    load_datasets(&config.data, &store)?;

    let today = cli.today;
    let service = LendingService::new(Arc::clone(&store), config.policy.clone()).with_clock(
        Arc::new(move || today.unwrap_or_else(|| Local::now().date_naive())),
    );
    info!(
        ?config.environment,
        low_score_policy = service.policy().low_score.label(),
        "credit desk ready"
    );

    match cli.command {
        Command::Installment(args) => {
            let monthly_installment = compute_installment(args.principal, args.rate, args.tenure)
                .map_err(LendingError::from)?;
            print_json(&json!({
                "principal": args.principal,
                "interest_rate": args.rate,
                "tenure": args.tenure,
                "monthly_installment": monthly_installment,
            }))
        }
        Command::Score { customer_id } => print_json(&service.score(CustomerId(customer_id))?),
        Command::Check(args) => {
            let application = application_from_args(args)?;
            print_json(&service.check_eligibility(&application)?)
        }
        Command::Apply(args) => {
            let application = application_from_args(args)?;
            print_json(&service.create_loan(&application)?)
        }
        Command::Register(args) => {
            let customer = service.register(NewCustomer {
                first_name: args.first_name,
                last_name: args.last_name,
                age: args.age,
                phone_number: args.phone_number,
                monthly_salary: args.monthly_salary,
            })?;
            print_json(&customer)
        }
        Command::ViewLoan { loan_id } => print_json(&service.view_loan(LoanId(loan_id))?),
        Command::Loans { customer_id } => {
            print_json(&service.loans_for_customer(CustomerId(customer_id))?)
        }
        Command::Customers { limit } => {
            let customers = store.customers(limit).map_err(LendingError::from)?;
            print_json(&customers)
        }
    }
}

fn load_datasets(data: &DataConfig, store: &InMemoryLendingStore) -> Result<(), AppError> {
    if let Some(path) = &data.customer_data_path {
        let summary = LendingImporter::customers_from_path(path, store)?;
        info!(path = %path.display(), imported = summary.imported, "customers loaded");
    }
    if let Some(path) = &data.loan_data_path {
        let summary = LendingImporter::loans_from_path(path, store)?;
        info!(path = %path.display(), imported = summary.imported, "loans loaded");
    }
    Ok(())
}

fn application_from_args(args: ApplicationArgs) -> Result<LoanApplication, AppError> {
    let payload = match args.json {
        Some(body) => serde_json::from_str::<LoanApplicationPayload>(&body)?,
        None => LoanApplicationPayload {
            customer_id: args.customer_id.map(Value::String),
            loan_amount: args.loan_amount.map(Value::String),
            interest_rate: args.interest_rate.map(Value::String),
            tenure: args.tenure.map(Value::String),
        },
    };
    Ok(LoanApplication::try_from(payload)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(json: Option<&str>) -> ApplicationArgs {
        ApplicationArgs {
            json: json.map(str::to_string),
            customer_id: Some("4".to_string()),
            loan_amount: Some("50000".to_string()),
            interest_rate: Some("14.5".to_string()),
            tenure: Some("24".to_string()),
        }
    }

    #[test]
    fn flag_arguments_become_a_validated_application() {
        let application = application_from_args(args(None)).expect("valid flags");
        assert_eq!(application.customer_id, CustomerId(4));
        assert_eq!(application.tenure, 24);
        assert_eq!(application.interest_rate, 14.5);
    }

    #[test]
    fn json_body_takes_precedence_over_flags() {
        let body = r#"{"customer_id": 9, "loan_amount": 1000, "interest_rate": 10, "tenure": 6}"#;
        let application = application_from_args(args(Some(body))).expect("valid json");
        assert_eq!(application.customer_id, CustomerId(9));
        assert_eq!(application.tenure, 6);
    }

    #[test]
    fn missing_fields_exit_with_validation_code() {
        let err = application_from_args(ApplicationArgs {
            json: Some(r#"{"customer_id": 9}"#.to_string()),
            customer_id: None,
            loan_amount: None,
            interest_rate: None,
            tenure: None,
        })
        .expect_err("incomplete body rejected");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn cli_parses_global_dataset_flags() {
        let cli = Cli::try_parse_from([
            "credit-desk",
            "score",
            "--customer-id",
            "7",
            "--customers",
            "customer_data.csv",
            "--today",
            "2025-06-15",
        ])
        .expect("arguments parse");
        assert!(matches!(cli.command, Command::Score { customer_id: 7 }));
        assert_eq!(cli.data.customers, Some(PathBuf::from("customer_data.csv")));
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2025, 6, 15));
    }
}

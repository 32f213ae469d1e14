//! AWS Lambda handler for evaluating one payoff plan
//!
//! Accepts calculator inputs as a JSON body through API Gateway and returns both
//! schedules, the comparison and the display-ready table.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use payoff_planner::report::{format_payoff_date, opportunity_message, schedule_table, Currency, ScheduleRow};
use payoff_planner::{CalculatorInputs, Evaluation, PlannerError, ScenarioRunner};
use serde::{Deserialize, Serialize};

/// Calculator inputs plus presentation options
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(flatten)]
    pub inputs: CalculatorInputs,

    #[serde(default)]
    pub currency: Currency,

    /// Count payoff dates from this date instead of today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// Include the full per-period schedules (default: true)
    #[serde(default = "default_true")]
    pub include_schedules: bool,
}

fn default_true() -> bool { true }

/// Output for one evaluation
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub currency: Currency,
    pub loan_amount: f64,
    pub standard_payoff: String,
    pub accelerated_payoff: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_message: Option<String>,
    pub table: Vec<ScheduleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
    pub execution_time_ms: u64,
}

fn cors_response(status: i64, body: Option<String>) -> Result<ApiGatewayProxyResponse, Error> {
    let mut response = ApiGatewayProxyResponse {
        status_code: status,
        body: body.map(Body::Text),
        ..Default::default()
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status: i64, messages: Vec<String>) -> Result<ApiGatewayProxyResponse, Error> {
    let body = serde_json::json!({ "errors": messages });
    cors_response(status, Some(body.to_string()))
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.http_method.as_str() == "OPTIONS" {
        return cors_response(200, None);
    }

    if request.is_base64_encoded {
        return error_response(400, vec!["Base64-encoded bodies are not supported".to_string()]);
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let plan: PlanRequest = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => return error_response(400, vec![format!("Invalid JSON: {}", e)]),
    };

    let runner = match plan.as_of {
        Some(date) => ScenarioRunner::with_as_of(date),
        None => ScenarioRunner::new(),
    };

    let evaluation = match runner.evaluate(&plan.inputs) {
        Ok(e) => e,
        Err(PlannerError::Validation(errors)) => return error_response(400, errors.messages()),
        Err(e) => return error_response(500, vec![e.to_string()]),
    };

    log::info!(
        "evaluated {} loan of {:.2}: payoff {} vs {}",
        evaluation.frequency,
        plan.inputs.loan_amount(),
        evaluation.standard.payoff_period_index,
        evaluation.accelerated.payoff_period_index
    );

    let summary = &evaluation.summary;
    let response = PlanResponse {
        currency: plan.currency,
        loan_amount: plan.inputs.loan_amount(),
        standard_payoff: format_payoff_date(summary.standard_payoff_date),
        accelerated_payoff: format_payoff_date(summary.accelerated_payoff_date),
        opportunity_message: evaluation
            .show_opportunity_cost
            .then(|| opportunity_message(&summary.opportunity_cost, plan.currency)),
        table: schedule_table(&evaluation.standard, &evaluation.accelerated),
        evaluation: plan.include_schedules.then_some(evaluation),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    cors_response(200, Some(serde_json::to_string(&response)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
